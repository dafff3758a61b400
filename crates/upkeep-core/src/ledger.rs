use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::AssetCategory;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRecord {
    #[serde(default)]
    pub session: u64,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub old_version: String,
    pub new_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_result: Option<String>,
}

impl UpdateRecord {
    pub fn asset_name(&self) -> &str {
        self.name.as_deref().unwrap_or("core")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub core: Vec<UpdateRecord>,
    #[serde(default)]
    pub plugin: Vec<UpdateRecord>,
    #[serde(default)]
    pub theme: Vec<UpdateRecord>,
    #[serde(default)]
    pub translation: Vec<UpdateRecord>,
}

impl Ledger {
    pub fn new(website: Option<String>, date: Option<String>) -> Self {
        Ledger {
            website,
            date,
            ..Ledger::default()
        }
    }

    pub fn records(&self, category: AssetCategory) -> &[UpdateRecord] {
        match category {
            AssetCategory::Core => &self.core,
            AssetCategory::Plugin => &self.plugin,
            AssetCategory::Theme => &self.theme,
            AssetCategory::Translation => &self.translation,
        }
    }

    pub fn append(&mut self, category: AssetCategory, record: UpdateRecord) {
        match category {
            AssetCategory::Core => self.core.push(record),
            AssetCategory::Plugin => self.plugin.push(record),
            AssetCategory::Theme => self.theme.push(record),
            AssetCategory::Translation => self.translation.push(record),
        }
    }

    pub fn version_recorded(
        &self,
        category: AssetCategory,
        name: &str,
        new_version: &str,
    ) -> bool {
        self.records(category)
            .iter()
            .any(|record| record.asset_name() == name && record.new_version == new_version)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("content is not update-ledger JSON")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed serializing update ledger")
    }
}
