use anyhow::Result;
use serde::Deserialize;

use crate::{AssetCategory, AssetId};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PendingUpdate {
    pub name: String,
    pub old_version: String,
    pub new_version: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AssetMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DowngradeRequest {
    pub asset: AssetId,
    pub version: String,
    pub force: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationScope {
    Core,
    Plugin,
    Theme,
}

impl TranslationScope {
    pub const ALL: [TranslationScope; 3] = [
        TranslationScope::Core,
        TranslationScope::Plugin,
        TranslationScope::Theme,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Plugin => "plugin",
            Self::Theme => "theme",
        }
    }
}

pub trait UpdateExecutor {
    fn check_core_version(&self) -> Result<Option<String>>;
    fn installed_core_version(&self) -> Result<String>;
    fn site_url(&self) -> Result<String>;
    fn update_core(&self) -> Result<String>;
    fn update_core_database(&self) -> Result<String>;
    fn update_all(&self, category: AssetCategory) -> Result<Vec<PendingUpdate>>;
    fn asset_metadata(&self, category: AssetCategory, name: &str) -> Result<AssetMetadata>;
    fn downgrade(&self, request: &DowngradeRequest) -> Result<String>;
    fn describe_downgrade(&self, request: &DowngradeRequest) -> String;
    fn update_translations(&self, scope: TranslationScope) -> Result<String>;
    fn optimize_storage(&self) -> Result<String>;
}
