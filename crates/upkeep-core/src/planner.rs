use anyhow::Result;

use crate::{current_session, AssetCategory, Ledger};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetId {
    Core,
    Named {
        category: AssetCategory,
        name: String,
    },
}

impl AssetId {
    pub fn name(&self) -> &str {
        match self {
            AssetId::Core => "core",
            AssetId::Named { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTarget {
    Latest,
    Session(u64),
}

impl SessionTarget {
    pub fn parse(input: &str) -> Option<Self> {
        let normalized = input.trim();
        if normalized.eq_ignore_ascii_case("latest") {
            return Some(SessionTarget::Latest);
        }
        normalized.parse::<u64>().ok().map(SessionTarget::Session)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    pub asset: AssetId,
    pub old_version: String,
    pub new_version: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollbackPlan {
    pub session: u64,
    pub entries: Vec<PlanEntry>,
}

pub fn plan_rollback(ledger: &Ledger, target: SessionTarget) -> Result<RollbackPlan> {
    let current = current_session(ledger);
    let session = match target {
        SessionTarget::Latest => current.saturating_sub(1),
        SessionTarget::Session(session) => session,
    };

    if session < 1 || session >= current {
        anyhow::bail!("no such session {session} in the update ledger");
    }

    let mut entries = Vec::new();
    for category in AssetCategory::ALL {
        for record in ledger.records(category) {
            if record.session != session {
                continue;
            }
            let asset = if category == AssetCategory::Core {
                AssetId::Core
            } else {
                AssetId::Named {
                    category,
                    name: record.asset_name().to_string(),
                }
            };
            entries.push(PlanEntry {
                asset,
                old_version: record.old_version.clone(),
                new_version: record.new_version.clone(),
            });
        }
    }

    if entries.is_empty() {
        anyhow::bail!("nothing to roll back in session {session}");
    }

    Ok(RollbackPlan { session, entries })
}
