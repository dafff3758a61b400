use crate::{AssetCategory, AssetMetadata, Ledger, PendingUpdate, UpdateRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordStamp {
    pub session: u64,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreUpdateOutcome {
    pub old_version: String,
    pub new_version: String,
    pub result: String,
    pub db_result: String,
}

pub fn record_asset_update(
    ledger: &mut Ledger,
    category: AssetCategory,
    stamp: &RecordStamp,
    pending: &PendingUpdate,
    metadata: AssetMetadata,
) -> bool {
    if ledger.version_recorded(category, &pending.name, &pending.new_version) {
        return false;
    }

    ledger.append(
        category,
        UpdateRecord {
            session: stamp.session,
            date: stamp.date.clone(),
            name: Some(pending.name.clone()),
            old_version: pending.old_version.clone(),
            new_version: pending.new_version.clone(),
            title: metadata.title,
            author: metadata.author,
            status: metadata.status.or_else(|| pending.status.clone()),
            description: metadata.description,
            ..UpdateRecord::default()
        },
    );
    true
}

pub fn record_core_update(
    ledger: &mut Ledger,
    stamp: &RecordStamp,
    outcome: &CoreUpdateOutcome,
) -> bool {
    if ledger.version_recorded(AssetCategory::Core, "core", &outcome.new_version) {
        return false;
    }

    ledger.append(
        AssetCategory::Core,
        UpdateRecord {
            session: stamp.session,
            date: stamp.date.clone(),
            old_version: outcome.old_version.clone(),
            new_version: outcome.new_version.clone(),
            result: Some(outcome.result.clone()),
            db_result: Some(outcome.db_result.clone()),
            ..UpdateRecord::default()
        },
    );
    true
}
