mod catalog;
mod category;
mod executor;
mod ledger;
mod planner;
mod recorder;
mod session;

pub use catalog::{list_sessions, session_summary, SessionSummary};
pub use category::AssetCategory;
pub use executor::{
    AssetMetadata, DowngradeRequest, PendingUpdate, TranslationScope, UpdateExecutor,
};
pub use ledger::{Ledger, UpdateRecord};
pub use planner::{plan_rollback, AssetId, PlanEntry, RollbackPlan, SessionTarget};
pub use recorder::{record_asset_update, record_core_update, CoreUpdateOutcome, RecordStamp};
pub use session::current_session;
