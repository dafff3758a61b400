use crate::{AssetCategory, Ledger};

pub fn current_session(ledger: &Ledger) -> u64 {
    let mut latest = 0;
    for category in AssetCategory::ALL {
        for record in ledger.records(category) {
            if record.session > latest {
                latest = record.session;
            }
        }
    }
    latest + 1
}
