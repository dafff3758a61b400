use crate::{AssetCategory, Ledger};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub session: u64,
    pub date: String,
    pub count: u64,
    pub assets: String,
}

pub fn session_summary(ledger: &Ledger, session: u64) -> Option<SessionSummary> {
    let mut date = String::new();
    let mut names = Vec::new();

    for category in AssetCategory::ALL {
        for record in ledger.records(category) {
            if record.session != session {
                continue;
            }
            date = record.date.clone();
            names.push(record.asset_name().to_string());
        }
    }

    if names.is_empty() {
        return None;
    }

    Some(SessionSummary {
        session,
        date,
        count: names.len() as u64,
        assets: names.join(","),
    })
}

pub fn list_sessions(ledger: &Ledger, current_session: u64) -> Vec<SessionSummary> {
    (1..current_session)
        .filter_map(|session| session_summary(ledger, session))
        .collect()
}
