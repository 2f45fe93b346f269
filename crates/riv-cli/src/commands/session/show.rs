use chrono::{DateTime, Utc};
use riv_session::SessionStore;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
pub(super) struct SessionStatus {
    pub valid: bool,
    pub warehouse_id: Option<String>,
    pub associate: Option<String>,
    pub session_id: Option<String>,
    pub last_captured: Option<DateTime<Utc>>,
    pub age_minutes: Option<i64>,
    pub max_age_hours: i64,
    pub path: Option<String>,
}

impl SessionStatus {
    pub(super) fn of(store: &SessionStore, now: DateTime<Utc>) -> Self {
        let session = store.get();
        Self {
            valid: session.is_valid_at(now, store.max_age()),
            age_minutes: session
                .last_captured
                .map(|captured| (now - captured).num_minutes()),
            warehouse_id: session.warehouse_id,
            associate: session.associate,
            session_id: session.session_id,
            last_captured: session.last_captured,
            max_age_hours: store.max_age().num_hours(),
            path: store.path().map(|p| p.display().to_string()),
        }
    }
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&SessionStatus::of(&ctx.session, Utc::now()), flags.format)
}
