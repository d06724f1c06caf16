//! Activity log domain - audit trail of chat and e-bazaar changes.

pub mod dirty;
pub mod models;
pub mod store;

use serde::Serialize;
use tracing::warn;

use crate::common::UserId;
use crate::kernel::BaseActivityLog;

pub use models::{ActivityEvent, LogName, NewActivity};
pub use store::PgActivityLog;

/// Record a change to `subject`, logging (not propagating) any failure.
///
/// Nothing is written when no tracked attribute changed.
pub async fn record_change<T: Serialize>(
    log: &dyn BaseActivityLog,
    log_name: LogName,
    event: ActivityEvent,
    subject_id: uuid::Uuid,
    causer_id: Option<UserId>,
    before: Option<&T>,
    after: Option<&T>,
) {
    let Some(properties) = dirty::changed_attributes(before, after, dirty::IGNORED_ATTRIBUTES)
    else {
        return;
    };

    let entry = NewActivity::new(log_name, event, subject_id, causer_id, properties);
    if let Err(e) = log.record(entry).await {
        warn!(
            error = %e,
            log_name = log_name.as_str(),
            event = event.as_str(),
            subject_id = %subject_id,
            "Failed to write activity log entry"
        );
    }
}
