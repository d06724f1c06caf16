//! Delete e-bazaar action

use tracing::{info, warn};

use super::find_or_404;
use crate::common::{Actor, ApiError, Capability, EBazaarId, Resource, StoreError};
use crate::domains::activity_log::{record_change, ActivityEvent, LogName};
use crate::kernel::ServerDeps;

/// Hard-delete an e-bazaar. Attached media rows and saves go with it; stored
/// files are removed afterwards on a best-effort basis.
pub async fn delete_ebazaar(
    actor: &Actor,
    id: EBazaarId,
    deps: &ServerDeps,
) -> Result<(), ApiError> {
    actor.can(Capability::Delete).on(Resource::EBazaar).check()?;

    let before = find_or_404(id, deps).await?;
    let media = deps.ebazaars.delete(id).await.map_err(|e| match e {
        StoreError::NotFound => ApiError::NotFound("E-Bazaar"),
        other => other.into(),
    })?;
    info!(ebazaar_id = %id, media = media.len(), "E-bazaar deleted");

    for item in &media {
        let Some(path) = &item.path else { continue };
        if let Err(e) = deps.media_storage.delete(path).await {
            warn!(media_id = %item.id, path = %path, error = %e, "Failed to remove media file");
        }
    }

    record_change(
        deps.activity_log.as_ref(),
        LogName::Ebazaar,
        ActivityEvent::Deleted,
        id.into_uuid(),
        Some(actor.user_id()),
        Some(&before),
        None,
    )
    .await;

    Ok(())
}
