//! Update e-bazaar action

use tracing::info;

use super::{find_or_404, present_one};
use crate::common::{Actor, ApiError, Capability, EBazaarId, Resource, StoreError};
use crate::domains::activity_log::{record_change, ActivityEvent, LogName};
use crate::domains::ebazaar::data::EBazaarData;
use crate::domains::ebazaar::requests::EBazaarPayload;
use crate::kernel::ServerDeps;

/// Rewrite an e-bazaar's fields from a full payload. Media references in the
/// payload are ignored; media is managed through the upload endpoints.
pub async fn update_ebazaar(
    actor: &Actor,
    id: EBazaarId,
    payload: EBazaarPayload,
    deps: &ServerDeps,
) -> Result<EBazaarData, ApiError> {
    actor.can(Capability::Update).on(Resource::EBazaar).check()?;

    let before = find_or_404(id, deps).await?;
    let valid = payload.validate()?;

    let after = deps
        .ebazaars
        .update(id, valid.changes)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => ApiError::NotFound("E-Bazaar"),
            other => other.into(),
        })?;
    info!(ebazaar_id = %id, "E-bazaar updated");

    record_change(
        deps.activity_log.as_ref(),
        LogName::Ebazaar,
        ActivityEvent::Updated,
        id.into_uuid(),
        Some(actor.user_id()),
        Some(&before),
        Some(&after),
    )
    .await;

    present_one(after, deps).await
}
