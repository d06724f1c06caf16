//! Create e-bazaar action

use tracing::info;

use super::present_one;
use crate::common::{Actor, ApiError, Capability, Resource};
use crate::domains::activity_log::{record_change, ActivityEvent, LogName};
use crate::domains::ebazaar::data::EBazaarData;
use crate::domains::ebazaar::models::{NewEBazaar, NewMedia};
use crate::domains::ebazaar::requests::EBazaarPayload;
use crate::kernel::ServerDeps;

/// Create an e-bazaar, attaching any media references in the same insert.
pub async fn create_ebazaar(
    actor: &Actor,
    payload: EBazaarPayload,
    deps: &ServerDeps,
) -> Result<EBazaarData, ApiError> {
    actor.can(Capability::Create).on(Resource::EBazaar).check()?;

    let valid = payload.validate()?;
    let changes = valid.changes;

    let new = NewEBazaar::builder()
        .title(changes.title)
        .description(changes.description)
        .category(changes.category)
        .location(changes.location)
        .start_at(changes.start_at)
        .end_at(changes.end_at)
        .created_by(actor.user_id())
        .build();

    let media = valid
        .media
        .into_iter()
        .map(|reference| {
            NewMedia::builder()
                .ebazaar_id(new.id)
                .kind(reference.kind)
                .file_name(reference.file_name)
                .mime_type(reference.mime_type)
                .url(reference.url)
                .build()
        })
        .collect();

    let ebazaar = deps.ebazaars.insert(new, media).await?;
    info!(ebazaar_id = %ebazaar.id, title = %ebazaar.title, "E-bazaar created");

    record_change(
        deps.activity_log.as_ref(),
        LogName::Ebazaar,
        ActivityEvent::Created,
        ebazaar.id.into_uuid(),
        Some(actor.user_id()),
        None,
        Some(&ebazaar),
    )
    .await;

    present_one(ebazaar, deps).await
}
