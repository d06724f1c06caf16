use tracing::info;

use super::find_or_404;
use crate::common::{Actor, ApiError, Capability, EBazaarId, Resource};
use crate::kernel::ServerDeps;

/// Save or unsave an e-bazaar for the acting user. Returns whether it is now saved.
pub async fn toggle_activity(
    actor: &Actor,
    id: EBazaarId,
    deps: &ServerDeps,
) -> Result<bool, ApiError> {
    actor.can(Capability::View).on(Resource::EBazaar).check()?;

    find_or_404(id, deps).await?;
    let saved = deps.ebazaars.toggle_save(id, actor.user_id()).await?;

    info!(ebazaar_id = %id, user_id = %actor.user_id(), saved, "E-bazaar activity toggled");
    Ok(saved)
}
