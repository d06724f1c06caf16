//! E-bazaar actions: authorization, store calls, hooks, presentation.

pub mod create_ebazaar;
pub mod delete_ebazaar;
pub mod media;
pub mod queries;
pub mod toggle_activity;
pub mod update_ebazaar;

use std::collections::HashMap;

use crate::common::{ApiError, EBazaarId};
use crate::domains::ebazaar::data::EBazaarData;
use crate::domains::ebazaar::models::{EBazaar, Media};
use crate::kernel::ServerDeps;

pub use create_ebazaar::create_ebazaar;
pub use delete_ebazaar::delete_ebazaar;
pub use media::{delete_media, upload_media, UploadedFile};
pub use queries::{list_ebazaars, live_now, pre_requisite, show_ebazaar, today};
pub use toggle_activity::toggle_activity;
pub use update_ebazaar::update_ebazaar;

/// Present several e-bazaars, loading their media in one store call.
pub(crate) async fn present_many(
    ebazaars: Vec<EBazaar>,
    deps: &ServerDeps,
) -> Result<Vec<EBazaarData>, ApiError> {
    let ids: Vec<EBazaarId> = ebazaars.iter().map(|e| e.id).collect();
    let mut media_by_owner: HashMap<EBazaarId, Vec<Media>> = HashMap::new();
    for media in deps.ebazaars.media_for(&ids).await? {
        media_by_owner.entry(media.ebazaar_id).or_default().push(media);
    }

    let now = deps.clock.now();
    Ok(ebazaars
        .into_iter()
        .map(|ebazaar| {
            let media = media_by_owner.remove(&ebazaar.id).unwrap_or_default();
            EBazaarData::new(ebazaar, media, None, now)
        })
        .collect())
}

/// Present a single e-bazaar with its media.
pub(crate) async fn present_one(
    ebazaar: EBazaar,
    deps: &ServerDeps,
) -> Result<EBazaarData, ApiError> {
    let media = deps.ebazaars.media_for(&[ebazaar.id]).await?;
    Ok(EBazaarData::new(ebazaar, media, None, deps.clock.now()))
}

/// Load an e-bazaar or fail with NotFound.
pub(crate) async fn find_or_404(id: EBazaarId, deps: &ServerDeps) -> Result<EBazaar, ApiError> {
    deps.ebazaars
        .find(id)
        .await?
        .ok_or(ApiError::NotFound("E-Bazaar"))
}
