//! E-bazaar read actions

use tracing::debug;

use super::{find_or_404, present_many};
use crate::common::pagination::page_info_for;
use crate::common::{Actor, ApiError, Capability, EBazaarId, Page, PaginationArgs, Resource};
use crate::domains::ebazaar::data::EBazaarData;
use crate::domains::ebazaar::filters::EBazaarFilter;
use crate::domains::ebazaar::reference::ReferenceData;
use crate::domains::ebazaar::schedule::today_bounds;
use crate::kernel::ServerDeps;

pub async fn list_ebazaars(
    actor: &Actor,
    filter: &EBazaarFilter,
    pagination: &PaginationArgs,
    deps: &ServerDeps,
) -> Result<Page<EBazaarData>, ApiError> {
    actor.can(Capability::View).on(Resource::EBazaar).check()?;

    let args = pagination
        .validate()
        .map_err(|message| ApiError::validation("pagination", message))?;

    let (rows, has_more) = deps.ebazaars.list(filter, &args).await?;
    let page_info = page_info_for(&rows, has_more, &args, |e| e.id.into_uuid());

    Ok(Page::new(present_many(rows, deps).await?, page_info))
}

/// Show one e-bazaar; orders (with customers) only when asked for.
pub async fn show_ebazaar(
    actor: &Actor,
    id: EBazaarId,
    include_orders: bool,
    deps: &ServerDeps,
) -> Result<EBazaarData, ApiError> {
    actor.can(Capability::Show).on(Resource::EBazaar).check()?;

    let ebazaar = find_or_404(id, deps).await?;
    let media = deps.ebazaars.media_for(&[id]).await?;
    let orders = if include_orders {
        Some(deps.ebazaars.orders_with_customers(id).await?)
    } else {
        None
    };

    Ok(EBazaarData::new(ebazaar, media, orders, deps.clock.now()))
}

/// E-bazaars whose window contains the current time.
pub async fn live_now(deps: &ServerDeps) -> Result<Vec<EBazaarData>, ApiError> {
    let now = deps.clock.now();
    let rows = deps.ebazaars.live_at(now).await?;
    debug!(count = rows.len(), %now, "Live e-bazaars");
    present_many(rows, deps).await
}

/// E-bazaars starting on today's date in the configured timezone.
pub async fn today(deps: &ServerDeps) -> Result<Vec<EBazaarData>, ApiError> {
    let (from, to) = today_bounds(deps.clock.now(), &deps.utc_offset);
    let rows = deps.ebazaars.starting_between(from, to).await?;
    present_many(rows, deps).await
}

pub fn pre_requisite(deps: &ServerDeps) -> ReferenceData {
    ReferenceData::new(deps.max_upload_bytes)
}
