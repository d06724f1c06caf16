//! Chat read actions

use crate::common::pagination::page_info_for;
use crate::common::{Actor, ApiError, Capability, ChatId, Page, PaginationArgs, Resource};
use crate::domains::chatrooms::data::ChatData;
use crate::domains::chatrooms::filters::ChatFilter;
use crate::domains::chatrooms::models::Chat;
use crate::kernel::ServerDeps;

/// List chats matching `filter`, one page at a time.
pub async fn list_chats(
    actor: &Actor,
    filter: &ChatFilter,
    pagination: &PaginationArgs,
    deps: &ServerDeps,
) -> Result<Page<ChatData>, ApiError> {
    actor.can(Capability::View).on(Resource::Chat).check()?;

    let args = pagination
        .validate()
        .map_err(|message| ApiError::validation("pagination", message))?;

    let (chats, has_more) = deps.chats.list_chats(filter, &args).await?;
    let page_info = page_info_for(&chats, has_more, &args, |chat| chat.id.into_uuid());

    Ok(Page::new(
        chats.into_iter().map(ChatData::from).collect(),
        page_info,
    ))
}

pub async fn show_chat(actor: &Actor, id: ChatId, deps: &ServerDeps) -> Result<Chat, ApiError> {
    actor.can(Capability::Show).on(Resource::Chat).check()?;

    deps.chats
        .find_chat(id)
        .await?
        .ok_or(ApiError::NotFound("Chat"))
}
