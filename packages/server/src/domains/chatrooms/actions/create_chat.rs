//! Create chat action - inserts a chat, then runs its lifecycle hooks

use tracing::{debug, error, info};

use crate::common::{Actor, ApiError, Capability, Resource};
use crate::domains::activity_log::{record_change, ActivityEvent, LogName};
use crate::domains::chatrooms::models::{Chat, NewChat};
use crate::domains::chatrooms::requests::ChatPayload;
use crate::kernel::ServerDeps;

/// Create a chat posted by `actor`.
///
/// The dedication matcher runs exactly once, after the insert has committed.
/// If it fails the chat stays stored and the caller gets `HookFailure`.
pub async fn create_chat(
    actor: &Actor,
    payload: ChatPayload,
    deps: &ServerDeps,
) -> Result<Chat, ApiError> {
    actor.can(Capability::Create).on(Resource::Chat).check()?;

    let valid = payload.validate()?;

    if let Some(room_id) = valid.chat_room_id {
        if deps.chats.find_room(room_id).await?.is_none() {
            return Err(ApiError::validation(
                "chat_room_id",
                "The selected chat room id is invalid.",
            ));
        }
    }

    let chat = deps
        .chats
        .insert_chat(
            NewChat::builder()
                .message(valid.message)
                .chat_room_id(valid.chat_room_id)
                .user_id(actor.user_id())
                .meta(valid.meta)
                .build(),
        )
        .await?;

    info!(chat_id = %chat.id, room_id = ?chat.chat_room_id, "Chat created");

    let hook_result = deps.dedication_matcher.match_chat(&chat).await;

    record_change(
        deps.activity_log.as_ref(),
        LogName::Chat,
        ActivityEvent::Created,
        chat.id.into_uuid(),
        Some(actor.user_id()),
        None,
        Some(&chat),
    )
    .await;

    match hook_result {
        Ok(matched) => {
            debug!(chat_id = %chat.id, matched, "Dedication matcher finished");
            Ok(chat)
        }
        Err(e) => {
            error!(chat_id = %chat.id, error = %e, "Dedication matcher failed");
            Err(ApiError::HookFailure(e))
        }
    }
}
