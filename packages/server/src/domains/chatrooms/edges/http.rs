//! HTTP edges for chats
//!
//! GET  /api/chats       - list (body, chat_room_id, user_id, pagination)
//! POST /api/chats       - create
//! GET  /api/chats/:id   - show

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::common::{ApiError, Notice, Page, PageQuery, PaginationArgs};
use crate::domains::chatrooms::actions;
use crate::domains::chatrooms::data::ChatData;
use crate::domains::chatrooms::filters::{ChatFilter, ChatFilterQuery};
use crate::domains::chatrooms::requests::ChatPayload;
use crate::server::app::AxumAppState;
use crate::server::extract::{parse_id, JsonBody};
use crate::server::middleware::CurrentActor;

pub fn routes() -> Router {
    Router::new()
        .route("/api/chats", get(list_chats).post(create_chat))
        .route("/api/chats/:id", get(show_chat))
}

#[derive(Debug, Default, Deserialize)]
pub struct ListChatsQuery {
    #[serde(flatten)]
    pub filter: ChatFilterQuery,
    #[serde(flatten)]
    pub page: PageQuery,
}

async fn list_chats(
    Extension(state): Extension<AxumAppState>,
    CurrentActor(actor): CurrentActor,
    Query(query): Query<ListChatsQuery>,
) -> Result<Json<Page<ChatData>>, ApiError> {
    let filter = ChatFilter::from(query.filter);
    let pagination = PaginationArgs::from(query.page);

    let page = actions::list_chats(&actor, &filter, &pagination, &state.server_deps).await?;
    Ok(Json(page))
}

async fn create_chat(
    Extension(state): Extension<AxumAppState>,
    CurrentActor(actor): CurrentActor,
    JsonBody(payload): JsonBody<ChatPayload>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let chat = actions::create_chat(&actor, payload, &state.server_deps).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": Notice::Added.render("Chat"),
            "chat": ChatData::from(chat),
        })),
    ))
}

async fn show_chat(
    Extension(state): Extension<AxumAppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, "Chat")?;
    let chat = actions::show_chat(&actor, id, &state.server_deps).await?;

    Ok(Json(json!({ "data": ChatData::from(chat) })))
}
