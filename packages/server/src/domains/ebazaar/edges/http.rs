//! HTTP edges for e-bazaars
//!
//! Listing, CRUD, schedule views, saves and media uploads under `/api/ebazaars`.

use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Extension, Multipart, Path, Query},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::common::{ApiError, Capability, Notice, Page, PageQuery, PaginationArgs, Resource};
use crate::domains::ebazaar::actions::{self, UploadedFile};
use crate::domains::ebazaar::data::{EBazaarData, MediaData};
use crate::domains::ebazaar::filters::{EBazaarFilter, EBazaarFilterQuery};
use crate::domains::ebazaar::models::MediaKind;
use crate::domains::ebazaar::reference::ReferenceData;
use crate::domains::ebazaar::requests::EBazaarPayload;
use crate::server::app::AxumAppState;
use crate::server::extract::{parse_id, JsonBody};
use crate::server::middleware::CurrentActor;

/// Multipart overhead allowed on top of the file itself.
const MULTIPART_SLACK_BYTES: usize = 64 * 1024;

pub fn routes(max_upload_bytes: usize) -> Router {
    let uploads = Router::new()
        .route("/api/ebazaars/:id/images", post(upload_image))
        .route("/api/ebazaars/:id/videos", post(upload_video))
        .layer(DefaultBodyLimit::max(
            max_upload_bytes.saturating_add(MULTIPART_SLACK_BYTES),
        ));

    Router::new()
        .route("/api/ebazaars", get(list_ebazaars).post(create_ebazaar))
        .route("/api/ebazaars/pre-requisite", get(pre_requisite))
        .route("/api/ebazaars/live-now", get(live_now))
        .route("/api/ebazaars/today", get(today))
        .route(
            "/api/ebazaars/:id",
            get(show_ebazaar)
                .patch(update_ebazaar)
                .delete(delete_ebazaar),
        )
        .route("/api/ebazaars/:id/activity", post(toggle_activity))
        .route("/api/ebazaars/:id/images/:media_id", delete(delete_image))
        .route("/api/ebazaars/:id/videos/:media_id", delete(delete_video))
        .merge(uploads)
}

// =============================================================================
// Queries
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ListEBazaarsQuery {
    #[serde(flatten)]
    pub filter: EBazaarFilterQuery,
    #[serde(flatten)]
    pub page: PageQuery,
}

#[derive(Debug, Default, Deserialize)]
pub struct ShowEBazaarQuery {
    pub orders: Option<String>,
}

impl ShowEBazaarQuery {
    fn include_orders(&self) -> bool {
        matches!(
            self.orders.as_deref().map(str::trim),
            Some("true") | Some("1") | Some("yes")
        )
    }
}

async fn list_ebazaars(
    Extension(state): Extension<AxumAppState>,
    CurrentActor(actor): CurrentActor,
    Query(query): Query<ListEBazaarsQuery>,
) -> Result<Json<Page<EBazaarData>>, ApiError> {
    let filter = EBazaarFilter::from(query.filter);
    let pagination = PaginationArgs::from(query.page);

    let page = actions::list_ebazaars(&actor, &filter, &pagination, &state.server_deps).await?;
    Ok(Json(page))
}

async fn show_ebazaar(
    Extension(state): Extension<AxumAppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
    Query(query): Query<ShowEBazaarQuery>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, "E-Bazaar")?;
    let ebazaar =
        actions::show_ebazaar(&actor, id, query.include_orders(), &state.server_deps).await?;

    Ok(Json(json!({ "data": ebazaar })))
}

async fn pre_requisite(
    Extension(state): Extension<AxumAppState>,
    CurrentActor(_actor): CurrentActor,
) -> Json<ReferenceData> {
    Json(actions::pre_requisite(&state.server_deps))
}

async fn live_now(Extension(state): Extension<AxumAppState>) -> Result<Json<Value>, ApiError> {
    let ebazaars = actions::live_now(&state.server_deps).await?;
    Ok(Json(json!({ "ebazaar": ebazaars })))
}

async fn today(Extension(state): Extension<AxumAppState>) -> Result<Json<Value>, ApiError> {
    let ebazaars = actions::today(&state.server_deps).await?;
    Ok(Json(json!({ "ebazaar": ebazaars })))
}

// =============================================================================
// Mutations
// =============================================================================

async fn create_ebazaar(
    Extension(state): Extension<AxumAppState>,
    CurrentActor(actor): CurrentActor,
    JsonBody(payload): JsonBody<EBazaarPayload>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let ebazaar = actions::create_ebazaar(&actor, payload, &state.server_deps).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": Notice::Added.render("E-Bazaar"),
            "ebazaar": ebazaar,
        })),
    ))
}

async fn update_ebazaar(
    Extension(state): Extension<AxumAppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<EBazaarPayload>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, "E-Bazaar")?;
    let ebazaar = actions::update_ebazaar(&actor, id, payload, &state.server_deps).await?;

    Ok(Json(json!({
        "message": Notice::Updated.render("E-Bazaar"),
        "ebazaar": ebazaar,
    })))
}

async fn delete_ebazaar(
    Extension(state): Extension<AxumAppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, "E-Bazaar")?;
    actions::delete_ebazaar(&actor, id, &state.server_deps).await?;

    Ok(Json(json!({ "message": Notice::Deleted.render("E-Bazaar") })))
}

async fn toggle_activity(
    Extension(state): Extension<AxumAppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, "E-Bazaar")?;
    let saved = actions::toggle_activity(&actor, id, &state.server_deps).await?;

    Ok(Json(json!({ "saved": saved })))
}

// =============================================================================
// Media
// =============================================================================

async fn upload_image(
    state: Extension<AxumAppState>,
    actor: CurrentActor,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    upload(state, actor, &id, MediaKind::Image, multipart).await
}

async fn upload_video(
    state: Extension<AxumAppState>,
    actor: CurrentActor,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    upload(state, actor, &id, MediaKind::Video, multipart).await
}

async fn upload(
    Extension(state): Extension<AxumAppState>,
    CurrentActor(actor): CurrentActor,
    id: &str,
    kind: MediaKind,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    // Deny before the body is read
    actor.can(Capability::Update).on(Resource::EBazaar).check()?;

    let id = parse_id(id, "E-Bazaar")?;
    let multipart = multipart.map_err(|e| ApiError::validation("file", e.body_text()))?;
    let file = read_file_field(multipart).await?;
    let media = actions::upload_media(&actor, id, kind, file, &state.server_deps).await?;

    let mut body = serde_json::Map::new();
    body.insert(
        "message".to_string(),
        json!(Notice::Uploaded.render(kind.label())),
    );
    body.insert(kind.as_str().to_string(), json!(MediaData::from(media)));

    Ok((StatusCode::CREATED, Json(Value::Object(body))))
}

/// Read the `file` field; other fields are skipped.
async fn read_file_field(mut multipart: Multipart) -> Result<UploadedFile, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation("file", e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::validation("file", e.body_text()))?;

        return Ok(UploadedFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Err(ApiError::validation("file", "The file field is required."))
}

async fn delete_image(
    state: Extension<AxumAppState>,
    actor: CurrentActor,
    Path((id, media_id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    remove(state, actor, &id, &media_id, MediaKind::Image).await
}

async fn delete_video(
    state: Extension<AxumAppState>,
    actor: CurrentActor,
    Path((id, media_id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    remove(state, actor, &id, &media_id, MediaKind::Video).await
}

async fn remove(
    Extension(state): Extension<AxumAppState>,
    CurrentActor(actor): CurrentActor,
    id: &str,
    media_id: &str,
    kind: MediaKind,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(id, "E-Bazaar")?;
    let media_id = parse_id(media_id, kind.label())?;
    actions::delete_media(&actor, id, kind, media_id, &state.server_deps).await?;

    Ok(Json(json!({ "message": Notice::Deleted.render(kind.label()) })))
}
