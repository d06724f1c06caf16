//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::get,
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::Config;
use crate::domains::auth::JwtService;
use crate::domains::{chatrooms, ebazaar};
use crate::kernel::ServerDeps;
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::health_handler;

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    /// None when running against in-memory stores
    pub db_pool: Option<PgPool>,
    pub server_deps: Arc<ServerDeps>,
    pub jwt_service: Arc<JwtService>,
}

impl AxumAppState {
    pub fn new(
        db_pool: Option<PgPool>,
        server_deps: ServerDeps,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            db_pool,
            server_deps: Arc::new(server_deps),
            jwt_service,
        }
    }

    /// Production state: Postgres-backed deps and a JWT service from config
    pub fn from_config(pool: PgPool, config: &Config) -> Self {
        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_issuer.clone(),
        ));
        Self::new(
            Some(pool.clone()),
            ServerDeps::from_config(pool, config),
            jwt_service,
        )
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(origins)
}

/// Build the Axum application router
pub fn build_app(state: AxumAppState, allowed_origins: &[String]) -> Router {
    let jwt_service = state.jwt_service.clone();
    let max_upload_bytes = state.server_deps.max_upload_bytes;

    Router::new()
        .route("/health", get(health_handler))
        .merge(chatrooms::edges::routes())
        .merge(ebazaar::edges::routes(max_upload_bytes))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service.clone(), req, next)
        }))
        .layer(Extension(state))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}
