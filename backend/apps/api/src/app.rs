//! Router Assembly
//!
//! `/api` carries the tagged auth and post routes, `/static` serves files,
//! anything else gets the single-page app entry document.

use std::any::Any;
use std::path::{Path, PathBuf};

use auth::domain::repository::{SessionRepository, UserRepository};
use auth::{AuthAppState, auth_routes, identity_guard};
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use kernel::routing::{ApiRouter, RouteTable};
use post::domain::repository::PostRepository;
use post::{PostAppState, post_routes};
use serde_json::{Value, json};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Non-API surface settings.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub static_dir: PathBuf,
    pub frontend_origins: Vec<String>,
}

/// Builds the full router and the table of API routes it registered.
pub fn build_app<A, P>(
    auth: AuthAppState<A>,
    posts: PostAppState<P>,
    options: &HttpOptions,
) -> (Router, RouteTable)
where
    A: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
{
    let guard = identity_guard(auth.middleware_state());
    let (api, table) = ApiRouter::new()
        .public(Method::GET, "/", empty_list)
        .merge(auth_routes(auth))
        .merge(post_routes(posts))
        .into_router(guard);

    let mut app = Router::new()
        .nest("/api", api.fallback(empty_list))
        .nest_service("/static", ServeDir::new(&options.static_dir))
        .fallback_service(ServeFile::new(spa_entry(&options.static_dir)))
        .layer(panic_guard())
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = cors_layer(&options.frontend_origins) {
        app = app.layer(cors);
    }

    (app, table)
}

/// Logs every API route with its access level.
pub fn log_routes(table: &RouteTable) {
    for entry in table.entries() {
        tracing::debug!(
            method = %entry.method,
            path = %format!("/api{}", entry.path),
            access = %entry.access,
            "Route registered"
        );
    }
    tracing::info!(
        routes = table.entries().len(),
        identified = table.has_identified(),
        "API routes registered"
    );
}

/// `GET /api` and unknown `/api/*` paths.
async fn empty_list() -> Json<Value> {
    Json(json!([]))
}

fn spa_entry(static_dir: &Path) -> PathBuf {
    static_dir.join("html").join("index.html")
}

type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

/// Turns a handler panic into `500 Internal server error`.
pub fn panic_guard() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(handle_panic as PanicHandler)
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(
        panic = %detail,
        backtrace = %std::backtrace::Backtrace::force_capture(),
        "Handler panicked"
    );
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    if allowed.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(allowed)
            .allow_methods(AllowMethods::list([
                Method::GET,
                Method::POST,
                Method::DELETE,
                Method::OPTIONS,
            ]))
            .allow_headers(AllowHeaders::list([
                header::CONTENT_TYPE,
                header::AUTHORIZATION,
                header::ACCEPT,
            ]))
            .allow_credentials(true),
    )
}
