//! API routes, one module per collection.

pub mod about;
pub mod carousel;
pub mod contact;
pub mod form;
pub mod livestock;
pub mod locations;
pub mod navbar;
pub mod posts;
pub mod replace;

use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use serde_json::json;

use crate::state::AppState;

pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/api/posts", posts::router())
        .nest("/api/carousel-images", carousel::router())
        .nest("/api/locations", locations::router())
        .nest("/api/navbar", navbar::router())
        .nest("/api/about-us", about::router())
        .nest("/api/livestock", livestock::router())
        .nest("/api/contact-submissions", contact::router())
        .nest("/api/form-config", form::router())
        .route("/health", get(health))
        .route("/", get(root))
}

async fn root() -> impl IntoResponse {
    let body = json!({
        "service": "Corral Server",
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, axum::Json(body))
}

async fn health() -> impl IntoResponse {
    let body = json!({ "status": "OK", "message": "Server is running" });
    (StatusCode::OK, axum::Json(body))
}
