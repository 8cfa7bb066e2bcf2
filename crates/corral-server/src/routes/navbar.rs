use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::Value;

use corral_api::{ApiError, ApiResponse};
use corral_core::Document;
use corral_core::model::NavLink;

use crate::routes::replace::replace_collection;
use crate::state::AppState;

// The navigation bar is only ever read whole, replaced whole, or pruned.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/replace-all", post(replace_all))
        .route("/{id}", delete(remove))
}

async fn list(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Document<NavLink>>>, ApiError> {
    let links = state.nav_links.find_all().await?;
    Ok(ApiResponse::ok(links))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Document<NavLink>>, ApiError> {
    let doc = state.nav_links.delete(&id).await.map_err(|err| {
        if err.is_not_found() {
            ApiError::not_found("Navigation link not found")
        } else {
            err.into()
        }
    })?;
    tracing::info!(id = %doc.id, "navigation link deleted");
    Ok(ApiResponse::ok(doc).with_message("Navigation link deleted"))
}

async fn replace_all(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<ApiResponse<Vec<Document<NavLink>>>, ApiError> {
    replace_collection::<NavLink>(&state.nav_links, payload).await
}
