use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;

use corral_api::{ApiError, ApiResponse};
use corral_core::model::{Location, LocationDraft};
use corral_core::validate::normalize_key;
use corral_core::{Document, Reconcilable};

use crate::routes::replace::replace_collection;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/replace-all", post(replace_all))
        .route("/name/{name}", get(get_by_name))
        .route("/{id}", get(get_by_id).put(update).delete(remove))
}

async fn list(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Document<Location>>>, ApiError> {
    let locations = state.locations.find_all().await?;
    Ok(ApiResponse::ok(locations))
}

async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Document<Location>>, ApiError> {
    let location = state
        .locations
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Location not found"))?;
    Ok(ApiResponse::ok(location))
}

/// Lookup by the unique, lowercased location name.
async fn get_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<ApiResponse<Document<Location>>, ApiError> {
    let wanted = normalize_key(&name);
    let location = state
        .locations
        .find_all()
        .await?
        .into_iter()
        .find(|doc| doc.body.name == wanted)
        .ok_or_else(|| ApiError::not_found("Location not found"))?;
    Ok(ApiResponse::ok(location))
}

async fn create(
    State(state): State<AppState>,
    Json(draft): Json<LocationDraft>,
) -> Result<ApiResponse<Document<Location>>, ApiError> {
    let doc = state
        .locations
        .insert(Location::project(&draft), 0)
        .await?;
    tracing::info!(id = %doc.id, "location created");
    Ok(ApiResponse::created(doc))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<LocationDraft>,
) -> Result<ApiResponse<Document<Location>>, ApiError> {
    let existing = state
        .locations
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Location not found"))?;
    let doc = state
        .locations
        .update(&id, existing.body.merged(&draft), existing.order)
        .await?;
    tracing::info!(id = %doc.id, "location updated");
    Ok(ApiResponse::ok(doc))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Document<Location>>, ApiError> {
    let doc = state.locations.delete(&id).await.map_err(|err| {
        if err.is_not_found() {
            ApiError::not_found("Location not found")
        } else {
            err.into()
        }
    })?;
    tracing::info!(id = %doc.id, "location deleted");
    Ok(ApiResponse::ok(doc).with_message("Location deleted"))
}

async fn replace_all(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<ApiResponse<Vec<Document<Location>>>, ApiError> {
    replace_collection::<Location>(&state.locations, payload).await
}
