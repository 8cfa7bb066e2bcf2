use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;

use corral_api::{ApiError, ApiResponse};
use corral_core::model::{AboutSection, AboutSectionDraft};
use corral_core::{Document, Reconcilable};

use crate::routes::replace::replace_collection;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/replace-all", post(replace_all))
        .route("/{id}", get(get_by_id).put(update).delete(remove))
}

async fn list(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Document<AboutSection>>>, ApiError> {
    let sections = state.about.find_all().await?;
    Ok(ApiResponse::ok(sections))
}

async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Document<AboutSection>>, ApiError> {
    let section = state
        .about
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Section not found"))?;
    Ok(ApiResponse::ok(section))
}

async fn create(
    State(state): State<AppState>,
    Json(draft): Json<AboutSectionDraft>,
) -> Result<ApiResponse<Document<AboutSection>>, ApiError> {
    let doc = state.about.insert(AboutSection::project(&draft), 0).await?;
    tracing::info!(id = %doc.id, "about section created");
    Ok(ApiResponse::created(doc))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<AboutSectionDraft>,
) -> Result<ApiResponse<Document<AboutSection>>, ApiError> {
    let existing = state
        .about
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Section not found"))?;
    let doc = state
        .about
        .update(&id, existing.body.merged(&draft), existing.order)
        .await?;
    tracing::info!(id = %doc.id, "about section updated");
    Ok(ApiResponse::ok(doc))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Document<AboutSection>>, ApiError> {
    let doc = state.about.delete(&id).await.map_err(|err| {
        if err.is_not_found() {
            ApiError::not_found("Section not found")
        } else {
            err.into()
        }
    })?;
    tracing::info!(id = %doc.id, "about section deleted");
    Ok(ApiResponse::ok(doc).with_message("Section deleted"))
}

async fn replace_all(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<ApiResponse<Vec<Document<AboutSection>>>, ApiError> {
    replace_collection::<AboutSection>(&state.about, payload).await
}
