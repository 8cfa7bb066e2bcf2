use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;

use corral_api::{ApiError, ApiResponse};
use corral_core::model::{CarouselImage, CarouselImageDraft};
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
) -> Result<ApiResponse<Vec<Document<CarouselImage>>>, ApiError> {
    let images = state.carousel.find_all().await?;
    Ok(ApiResponse::ok(images))
}

async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Document<CarouselImage>>, ApiError> {
    let image = state
        .carousel
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Carousel image not found"))?;
    Ok(ApiResponse::ok(image))
}

async fn create(
    State(state): State<AppState>,
    Json(draft): Json<CarouselImageDraft>,
) -> Result<ApiResponse<Document<CarouselImage>>, ApiError> {
    let doc = state
        .carousel
        .insert(CarouselImage::project(&draft), 0)
        .await?;
    tracing::info!(id = %doc.id, "carousel image created");
    Ok(ApiResponse::created(doc))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<CarouselImageDraft>,
) -> Result<ApiResponse<Document<CarouselImage>>, ApiError> {
    let existing = state
        .carousel
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Carousel image not found"))?;
    let doc = state
        .carousel
        .update(&id, existing.body.merged(&draft), existing.order)
        .await?;
    tracing::info!(id = %doc.id, "carousel image updated");
    Ok(ApiResponse::ok(doc))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Document<CarouselImage>>, ApiError> {
    let doc = state.carousel.delete(&id).await.map_err(|err| {
        if err.is_not_found() {
            ApiError::not_found("Carousel image not found")
        } else {
            err.into()
        }
    })?;
    tracing::info!(id = %doc.id, "carousel image deleted");
    Ok(ApiResponse::ok(doc).with_message("Carousel image deleted"))
}

async fn replace_all(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<ApiResponse<Vec<Document<CarouselImage>>>, ApiError> {
    replace_collection::<CarouselImage>(&state.carousel, payload).await
}
