use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;

use corral_api::{ApiError, ApiResponse};
use corral_core::model::{Category, Listing, ListingDraft, ListingStatus};
use corral_core::{Document, Reconcilable};

use crate::routes::replace::replace_collection;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/replace-all", post(replace_all))
        .route("/category/{category}", get(by_category))
        .route("/status/{status}", get(by_status))
        .route("/{id}", get(get_by_id).put(update).delete(remove))
}

async fn list(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Document<Listing>>>, ApiError> {
    let listings = state.listings.find_all().await?;
    Ok(ApiResponse::ok(listings))
}

async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Document<Listing>>, ApiError> {
    let listing = state
        .listings
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Listing not found"))?;
    Ok(ApiResponse::ok(listing))
}

async fn by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<ApiResponse<Vec<Document<Listing>>>, ApiError> {
    let not_found = || ApiError::not_found("No listings in this category");
    let category: Category = category.parse().map_err(|_| not_found())?;
    let listings: Vec<Document<Listing>> = state
        .listings
        .find_all()
        .await?
        .into_iter()
        .filter(|doc| doc.body.category == category)
        .collect();
    if listings.is_empty() {
        return Err(not_found());
    }
    Ok(ApiResponse::ok(listings))
}

async fn by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> Result<ApiResponse<Vec<Document<Listing>>>, ApiError> {
    let not_found = || ApiError::not_found("No listings with this status");
    let status: ListingStatus = status.parse().map_err(|_| not_found())?;
    let listings: Vec<Document<Listing>> = state
        .listings
        .find_all()
        .await?
        .into_iter()
        .filter(|doc| doc.body.status == status)
        .collect();
    if listings.is_empty() {
        return Err(not_found());
    }
    Ok(ApiResponse::ok(listings))
}

async fn create(
    State(state): State<AppState>,
    Json(draft): Json<ListingDraft>,
) -> Result<ApiResponse<Document<Listing>>, ApiError> {
    let doc = state.listings.insert(Listing::project(&draft), 0).await?;
    tracing::info!(id = %doc.id, "listing created");
    Ok(ApiResponse::created(doc))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<ListingDraft>,
) -> Result<ApiResponse<Document<Listing>>, ApiError> {
    let existing = state
        .listings
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Listing not found"))?;
    let doc = state
        .listings
        .update(&id, existing.body.merged(&draft), existing.order)
        .await?;
    tracing::info!(id = %doc.id, "listing updated");
    Ok(ApiResponse::ok(doc))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Document<Listing>>, ApiError> {
    let doc = state.listings.delete(&id).await.map_err(|err| {
        if err.is_not_found() {
            ApiError::not_found("Listing not found")
        } else {
            err.into()
        }
    })?;
    tracing::info!(id = %doc.id, "listing deleted");
    Ok(ApiResponse::ok(doc).with_message("Listing deleted"))
}

async fn replace_all(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<ApiResponse<Vec<Document<Listing>>>, ApiError> {
    replace_collection::<Listing>(&state.listings, payload).await
}
