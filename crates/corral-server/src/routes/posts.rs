use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;

use corral_api::{ApiError, ApiResponse};
use corral_core::model::{Post, PostDraft};
use corral_core::{Document, Reconcilable};

use crate::routes::replace::replace_collection;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/replace-all", post(replace_all))
        .route("/{id}", get(get_by_id).put(update).delete(remove))
}

async fn list(State(state): State<AppState>) -> Result<ApiResponse<Vec<Document<Post>>>, ApiError> {
    let posts = state.posts.find_all().await?;
    Ok(ApiResponse::ok(posts))
}

async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Document<Post>>, ApiError> {
    let post = state
        .posts
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;
    Ok(ApiResponse::ok(post))
}

async fn create(
    State(state): State<AppState>,
    Json(draft): Json<PostDraft>,
) -> Result<ApiResponse<Document<Post>>, ApiError> {
    let doc = state.posts.insert(Post::project(&draft), 0).await?;
    tracing::info!(id = %doc.id, "post created");
    Ok(ApiResponse::created(doc))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<PostDraft>,
) -> Result<ApiResponse<Document<Post>>, ApiError> {
    let existing = state
        .posts
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;
    let doc = state
        .posts
        .update(&id, existing.body.merged(&draft), existing.order)
        .await?;
    tracing::info!(id = %doc.id, "post updated");
    Ok(ApiResponse::ok(doc))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Document<Post>>, ApiError> {
    let doc = state.posts.delete(&id).await.map_err(|err| {
        if err.is_not_found() {
            ApiError::not_found("Post not found")
        } else {
            err.into()
        }
    })?;
    tracing::info!(id = %doc.id, "post deleted");
    Ok(ApiResponse::ok(doc).with_message("Post deleted"))
}

async fn replace_all(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<ApiResponse<Vec<Document<Post>>>, ApiError> {
    replace_collection::<Post>(&state.posts, payload).await
}
