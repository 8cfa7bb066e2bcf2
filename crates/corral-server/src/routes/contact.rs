use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use corral_api::{ApiError, ApiResponse};
use corral_core::Document;
use corral_core::model::{
    ContactSubmission, ContactSubmissionDraft, SubmissionStatus, SubmissionUpdate,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/stats", get(stats))
        .route("/{id}", get(get_by_id).put(update).delete(remove))
}

#[derive(Debug, Deserialize)]
struct ListFilter {
    status: Option<String>,
}

async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ListFilter>,
) -> Result<ApiResponse<Vec<Document<ContactSubmission>>>, ApiError> {
    let mut submissions = state.contacts.find_all().await?;
    if let Some(raw) = filter.status {
        let status: SubmissionStatus = raw
            .parse()
            .map_err(|_| ApiError::bad_request(format!("unknown status '{raw}'")))?;
        submissions.retain(|doc| doc.body.status == status);
    }
    Ok(ApiResponse::ok(submissions))
}

async fn stats(State(state): State<AppState>) -> Result<ApiResponse<serde_json::Value>, ApiError> {
    let submissions = state.contacts.find_all().await?;
    let count = |status: SubmissionStatus| {
        submissions
            .iter()
            .filter(|doc| doc.body.status == status)
            .count()
    };
    Ok(ApiResponse::ok(json!({
        "total": submissions.len(),
        "pending": count(SubmissionStatus::Pending),
        "read": count(SubmissionStatus::Read),
        "answered": count(SubmissionStatus::Answered),
    })))
}

async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Document<ContactSubmission>>, ApiError> {
    let submission = state
        .contacts
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Submission not found"))?;
    Ok(ApiResponse::ok(submission))
}

async fn create(
    State(state): State<AppState>,
    Json(draft): Json<ContactSubmissionDraft>,
) -> Result<ApiResponse<Document<ContactSubmission>>, ApiError> {
    let doc = state
        .contacts
        .insert(ContactSubmission::from_draft(&draft), 0)
        .await?;
    tracing::info!(id = %doc.id, "contact submission created");
    Ok(ApiResponse::created(doc))
}

/// Submissions only ever move through their workflow states.
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<SubmissionUpdate>,
) -> Result<ApiResponse<Document<ContactSubmission>>, ApiError> {
    let existing = state
        .contacts
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Submission not found"))?;
    let mut body = existing.body.clone();
    if let Some(status) = patch.status {
        body.status = status;
    }
    let doc = state.contacts.update(&id, body, existing.order).await?;
    tracing::info!(id = %doc.id, status = %doc.body.status, "contact submission updated");
    Ok(ApiResponse::ok(doc))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Document<ContactSubmission>>, ApiError> {
    let doc = state.contacts.delete(&id).await.map_err(|err| {
        if err.is_not_found() {
            ApiError::not_found("Submission not found")
        } else {
            err.into()
        }
    })?;
    tracing::info!(id = %doc.id, "contact submission deleted");
    Ok(ApiResponse::ok(doc).with_message("Submission deleted"))
}
