use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use corral_api::{ApiError, ApiResponse};
use corral_core::model::{FormConfig, FormConfigDraft};
use corral_core::{CollectionItem, Document};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_config).post(upsert_config))
}

/// The active configuration of the public contact form.
async fn get_config(
    State(state): State<AppState>,
) -> Result<ApiResponse<Document<FormConfig>>, ApiError> {
    let config = state
        .forms
        .find_all()
        .await?
        .into_iter()
        .find(|doc| doc.body.active)
        .ok_or_else(|| ApiError::not_found("Form configuration not found"))?;
    Ok(ApiResponse::ok(config))
}

/// Create-or-update upsert keyed on the unique form name.
async fn upsert_config(
    State(state): State<AppState>,
    Json(draft): Json<FormConfigDraft>,
) -> Result<ApiResponse<Document<FormConfig>>, ApiError> {
    let incoming = FormConfig::from_draft(&draft);
    let existing = state
        .forms
        .find_all()
        .await?
        .into_iter()
        .find(|doc| doc.body.unique_key() == incoming.unique_key());

    match existing {
        Some(current) => {
            let mut body = current.body.clone();
            body.fields = incoming.fields;
            if let Some(active) = draft.active {
                body.active = active;
            }
            let doc = state.forms.update(&current.id, body, current.order).await?;
            tracing::info!(form = %doc.body.form_name, "form configuration updated");
            Ok(ApiResponse::ok(doc))
        }
        None => {
            let doc = state.forms.insert(incoming, 0).await?;
            tracing::info!(form = %doc.body.form_name, "form configuration created");
            Ok(ApiResponse::ok(doc))
        }
    }
}
