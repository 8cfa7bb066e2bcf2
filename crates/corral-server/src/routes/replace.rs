//! The generic edge of the replace-all endpoints.
//!
//! Each of the six reconciled collections exposes a `POST /replace-all`
//! route whose handler is a thin wrapper around [`replace_collection`]: the
//! body must carry the collection's array field, the array deserializes
//! into drafts, and the engine does the rest.

use corral_api::{ApiError, ApiResponse};
use corral_core::{Document, Reconcilable};
use corral_engine::reconcile;
use corral_storage::DynStore;
use serde_json::Value;

pub async fn replace_collection<R: Reconcilable>(
    store: &DynStore<R>,
    payload: Value,
) -> Result<ApiResponse<Vec<Document<R>>>, ApiError> {
    let required = || ApiError::bad_request(format!("an array of {} is required", R::PAYLOAD_FIELD));

    let items = payload.get(R::PAYLOAD_FIELD).ok_or_else(required)?;
    if !items.is_array() {
        return Err(required());
    }
    let drafts: Vec<R::Draft> = serde_json::from_value(items.clone())
        .map_err(|err| ApiError::bad_request(format!("invalid {} payload: {err}", R::ITEM_NAME)))?;

    let outcome = reconcile(store.as_ref(), &drafts).await?;
    let summary = outcome.summary();
    Ok(ApiResponse::ok(outcome.documents).with_message(summary))
}
