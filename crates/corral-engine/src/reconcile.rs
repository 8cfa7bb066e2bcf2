use corral_core::{CollectionItem, Document, Reconcilable, ValidationError};
use corral_storage::{CollectionStore, StorageError};
use thiserror::Error;

use crate::diff::diff;
use crate::execute::{ExecutionReport, execute};
use crate::validate::validate_batch;

/// Failure of a reconciliation request.
///
/// Validation errors are detected before any store mutation. Storage errors
/// can surface mid-execution, after earlier bulk steps have already
/// committed; the error is reported but nothing is rolled back.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result of a successful reconciliation: the canonical collection as
/// re-read from the store, plus what it took to get there.
#[derive(Debug, Clone)]
pub struct ReconcileOutcome<T: CollectionItem> {
    /// The authoritative collection, sorted in canonical order.
    pub documents: Vec<Document<T>>,
    /// Operation counts; all zero when the submission matched the store.
    pub report: ExecutionReport,
    /// Whether any store mutation happened.
    pub changed: bool,
}

impl<T: CollectionItem> ReconcileOutcome<T> {
    /// Human-readable summary for the response envelope.
    pub fn summary(&self) -> String {
        if self.changed {
            self.report.summary()
        } else {
            "No changes to save".to_string()
        }
    }
}

/// Reconcile a stored collection with a complete submitted list.
///
/// Sequence: validate → read snapshot → diff → short-circuit or execute →
/// re-read. The short-circuit on an unchanged submission is part of the
/// contract, not an optimization: it guarantees the operation is a true
/// no-op at the store level, which is what makes repeated submissions
/// idempotent.
///
/// Everything runs on one logical thread of control; the only suspension
/// points are the store round-trips. Concurrent reconciliations of the same
/// collection race (both read the same snapshot, both write); callers that
/// need strong consistency must serialize requests per collection.
pub async fn reconcile<R: Reconcilable>(
    store: &dyn CollectionStore<R>,
    submitted: &[R::Draft],
) -> Result<ReconcileOutcome<R>, ReconcileError> {
    validate_batch::<R>(submitted)?;

    let existing = store.find_all().await?;
    let changes = diff::<R>(&existing, submitted);

    if !changes.has_changes() {
        tracing::debug!(collection = R::KIND.as_str(), "no changes to save");
        return Ok(ReconcileOutcome {
            documents: existing,
            report: ExecutionReport::default(),
            changed: false,
        });
    }

    let report = execute(store, changes).await?;
    let documents = store.find_all().await?;

    Ok(ReconcileOutcome {
        documents,
        report,
        changed: true,
    })
}
