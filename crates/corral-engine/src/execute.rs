use corral_core::CollectionItem;
use corral_storage::{CollectionStore, StorageError};

use crate::change_set::ChangeSet;

/// Counts of the operations a change set actually performed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    pub created: u64,
    pub updated: u64,
    pub deleted: u64,
}

impl ExecutionReport {
    pub fn is_noop(&self) -> bool {
        self.created == 0 && self.updated == 0 && self.deleted == 0
    }

    /// Human-readable summary used in replace-all responses.
    pub fn summary(&self) -> String {
        format!(
            "Saved changes: {} created, {} updated, {} deleted",
            self.created, self.updated, self.deleted
        )
    }
}

/// Apply a change set through the store's bulk primitives.
///
/// Runs up to three bulk operations in a fixed order — update, insert,
/// delete — skipping any step with an empty operand set. The steps are not
/// atomic with respect to each other: if a step fails, the error propagates
/// and everything already applied stays applied. There is no compensating
/// rollback; callers surface the error and the collection is left partially
/// reconciled.
pub async fn execute<T: CollectionItem>(
    store: &dyn CollectionStore<T>,
    changes: ChangeSet<T>,
) -> Result<ExecutionReport, StorageError> {
    let mut report = ExecutionReport::default();
    if !changes.has_changes() {
        return Ok(report);
    }

    if !changes.updates.is_empty() {
        report.updated = store.bulk_update(changes.updates).await?;
        tracing::info!(
            collection = T::KIND.as_str(),
            count = report.updated,
            "documents updated"
        );
    }

    if !changes.creates.is_empty() {
        let created = store.insert_many(changes.creates).await?;
        report.created = created.len() as u64;
        tracing::info!(
            collection = T::KIND.as_str(),
            count = report.created,
            "documents created"
        );
    }

    if !changes.deletes.is_empty() {
        report.deleted = store.delete_many(&changes.deletes).await?;
        tracing::info!(
            collection = T::KIND.as_str(),
            count = report.deleted,
            "documents deleted"
        );
    }

    Ok(report)
}
