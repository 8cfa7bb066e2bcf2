//! The storage trait all Corral backends implement.

use std::sync::Arc;

use async_trait::async_trait;
use corral_core::{CollectionItem, Document};

use crate::error::StorageError;

/// A document to be created: body plus target position, no identity yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDocument<T> {
    pub body: T,
    pub order: i64,
}

/// A full-body patch for an existing document: identity, replacement field
/// values and new position. Applying a patch refreshes `updatedAt`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePatch<T> {
    pub id: String,
    pub body: T,
    pub order: i64,
}

/// Keyed, ordered document storage for one collection.
///
/// Implementations must be thread-safe (`Send + Sync`). Every write runs the
/// item's schema-level constraint check ([`CollectionItem::check_constraints`]
/// plus the collection-wide unique key) and fails with
/// [`StorageError::Schema`] on violation, so schema failures stay
/// distinguishable from infrastructure failures.
///
/// None of the bulk operations is atomic with respect to the others; the
/// reconciliation engine documents the resulting partial-failure window.
///
/// # Example
///
/// ```ignore
/// use corral_storage::{CollectionStore, StorageError};
///
/// async fn first_id<T: CollectionItem>(
///     store: &dyn CollectionStore<T>,
/// ) -> Result<Option<String>, StorageError> {
///     Ok(store.find_all().await?.first().map(|doc| doc.id.clone()))
/// }
/// ```
#[async_trait]
pub trait CollectionStore<T: CollectionItem>: Send + Sync {
    /// Reads the whole collection in canonical order: ascending `order`,
    /// then the collection's tiebreak.
    async fn find_all(&self) -> Result<Vec<Document<T>>, StorageError>;

    /// Reads a single document by id. Returns `None` if it does not exist.
    async fn find_by_id(&self, id: &str) -> Result<Option<Document<T>>, StorageError>;

    /// Creates a single document with a generated id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Schema` if the body violates a constraint or
    /// the collection's unique key.
    async fn insert(&self, body: T, order: i64) -> Result<Document<T>, StorageError>;

    /// Creates a batch of documents in one call.
    ///
    /// The whole batch is checked before anything is written; a violation
    /// anywhere rejects the batch.
    async fn insert_many(
        &self,
        items: Vec<NewDocument<T>>,
    ) -> Result<Vec<Document<T>>, StorageError>;

    /// Replaces the body and position of an existing document, refreshing
    /// its `updatedAt` stamp.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the document does not exist.
    async fn update(&self, id: &str, body: T, order: i64) -> Result<Document<T>, StorageError>;

    /// Applies a batch of patches by identity.
    ///
    /// Patches referring to ids the store no longer holds are skipped.
    /// Returns the number of documents actually patched.
    async fn bulk_update(&self, patches: Vec<UpdatePatch<T>>) -> Result<u64, StorageError>;

    /// Deletes a document by id, returning the removed document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the document does not exist.
    async fn delete(&self, id: &str) -> Result<Document<T>, StorageError>;

    /// Deletes every document whose id is in the set. Missing ids are
    /// ignored. Returns the number of documents removed.
    async fn delete_many(&self, ids: &[String]) -> Result<u64, StorageError>;

    /// Returns the name of this storage backend for logging/debugging.
    fn backend_name(&self) -> &'static str;
}

/// Shared handle to a collection store, as held in server state.
pub type DynStore<T> = Arc<dyn CollectionStore<T>>;
