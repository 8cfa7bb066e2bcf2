use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use corral_core::{CollectionItem, Document, canonical_sort};
use corral_storage::{CollectionStore, NewDocument, StorageError, UpdatePatch};

/// In-memory collection store backed by a `HashMap` behind an async lock.
///
/// Cloning is cheap: clones share the same underlying map.
#[derive(Debug)]
pub struct MemoryCollection<T> {
    data: Arc<RwLock<HashMap<String, Document<T>>>>,
}

impl<T> Clone for MemoryCollection<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T: CollectionItem> MemoryCollection<T> {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.data.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.data.read().await.is_empty()
    }

    /// Schema-level check for one body against the current map state.
    ///
    /// `exclude_id` skips the document being replaced when checking the
    /// unique key, so updating a document to its own value is not a
    /// conflict.
    fn check_body(
        body: &T,
        data: &HashMap<String, Document<T>>,
        exclude_id: Option<&str>,
    ) -> Result<(), StorageError> {
        let mut violations = body.check_constraints();
        if let Some(key) = body.unique_key() {
            let taken = data
                .values()
                .filter(|doc| Some(doc.id.as_str()) != exclude_id)
                .any(|doc| doc.body.unique_key().as_deref() == Some(key.as_str()));
            if taken {
                violations.push(corral_core::FieldViolation::new(
                    "unique",
                    format!("'{key}' is already in use"),
                ));
            }
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(StorageError::schema(violations))
        }
    }
}

impl<T: CollectionItem> Default for MemoryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: CollectionItem> CollectionStore<T> for MemoryCollection<T> {
    async fn find_all(&self) -> Result<Vec<Document<T>>, StorageError> {
        let guard = self.data.read().await;
        let mut docs: Vec<Document<T>> = guard.values().cloned().collect();
        canonical_sort(&mut docs);
        Ok(docs)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Document<T>>, StorageError> {
        let guard = self.data.read().await;
        Ok(guard.get(id).cloned())
    }

    async fn insert(&self, body: T, order: i64) -> Result<Document<T>, StorageError> {
        let mut guard = self.data.write().await;
        Self::check_body(&body, &guard, None)?;
        let doc = Document::new(body, order);
        guard.insert(doc.id.clone(), doc.clone());
        Ok(doc)
    }

    async fn insert_many(
        &self,
        items: Vec<NewDocument<T>>,
    ) -> Result<Vec<Document<T>>, StorageError> {
        let mut guard = self.data.write().await;

        // The whole batch is checked before anything is written, including
        // unique-key collisions within the batch itself.
        let mut batch_keys = Vec::new();
        for item in &items {
            Self::check_body(&item.body, &guard, None)?;
            if let Some(key) = item.body.unique_key() {
                if batch_keys.contains(&key) {
                    return Err(StorageError::schema(vec![
                        corral_core::FieldViolation::new(
                            "unique",
                            format!("'{key}' is already in use"),
                        ),
                    ]));
                }
                batch_keys.push(key);
            }
        }

        let mut created = Vec::with_capacity(items.len());
        for item in items {
            let doc = Document::new(item.body, item.order);
            guard.insert(doc.id.clone(), doc.clone());
            created.push(doc);
        }
        Ok(created)
    }

    async fn update(&self, id: &str, body: T, order: i64) -> Result<Document<T>, StorageError> {
        let mut guard = self.data.write().await;
        if !guard.contains_key(id) {
            return Err(StorageError::not_found(T::KIND.as_str(), id));
        }
        Self::check_body(&body, &guard, Some(id))?;
        // contains_key checked above, and we still hold the write lock
        let doc = guard
            .get_mut(id)
            .ok_or_else(|| StorageError::internal("document vanished under write lock"))?;
        doc.body = body;
        doc.order = order;
        doc.touch();
        Ok(doc.clone())
    }

    async fn bulk_update(&self, patches: Vec<UpdatePatch<T>>) -> Result<u64, StorageError> {
        let mut guard = self.data.write().await;
        let mut modified = 0;
        for patch in patches {
            // Patches against ids the store no longer holds are skipped,
            // mirroring a bulk "patch by identity" call matching nothing.
            if !guard.contains_key(patch.id.as_str()) {
                continue;
            }
            Self::check_body(&patch.body, &guard, Some(patch.id.as_str()))?;
            if let Some(doc) = guard.get_mut(patch.id.as_str()) {
                doc.body = patch.body;
                doc.order = patch.order;
                doc.touch();
                modified += 1;
            }
        }
        Ok(modified)
    }

    async fn delete(&self, id: &str) -> Result<Document<T>, StorageError> {
        let mut guard = self.data.write().await;
        guard
            .remove(id)
            .ok_or_else(|| StorageError::not_found(T::KIND.as_str(), id))
    }

    async fn delete_many(&self, ids: &[String]) -> Result<u64, StorageError> {
        let mut guard = self.data.write().await;
        let mut removed = 0;
        for id in ids {
            if guard.remove(id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corral_core::model::{Location, LocationDraft, Post, PostDraft};
    use corral_core::{Reconcilable, now_utc};

    fn post(title: &str) -> Post {
        Post::project(&PostDraft {
            id: None,
            title: Some(title.to_string()),
            description: Some("body".to_string()),
            image: Some("https://cdn.example.com/a.png".to_string()),
            link: Some("https://example.com/a".to_string()),
            date: Some(now_utc()),
            alt: Some("alt".to_string()),
            cta: None,
        })
    }

    fn location(name: &str) -> Location {
        Location::project(&LocationDraft {
            id: None,
            name: Some(name.to_string()),
            branch_name: Some("Branch".to_string()),
            address: Some("123 Road".to_string()),
            phone: Some("+59899123456".to_string()),
            lat: Some(-31.0),
            lng: Some(-57.0),
        })
    }

    #[tokio::test]
    async fn insert_and_read_back() {
        let store = MemoryCollection::new();
        let created = store.insert(post("a"), 0).await.unwrap();
        let found = store.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(found.body.title, "a");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn find_all_returns_canonical_order() {
        let store = MemoryCollection::new();
        store.insert(post("second"), 1).await.unwrap();
        store.insert(post("first"), 0).await.unwrap();
        let all = store.find_all().await.unwrap();
        let titles: Vec<&str> = all.iter().map(|d| d.body.title.as_str()).collect();
        assert_eq!(titles, ["first", "second"]);
    }

    #[tokio::test]
    async fn insert_rejects_constraint_violations() {
        let store = MemoryCollection::new();
        let mut bad = post("x");
        bad.image = "not-a-url".to_string();
        let err = store.insert(bad, 0).await.unwrap_err();
        assert!(err.is_schema());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn unique_key_is_enforced_across_the_collection() {
        let store = MemoryCollection::new();
        store.insert(location("salto"), 0).await.unwrap();
        let err = store.insert(location("Salto"), 1).await.unwrap_err();
        assert!(err.is_schema());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn update_to_own_unique_key_is_allowed() {
        let store = MemoryCollection::new();
        let doc = store.insert(location("salto"), 0).await.unwrap();
        let mut body = doc.body.clone();
        body.address = "456 Road".to_string();
        let updated = store.update(&doc.id, body, 0).await.unwrap();
        assert_eq!(updated.body.address, "456 Road");
    }

    #[tokio::test]
    async fn update_preserves_creation_metadata() {
        let store = MemoryCollection::new();
        let doc = store.insert(post("a"), 0).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let updated = store.update(&doc.id, post("b"), 3).await.unwrap();
        assert_eq!(updated.id, doc.id);
        assert_eq!(updated.created_at, doc.created_at);
        assert!(updated.updated_at > doc.updated_at);
        assert_eq!(updated.order, 3);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let store: MemoryCollection<Post> = MemoryCollection::new();
        let err = store.update("nope", post("a"), 0).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn insert_many_is_all_or_nothing() {
        let store = MemoryCollection::new();
        let mut bad = post("bad");
        bad.link = "broken".to_string();
        let err = store
            .insert_many(vec![
                NewDocument {
                    body: post("good"),
                    order: 0,
                },
                NewDocument { body: bad, order: 1 },
            ])
            .await
            .unwrap_err();
        assert!(err.is_schema());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn insert_many_rejects_duplicate_unique_keys_within_batch() {
        let store = MemoryCollection::new();
        let err = store
            .insert_many(vec![
                NewDocument {
                    body: location("salto"),
                    order: 0,
                },
                NewDocument {
                    body: location("salto"),
                    order: 1,
                },
            ])
            .await
            .unwrap_err();
        assert!(err.is_schema());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn bulk_update_skips_missing_ids() {
        let store = MemoryCollection::new();
        let doc = store.insert(post("a"), 0).await.unwrap();
        let modified = store
            .bulk_update(vec![
                UpdatePatch {
                    id: doc.id.clone(),
                    body: post("a2"),
                    order: 1,
                },
                UpdatePatch {
                    id: "gone".to_string(),
                    body: post("ghost"),
                    order: 2,
                },
            ])
            .await
            .unwrap();
        assert_eq!(modified, 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn delete_and_delete_many() {
        let store = MemoryCollection::new();
        let a = store.insert(post("a"), 0).await.unwrap();
        let b = store.insert(post("b"), 1).await.unwrap();
        let c = store.insert(post("c"), 2).await.unwrap();

        let removed = store.delete(&a.id).await.unwrap();
        assert_eq!(removed.id, a.id);
        assert!(store.delete(&a.id).await.unwrap_err().is_not_found());

        let count = store
            .delete_many(&[b.id.clone(), c.id.clone(), "gone".to_string()])
            .await
            .unwrap();
        assert_eq!(count, 2);
        assert!(store.is_empty().await);
    }
}
