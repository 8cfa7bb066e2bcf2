use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::id::generate_id;
use crate::item::CollectionItem;
use crate::time::now_utc;

/// A persisted collection item together with its store-assigned envelope:
/// an immutable id, the position within the collection and the
/// creation/update timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<T> {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub order: i64,
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(rename = "updatedAt", with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(flatten)]
    pub body: T,
}

impl<T: CollectionItem> Document<T> {
    /// Wrap a body in a fresh envelope with a generated id.
    pub fn new(body: T, order: i64) -> Self {
        let now = now_utc();
        Self {
            id: generate_id(),
            order,
            created_at: now,
            updated_at: now,
            body,
        }
    }

    /// Refresh the update timestamp.
    pub fn touch(&mut self) {
        self.updated_at = now_utc();
    }
}

/// Sort documents into canonical read order: ascending `order`, with the
/// collection's tiebreak applied between equal positions.
pub fn canonical_sort<T: CollectionItem>(docs: &mut [Document<T>]) {
    docs.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| T::tiebreak(a, b)));
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::*;
    use crate::item::CollectionKind;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        text: String,
    }

    impl CollectionItem for Note {
        const KIND: CollectionKind = CollectionKind::Posts;

        fn tiebreak(a: &Document<Self>, b: &Document<Self>) -> Ordering {
            a.body.text.cmp(&b.body.text)
        }
    }

    fn note(text: &str, order: i64) -> Document<Note> {
        Document::new(
            Note {
                text: text.to_string(),
            },
            order,
        )
    }

    #[test]
    fn new_documents_get_distinct_ids_and_matching_timestamps() {
        let a = note("a", 0);
        let b = note("b", 1);
        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, a.updated_at);
    }

    #[test]
    fn touch_refreshes_only_the_update_timestamp() {
        let mut doc = note("a", 0);
        let created = doc.created_at;
        std::thread::sleep(std::time::Duration::from_millis(1));
        doc.touch();
        assert_eq!(doc.created_at, created);
        assert!(doc.updated_at > created);
    }

    #[test]
    fn wire_shape_uses_mongo_style_field_names() {
        let doc = note("hello", 3);
        let j = serde_json::to_value(&doc).unwrap();
        assert_eq!(j["_id"], json!(doc.id));
        assert_eq!(j["order"], json!(3));
        assert!(j["createdAt"].is_string());
        assert!(j["updatedAt"].is_string());
        // body is flattened into the top-level object
        assert_eq!(j["text"], json!("hello"));
    }

    #[test]
    fn canonical_sort_orders_by_position_then_tiebreak() {
        let mut docs = vec![note("b", 1), note("z", 0), note("a", 1)];
        canonical_sort(&mut docs);
        let texts: Vec<&str> = docs.iter().map(|d| d.body.text.as_str()).collect();
        assert_eq!(texts, ["z", "a", "b"]);
        assert_eq!(docs[0].order, 0);
    }
}
