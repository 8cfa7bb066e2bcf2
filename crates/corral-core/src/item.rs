use std::cmp::Ordering;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::document::Document;
use crate::error::CoreError;
use crate::validate::ValidationError;

/// The document collections managed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Posts,
    CarouselImages,
    Locations,
    NavLinks,
    AboutSections,
    Listings,
    ContactSubmissions,
    FormConfigs,
}

impl CollectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Posts => "posts",
            Self::CarouselImages => "carousel-images",
            Self::Locations => "locations",
            Self::NavLinks => "nav-links",
            Self::AboutSections => "about-sections",
            Self::Listings => "listings",
            Self::ContactSubmissions => "contact-submissions",
            Self::FormConfigs => "form-configs",
        }
    }

    pub fn all() -> &'static [CollectionKind] {
        &[
            Self::Posts,
            Self::CarouselImages,
            Self::Locations,
            Self::NavLinks,
            Self::AboutSections,
            Self::Listings,
            Self::ContactSubmissions,
            Self::FormConfigs,
        ]
    }
}

impl std::fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CollectionKind::all()
            .iter()
            .find(|k| k.as_str() == s)
            .copied()
            .ok_or_else(|| CoreError::unknown_collection(s))
    }
}

/// A single schema-level constraint violation reported by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A domain value that can be persisted as the body of a [`Document`].
///
/// The storage layer is generic over this trait: it supplies the collection
/// the item belongs to, the canonical read order and the schema-level
/// constraints the store enforces on every write.
pub trait CollectionItem:
    Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Which collection this item belongs to.
    const KIND: CollectionKind;

    /// Ordering applied after the `order` field when reading a collection
    /// back in canonical order.
    fn tiebreak(_a: &Document<Self>, _b: &Document<Self>) -> Ordering {
        Ordering::Equal
    }

    /// Schema-level constraints checked by the store on every write.
    ///
    /// Violations here surface as a structured schema error, distinguishable
    /// from infrastructure failures.
    fn check_constraints(&self) -> Vec<FieldViolation> {
        Vec::new()
    }

    /// Value that must be unique across the whole collection, if any.
    /// Compared after normalization (trimmed, lowercased).
    fn unique_key(&self) -> Option<String> {
        None
    }
}

/// Per-collection strategy for the reconciliation engine.
///
/// A reconcilable collection supplies the submitted-item shape and the three
/// functions the generic engine is parameterized by: per-item validation,
/// projection of a draft onto stored field values (applying defaults), and
/// field-level equality between a stored body and a projected one.
pub trait Reconcilable: CollectionItem {
    /// The submitted-item shape: an optional `_id` plus optional domain
    /// fields. Position in the submitted array is implicit.
    type Draft: DeserializeOwned + Send + Sync;

    /// JSON field carrying the submitted array in a replace-all request
    /// (`"posts"`, `"images"`, ...).
    const PAYLOAD_FIELD: &'static str;

    /// Singular noun used in user-facing messages (`"post"`, `"image"`, ...).
    const ITEM_NAME: &'static str;

    /// The identity the client believes this draft refers to.
    fn draft_id(draft: &Self::Draft) -> Option<&str>;

    /// Validate one submitted item. `index` is the 1-based position used in
    /// error messages.
    fn validate(index: usize, draft: &Self::Draft) -> Result<(), ValidationError>;

    /// Field checked for duplicates within a single submission, normalized
    /// (trimmed, lowercased). Returns `(field name, normalized value)`.
    fn batch_key(_draft: &Self::Draft) -> Option<(&'static str, String)> {
        None
    }

    /// Project a validated draft onto stored field values, substituting the
    /// documented defaults for absent optional fields. This is the single
    /// normalization point shared by creation and equality comparison.
    fn project(draft: &Self::Draft) -> Self;

    /// Field-level equality between the stored body and a projected draft.
    /// The default compares every field exactly.
    fn fields_match(current: &Self, incoming: &Self) -> bool {
        current == incoming
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_kind_round_trips_through_names() {
        for kind in CollectionKind::all() {
            let parsed: CollectionKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, *kind);
        }
    }

    #[test]
    fn unknown_collection_name_is_rejected() {
        let err = "widgets".parse::<CollectionKind>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown collection: widgets");
    }

    #[test]
    fn field_violation_display() {
        let v = FieldViolation::new("lat", "must be between -90 and 90");
        assert_eq!(v.to_string(), "lat: must be between -90 and 90");
    }
}
