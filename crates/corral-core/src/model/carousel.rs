use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::item::{CollectionItem, CollectionKind, FieldViolation, Reconcilable};
use crate::validate::{ValidationError, non_blank, require_text};

fn default_cta() -> String {
    "See more".to_string()
}

/// One slide of the landing-page carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselImage {
    pub alt: String,
    pub link: String,
    pub title: String,
    pub description: String,
    #[serde(default = "default_cta")]
    pub cta: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CarouselImageDraft {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub alt: Option<String>,
    pub link: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub cta: Option<String>,
}

impl CarouselImage {
    /// Apply the fields present in `draft` onto a copy of this slide.
    pub fn merged(&self, draft: &CarouselImageDraft) -> CarouselImage {
        let mut next = self.clone();
        if let Some(v) = non_blank(&draft.alt) {
            next.alt = v;
        }
        if let Some(v) = non_blank(&draft.link) {
            next.link = v;
        }
        if let Some(v) = non_blank(&draft.title) {
            next.title = v;
        }
        if let Some(v) = non_blank(&draft.description) {
            next.description = v;
        }
        if let Some(v) = non_blank(&draft.cta) {
            next.cta = v;
        }
        next
    }
}

impl CollectionItem for CarouselImage {
    const KIND: CollectionKind = CollectionKind::CarouselImages;

    fn tiebreak(a: &Document<Self>, b: &Document<Self>) -> Ordering {
        b.created_at.cmp(&a.created_at)
    }

    fn check_constraints(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        if self.alt.trim().is_empty() {
            violations.push(FieldViolation::new("alt", "is required"));
        }
        if self.link.trim().is_empty() {
            violations.push(FieldViolation::new("link", "is required"));
        }
        if self.title.trim().is_empty() {
            violations.push(FieldViolation::new("title", "is required"));
        }
        if self.title.chars().count() > 100 {
            violations.push(FieldViolation::new("title", "must not exceed 100 characters"));
        }
        if self.description.trim().is_empty() {
            violations.push(FieldViolation::new("description", "is required"));
        }
        violations
    }
}

impl Reconcilable for CarouselImage {
    type Draft = CarouselImageDraft;

    const PAYLOAD_FIELD: &'static str = "images";
    const ITEM_NAME: &'static str = "image";

    fn draft_id(draft: &Self::Draft) -> Option<&str> {
        draft.id.as_deref()
    }

    fn validate(index: usize, draft: &Self::Draft) -> Result<(), ValidationError> {
        require_text("image", index, "alt", &draft.alt)?;
        require_text("image", index, "link", &draft.link)?;
        require_text("image", index, "title", &draft.title)?;
        require_text("image", index, "description", &draft.description)?;
        Ok(())
    }

    fn project(draft: &Self::Draft) -> Self {
        CarouselImage {
            alt: non_blank(&draft.alt).unwrap_or_default(),
            link: non_blank(&draft.link).unwrap_or_default(),
            title: non_blank(&draft.title).unwrap_or_default(),
            description: non_blank(&draft.description).unwrap_or_default(),
            cta: non_blank(&draft.cta).unwrap_or_else(default_cta),
        }
    }
}
