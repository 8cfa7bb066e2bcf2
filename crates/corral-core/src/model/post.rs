use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::document::Document;
use crate::item::{CollectionItem, CollectionKind, FieldViolation, Reconcilable};
use crate::validate::{
    ValidationError, check_http_url, is_http_url, non_blank, require, require_text,
};

fn default_cta() -> String {
    "Click".to_string()
}

/// A news post shown on the landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    pub description: String,
    pub image: String,
    pub link: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub alt: String,
    #[serde(default = "default_cta")]
    pub cta: String,
}

/// Submitted post shape: optional `_id` plus optional domain fields.
#[derive(Debug, Clone, Deserialize)]
pub struct PostDraft {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub date: Option<OffsetDateTime>,
    pub alt: Option<String>,
    pub cta: Option<String>,
}

impl Post {
    /// Apply the fields present in `draft` onto a copy of this post.
    /// Absent or blank fields keep their current value.
    pub fn merged(&self, draft: &PostDraft) -> Post {
        let mut next = self.clone();
        if let Some(v) = non_blank(&draft.title) {
            next.title = v;
        }
        if let Some(v) = non_blank(&draft.description) {
            next.description = v;
        }
        if let Some(v) = non_blank(&draft.image) {
            next.image = v;
        }
        if let Some(v) = non_blank(&draft.link) {
            next.link = v;
        }
        if let Some(v) = draft.date {
            next.date = v;
        }
        if let Some(v) = non_blank(&draft.alt) {
            next.alt = v;
        }
        if let Some(v) = non_blank(&draft.cta) {
            next.cta = v;
        }
        next
    }
}

impl CollectionItem for Post {
    const KIND: CollectionKind = CollectionKind::Posts;

    // Newest first between posts sharing a position.
    fn tiebreak(a: &Document<Self>, b: &Document<Self>) -> Ordering {
        b.body.date.cmp(&a.body.date)
    }

    fn check_constraints(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        if self.title.trim().is_empty() {
            violations.push(FieldViolation::new("title", "is required"));
        }
        if self.title.chars().count() > 150 {
            violations.push(FieldViolation::new("title", "must not exceed 150 characters"));
        }
        if self.description.trim().is_empty() {
            violations.push(FieldViolation::new("description", "is required"));
        }
        if !is_http_url(&self.image) {
            violations.push(FieldViolation::new("image", "must be a valid http(s) URL"));
        }
        if !is_http_url(&self.link) {
            violations.push(FieldViolation::new("link", "must be a valid http(s) URL"));
        }
        if self.alt.trim().is_empty() {
            violations.push(FieldViolation::new("alt", "is required"));
        }
        if self.alt.chars().count() > 200 {
            violations.push(FieldViolation::new("alt", "must not exceed 200 characters"));
        }
        if self.cta.chars().count() > 50 {
            violations.push(FieldViolation::new("cta", "must not exceed 50 characters"));
        }
        violations
    }
}

impl Reconcilable for Post {
    type Draft = PostDraft;

    const PAYLOAD_FIELD: &'static str = "posts";
    const ITEM_NAME: &'static str = "post";

    fn draft_id(draft: &Self::Draft) -> Option<&str> {
        draft.id.as_deref()
    }

    fn validate(index: usize, draft: &Self::Draft) -> Result<(), ValidationError> {
        require_text("post", index, "title", &draft.title)?;
        require_text("post", index, "description", &draft.description)?;
        let image = require_text("post", index, "image", &draft.image)?;
        let link = require_text("post", index, "link", &draft.link)?;
        require("post", index, "date", &draft.date)?;
        require_text("post", index, "alt", &draft.alt)?;
        check_http_url("post", index, "image", image)?;
        check_http_url("post", index, "link", link)?;
        Ok(())
    }

    fn project(draft: &Self::Draft) -> Self {
        Post {
            title: non_blank(&draft.title).unwrap_or_default(),
            description: non_blank(&draft.description).unwrap_or_default(),
            image: non_blank(&draft.image).unwrap_or_default(),
            link: non_blank(&draft.link).unwrap_or_default(),
            date: draft.date.unwrap_or_else(crate::time::now_utc),
            alt: non_blank(&draft.alt).unwrap_or_default(),
            cta: non_blank(&draft.cta).unwrap_or_else(default_cta),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn draft(title: &str) -> PostDraft {
        PostDraft {
            id: None,
            title: Some(title.to_string()),
            description: Some("body".to_string()),
            image: Some("https://cdn.example.com/a.png".to_string()),
            link: Some("https://example.com/a".to_string()),
            date: Some(OffsetDateTime::UNIX_EPOCH),
            alt: Some("a picture".to_string()),
            cta: None,
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(Post::validate(1, &draft("hello")).is_ok());
    }

    #[test]
    fn missing_title_is_reported_with_position() {
        let mut d = draft("x");
        d.title = None;
        let err = Post::validate(2, &d).unwrap_err();
        assert_eq!(err.to_string(), "post 2 is missing the required field 'title'");
    }

    #[test]
    fn empty_string_counts_as_missing() {
        let mut d = draft("x");
        d.description = Some("  ".to_string());
        assert!(Post::validate(1, &d).is_err());
    }

    #[test]
    fn bad_image_url_is_a_format_error() {
        let mut d = draft("x");
        d.image = Some("not-a-url".to_string());
        let err = Post::validate(1, &d).unwrap_err();
        assert!(err.to_string().contains("invalid image"));
    }

    #[test]
    fn projection_applies_the_cta_default() {
        let projected = Post::project(&draft("hello"));
        assert_eq!(projected.cta, "Click");

        let mut with_cta = draft("hello");
        with_cta.cta = Some("Read on".to_string());
        assert_eq!(Post::project(&with_cta).cta, "Read on");
    }

    #[test]
    fn projection_trims_text_fields() {
        let mut d = draft("x");
        d.title = Some("  spaced  ".to_string());
        assert_eq!(Post::project(&d).title, "spaced");
    }

    #[test]
    fn equality_compares_dates_by_instant() {
        let a = Post::project(&draft("x"));
        let mut d = draft("x");
        // Same instant expressed with an offset.
        d.date = Some(
            OffsetDateTime::UNIX_EPOCH.to_offset(time::macros::offset!(-3)),
        );
        let b = Post::project(&d);
        assert!(Post::fields_match(&a, &b));
    }

    #[test]
    fn merged_keeps_absent_fields() {
        let current = Post::project(&draft("original"));
        let patch = PostDraft {
            id: None,
            title: Some("renamed".to_string()),
            description: None,
            image: None,
            link: None,
            date: None,
            alt: None,
            cta: Some("".to_string()),
        };
        let next = current.merged(&patch);
        assert_eq!(next.title, "renamed");
        assert_eq!(next.description, current.description);
        assert_eq!(next.cta, current.cta);
    }

    #[test]
    fn constraint_checks_catch_overlong_and_malformed_fields() {
        let mut p = Post::project(&draft("x"));
        p.title = "t".repeat(151);
        p.image = "nope".to_string();
        let violations = p.check_constraints();
        let fields: Vec<&str> = violations.iter().map(|v| v.field).collect();
        assert!(fields.contains(&"title"));
        assert!(fields.contains(&"image"));
    }

    #[test]
    fn draft_deserializes_from_wire_shape() {
        let d: PostDraft = serde_json::from_value(json!({
            "_id": "abc",
            "title": "t",
            "date": "2024-06-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(d.id.as_deref(), Some("abc"));
        assert!(d.date.is_some());
        assert!(d.image.is_none());
    }
}
