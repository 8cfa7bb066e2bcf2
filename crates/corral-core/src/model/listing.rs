use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::CoreError;
use crate::item::{CollectionItem, CollectionKind, FieldViolation, Reconcilable};
use crate::validate::{
    ValidationError, check_http_url, is_http_url, non_blank, require, require_text,
};

/// Livestock category of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Cattle,
    Equine,
    Sheep,
    Swine,
    Goat,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cattle => "Cattle",
            Self::Equine => "Equine",
            Self::Sheep => "Sheep",
            Self::Swine => "Swine",
            Self::Goat => "Goat",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Self::Cattle,
            Self::Equine,
            Self::Sheep,
            Self::Swine,
            Self::Goat,
            Self::Other,
        ]
        .into_iter()
        .find(|c| c.as_str().eq_ignore_ascii_case(s))
        .ok_or_else(|| CoreError::invalid_document(format!("unknown category '{s}'")))
    }
}

/// Availability of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ListingStatus {
    #[default]
    Available,
    Unavailable,
    Sold,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Unavailable => "Unavailable",
            Self::Sold => "Sold",
        }
    }
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Available, Self::Unavailable, Self::Sold]
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::invalid_document(format!("unknown status '{s}'")))
    }
}

/// A livestock lot offered for restocking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub name: String,
    pub category: Category,
    pub breed: String,
    pub class: String,
    pub weight: String,
    pub age: String,
    pub location: String,
    #[serde(rename = "headCount")]
    pub head_count: u32,
    #[serde(default)]
    pub status: ListingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(rename = "countryCode")]
    pub country_code: String,
    #[serde(rename = "contactNumber")]
    pub contact_number: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingDraft {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub category: Option<Category>,
    pub breed: Option<String>,
    pub class: Option<String>,
    pub weight: Option<String>,
    pub age: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "headCount")]
    pub head_count: Option<u32>,
    pub status: Option<ListingStatus>,
    pub video: Option<String>,
    #[serde(rename = "countryCode")]
    pub country_code: Option<String>,
    #[serde(rename = "contactNumber")]
    pub contact_number: Option<String>,
}

impl Listing {
    /// Apply the fields present in `draft` onto a copy of this listing.
    pub fn merged(&self, draft: &ListingDraft) -> Listing {
        let mut next = self.clone();
        if let Some(v) = non_blank(&draft.name) {
            next.name = v;
        }
        if let Some(v) = draft.category {
            next.category = v;
        }
        if let Some(v) = non_blank(&draft.breed) {
            next.breed = v;
        }
        if let Some(v) = non_blank(&draft.class) {
            next.class = v;
        }
        if let Some(v) = non_blank(&draft.weight) {
            next.weight = v;
        }
        if let Some(v) = non_blank(&draft.age) {
            next.age = v;
        }
        if let Some(v) = non_blank(&draft.location) {
            next.location = v;
        }
        if let Some(v) = draft.head_count {
            next.head_count = v;
        }
        if let Some(v) = draft.status {
            next.status = v;
        }
        if let Some(v) = non_blank(&draft.video) {
            next.video = Some(v);
        }
        if let Some(v) = non_blank(&draft.country_code) {
            next.country_code = v;
        }
        if let Some(v) = non_blank(&draft.contact_number) {
            next.contact_number = v;
        }
        next
    }
}

impl CollectionItem for Listing {
    const KIND: CollectionKind = CollectionKind::Listings;

    fn tiebreak(a: &Document<Self>, b: &Document<Self>) -> Ordering {
        b.created_at.cmp(&a.created_at)
    }

    fn check_constraints(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        if self.name.trim().is_empty() {
            violations.push(FieldViolation::new("name", "is required"));
        }
        if self.name.chars().count() > 100 {
            violations.push(FieldViolation::new("name", "must not exceed 100 characters"));
        }
        for (field, value) in [
            ("breed", &self.breed),
            ("class", &self.class),
            ("weight", &self.weight),
            ("age", &self.age),
            ("location", &self.location),
            ("countryCode", &self.country_code),
            ("contactNumber", &self.contact_number),
        ] {
            if value.trim().is_empty() {
                violations.push(FieldViolation::new(field, "is required"));
            }
        }
        if self.head_count < 1 {
            violations.push(FieldViolation::new("headCount", "must be at least 1"));
        }
        if let Some(video) = self.video.as_deref()
            && !is_http_url(video)
        {
            violations.push(FieldViolation::new("video", "must be a valid http(s) URL"));
        }
        violations
    }
}

impl Reconcilable for Listing {
    type Draft = ListingDraft;

    const PAYLOAD_FIELD: &'static str = "animals";
    const ITEM_NAME: &'static str = "animal";

    fn draft_id(draft: &Self::Draft) -> Option<&str> {
        draft.id.as_deref()
    }

    fn validate(index: usize, draft: &Self::Draft) -> Result<(), ValidationError> {
        require_text("animal", index, "name", &draft.name)?;
        require("animal", index, "category", &draft.category)?;
        require_text("animal", index, "breed", &draft.breed)?;
        require_text("animal", index, "class", &draft.class)?;
        require_text("animal", index, "weight", &draft.weight)?;
        require_text("animal", index, "age", &draft.age)?;
        require_text("animal", index, "location", &draft.location)?;
        let head_count = *require("animal", index, "headCount", &draft.head_count)?;
        require_text("animal", index, "countryCode", &draft.country_code)?;
        require_text("animal", index, "contactNumber", &draft.contact_number)?;
        if head_count < 1 {
            return Err(ValidationError::format(
                "animal",
                index,
                "headCount",
                "must be at least 1",
            ));
        }
        if let Some(video) = non_blank(&draft.video) {
            check_http_url("animal", index, "video", &video)?;
        }
        Ok(())
    }

    fn project(draft: &Self::Draft) -> Self {
        Listing {
            name: non_blank(&draft.name).unwrap_or_default(),
            category: draft.category.unwrap_or(Category::Other),
            breed: non_blank(&draft.breed).unwrap_or_default(),
            class: non_blank(&draft.class).unwrap_or_default(),
            weight: non_blank(&draft.weight).unwrap_or_default(),
            age: non_blank(&draft.age).unwrap_or_default(),
            location: non_blank(&draft.location).unwrap_or_default(),
            head_count: draft.head_count.unwrap_or(1),
            status: draft.status.unwrap_or_default(),
            video: non_blank(&draft.video),
            country_code: non_blank(&draft.country_code).unwrap_or_default(),
            contact_number: non_blank(&draft.contact_number).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn draft() -> ListingDraft {
        ListingDraft {
            id: None,
            name: Some("Hereford lot".to_string()),
            category: Some(Category::Cattle),
            breed: Some("Hereford".to_string()),
            class: Some("Steer".to_string()),
            weight: Some("380kg".to_string()),
            age: Some("2 years".to_string()),
            location: Some("Salto".to_string()),
            head_count: Some(40),
            status: None,
            video: None,
            country_code: Some("+598".to_string()),
            contact_number: Some("99123456".to_string()),
        }
    }

    #[test]
    fn valid_draft_passes_with_default_status() {
        assert!(Listing::validate(1, &draft()).is_ok());
        assert_eq!(Listing::project(&draft()).status, ListingStatus::Available);
    }

    #[test]
    fn head_count_must_be_positive() {
        let mut d = draft();
        d.head_count = Some(0);
        let err = Listing::validate(1, &d).unwrap_err();
        assert!(err.to_string().contains("headCount"));
    }

    #[test]
    fn video_is_optional_but_checked_when_present() {
        let mut d = draft();
        d.video = Some("https://tube.example.com/v/1".to_string());
        assert!(Listing::validate(1, &d).is_ok());
        d.video = Some("v/1".to_string());
        assert!(Listing::validate(1, &d).is_err());
    }

    #[test]
    fn category_and_status_parse_case_insensitively() {
        assert_eq!("cattle".parse::<Category>().unwrap(), Category::Cattle);
        assert_eq!(
            "SOLD".parse::<ListingStatus>().unwrap(),
            ListingStatus::Sold
        );
        assert!("fish".parse::<Category>().is_err());
    }

    #[test]
    fn wire_shape_uses_camel_case_names() {
        let j = serde_json::to_value(Listing::project(&draft())).unwrap();
        assert_eq!(j["headCount"], json!(40));
        assert_eq!(j["countryCode"], json!("+598"));
        assert_eq!(j["status"], json!("Available"));
        assert!(j.get("video").is_none());
    }
}
