use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::item::{CollectionItem, CollectionKind, FieldViolation, Reconcilable};
use crate::validate::{
    ValidationError, check_intl_phone, check_range, is_intl_phone, non_blank, normalize_key,
    require, require_text,
};

/// A branch office shown on the map page.
///
/// `name` is the stable lookup key: stored lowercased and unique across the
/// collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(rename = "branchName")]
    pub branch_name: String,
    pub address: String,
    pub phone: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationDraft {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "branchName")]
    pub branch_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl Location {
    /// Apply the fields present in `draft` onto a copy of this location.
    pub fn merged(&self, draft: &LocationDraft) -> Location {
        let mut next = self.clone();
        if let Some(v) = non_blank(&draft.name) {
            next.name = v.to_lowercase();
        }
        if let Some(v) = non_blank(&draft.branch_name) {
            next.branch_name = v;
        }
        if let Some(v) = non_blank(&draft.address) {
            next.address = v;
        }
        if let Some(v) = non_blank(&draft.phone) {
            next.phone = v;
        }
        if let Some(v) = draft.lat {
            next.lat = v;
        }
        if let Some(v) = draft.lng {
            next.lng = v;
        }
        next
    }
}

impl CollectionItem for Location {
    const KIND: CollectionKind = CollectionKind::Locations;

    fn tiebreak(a: &Document<Self>, b: &Document<Self>) -> Ordering {
        a.body.name.cmp(&b.body.name)
    }

    fn check_constraints(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        if self.name.trim().is_empty() {
            violations.push(FieldViolation::new("name", "is required"));
        }
        if self.name.chars().count() > 50 {
            violations.push(FieldViolation::new("name", "must not exceed 50 characters"));
        }
        if self.branch_name.trim().is_empty() {
            violations.push(FieldViolation::new("branchName", "is required"));
        }
        if self.branch_name.chars().count() > 100 {
            violations.push(FieldViolation::new(
                "branchName",
                "must not exceed 100 characters",
            ));
        }
        if self.address.trim().is_empty() {
            violations.push(FieldViolation::new("address", "is required"));
        }
        if self.address.chars().count() > 200 {
            violations.push(FieldViolation::new(
                "address",
                "must not exceed 200 characters",
            ));
        }
        if !is_intl_phone(&self.phone) {
            violations.push(FieldViolation::new(
                "phone",
                "must use the international format +<country code><number>",
            ));
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            violations.push(FieldViolation::new("lat", "must be between -90 and 90"));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            violations.push(FieldViolation::new("lng", "must be between -180 and 180"));
        }
        violations
    }

    fn unique_key(&self) -> Option<String> {
        Some(normalize_key(&self.name))
    }
}

impl Reconcilable for Location {
    type Draft = LocationDraft;

    const PAYLOAD_FIELD: &'static str = "locations";
    const ITEM_NAME: &'static str = "location";

    fn draft_id(draft: &Self::Draft) -> Option<&str> {
        draft.id.as_deref()
    }

    fn validate(index: usize, draft: &Self::Draft) -> Result<(), ValidationError> {
        require_text("location", index, "name", &draft.name)?;
        require_text("location", index, "branchName", &draft.branch_name)?;
        require_text("location", index, "address", &draft.address)?;
        let phone = require_text("location", index, "phone", &draft.phone)?;
        let lat = *require("location", index, "lat", &draft.lat)?;
        let lng = *require("location", index, "lng", &draft.lng)?;
        check_intl_phone("location", index, "phone", phone)?;
        check_range("location", index, "lat", lat, -90.0, 90.0)?;
        check_range("location", index, "lng", lng, -180.0, 180.0)?;
        Ok(())
    }

    fn batch_key(draft: &Self::Draft) -> Option<(&'static str, String)> {
        draft
            .name
            .as_deref()
            .map(|name| ("name", normalize_key(name)))
    }

    fn project(draft: &Self::Draft) -> Self {
        Location {
            name: non_blank(&draft.name).unwrap_or_default().to_lowercase(),
            branch_name: non_blank(&draft.branch_name).unwrap_or_default(),
            address: non_blank(&draft.address).unwrap_or_default(),
            phone: non_blank(&draft.phone).unwrap_or_default(),
            lat: draft.lat.unwrap_or_default(),
            lng: draft.lng.unwrap_or_default(),
        }
    }
}
