use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::item::{CollectionItem, CollectionKind, FieldViolation, Reconcilable};
use crate::validate::{ValidationError, non_blank, require_text};

fn default_bg_color() -> String {
    "#FFFFFF".to_string()
}

fn default_text_color() -> String {
    "#000000".to_string()
}

/// A section of the "about us" page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AboutSection {
    pub title: String,
    pub description: String,
    #[serde(rename = "bgColor", default = "default_bg_color")]
    pub bg_color: String,
    #[serde(rename = "textColor", default = "default_text_color")]
    pub text_color: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AboutSectionDraft {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "bgColor")]
    pub bg_color: Option<String>,
    #[serde(rename = "textColor")]
    pub text_color: Option<String>,
}

impl AboutSection {
    /// Apply the fields present in `draft` onto a copy of this section.
    pub fn merged(&self, draft: &AboutSectionDraft) -> AboutSection {
        let mut next = self.clone();
        if let Some(v) = non_blank(&draft.title) {
            next.title = v;
        }
        if let Some(v) = non_blank(&draft.description) {
            next.description = v;
        }
        if let Some(v) = non_blank(&draft.bg_color) {
            next.bg_color = v;
        }
        if let Some(v) = non_blank(&draft.text_color) {
            next.text_color = v;
        }
        next
    }
}

impl CollectionItem for AboutSection {
    const KIND: CollectionKind = CollectionKind::AboutSections;

    fn tiebreak(a: &Document<Self>, b: &Document<Self>) -> Ordering {
        a.created_at.cmp(&b.created_at)
    }

    fn check_constraints(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        if self.title.trim().is_empty() {
            violations.push(FieldViolation::new("title", "is required"));
        }
        if self.description.trim().is_empty() {
            violations.push(FieldViolation::new("description", "is required"));
        }
        violations
    }
}

impl Reconcilable for AboutSection {
    type Draft = AboutSectionDraft;

    const PAYLOAD_FIELD: &'static str = "sections";
    const ITEM_NAME: &'static str = "section";

    fn draft_id(draft: &Self::Draft) -> Option<&str> {
        draft.id.as_deref()
    }

    fn validate(index: usize, draft: &Self::Draft) -> Result<(), ValidationError> {
        require_text("section", index, "title", &draft.title)?;
        require_text("section", index, "description", &draft.description)?;
        Ok(())
    }

    fn project(draft: &Self::Draft) -> Self {
        AboutSection {
            title: non_blank(&draft.title).unwrap_or_default(),
            description: non_blank(&draft.description).unwrap_or_default(),
            bg_color: non_blank(&draft.bg_color).unwrap_or_else(default_bg_color),
            text_color: non_blank(&draft.text_color).unwrap_or_else(default_text_color),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn draft() -> AboutSectionDraft {
        AboutSectionDraft {
            id: None,
            title: Some("Our story".to_string()),
            description: Some("Since 1985".to_string()),
            bg_color: None,
            text_color: None,
        }
    }

    #[test]
    fn defaults_apply_to_colors() {
        let section = AboutSection::project(&draft());
        assert_eq!(section.bg_color, "#FFFFFF");
        assert_eq!(section.text_color, "#000000");
    }

    #[test]
    fn explicit_colors_are_kept() {
        let mut d = draft();
        d.bg_color = Some("#112233".to_string());
        assert_eq!(AboutSection::project(&d).bg_color, "#112233");
    }

    #[test]
    fn default_substitution_makes_equality_stable() {
        // A draft without colors must compare equal to a stored section
        // holding the defaults, otherwise every reconciliation would queue
        // a spurious update.
        let stored = AboutSection::project(&draft());
        let resubmitted = AboutSection::project(&draft());
        assert!(AboutSection::fields_match(&stored, &resubmitted));
    }

    #[test]
    fn wire_shape_uses_camel_case_color_names() {
        let j = serde_json::to_value(AboutSection::project(&draft())).unwrap();
        assert_eq!(j["bgColor"], json!("#FFFFFF"));
        assert_eq!(j["textColor"], json!("#000000"));
    }
}
