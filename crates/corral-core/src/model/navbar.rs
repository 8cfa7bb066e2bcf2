use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::item::{CollectionItem, CollectionKind, FieldViolation, Reconcilable};
use crate::validate::{ValidationError, non_blank, require_text};

/// One entry of the site navigation bar. `link` may be a relative path, so
/// no URL shape is enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavLink {
    pub text: String,
    pub link: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NavLinkDraft {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
}

impl CollectionItem for NavLink {
    const KIND: CollectionKind = CollectionKind::NavLinks;

    fn tiebreak(a: &Document<Self>, b: &Document<Self>) -> Ordering {
        a.created_at.cmp(&b.created_at)
    }

    fn check_constraints(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        if self.text.trim().is_empty() {
            violations.push(FieldViolation::new("text", "is required"));
        }
        if self.link.trim().is_empty() {
            violations.push(FieldViolation::new("link", "is required"));
        }
        violations
    }
}

impl Reconcilable for NavLink {
    type Draft = NavLinkDraft;

    const PAYLOAD_FIELD: &'static str = "links";
    const ITEM_NAME: &'static str = "link";

    fn draft_id(draft: &Self::Draft) -> Option<&str> {
        draft.id.as_deref()
    }

    fn validate(index: usize, draft: &Self::Draft) -> Result<(), ValidationError> {
        require_text("link", index, "text", &draft.text)?;
        require_text("link", index, "link", &draft.link)?;
        Ok(())
    }

    fn project(draft: &Self::Draft) -> Self {
        NavLink {
            text: non_blank(&draft.text).unwrap_or_default(),
            link: non_blank(&draft.link).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_links_are_accepted() {
        let d = NavLinkDraft {
            id: None,
            text: Some("About".to_string()),
            link: Some("/about".to_string()),
        };
        assert!(NavLink::validate(1, &d).is_ok());
        assert_eq!(NavLink::project(&d).link, "/about");
    }

    #[test]
    fn missing_text_is_reported() {
        let d = NavLinkDraft {
            id: None,
            text: None,
            link: Some("/about".to_string()),
        };
        let err = NavLink::validate(2, &d).unwrap_err();
        assert_eq!(err.to_string(), "link 2 is missing the required field 'text'");
    }
}
