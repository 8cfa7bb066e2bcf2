use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::CoreError;
use crate::item::{CollectionItem, CollectionKind, FieldViolation};
use crate::validate::{is_email, is_loose_phone, non_blank};

/// Workflow state of a contact submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Pending,
    Read,
    Answered,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Read => "read",
            Self::Answered => "answered",
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmissionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Pending, Self::Read, Self::Answered]
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::invalid_document(format!("unknown status '{s}'")))
    }
}

/// A message sent through the public contact form.
///
/// Not part of the reconciled collections: submissions arrive one at a time
/// and are only ever moved through their workflow states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: SubmissionStatus,
}

/// Incoming contact form payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactSubmissionDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

/// Status-only update for an existing submission.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionUpdate {
    pub status: Option<SubmissionStatus>,
}

impl ContactSubmission {
    /// Build a submission from the public form payload, lowercasing the
    /// email and defaulting the message to empty.
    pub fn from_draft(draft: &ContactSubmissionDraft) -> Self {
        Self {
            name: non_blank(&draft.name).unwrap_or_default(),
            email: non_blank(&draft.email).unwrap_or_default().to_lowercase(),
            phone: non_blank(&draft.phone).unwrap_or_default(),
            message: non_blank(&draft.message).unwrap_or_default(),
            status: SubmissionStatus::Pending,
        }
    }
}

impl CollectionItem for ContactSubmission {
    const KIND: CollectionKind = CollectionKind::ContactSubmissions;

    // Newest submissions first.
    fn tiebreak(a: &Document<Self>, b: &Document<Self>) -> Ordering {
        b.created_at.cmp(&a.created_at)
    }

    fn check_constraints(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        if self.name.trim().is_empty() {
            violations.push(FieldViolation::new("name", "is required"));
        }
        if !is_email(&self.email) {
            violations.push(FieldViolation::new("email", "must be a valid email address"));
        }
        if !is_loose_phone(&self.phone) {
            violations.push(FieldViolation::new("phone", "must be a valid phone number"));
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn draft() -> ContactSubmissionDraft {
        ContactSubmissionDraft {
            name: Some("Ana".to_string()),
            email: Some("Ana@Example.COM".to_string()),
            phone: Some("+598 99 123 456".to_string()),
            message: None,
        }
    }

    #[test]
    fn from_draft_normalizes_email_and_defaults() {
        let s = ContactSubmission::from_draft(&draft());
        assert_eq!(s.email, "ana@example.com");
        assert_eq!(s.message, "");
        assert_eq!(s.status, SubmissionStatus::Pending);
    }

    #[test]
    fn bad_email_and_phone_violate_constraints() {
        let mut s = ContactSubmission::from_draft(&draft());
        s.email = "nope".to_string();
        s.phone = "nope".to_string();
        let fields: Vec<&str> = s.check_constraints().iter().map(|v| v.field).collect();
        assert_eq!(fields, ["email", "phone"]);
    }

    #[test]
    fn status_serializes_lowercase() {
        let j = serde_json::to_value(SubmissionStatus::Answered).unwrap();
        assert_eq!(j, json!("answered"));
        assert_eq!(
            "Pending".parse::<SubmissionStatus>().unwrap(),
            SubmissionStatus::Pending
        );
    }
}
