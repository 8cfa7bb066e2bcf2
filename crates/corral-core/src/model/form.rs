use serde::{Deserialize, Serialize};

use crate::item::{CollectionItem, CollectionKind, FieldViolation};
use crate::validate::normalize_key;

fn default_form_name() -> String {
    "contactForm".to_string()
}

fn default_true() -> bool {
    true
}

/// Input widget rendered for a configured form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Email,
    Tel,
    Number,
    Date,
}

/// Configuration of a single form input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    #[serde(rename = "displayText")]
    pub display_text: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default)]
    pub multiline: bool,
    #[serde(default)]
    pub required: bool,
}

/// The four configurable inputs of the public contact form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FormFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<FormField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<FormField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<FormField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<FormField>,
}

impl FormFields {
    fn iter(&self) -> impl Iterator<Item = (&'static str, &FormField)> {
        [
            ("name", self.name.as_ref()),
            ("email", self.email.as_ref()),
            ("phone", self.phone.as_ref()),
            ("message", self.message.as_ref()),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.map(|f| (k, f)))
    }
}

/// Stored configuration of the public contact form. `formName` is unique:
/// there is one active configuration per form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(rename = "formName", default = "default_form_name")]
    pub form_name: String,
    #[serde(default)]
    pub fields: FormFields,
    #[serde(default = "default_true")]
    pub active: bool,
}

/// Upsert payload for the form configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FormConfigDraft {
    #[serde(rename = "formName")]
    pub form_name: Option<String>,
    pub fields: Option<FormFields>,
    pub active: Option<bool>,
}

impl FormConfig {
    pub fn from_draft(draft: &FormConfigDraft) -> Self {
        Self {
            form_name: draft
                .form_name
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .unwrap_or_else(default_form_name),
            fields: draft.fields.clone().unwrap_or_default(),
            active: draft.active.unwrap_or(true),
        }
    }
}

impl CollectionItem for FormConfig {
    const KIND: CollectionKind = CollectionKind::FormConfigs;

    fn check_constraints(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        if self.form_name.trim().is_empty() {
            violations.push(FieldViolation::new("formName", "is required"));
        }
        for (name, field) in self.fields.iter() {
            if field.display_text.trim().is_empty() {
                violations.push(FieldViolation::new(name, "displayText is required"));
            }
        }
        violations
    }

    fn unique_key(&self) -> Option<String> {
        Some(normalize_key(&self.form_name))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn draft_defaults_to_the_contact_form() {
        let cfg = FormConfig::from_draft(&FormConfigDraft {
            form_name: None,
            fields: None,
            active: None,
        });
        assert_eq!(cfg.form_name, "contactForm");
        assert!(cfg.active);
        assert!(cfg.fields.name.is_none());
    }

    #[test]
    fn field_wire_shape() {
        let field: FormField = serde_json::from_value(json!({
            "displayText": "Your name",
            "type": "text",
            "required": true
        }))
        .unwrap();
        assert_eq!(field.field_type, FieldType::Text);
        assert!(field.required);
        assert!(!field.multiline);

        let j = serde_json::to_value(&field).unwrap();
        assert_eq!(j["displayText"], json!("Your name"));
        assert_eq!(j["type"], json!("text"));
    }

    #[test]
    fn blank_display_text_violates_constraints() {
        let cfg = FormConfig {
            form_name: "contactForm".to_string(),
            fields: FormFields {
                name: Some(FormField {
                    display_text: " ".to_string(),
                    field_type: FieldType::Text,
                    multiline: false,
                    required: true,
                }),
                ..FormFields::default()
            },
            active: true,
        };
        assert_eq!(cfg.check_constraints().len(), 1);
    }

    #[test]
    fn unique_key_normalizes_the_form_name() {
        let cfg = FormConfig::from_draft(&FormConfigDraft {
            form_name: Some("  ContactForm ".to_string()),
            fields: None,
            active: None,
        });
        assert_eq!(cfg.unique_key().as_deref(), Some("contactform"));
    }
}
