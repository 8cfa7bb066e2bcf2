use crate::error::{CoreError, Result};

/// Generate a fresh document id.
///
/// Ids are random UUIDs rendered as strings; they are assigned once at
/// creation time and never reused after deletion.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Check that a client-supplied id has the shape of a generated id.
pub fn validate_id(id: &str) -> Result<()> {
    uuid::Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| CoreError::invalid_id(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique_and_valid() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
        assert!(validate_id(&a).is_ok());
        assert!(validate_id(&b).is_ok());
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!(validate_id("not-a-uuid").is_err());
        assert!(validate_id("").is_err());
    }
}
