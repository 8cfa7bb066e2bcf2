use std::collections::HashMap;

use corral_core::{Reconcilable, ValidationError};

/// Validate a whole submission before any store interaction.
///
/// Runs the collection's per-item rules in order, then checks that no two
/// items normalize to the same batch key. The first violation rejects the
/// whole request; no side effects either way.
pub fn validate_batch<R: Reconcilable>(drafts: &[R::Draft]) -> Result<(), ValidationError> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    for (i, draft) in drafts.iter().enumerate() {
        // Positions are 1-based in every user-facing message.
        R::validate(i + 1, draft)?;
        if let Some((field, key)) = R::batch_key(draft)
            && seen.insert(key.clone(), i + 1).is_some()
        {
            return Err(ValidationError::duplicate(R::ITEM_NAME, field, key));
        }
    }
    Ok(())
}
