use corral_core::CollectionItem;
use corral_storage::{NewDocument, UpdatePatch};

/// The operations computed by the differ: three disjoint sets keyed on what
/// happens to identity. Updates keep an identity, creates mint one, deletes
/// retire one.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeSet<T> {
    pub updates: Vec<UpdatePatch<T>>,
    pub creates: Vec<NewDocument<T>>,
    pub deletes: Vec<String>,
}

impl<T> Default for ChangeSet<T> {
    fn default() -> Self {
        Self {
            updates: Vec::new(),
            creates: Vec::new(),
            deletes: Vec::new(),
        }
    }
}

impl<T: CollectionItem> ChangeSet<T> {
    /// True iff any update, create or delete was queued.
    pub fn has_changes(&self) -> bool {
        !self.updates.is_empty() || !self.creates.is_empty() || !self.deletes.is_empty()
    }

    /// Total number of queued operations.
    pub fn len(&self) -> usize {
        self.updates.len() + self.creates.len() + self.deletes.len()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_changes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corral_core::model::NavLink;

    #[test]
    fn empty_set_has_no_changes() {
        let set: ChangeSet<NavLink> = ChangeSet::default();
        assert!(!set.has_changes());
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn any_queued_operation_counts_as_a_change() {
        let mut set: ChangeSet<NavLink> = ChangeSet::default();
        set.deletes.push("some-id".to_string());
        assert!(set.has_changes());
        assert_eq!(set.len(), 1);
    }
}
