use std::collections::HashMap;

use corral_core::{Document, Reconcilable};
use corral_storage::{NewDocument, UpdatePatch};

use crate::change_set::ChangeSet;

/// Compute the change set that transforms `existing` into `submitted`.
///
/// For each submitted item at position `i` (which becomes its target
/// `order`):
///
/// - an identity found in the stored snapshot claims that document; if any
///   field or the position differs, a full-body update is queued. The
///   identity is claimed whether or not anything differed.
/// - an identity the store no longer holds is silently ignored: the item is
///   neither created nor updated. This mirrors a client resubmitting an
///   item that was deleted elsewhere in the meantime.
/// - an item without identity queues a create at position `i`.
///
/// Stored documents left unclaimed after the pass are queued for deletion,
/// in stored canonical order.
///
/// Pure function of its two inputs: no store access, no mutation, same
/// change set for the same arguments every time.
pub fn diff<R: Reconcilable>(existing: &[Document<R>], submitted: &[R::Draft]) -> ChangeSet<R> {
    let mut unclaimed: HashMap<&str, &Document<R>> =
        existing.iter().map(|doc| (doc.id.as_str(), doc)).collect();

    let mut changes = ChangeSet::default();

    for (i, draft) in submitted.iter().enumerate() {
        let order = i as i64;
        match R::draft_id(draft) {
            Some(id) => {
                if let Some(current) = unclaimed.remove(id) {
                    let incoming = R::project(draft);
                    if current.order != order || !R::fields_match(&current.body, &incoming) {
                        changes.updates.push(UpdatePatch {
                            id: current.id.clone(),
                            body: incoming,
                            order,
                        });
                    }
                }
                // Stale identity: dropped without create, update or error.
            }
            None => changes.creates.push(NewDocument {
                body: R::project(draft),
                order,
            }),
        }
    }

    changes.deletes = existing
        .iter()
        .filter(|doc| unclaimed.contains_key(doc.id.as_str()))
        .map(|doc| doc.id.clone())
        .collect();

    changes
}
