//! Ordered-collection reconciliation for the Corral server.
//!
//! Given the complete desired ordered list of items for a collection, the
//! engine computes and applies the minimal set of create/update/delete
//! operations so the store ends up holding exactly the submitted items, in
//! the submitted order, while items that are semantically unchanged keep
//! their identity and creation metadata.
//!
//! Four pieces, composed linearly per request:
//!
//! 1. [`validate_batch`] — rejects the whole submission on the first
//!    per-item or duplicate-in-batch violation.
//! 2. [`diff`] — pure function from (stored snapshot, submission) to a
//!    [`ChangeSet`].
//! 3. [`execute`] — applies a change set through the store's three bulk
//!    primitives, with no cross-step atomicity.
//! 4. [`reconcile`] — sequences the above, short-circuits when nothing
//!    changed and re-reads the canonical result.
//!
//! The engine is generic over [`corral_core::Reconcilable`], which supplies
//! the per-collection validation, projection and equality rules.

pub mod change_set;
pub mod diff;
pub mod execute;
pub mod reconcile;
pub mod validate;

pub use change_set::ChangeSet;
pub use diff::diff;
pub use execute::{ExecutionReport, execute};
pub use reconcile::{ReconcileError, ReconcileOutcome, reconcile};
pub use validate::validate_batch;
