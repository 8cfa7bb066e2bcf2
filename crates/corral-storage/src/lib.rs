//! Storage abstraction for the Corral server.
//!
//! Defines the [`CollectionStore`] trait every backend implements, plus the
//! error and patch types shared between backends and the reconciliation
//! engine.

pub mod error;
pub mod traits;

pub use error::{ErrorCategory, StorageError};
pub use traits::{CollectionStore, DynStore, NewDocument, UpdatePatch};
