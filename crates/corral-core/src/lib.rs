pub mod document;
pub mod error;
pub mod id;
pub mod item;
pub mod model;
pub mod time;
pub mod validate;

pub use document::{Document, canonical_sort};
pub use error::{CoreError, Result};
pub use id::generate_id;
pub use item::{CollectionItem, CollectionKind, FieldViolation, Reconcilable};
pub use time::now_utc;
pub use validate::ValidationError;
