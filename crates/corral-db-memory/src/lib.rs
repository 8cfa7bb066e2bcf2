//! In-memory storage backend for the Corral server.
//!
//! One [`MemoryCollection`] per collection, intended for development and
//! tests. Enforces the same schema-level constraints a database-backed
//! store would: per-field checks and the collection-wide unique key.

pub mod collection;

pub use collection::MemoryCollection;
