//! The Corral HTTP server: a content-management API over keyed, ordered
//! document collections, with a reconciliation ("replace all") endpoint for
//! each ordered collection.

pub mod config;
pub mod observability;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{AppConfig, Environment};
pub use server::{CorralServer, ServerBuilder, build_app};
pub use state::AppState;
