use std::sync::Arc;

use corral_core::model::{
    AboutSection, CarouselImage, ContactSubmission, FormConfig, Listing, Location, NavLink, Post,
};
use corral_db_memory::MemoryCollection;
use corral_storage::DynStore;

/// Shared handles to every collection store, opened once at startup and
/// shared read/write across all requests.
#[derive(Clone)]
pub struct AppState {
    pub posts: DynStore<Post>,
    pub carousel: DynStore<CarouselImage>,
    pub locations: DynStore<Location>,
    pub nav_links: DynStore<NavLink>,
    pub about: DynStore<AboutSection>,
    pub listings: DynStore<Listing>,
    pub contacts: DynStore<ContactSubmission>,
    pub forms: DynStore<FormConfig>,
}

impl AppState {
    /// State backed entirely by in-memory collections.
    pub fn in_memory() -> Self {
        Self {
            posts: Arc::new(MemoryCollection::new()),
            carousel: Arc::new(MemoryCollection::new()),
            locations: Arc::new(MemoryCollection::new()),
            nav_links: Arc::new(MemoryCollection::new()),
            about: Arc::new(MemoryCollection::new()),
            listings: Arc::new(MemoryCollection::new()),
            contacts: Arc::new(MemoryCollection::new()),
            forms: Arc::new(MemoryCollection::new()),
        }
    }
}
