//! Domain models for every collection the API manages.
//!
//! Each module defines the stored body type, the submitted draft shape and
//! the validation/projection rules the reconciliation engine runs with.

pub mod about;
pub mod carousel;
pub mod contact;
pub mod form;
pub mod listing;
pub mod location;
pub mod navbar;
pub mod post;

pub use about::{AboutSection, AboutSectionDraft};
pub use carousel::{CarouselImage, CarouselImageDraft};
pub use contact::{ContactSubmission, ContactSubmissionDraft, SubmissionStatus, SubmissionUpdate};
pub use form::{FieldType, FormConfig, FormConfigDraft, FormField, FormFields};
pub use listing::{Category, Listing, ListingDraft, ListingStatus};
pub use location::{Location, LocationDraft};
pub use navbar::{NavLink, NavLinkDraft};
pub use post::{Post, PostDraft};
