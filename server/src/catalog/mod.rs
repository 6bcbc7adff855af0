//! The anime catalog.
//!
//! [`Catalog`] owns the entries; [`CatalogService`] puts the credential gate
//! in front of its mutations.

pub mod entry;
pub mod service;
pub mod store;

pub use entry::{CatalogEntry, EntryId, seed_entries};
pub use service::{CatalogError, CatalogService};
pub use store::{Catalog, StoreError};
