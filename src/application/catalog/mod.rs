mod catalog_store;
mod errors;

pub use catalog_store::{BookPartition, CatalogStore};
pub use errors::{CatalogError, EntityKind, Result};
