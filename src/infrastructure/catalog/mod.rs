//! Catalog services - CRUD, associations and cached reads

mod association_service;
mod catalog_service;
mod read_cache_service;
mod services;

pub use association_service::AssociationService;
pub use catalog_service::CatalogService;
pub use read_cache_service::{OwnerReadCacheService, ReadCacheService};
pub use services::{CatalogServices, ReadCacheSettings};
