//! Domain layer - Core business logic and entities

pub mod cache;
pub mod catalog;
pub mod error;
pub mod relation;
pub mod storage;

pub use cache::{Cache, CacheExt, CacheKeys};
pub use catalog::{
    CatalogEntity, CatalogStore, Category, Country, CulinaryCulture, EntityId, EntityKind,
    Product, PublicShape, Recipe, Restaurant,
};
pub use error::{DomainError, ErrorKind};
pub use relation::{JoinTable, LinkSide, LinkStore, Related, Relation};
pub use storage::{EntityStore, StorageEntity, StorageKey};
