//! Entity identifiers and kinds

use serde::{Deserialize, Serialize};

use crate::domain::storage::StorageKey;
use crate::domain::DomainError;

/// Opaque identifier shared by every catalog entity
///
/// Generated as a UUID v4 on create; any non-empty string is accepted when
/// parsed from a request path or a stored row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();

        if id.trim().is_empty() {
            return Err(DomainError::invalid_id("Entity ID cannot be empty"));
        }

        Ok(Self(id))
    }

    /// Generates a fresh random identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl StorageKey for EntityId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// The six catalog entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Category,
    Country,
    CulinaryCulture,
    Product,
    Recipe,
    Restaurant,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        Self::Category,
        Self::Country,
        Self::CulinaryCulture,
        Self::Product,
        Self::Recipe,
        Self::Restaurant,
    ];

    /// Human-readable name used in error messages
    pub fn label(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Country => "country",
            Self::CulinaryCulture => "culinary culture",
            Self::Product => "product",
            Self::Recipe => "recipe",
            Self::Restaurant => "restaurant",
        }
    }

    /// Prefix of per-owner cache keys
    pub fn cache_prefix(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Country => "country",
            Self::CulinaryCulture => "culinaryCulture",
            Self::Product => "product",
            Self::Recipe => "recipe",
            Self::Restaurant => "restaurant",
        }
    }

    /// Name of the backing table in relational stores
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Category => "categories",
            Self::Country => "countries",
            Self::CulinaryCulture => "culinary_cultures",
            Self::Product => "products",
            Self::Recipe => "recipes",
            Self::Restaurant => "restaurants",
        }
    }

    /// URL segment of the entity collection
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Category => "categories",
            Self::Country => "countries",
            Self::CulinaryCulture => "culinary-cultures",
            Self::Product => "products",
            Self::Recipe => "recipes",
            Self::Restaurant => "restaurants",
        }
    }

    /// "The <label> with the given id was not found"
    pub fn not_found(&self) -> DomainError {
        DomainError::not_found(format!("The {} with the given id was not found", self.label()))
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
