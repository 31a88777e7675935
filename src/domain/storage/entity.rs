//! Storage entity traits

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

/// Trait for types that can be used as storage keys
pub trait StorageKey: Clone + Debug + Send + Sync + Eq + std::hash::Hash {
    /// Returns the key as a string for backends that index by string
    fn as_str(&self) -> &str;
}

/// Trait for types that can be persisted by an entity store
pub trait StorageEntity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned {
    type Key: StorageKey;

    fn key(&self) -> &Self::Key;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    struct DishKey(String);

    impl StorageKey for DishKey {
        fn as_str(&self) -> &str {
            &self.0
        }
    }

    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
    struct Dish {
        id: DishKey,
        name: String,
    }

    impl StorageEntity for Dish {
        type Key = DishKey;

        fn key(&self) -> &Self::Key {
            &self.id
        }
    }

    #[test]
    fn test_storage_key_as_str() {
        let key = DishKey("paella".to_string());
        assert_eq!(key.as_str(), "paella");
    }

    #[test]
    fn test_storage_entity_key() {
        let dish = Dish {
            id: DishKey("dish-1".to_string()),
            name: "Paella".to_string(),
        };
        assert_eq!(dish.key().as_str(), "dish-1");
        assert_eq!(dish.name, "Paella");
    }
}
