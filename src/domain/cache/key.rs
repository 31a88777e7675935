//! Cache key construction

use std::fmt::Debug;

/// Builds the keys under which catalog reads are cached
///
/// Every key is namespaced with the configured prefix, if any, as
/// `prefix:key`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheKeys {
    prefix: Option<String>,
}

impl CacheKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.prefix = if prefix.is_empty() { None } else { Some(prefix) };
        self
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Key for an entity collection read, e.g. `categories`
    pub fn collection(&self, key: &str) -> String {
        self.namespaced(key)
    }

    /// Key for one owner's relation list, e.g. `culinaryCulture_42_restaurants`
    pub fn owner_relation(&self, owner_prefix: &str, owner_id: &str, field: &str) -> String {
        self.namespaced(&format!("{}_{}_{}", owner_prefix, owner_id, field))
    }

    fn namespaced(&self, key: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_key_without_prefix() {
        let keys = CacheKeys::new();
        assert_eq!(keys.collection("categories"), "categories");
        assert!(keys.prefix().is_none());
    }

    #[test]
    fn test_collection_key_with_prefix() {
        let keys = CacheKeys::new().with_prefix("catalog");
        assert_eq!(keys.collection("culinary-cultures"), "catalog:culinary-cultures");
    }

    #[test]
    fn test_empty_prefix_is_ignored() {
        let keys = CacheKeys::new().with_prefix("");
        assert_eq!(keys.collection("products"), "products");
    }

    #[test]
    fn test_owner_relation_key() {
        let keys = CacheKeys::new();
        assert_eq!(
            keys.owner_relation("culinaryCulture", "42", "restaurants"),
            "culinaryCulture_42_restaurants"
        );

        let keys = CacheKeys::new().with_prefix("catalog");
        assert_eq!(
            keys.owner_relation("restaurant", "7", "culinaryCultures"),
            "catalog:restaurant_7_culinaryCultures"
        );
    }
}
