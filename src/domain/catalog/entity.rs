//! Catalog entities, their create drafts and update patches

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::id::EntityId;
use crate::domain::storage::StorageEntity;

macro_rules! storage_entity {
    ($($entity:ty),* $(,)?) => {
        $(
            impl StorageEntity for $entity {
                type Key = EntityId;

                fn key(&self) -> &Self::Key {
                    &self.id
                }
            }
        )*
    };
}

storage_entity!(Category, Country, CulinaryCulture, Product, Recipe, Restaurant);

/// Product category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: EntityId,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CategoryDraft {
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryPatch {
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: EntityId,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CountryDraft {
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CountryPatch {
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CulinaryCulture {
    pub id: EntityId,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CulinaryCultureDraft {
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "description should not be empty"))]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CulinaryCulturePatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub history: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProductDraft {
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "description should not be empty"))]
    pub description: String,
    #[validate(length(min = 1, message = "history should not be empty"))]
    pub history: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub history: Option<String>,
}

/// A recipe; `photo` and `video` are URLs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub photo: String,
    pub preparation: String,
    pub video: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecipeDraft {
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "description should not be empty"))]
    pub description: String,
    #[validate(url(message = "photo must be a URL address"))]
    pub photo: String,
    #[validate(length(min = 1, message = "preparation should not be empty"))]
    pub preparation: String,
    #[validate(url(message = "video must be a URL address"))]
    pub video: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub photo: Option<String>,
    pub preparation: Option<String>,
    pub video: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: EntityId,
    pub name: String,
    pub city: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub michelin_stars: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub michelin_star_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDraft {
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "city should not be empty"))]
    pub city: String,
    #[validate(length(min = 1, message = "country should not be empty"))]
    pub country: String,
    #[serde(default)]
    pub michelin_stars: Option<u32>,
    #[serde(default)]
    pub michelin_star_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantPatch {
    pub name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub michelin_stars: Option<u32>,
    pub michelin_star_date: Option<DateTime<Utc>>,
}

fn merge<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

fn merge_optional<T>(target: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *target = value;
    }
}

impl Category {
    pub fn from_draft(id: EntityId, draft: CategoryDraft) -> Self {
        Self { id, name: draft.name }
    }

    pub fn apply(&mut self, patch: CategoryPatch) {
        merge(&mut self.name, patch.name);
    }
}

impl Country {
    pub fn from_draft(id: EntityId, draft: CountryDraft) -> Self {
        Self { id, name: draft.name }
    }

    pub fn apply(&mut self, patch: CountryPatch) {
        merge(&mut self.name, patch.name);
    }
}

impl CulinaryCulture {
    pub fn from_draft(id: EntityId, draft: CulinaryCultureDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
        }
    }

    pub fn apply(&mut self, patch: CulinaryCulturePatch) {
        merge(&mut self.name, patch.name);
        merge(&mut self.description, patch.description);
    }
}

impl Product {
    pub fn from_draft(id: EntityId, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            history: draft.history,
        }
    }

    pub fn apply(&mut self, patch: ProductPatch) {
        merge(&mut self.name, patch.name);
        merge(&mut self.description, patch.description);
        merge(&mut self.history, patch.history);
    }
}

impl Recipe {
    pub fn from_draft(id: EntityId, draft: RecipeDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            photo: draft.photo,
            preparation: draft.preparation,
            video: draft.video,
        }
    }

    pub fn apply(&mut self, patch: RecipePatch) {
        merge(&mut self.name, patch.name);
        merge(&mut self.description, patch.description);
        merge(&mut self.photo, patch.photo);
        merge(&mut self.preparation, patch.preparation);
        merge(&mut self.video, patch.video);
    }
}

impl Restaurant {
    pub fn from_draft(id: EntityId, draft: RestaurantDraft) -> Self {
        Self {
            id,
            name: draft.name,
            city: draft.city,
            country: draft.country,
            michelin_stars: draft.michelin_stars,
            michelin_star_date: draft.michelin_star_date,
        }
    }

    pub fn apply(&mut self, patch: RestaurantPatch) {
        merge(&mut self.name, patch.name);
        merge(&mut self.city, patch.city);
        merge(&mut self.country, patch.country);
        merge_optional(&mut self.michelin_stars, patch.michelin_stars);
        merge_optional(&mut self.michelin_star_date, patch.michelin_star_date);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: &str) -> EntityId {
        EntityId::new(value).unwrap()
    }

    #[test]
    fn test_recipe_draft_requires_urls() {
        let draft = RecipeDraft {
            name: "Ceviche".to_string(),
            description: "Raw fish cured in citrus".to_string(),
            photo: "not a url".to_string(),
            preparation: "Cut, marinate, serve".to_string(),
            video: "https://example.com/ceviche.mp4".to_string(),
        };

        let errors = draft.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("photo"));
        assert!(!errors.field_errors().contains_key("video"));
    }

    #[test]
    fn test_culinary_culture_draft_rejects_empty_name() {
        let draft = CulinaryCultureDraft {
            name: String::new(),
            description: "Andean".to_string(),
        };
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_patch_keeps_omitted_fields() {
        let mut product = Product::from_draft(
            id("1"),
            ProductDraft {
                name: "Quinoa".to_string(),
                description: "Seed".to_string(),
                history: "Andes".to_string(),
            },
        );

        product.apply(ProductPatch {
            description: Some("Pseudo-cereal".to_string()),
            ..Default::default()
        });

        assert_eq!(product.name, "Quinoa");
        assert_eq!(product.description, "Pseudo-cereal");
        assert_eq!(product.history, "Andes");
    }

    #[test]
    fn test_restaurant_serializes_camel_case() {
        let restaurant = Restaurant {
            id: id("r1"),
            name: "Central".to_string(),
            city: "Lima".to_string(),
            country: "Peru".to_string(),
            michelin_stars: Some(3),
            michelin_star_date: None,
        };

        let json = serde_json::to_value(&restaurant).unwrap();
        assert_eq!(json["michelinStars"], 3);
        assert!(json.get("michelinStarDate").is_none());
    }

    #[test]
    fn test_restaurant_patch_keeps_stars_when_omitted() {
        let mut restaurant = Restaurant {
            id: id("r1"),
            name: "Central".to_string(),
            city: "Lima".to_string(),
            country: "Peru".to_string(),
            michelin_stars: Some(2),
            michelin_star_date: None,
        };

        let patch: RestaurantPatch = serde_json::from_str(r#"{"city": "Cusco"}"#).unwrap();
        restaurant.apply(patch);

        assert_eq!(restaurant.city, "Cusco");
        assert_eq!(restaurant.michelin_stars, Some(2));
    }
}
