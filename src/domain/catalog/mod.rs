//! Catalog domain - entities of the culinary graph and their public shapes

mod entity;
mod id;
mod store;
mod view;

pub use entity::{
    Category, CategoryDraft, CategoryPatch, Country, CountryDraft, CountryPatch, CulinaryCulture,
    CulinaryCultureDraft, CulinaryCulturePatch, Product, ProductDraft, ProductPatch, Recipe,
    RecipeDraft, RecipePatch, Restaurant, RestaurantDraft, RestaurantPatch,
};
pub use id::{EntityId, EntityKind};
pub use store::{CatalogEntity, CatalogStore};
pub use view::{
    CategoryView, CountryView, CulinaryCultureView, ProductView, PublicShape, RecipeView,
    RestaurantView,
};
