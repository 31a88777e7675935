//! Public shapes: each entity together with the relations it exposes on reads

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::entity::{Category, Country, CulinaryCulture, Product, Recipe, Restaurant};
use super::store::{CatalogEntity, CatalogStore};
use crate::domain::relation::{
    CategoryProducts, CountryCulinaryCultures, CulinaryCultureCountries, CulinaryCultureProducts,
    CulinaryCultureRecipes, CulinaryCultureRestaurants, JoinTable, LinkSide, RecipeProducts,
    RestaurantCulinaryCultures,
};
use crate::domain::DomainError;

/// An entity that can be expanded into its public shape
#[async_trait]
pub trait PublicShape: CatalogEntity {
    /// Cache key of the `find_all` read for this entity type
    const CACHE_KEY: &'static str;

    type View: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static;

    async fn expand(self, catalog: &CatalogStore) -> Result<Self::View, DomainError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryView {
    #[serde(flatten)]
    pub category: Category,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryView {
    #[serde(flatten)]
    pub country: Country,
    pub culinary_cultures: Vec<CulinaryCulture>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CulinaryCultureView {
    #[serde(flatten)]
    pub culinary_culture: CulinaryCulture,
    pub countries: Vec<Country>,
    pub products: Vec<Product>,
    pub recipes: Vec<Recipe>,
    pub restaurants: Vec<Restaurant>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub category: Option<Category>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeView {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub culinary_culture: Option<CulinaryCulture>,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantView {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub culinary_cultures: Vec<CulinaryCulture>,
}

#[async_trait]
impl PublicShape for Category {
    const CACHE_KEY: &'static str = "categories";
    type View = CategoryView;

    async fn expand(self, catalog: &CatalogStore) -> Result<CategoryView, DomainError> {
        let products = catalog.members::<CategoryProducts>(&self.id).await?;
        Ok(CategoryView {
            category: self,
            products,
        })
    }
}

#[async_trait]
impl PublicShape for Country {
    const CACHE_KEY: &'static str = "countries";
    type View = CountryView;

    async fn expand(self, catalog: &CatalogStore) -> Result<CountryView, DomainError> {
        let culinary_cultures = catalog.members::<CountryCulinaryCultures>(&self.id).await?;
        Ok(CountryView {
            country: self,
            culinary_cultures,
        })
    }
}

#[async_trait]
impl PublicShape for CulinaryCulture {
    const CACHE_KEY: &'static str = "culinary-cultures";
    type View = CulinaryCultureView;

    async fn expand(self, catalog: &CatalogStore) -> Result<CulinaryCultureView, DomainError> {
        let countries = catalog.members::<CulinaryCultureCountries>(&self.id).await?;
        let products = catalog.members::<CulinaryCultureProducts>(&self.id).await?;
        let recipes = catalog.members::<CulinaryCultureRecipes>(&self.id).await?;
        let restaurants = catalog
            .members::<CulinaryCultureRestaurants>(&self.id)
            .await?;

        Ok(CulinaryCultureView {
            culinary_culture: self,
            countries,
            products,
            recipes,
            restaurants,
        })
    }
}

#[async_trait]
impl PublicShape for Product {
    const CACHE_KEY: &'static str = "products";
    type View = ProductView;

    async fn expand(self, catalog: &CatalogStore) -> Result<ProductView, DomainError> {
        let category = catalog
            .linked::<Category>(JoinTable::CategoryProduct, LinkSide::Right, &self.id)
            .await?
            .into_iter()
            .next();

        Ok(ProductView {
            product: self,
            category,
        })
    }
}

#[async_trait]
impl PublicShape for Recipe {
    const CACHE_KEY: &'static str = "recipes";
    type View = RecipeView;

    async fn expand(self, catalog: &CatalogStore) -> Result<RecipeView, DomainError> {
        let culinary_culture = catalog
            .linked::<CulinaryCulture>(JoinTable::CulinaryCultureRecipe, LinkSide::Right, &self.id)
            .await?
            .into_iter()
            .next();
        let products = catalog.members::<RecipeProducts>(&self.id).await?;

        Ok(RecipeView {
            recipe: self,
            culinary_culture,
            products,
        })
    }
}

#[async_trait]
impl PublicShape for Restaurant {
    const CACHE_KEY: &'static str = "restaurants";
    type View = RestaurantView;

    async fn expand(self, catalog: &CatalogStore) -> Result<RestaurantView, DomainError> {
        let culinary_cultures = catalog
            .members::<RestaurantCulinaryCultures>(&self.id)
            .await?;

        Ok(RestaurantView {
            restaurant: self,
            culinary_cultures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::EntityKind;

    #[test]
    fn test_cache_keys_match_url_segments() {
        assert_eq!(Category::CACHE_KEY, EntityKind::Category.path_segment());
        assert_eq!(Country::CACHE_KEY, EntityKind::Country.path_segment());
        assert_eq!(
            CulinaryCulture::CACHE_KEY,
            EntityKind::CulinaryCulture.path_segment()
        );
        assert_eq!(Product::CACHE_KEY, EntityKind::Product.path_segment());
        assert_eq!(Recipe::CACHE_KEY, EntityKind::Recipe.path_segment());
        assert_eq!(Restaurant::CACHE_KEY, EntityKind::Restaurant.path_segment());
    }
}
