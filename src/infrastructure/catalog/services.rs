//! Wiring of every catalog service over one store and one cache

use std::sync::Arc;
use std::time::Duration;

use crate::domain::cache::{Cache, CacheKeys};
use crate::domain::catalog::{
    CatalogStore, Category, Country, CulinaryCulture, Product, PublicShape, Recipe, Restaurant,
};
use crate::domain::relation::{
    CategoryProducts, CountryCulinaryCultures, CulinaryCultureCountries, CulinaryCultureProducts,
    CulinaryCultureRecipes, CulinaryCultureRestaurants, RecipeProducts, RestaurantCulinaryCultures,
};

use super::association_service::AssociationService;
use super::catalog_service::CatalogService;
use super::read_cache_service::{OwnerReadCacheService, ReadCacheService};

/// Cache settings shared by every cached read
#[derive(Debug, Clone, Default)]
pub struct ReadCacheSettings {
    pub keys: CacheKeys,
    pub ttl: Option<Duration>,
}

impl ReadCacheSettings {
    pub fn new(keys: CacheKeys) -> Self {
        Self { keys, ttl: None }
    }

    pub fn with_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Container of catalog, association and cached-read services
#[derive(Debug, Clone)]
pub struct CatalogServices {
    pub store: CatalogStore,
    pub cache: Arc<dyn Cache>,

    pub categories: Arc<CatalogService<Category>>,
    pub countries: Arc<CatalogService<Country>>,
    pub culinary_cultures: Arc<CatalogService<CulinaryCulture>>,
    pub products: Arc<CatalogService<Product>>,
    pub recipes: Arc<CatalogService<Recipe>>,
    pub restaurants: Arc<CatalogService<Restaurant>>,

    pub category_products: Arc<AssociationService<CategoryProducts>>,
    pub country_culinary_cultures: Arc<AssociationService<CountryCulinaryCultures>>,
    pub culinary_culture_countries: Arc<AssociationService<CulinaryCultureCountries>>,
    pub culinary_culture_products: Arc<AssociationService<CulinaryCultureProducts>>,
    pub culinary_culture_recipes: Arc<AssociationService<CulinaryCultureRecipes>>,
    pub culinary_culture_restaurants: Arc<AssociationService<CulinaryCultureRestaurants>>,
    pub recipe_products: Arc<AssociationService<RecipeProducts>>,
    pub restaurant_culinary_cultures: Arc<AssociationService<RestaurantCulinaryCultures>>,

    pub culinary_culture_restaurant_reads: Arc<OwnerReadCacheService<CulinaryCultureRestaurants>>,
    pub restaurant_culinary_culture_reads: Arc<OwnerReadCacheService<RestaurantCulinaryCultures>>,
}

impl CatalogServices {
    pub fn new(store: CatalogStore, cache: Arc<dyn Cache>, settings: ReadCacheSettings) -> Self {
        let culinary_culture_restaurants =
            Arc::new(AssociationService::new(store.clone()));
        let restaurant_culinary_cultures =
            Arc::new(AssociationService::new(store.clone()));

        Self {
            categories: Self::entity_service(&store, &cache, &settings),
            countries: Self::entity_service(&store, &cache, &settings),
            culinary_cultures: Self::entity_service(&store, &cache, &settings),
            products: Self::entity_service(&store, &cache, &settings),
            recipes: Self::entity_service(&store, &cache, &settings),
            restaurants: Self::entity_service(&store, &cache, &settings),

            category_products: Arc::new(AssociationService::new(store.clone())),
            country_culinary_cultures: Arc::new(AssociationService::new(store.clone())),
            culinary_culture_countries: Arc::new(AssociationService::new(store.clone())),
            culinary_culture_products: Arc::new(AssociationService::new(store.clone())),
            culinary_culture_recipes: Arc::new(AssociationService::new(store.clone())),
            recipe_products: Arc::new(AssociationService::new(store.clone())),

            culinary_culture_restaurant_reads: Arc::new(
                OwnerReadCacheService::new(
                    culinary_culture_restaurants.clone(),
                    cache.clone(),
                    settings.keys.clone(),
                )
                .with_ttl(settings.ttl),
            ),
            restaurant_culinary_culture_reads: Arc::new(
                OwnerReadCacheService::new(
                    restaurant_culinary_cultures.clone(),
                    cache.clone(),
                    settings.keys.clone(),
                )
                .with_ttl(settings.ttl),
            ),
            culinary_culture_restaurants,
            restaurant_culinary_cultures,

            store,
            cache,
        }
    }

    fn entity_service<E: PublicShape>(
        store: &CatalogStore,
        cache: &Arc<dyn Cache>,
        settings: &ReadCacheSettings,
    ) -> Arc<CatalogService<E>> {
        let reads = ReadCacheService::new(store.clone(), cache.clone(), &settings.keys)
            .with_ttl(settings.ttl);
        Arc::new(CatalogService::with_reads(store.clone(), reads))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{
        CatalogEntity, CategoryDraft, CountryDraft, CulinaryCultureDraft, EntityId, ProductDraft,
    };
    use crate::domain::ErrorKind;
    use crate::infrastructure::cache::CacheFactory;
    use crate::infrastructure::storage::StorageFactory;

    fn create_services() -> CatalogServices {
        CatalogServices::new(
            StorageFactory::in_memory_catalog(),
            CacheFactory::new().create_in_memory(),
            ReadCacheSettings::default(),
        )
    }

    #[tokio::test]
    async fn test_category_add_product_then_unknown_product() {
        let services = create_services();

        let category = services
            .categories
            .create(CategoryDraft {
                name: "Tubers".to_string(),
            })
            .await
            .unwrap();
        let potato = services
            .products
            .create(ProductDraft {
                name: "Potato".to_string(),
                description: "Andean tuber".to_string(),
                history: "Domesticated near Lake Titicaca".to_string(),
            })
            .await
            .unwrap();

        services
            .category_products
            .add(category.id(), potato.id())
            .await
            .unwrap();

        let unknown = EntityId::new("0").unwrap();
        let error = services
            .category_products
            .add(category.id(), &unknown)
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotFound);

        let products = services
            .category_products
            .find_all_for_owner(category.id())
            .await
            .unwrap();
        assert_eq!(products, vec![potato]);
    }

    #[tokio::test]
    async fn test_culinary_culture_replace_countries() {
        let services = create_services();

        let culture = services
            .culinary_cultures
            .create(CulinaryCultureDraft {
                name: "Andean".to_string(),
                description: "Highland cuisine".to_string(),
            })
            .await
            .unwrap();

        let mut countries = Vec::new();
        for name in ["Peru", "Bolivia", "Ecuador"] {
            let country = services
                .countries
                .create(CountryDraft {
                    name: name.to_string(),
                })
                .await
                .unwrap();
            countries.push(country);
        }
        let (a, b, c) = (&countries[0], &countries[1], &countries[2]);

        services
            .culinary_culture_countries
            .add(culture.id(), a.id())
            .await
            .unwrap();
        services
            .culinary_culture_countries
            .replace_all(culture.id(), &[b.id().clone(), c.id().clone()])
            .await
            .unwrap();

        let current = services
            .culinary_culture_countries
            .find_all_for_owner(culture.id())
            .await
            .unwrap();
        assert_eq!(current, vec![b.clone(), c.clone()]);

        let view = services.countries.find_one(a.id()).await.unwrap();
        assert!(view.culinary_cultures.is_empty());
    }

    #[tokio::test]
    async fn test_collection_reads_share_one_cache() {
        let services = create_services();

        services
            .countries
            .create(CountryDraft {
                name: "Mexico".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(services.countries.find_all().await.unwrap().len(), 1);
        assert!(services.categories.find_all().await.unwrap().is_empty());
        assert_eq!(services.cache.size().await.unwrap(), 2);
    }
}
