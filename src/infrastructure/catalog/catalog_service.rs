//! Catalog service - CRUD for one entity type, with cached collection reads

use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::domain::cache::{Cache, CacheKeys};
use crate::domain::catalog::{CatalogStore, EntityId, PublicShape};
use crate::domain::DomainError;

use super::read_cache_service::ReadCacheService;

/// Runs derive-based validation and maps failures to a domain error
pub(crate) fn validate_draft<D: Validate>(draft: &D) -> Result<(), DomainError> {
    draft
        .validate()
        .map_err(|errors| DomainError::validation(errors.to_string()))
}

/// Service for managing catalog entities of type `E`
#[derive(Debug)]
pub struct CatalogService<E: PublicShape> {
    catalog: CatalogStore,
    reads: ReadCacheService<E>,
}

impl<E: PublicShape> CatalogService<E> {
    pub fn new(catalog: CatalogStore, cache: Arc<dyn Cache>, keys: &CacheKeys) -> Self {
        let reads = ReadCacheService::new(catalog.clone(), cache, keys);
        Self { catalog, reads }
    }

    pub fn with_reads(catalog: CatalogStore, reads: ReadCacheService<E>) -> Self {
        Self { catalog, reads }
    }

    /// Every entity with its relations, served through the read cache
    pub async fn find_all(&self) -> Result<Vec<E::View>, DomainError> {
        self.reads.find_all().await
    }

    pub async fn find_one(&self, id: &EntityId) -> Result<E::View, DomainError> {
        self.catalog
            .find_view::<E>(id)
            .await?
            .ok_or_else(|| E::KIND.not_found())
    }

    /// Creates a new entity
    pub async fn create(&self, draft: E::Draft) -> Result<E, DomainError> {
        validate_draft(&draft)?;

        let entity = E::from_draft(EntityId::generate(), draft);
        let entity = self.catalog.save(entity).await?;

        info!(kind = %E::KIND, id = %entity.id(), "Created entity");
        Ok(entity)
    }

    /// Updates an existing entity; omitted fields keep their value
    pub async fn update(&self, id: &EntityId, patch: E::Patch) -> Result<E, DomainError> {
        let mut entity = self
            .catalog
            .find_by_id::<E>(id)
            .await?
            .ok_or_else(|| E::KIND.not_found())?;

        entity.apply(patch);
        let entity = self.catalog.save(entity).await?;

        info!(kind = %E::KIND, id = %id, "Updated entity");
        Ok(entity)
    }

    /// Deletes an entity and detaches it from every relation
    pub async fn delete(&self, id: &EntityId) -> Result<(), DomainError> {
        if self.catalog.find_by_id::<E>(id).await?.is_none() {
            return Err(E::KIND.not_found());
        }

        self.catalog.remove::<E>(id).await?;

        info!(kind = %E::KIND, id = %id, "Deleted entity");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::MockCache;
    use crate::domain::catalog::{
        CatalogEntity, Category, CategoryDraft, CategoryPatch, Product, ProductDraft, Recipe,
        RecipeDraft,
    };
    use crate::domain::relation::{CategoryProducts, Related};
    use crate::domain::ErrorKind;
    use crate::infrastructure::storage::StorageFactory;

    fn create_service<E: PublicShape>(catalog: &CatalogStore) -> CatalogService<E> {
        CatalogService::new(catalog.clone(), Arc::new(MockCache::new()), &CacheKeys::new())
    }

    fn id(value: &str) -> EntityId {
        EntityId::new(value).unwrap()
    }

    #[tokio::test]
    async fn test_create_category() {
        let catalog = StorageFactory::in_memory_catalog();
        let service = create_service::<Category>(&catalog);

        let category = service
            .create(CategoryDraft {
                name: "Tubers".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(category.name, "Tubers");
        let stored = catalog.find_by_id::<Category>(category.id()).await.unwrap();
        assert_eq!(stored, Some(category));
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let catalog = StorageFactory::in_memory_catalog();
        let service = create_service::<Category>(&catalog);

        let error = service
            .create(CategoryDraft {
                name: String::new(),
            })
            .await
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Validation);
        assert!(error.message().contains("should not be empty"));
        assert!(catalog.find_all::<Category>().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_recipe_url() {
        let catalog = StorageFactory::in_memory_catalog();
        let service = create_service::<Recipe>(&catalog);

        let result = service
            .create(RecipeDraft {
                name: "Causa".to_string(),
                description: "Layered potato".to_string(),
                photo: "not a url".to_string(),
                preparation: "Mash and layer".to_string(),
                video: "https://example.com/causa.mp4".to_string(),
            })
            .await;

        assert_eq!(result.unwrap_err().kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_find_one_returns_public_shape() {
        let catalog = StorageFactory::in_memory_catalog();
        let service = create_service::<Category>(&catalog);
        let products = create_service::<Product>(&catalog);

        let category = service
            .create(CategoryDraft {
                name: "Grains".to_string(),
            })
            .await
            .unwrap();
        let quinoa = products
            .create(ProductDraft {
                name: "Quinoa".to_string(),
                description: "Andean seed".to_string(),
                history: "Cultivated for millennia".to_string(),
            })
            .await
            .unwrap();
        catalog
            .save_related::<CategoryProducts>(Related::new(category.clone(), vec![quinoa.clone()]))
            .await
            .unwrap();

        let view = service.find_one(category.id()).await.unwrap();
        assert_eq!(view.category, category);
        assert_eq!(view.products, vec![quinoa.clone()]);

        let product_view = products.find_one(quinoa.id()).await.unwrap();
        assert_eq!(product_view.category, Some(category));
    }

    #[tokio::test]
    async fn test_find_one_not_found() {
        let catalog = StorageFactory::in_memory_catalog();
        let service = create_service::<Category>(&catalog);

        let error = service.find_one(&id("0")).await.unwrap_err();
        assert_eq!(error.message(), "The category with the given id was not found");
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let catalog = StorageFactory::in_memory_catalog();
        let service = create_service::<Category>(&catalog);
        let category = service
            .create(CategoryDraft {
                name: "Fruits".to_string(),
            })
            .await
            .unwrap();

        let updated = service
            .update(
                category.id(),
                CategoryPatch {
                    name: Some("Tropical fruits".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Tropical fruits");

        let unchanged = service
            .update(category.id(), CategoryPatch::default())
            .await
            .unwrap();
        assert_eq!(unchanged.name, "Tropical fruits");
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let catalog = StorageFactory::in_memory_catalog();
        let service = create_service::<Category>(&catalog);

        let error = service
            .update(&id("0"), CategoryPatch::default())
            .await
            .unwrap_err();
        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_detaches_relations() {
        let catalog = StorageFactory::in_memory_catalog();
        let categories = create_service::<Category>(&catalog);
        let products = create_service::<Product>(&catalog);

        let category = categories
            .create(CategoryDraft {
                name: "Peppers".to_string(),
            })
            .await
            .unwrap();
        let aji = products
            .create(ProductDraft {
                name: "Aji amarillo".to_string(),
                description: "Yellow chili".to_string(),
                history: "Pre-Columbian".to_string(),
            })
            .await
            .unwrap();
        catalog
            .save_related::<CategoryProducts>(Related::new(category.clone(), vec![aji.clone()]))
            .await
            .unwrap();

        products.delete(aji.id()).await.unwrap();

        let view = categories.find_one(category.id()).await.unwrap();
        assert!(view.products.is_empty());
        assert!(products.delete(aji.id()).await.unwrap_err().is_not_found());
    }
}
