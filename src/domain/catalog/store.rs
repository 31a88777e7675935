//! Relation-eager facade over the entity stores and the link store

use std::fmt::Debug;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;
use validator::Validate;

use super::entity::{
    Category, CategoryDraft, CategoryPatch, Country, CountryDraft, CountryPatch, CulinaryCulture,
    CulinaryCultureDraft, CulinaryCulturePatch, Product, ProductDraft, ProductPatch, Recipe,
    RecipeDraft, RecipePatch, Restaurant, RestaurantDraft, RestaurantPatch,
};
use super::id::{EntityId, EntityKind};
use super::view::PublicShape;
use crate::domain::relation::{JoinTable, LinkSide, LinkStore, Related, Relation};
use crate::domain::storage::{EntityStore, StorageEntity};
use crate::domain::DomainError;

/// A catalog entity type: its kind, its create/update payloads and its store
pub trait CatalogEntity: StorageEntity<Key = EntityId> + PartialEq + 'static {
    const KIND: EntityKind;

    type Draft: Validate + DeserializeOwned + Debug + Send + Sync + 'static;
    type Patch: DeserializeOwned + Default + Debug + Send + Sync + 'static;

    fn id(&self) -> &EntityId {
        self.key()
    }

    fn from_draft(id: EntityId, draft: Self::Draft) -> Self;

    /// Shallow merge: supplied fields overwrite, omitted fields are kept
    fn apply(&mut self, patch: Self::Patch);

    fn store(catalog: &CatalogStore) -> &Arc<dyn EntityStore<Self>>;
}

macro_rules! catalog_entity {
    ($entity:ty, $kind:ident, $draft:ty, $patch:ty, $field:ident) => {
        impl CatalogEntity for $entity {
            const KIND: EntityKind = EntityKind::$kind;

            type Draft = $draft;
            type Patch = $patch;

            fn from_draft(id: EntityId, draft: Self::Draft) -> Self {
                <$entity>::from_draft(id, draft)
            }

            fn apply(&mut self, patch: Self::Patch) {
                <$entity>::apply(self, patch)
            }

            fn store(catalog: &CatalogStore) -> &Arc<dyn EntityStore<Self>> {
                &catalog.$field
            }
        }
    };
}

catalog_entity!(Category, Category, CategoryDraft, CategoryPatch, categories);
catalog_entity!(Country, Country, CountryDraft, CountryPatch, countries);
catalog_entity!(
    CulinaryCulture,
    CulinaryCulture,
    CulinaryCultureDraft,
    CulinaryCulturePatch,
    culinary_cultures
);
catalog_entity!(Product, Product, ProductDraft, ProductPatch, products);
catalog_entity!(Recipe, Recipe, RecipeDraft, RecipePatch, recipes);
catalog_entity!(Restaurant, Restaurant, RestaurantDraft, RestaurantPatch, restaurants);

/// Every store the catalog reads from and writes to
///
/// Reads that expand relations resolve link rows into entities one lookup at
/// a time; a link pointing at a missing entity is skipped.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    pub categories: Arc<dyn EntityStore<Category>>,
    pub countries: Arc<dyn EntityStore<Country>>,
    pub culinary_cultures: Arc<dyn EntityStore<CulinaryCulture>>,
    pub products: Arc<dyn EntityStore<Product>>,
    pub recipes: Arc<dyn EntityStore<Recipe>>,
    pub restaurants: Arc<dyn EntityStore<Restaurant>>,
    pub links: Arc<dyn LinkStore>,
}

impl CatalogStore {
    pub async fn find_by_id<E: CatalogEntity>(
        &self,
        id: &EntityId,
    ) -> Result<Option<E>, DomainError> {
        E::store(self).find_by_id(id).await
    }

    pub async fn find_all<E: CatalogEntity>(&self) -> Result<Vec<E>, DomainError> {
        E::store(self).find_all().await
    }

    pub async fn save<E: CatalogEntity>(&self, entity: E) -> Result<E, DomainError> {
        E::store(self).save(entity).await
    }

    /// Removes an entity and every link row it participates in
    pub async fn remove<E: CatalogEntity>(&self, id: &EntityId) -> Result<bool, DomainError> {
        let removed = E::store(self).remove(id).await?;
        let detached = self.links.detach(E::KIND, id).await?;

        debug!(kind = %E::KIND, id = %id, detached, "Removed entity");
        Ok(removed)
    }

    /// Entities of type `E` linked to `id` through `table`, read from `side`
    pub async fn linked<E: CatalogEntity>(
        &self,
        table: JoinTable,
        side: LinkSide,
        id: &EntityId,
    ) -> Result<Vec<E>, DomainError> {
        let ids = self.links.linked(table, side, id).await?;
        let mut entities = Vec::with_capacity(ids.len());

        for linked_id in &ids {
            if let Some(entity) = self.find_by_id::<E>(linked_id).await? {
                entities.push(entity);
            }
        }

        Ok(entities)
    }

    /// Members of `owner_id` under relation `R`, without loading the owner
    pub async fn members<R: Relation>(
        &self,
        owner_id: &EntityId,
    ) -> Result<Vec<R::Member>, DomainError> {
        self.linked::<R::Member>(R::TABLE, R::OWNER_SIDE, owner_id)
            .await
    }

    /// Loads an owner with relation `R` expanded
    pub async fn find_related<R: Relation>(
        &self,
        owner_id: &EntityId,
    ) -> Result<Option<Related<R::Owner, R::Member>>, DomainError> {
        let Some(owner) = self.find_by_id::<R::Owner>(owner_id).await? else {
            return Ok(None);
        };

        let members = self.members::<R>(owner_id).await?;
        Ok(Some(Related::new(owner, members)))
    }

    /// Persists the owner, then replaces its link rows with `related.members`
    ///
    /// Returns the members as stored, which can differ from the input on a
    /// one-to-many table.
    pub async fn save_related<R: Relation>(
        &self,
        related: Related<R::Owner, R::Member>,
    ) -> Result<Related<R::Owner, R::Member>, DomainError> {
        let owner = self.save(related.owner).await?;
        let member_ids: Vec<EntityId> = related.members.iter().map(|m| m.id().clone()).collect();

        self.links
            .replace(R::TABLE, R::OWNER_SIDE, owner.id(), &member_ids)
            .await?;

        let members = self.members::<R>(owner.id()).await?;
        Ok(Related::new(owner, members))
    }

    /// Loads one entity with its full public shape
    pub async fn find_view<E: PublicShape>(
        &self,
        id: &EntityId,
    ) -> Result<Option<E::View>, DomainError> {
        match self.find_by_id::<E>(id).await? {
            Some(entity) => Ok(Some(entity.expand(self).await?)),
            None => Ok(None),
        }
    }

    /// Loads every entity of type `E` with its full public shape
    pub async fn find_all_views<E: PublicShape>(&self) -> Result<Vec<E::View>, DomainError> {
        let entities = self.find_all::<E>().await?;
        let mut views = Vec::with_capacity(entities.len());

        for entity in entities {
            views.push(entity.expand(self).await?);
        }

        Ok(views)
    }

    /// Empties every entity store and the link store
    pub async fn clear(&self) -> Result<(), DomainError> {
        self.categories.clear().await?;
        self.countries.clear().await?;
        self.culinary_cultures.clear().await?;
        self.products.clear().await?;
        self.recipes.clear().await?;
        self.restaurants.clear().await?;
        self.links.clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::relation::{CulinaryCultureRestaurants, RestaurantCulinaryCultures};
    use crate::infrastructure::storage::StorageFactory;

    fn id(value: &str) -> EntityId {
        EntityId::new(value).unwrap()
    }

    fn culture(value: &str) -> CulinaryCulture {
        CulinaryCulture {
            id: id(value),
            name: format!("Culture {}", value),
            description: "Regional cooking".to_string(),
        }
    }

    fn restaurant(value: &str) -> Restaurant {
        Restaurant {
            id: id(value),
            name: format!("Restaurant {}", value),
            city: "Lima".to_string(),
            country: "Peru".to_string(),
            michelin_stars: None,
            michelin_star_date: None,
        }
    }

    #[tokio::test]
    async fn test_find_related_missing_owner() {
        let catalog = StorageFactory::in_memory_catalog();

        let related = catalog
            .find_related::<CulinaryCultureRestaurants>(&id("missing"))
            .await
            .unwrap();
        assert!(related.is_none());
    }

    #[tokio::test]
    async fn test_save_related_is_visible_from_both_sides() {
        let catalog = StorageFactory::in_memory_catalog();
        catalog.save(restaurant("r1")).await.unwrap();
        catalog.save(restaurant("r2")).await.unwrap();

        catalog
            .save_related::<CulinaryCultureRestaurants>(Related::new(
                culture("c1"),
                vec![restaurant("r1"), restaurant("r2")],
            ))
            .await
            .unwrap();

        let related = catalog
            .find_related::<CulinaryCultureRestaurants>(&id("c1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(related.members.len(), 2);

        let inverse = catalog
            .find_related::<RestaurantCulinaryCultures>(&id("r2"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(inverse.members, vec![culture("c1")]);
    }

    #[tokio::test]
    async fn test_remove_detaches_links() {
        let catalog = StorageFactory::in_memory_catalog();
        catalog.save(restaurant("r1")).await.unwrap();
        catalog
            .save_related::<CulinaryCultureRestaurants>(Related::new(
                culture("c1"),
                vec![restaurant("r1")],
            ))
            .await
            .unwrap();

        assert!(catalog.remove::<Restaurant>(&id("r1")).await.unwrap());

        let links = catalog
            .links
            .linked(JoinTable::CulinaryCultureRestaurant, LinkSide::Left, &id("c1"))
            .await
            .unwrap();
        assert!(links.is_empty());
    }

    #[tokio::test]
    async fn test_linked_skips_dangling_ids() {
        let catalog = StorageFactory::in_memory_catalog();
        catalog.save(culture("c1")).await.unwrap();
        catalog
            .links
            .replace(
                JoinTable::CulinaryCultureRestaurant,
                LinkSide::Left,
                &id("c1"),
                &[id("ghost")],
            )
            .await
            .unwrap();

        let members = catalog
            .members::<CulinaryCultureRestaurants>(&id("c1"))
            .await
            .unwrap();
        assert!(members.is_empty());
    }

    #[tokio::test]
    async fn test_find_all_views_expands_relations() {
        let catalog = StorageFactory::in_memory_catalog();
        catalog.save(restaurant("r1")).await.unwrap();
        catalog
            .save_related::<CulinaryCultureRestaurants>(Related::new(
                culture("c1"),
                vec![restaurant("r1")],
            ))
            .await
            .unwrap();

        let views = catalog.find_all_views::<Restaurant>().await.unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].culinary_cultures, vec![culture("c1")]);

        let view = catalog
            .find_view::<CulinaryCulture>(&id("c1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(view.restaurants, vec![restaurant("r1")]);
        assert!(view.countries.is_empty());
    }
}
