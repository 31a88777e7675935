//! CRUD endpoints for the entity collections

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::catalog::{
    CatalogEntity, Category, Country, CulinaryCulture, EntityId, Product, PublicShape, Recipe,
    Restaurant,
};
use crate::infrastructure::catalog::{CatalogService, CatalogServices};

/// An entity type exposed as a REST collection
pub trait EntityEndpoint: PublicShape {
    fn service(catalog: &CatalogServices) -> &Arc<CatalogService<Self>>;
}

macro_rules! entity_endpoint {
    ($entity:ty, $field:ident) => {
        impl EntityEndpoint for $entity {
            fn service(catalog: &CatalogServices) -> &Arc<CatalogService<Self>> {
                &catalog.$field
            }
        }
    };
}

entity_endpoint!(Category, categories);
entity_endpoint!(Country, countries);
entity_endpoint!(CulinaryCulture, culinary_cultures);
entity_endpoint!(Product, products);
entity_endpoint!(Recipe, recipes);
entity_endpoint!(Restaurant, restaurants);

pub(crate) fn parse_id(raw: String) -> Result<EntityId, ApiError> {
    EntityId::new(raw).map_err(ApiError::from)
}

/// Mounts `/{collection}` and `/{collection}/{id}` for `E`
pub fn routes<E: EntityEndpoint>(router: Router<AppState>) -> Router<AppState> {
    let collection = format!("/{}", E::KIND.path_segment());
    let item = format!("{}/{{id}}", collection);

    router
        .route(&collection, get(list::<E>).post(create::<E>))
        .route(&item, get(find_one::<E>).put(update::<E>).delete(delete::<E>))
}

/// GET /{collection}
pub async fn list<E: EntityEndpoint>(
    State(state): State<AppState>,
) -> Result<Json<Vec<E::View>>, ApiError> {
    debug!(kind = %E::KIND, "Listing entities");

    let views = E::service(&state.catalog).find_all().await?;
    Ok(Json(views))
}

/// GET /{collection}/{id}
pub async fn find_one<E: EntityEndpoint>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<E::View>, ApiError> {
    let id = parse_id(id)?;
    let view = E::service(&state.catalog).find_one(&id).await?;
    Ok(Json(view))
}

/// POST /{collection}
pub async fn create<E: EntityEndpoint>(
    State(state): State<AppState>,
    Json(draft): Json<<E as CatalogEntity>::Draft>,
) -> Result<(StatusCode, Json<E>), ApiError> {
    let entity = E::service(&state.catalog).create(draft).await?;
    Ok((StatusCode::CREATED, Json(entity)))
}

/// PUT /{collection}/{id}
pub async fn update<E: EntityEndpoint>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<<E as CatalogEntity>::Patch>,
) -> Result<Json<E>, ApiError> {
    let id = parse_id(id)?;
    let entity = E::service(&state.catalog).update(&id, patch).await?;
    Ok(Json(entity))
}

/// DELETE /{collection}/{id}
pub async fn delete<E: EntityEndpoint>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(id)?;
    E::service(&state.catalog).delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
