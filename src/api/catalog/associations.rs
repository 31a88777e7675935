//! Association endpoints: `/{owners}/{id}/{members}[/{member_id}]`

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::entities::parse_id;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::catalog::{CatalogEntity, EntityId, RecipeDraft};
use crate::domain::relation::{
    CategoryProducts, CountryCulinaryCultures, CulinaryCultureCountries, CulinaryCultureProducts,
    CulinaryCultureRecipes, CulinaryCultureRestaurants, RecipeProducts, Related, Relation,
    RestaurantCulinaryCultures,
};
use crate::infrastructure::catalog::{AssociationService, CatalogServices, OwnerReadCacheService};

/// A relation exposed under its owner's collection
pub trait AssociationEndpoint: Relation + Sized {
    fn service(catalog: &CatalogServices) -> &Arc<AssociationService<Self>>;

    /// Cached reader for the member list, where one is configured
    fn cached_reads(_catalog: &CatalogServices) -> Option<&Arc<OwnerReadCacheService<Self>>> {
        None
    }
}

macro_rules! association_endpoint {
    ($relation:ty, $field:ident) => {
        impl AssociationEndpoint for $relation {
            fn service(catalog: &CatalogServices) -> &Arc<AssociationService<Self>> {
                &catalog.$field
            }
        }
    };
    ($relation:ty, $field:ident, reads = $reads:ident) => {
        impl AssociationEndpoint for $relation {
            fn service(catalog: &CatalogServices) -> &Arc<AssociationService<Self>> {
                &catalog.$field
            }

            fn cached_reads(
                catalog: &CatalogServices,
            ) -> Option<&Arc<OwnerReadCacheService<Self>>> {
                Some(&catalog.$reads)
            }
        }
    };
}

association_endpoint!(CategoryProducts, category_products);
association_endpoint!(CountryCulinaryCultures, country_culinary_cultures);
association_endpoint!(CulinaryCultureCountries, culinary_culture_countries);
association_endpoint!(CulinaryCultureProducts, culinary_culture_products);
association_endpoint!(CulinaryCultureRecipes, culinary_culture_recipes);
association_endpoint!(
    CulinaryCultureRestaurants,
    culinary_culture_restaurants,
    reads = culinary_culture_restaurant_reads
);
association_endpoint!(RecipeProducts, recipe_products);
association_endpoint!(
    RestaurantCulinaryCultures,
    restaurant_culinary_cultures,
    reads = restaurant_culinary_culture_reads
);

/// One element of a replace body: `[{"id": "..."}]`
#[derive(Debug, Clone, Deserialize)]
pub struct MemberRef {
    pub id: String,
}

/// Owner body with the member collection under the relation's field name
fn related_body<R: Relation>(related: Related<R::Owner, R::Member>) -> Result<Value, ApiError> {
    let serialize = |e: serde_json::Error| ApiError::internal(format!("Failed to serialize: {}", e));

    let mut body = serde_json::to_value(&related.owner).map_err(serialize)?;
    let members = serde_json::to_value(&related.members).map_err(serialize)?;

    if let Value::Object(fields) = &mut body {
        fields.insert(R::FIELD.to_string(), members);
    }
    Ok(body)
}

/// Mounts the association endpoints of `R`
pub fn routes<R: AssociationEndpoint>(router: Router<AppState>) -> Router<AppState> {
    let collection = format!(
        "/{}/{{id}}/{}",
        R::Owner::KIND.path_segment(),
        R::Member::KIND.path_segment()
    );
    let item = format!("{}/{{member_id}}", collection);

    router
        .route(&collection, get(list::<R>).put(replace::<R>))
        .route(
            &item,
            post(add::<R>).get(find_one::<R>).delete(remove::<R>),
        )
}

/// POST /{owners}/{id}/{members}/{member_id}
pub async fn add<R: AssociationEndpoint>(
    State(state): State<AppState>,
    Path((owner_id, member_id)): Path<(String, String)>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let (owner_id, member_id) = (parse_id(owner_id)?, parse_id(member_id)?);

    let related = R::service(&state.catalog).add(&owner_id, &member_id).await?;
    Ok((StatusCode::CREATED, Json(related_body::<R>(related)?)))
}

/// GET /{owners}/{id}/{members}/{member_id}
pub async fn find_one<R: AssociationEndpoint>(
    State(state): State<AppState>,
    Path((owner_id, member_id)): Path<(String, String)>,
) -> Result<Json<R::Member>, ApiError> {
    let (owner_id, member_id) = (parse_id(owner_id)?, parse_id(member_id)?);

    let member = R::service(&state.catalog)
        .find_one(&owner_id, &member_id)
        .await?;
    Ok(Json(member))
}

/// GET /{owners}/{id}/{members}
pub async fn list<R: AssociationEndpoint>(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
) -> Result<Json<Vec<R::Member>>, ApiError> {
    let owner_id = parse_id(owner_id)?;
    debug!(relation = R::FIELD, owner = %owner_id, "Listing associations");

    let members = match R::cached_reads(&state.catalog) {
        Some(reads) => reads.find_all_for_owner(&owner_id).await?,
        None => {
            R::service(&state.catalog)
                .find_all_for_owner(&owner_id)
                .await?
        }
    };
    Ok(Json(members))
}

/// PUT /{owners}/{id}/{members}
pub async fn replace<R: AssociationEndpoint>(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
    Json(refs): Json<Vec<MemberRef>>,
) -> Result<Json<Value>, ApiError> {
    let owner_id = parse_id(owner_id)?;
    let member_ids = refs
        .into_iter()
        .map(|r| parse_id(r.id))
        .collect::<Result<Vec<EntityId>, _>>()?;

    let related = R::service(&state.catalog)
        .replace_all(&owner_id, &member_ids)
        .await?;
    Ok(Json(related_body::<R>(related)?))
}

/// DELETE /{owners}/{id}/{members}/{member_id}
pub async fn remove<R: AssociationEndpoint>(
    State(state): State<AppState>,
    Path((owner_id, member_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let (owner_id, member_id) = (parse_id(owner_id)?, parse_id(member_id)?);

    R::service(&state.catalog).remove(&owner_id, &member_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /culinary-cultures/{id}/recipes
pub async fn add_new_recipe(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
    Json(draft): Json<RecipeDraft>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let owner_id = parse_id(owner_id)?;

    let related = state
        .catalog
        .culinary_culture_recipes
        .add_new(&owner_id, draft)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(related_body::<CulinaryCultureRecipes>(related)?),
    ))
}
