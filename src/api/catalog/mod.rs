//! Catalog REST API, mounted under `/api/v1`

pub mod associations;
pub mod entities;

use axum::routing::post;
use axum::Router;

use super::state::AppState;
use crate::domain::catalog::{Category, Country, CulinaryCulture, Product, Recipe, Restaurant};
use crate::domain::relation::{
    CategoryProducts, CountryCulinaryCultures, CulinaryCultureCountries, CulinaryCultureProducts,
    CulinaryCultureRecipes, CulinaryCultureRestaurants, RecipeProducts, RestaurantCulinaryCultures,
};

pub fn create_catalog_router() -> Router<AppState> {
    let router = Router::new();

    let router = entities::routes::<Category>(router);
    let router = entities::routes::<Country>(router);
    let router = entities::routes::<CulinaryCulture>(router);
    let router = entities::routes::<Product>(router);
    let router = entities::routes::<Recipe>(router);
    let router = entities::routes::<Restaurant>(router);

    let router = associations::routes::<CategoryProducts>(router);
    let router = associations::routes::<CountryCulinaryCultures>(router);
    let router = associations::routes::<CulinaryCultureCountries>(router);
    let router = associations::routes::<CulinaryCultureProducts>(router);
    let router = associations::routes::<CulinaryCultureRecipes>(router);
    let router = associations::routes::<CulinaryCultureRestaurants>(router);
    let router = associations::routes::<RecipeProducts>(router);
    let router = associations::routes::<RestaurantCulinaryCultures>(router);

    // Shares its path with the recipe list, which answers GET and PUT
    router.route(
        "/culinary-cultures/{id}/recipes",
        post(associations::add_new_recipe),
    )
}
