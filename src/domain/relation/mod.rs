//! Relation domain - join tables and directed relations between entities

mod link_store;
#[allow(clippy::module_inception)]
mod relation;
mod table;

pub use link_store::LinkStore;
pub use relation::{
    CategoryProducts, CountryCulinaryCultures, CulinaryCultureCountries, CulinaryCultureProducts,
    CulinaryCultureRecipes, CulinaryCultureRestaurants, RecipeProducts, Related, Relation,
    RelationMessages, RestaurantCulinaryCultures,
};
pub use table::{Cardinality, JoinTable, LinkSide};
