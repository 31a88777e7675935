//! Directed relations between catalog entities

use std::fmt::Debug;

use super::table::{JoinTable, LinkSide};
use crate::domain::catalog::{
    CatalogEntity, Category, Country, CulinaryCulture, Product, Recipe, Restaurant,
};

/// Error messages reported by association operations on one relation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationMessages {
    pub owner_not_found: &'static str,
    pub member_not_found: &'static str,
    pub not_associated: &'static str,
    pub already_associated: &'static str,
}

/// A relation read from one owner's point of view
///
/// Implemented by zero-sized markers; the association service is generic
/// over it.
pub trait Relation: Debug + Send + Sync + 'static {
    type Owner: CatalogEntity;
    type Member: CatalogEntity;

    const TABLE: JoinTable;
    /// Column of `TABLE` holding the owner id
    const OWNER_SIDE: LinkSide;
    /// Name of the member collection on the owner's public shape
    const FIELD: &'static str;
    const MESSAGES: RelationMessages;
    /// Whether `add` rejects a member that is already associated
    const ENFORCE_UNIQUENESS: bool = false;
}

/// An owner together with its expanded member collection
#[derive(Debug, Clone, PartialEq)]
pub struct Related<O, M> {
    pub owner: O,
    pub members: Vec<M>,
}

impl<O, M> Related<O, M> {
    pub fn new(owner: O, members: Vec<M>) -> Self {
        Self { owner, members }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryProducts;

impl Relation for CategoryProducts {
    type Owner = Category;
    type Member = Product;

    const TABLE: JoinTable = JoinTable::CategoryProduct;
    const OWNER_SIDE: LinkSide = LinkSide::Left;
    const FIELD: &'static str = "products";
    const MESSAGES: RelationMessages = RelationMessages {
        owner_not_found: "The category with the given id was not found",
        member_not_found: "The product with the given id was not found",
        not_associated: "The product with the given id is not associated to the category",
        already_associated: "The product already exists in the category",
    };
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CountryCulinaryCultures;

impl Relation for CountryCulinaryCultures {
    type Owner = Country;
    type Member = CulinaryCulture;

    const TABLE: JoinTable = JoinTable::CulinaryCultureCountry;
    const OWNER_SIDE: LinkSide = LinkSide::Right;
    const FIELD: &'static str = "culinaryCultures";
    const MESSAGES: RelationMessages = RelationMessages {
        owner_not_found: "The country with the given id was not found",
        member_not_found: "The culinary culture with the given id was not found",
        not_associated: "The culinary culture with the given id is not associated to the country",
        already_associated: "The culinary culture already exists in the country",
    };
    const ENFORCE_UNIQUENESS: bool = true;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CulinaryCultureCountries;

impl Relation for CulinaryCultureCountries {
    type Owner = CulinaryCulture;
    type Member = Country;

    const TABLE: JoinTable = JoinTable::CulinaryCultureCountry;
    const OWNER_SIDE: LinkSide = LinkSide::Left;
    const FIELD: &'static str = "countries";
    const MESSAGES: RelationMessages = RelationMessages {
        owner_not_found: "The culinary culture with the given id was not found",
        member_not_found: "The country with the given id was not found",
        not_associated: "The country with the given id is not associated to the culinary culture",
        already_associated: "The country already exists in the culinary culture",
    };
    const ENFORCE_UNIQUENESS: bool = true;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CulinaryCultureProducts;

impl Relation for CulinaryCultureProducts {
    type Owner = CulinaryCulture;
    type Member = Product;

    const TABLE: JoinTable = JoinTable::CulinaryCultureProduct;
    const OWNER_SIDE: LinkSide = LinkSide::Left;
    const FIELD: &'static str = "products";
    const MESSAGES: RelationMessages = RelationMessages {
        owner_not_found: "The culinaryCulture with the given id was not found",
        member_not_found: "The product with the given id was not found",
        not_associated: "The product with the given id is not associated to the culinaryCulture",
        already_associated: "The product already exists in the culinaryCulture",
    };
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CulinaryCultureRecipes;

impl Relation for CulinaryCultureRecipes {
    type Owner = CulinaryCulture;
    type Member = Recipe;

    const TABLE: JoinTable = JoinTable::CulinaryCultureRecipe;
    const OWNER_SIDE: LinkSide = LinkSide::Left;
    const FIELD: &'static str = "recipes";
    const MESSAGES: RelationMessages = RelationMessages {
        owner_not_found: "The culinary culture with the given id was not found",
        member_not_found: "The recipe with the given id was not found",
        not_associated: "The recipe with the given id is not associated to the culinary culture",
        already_associated: "The recipe already exists in the culinary culture",
    };
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CulinaryCultureRestaurants;

impl Relation for CulinaryCultureRestaurants {
    type Owner = CulinaryCulture;
    type Member = Restaurant;

    const TABLE: JoinTable = JoinTable::CulinaryCultureRestaurant;
    const OWNER_SIDE: LinkSide = LinkSide::Left;
    const FIELD: &'static str = "restaurants";
    const MESSAGES: RelationMessages = RelationMessages {
        owner_not_found: "The culinary culture with the given id was not found",
        member_not_found: "The restaurant with the given id was not found",
        not_associated: "The restaurant with the given id is not associated to the culinary culture",
        already_associated: "The restaurant already exists in the culinary culture",
    };
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RecipeProducts;

impl Relation for RecipeProducts {
    type Owner = Recipe;
    type Member = Product;

    const TABLE: JoinTable = JoinTable::RecipeProduct;
    const OWNER_SIDE: LinkSide = LinkSide::Left;
    const FIELD: &'static str = "products";
    const MESSAGES: RelationMessages = RelationMessages {
        owner_not_found: "The recipe with the given id was not found",
        member_not_found: "The product with the given id was not found",
        not_associated: "The product with the given id is not associated to the recipe",
        already_associated: "The product already exists in the recipe",
    };
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RestaurantCulinaryCultures;

impl Relation for RestaurantCulinaryCultures {
    type Owner = Restaurant;
    type Member = CulinaryCulture;

    const TABLE: JoinTable = JoinTable::CulinaryCultureRestaurant;
    const OWNER_SIDE: LinkSide = LinkSide::Right;
    const FIELD: &'static str = "culinaryCultures";
    const MESSAGES: RelationMessages = RelationMessages {
        owner_not_found: "The restaurant with the given id was not found",
        member_not_found: "The culinary culture with the given id was not found",
        not_associated: "The culinary culture with the given id is not associated to the restaurant",
        already_associated: "The culinary culture already exists in the restaurant",
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::EntityKind;

    fn check<R: Relation>() {
        assert_eq!(R::TABLE.kind(R::OWNER_SIDE), R::Owner::KIND);
        assert_eq!(R::TABLE.kind(R::OWNER_SIDE.opposite()), R::Member::KIND);
    }

    #[test]
    fn test_relation_sides_match_entity_kinds() {
        check::<CategoryProducts>();
        check::<CountryCulinaryCultures>();
        check::<CulinaryCultureCountries>();
        check::<CulinaryCultureProducts>();
        check::<CulinaryCultureRecipes>();
        check::<CulinaryCultureRestaurants>();
        check::<RecipeProducts>();
        check::<RestaurantCulinaryCultures>();
    }

    #[test]
    fn test_only_country_relations_enforce_uniqueness() {
        assert!(CountryCulinaryCultures::ENFORCE_UNIQUENESS);
        assert!(CulinaryCultureCountries::ENFORCE_UNIQUENESS);
        assert!(!CategoryProducts::ENFORCE_UNIQUENESS);
        assert!(!RestaurantCulinaryCultures::ENFORCE_UNIQUENESS);
    }

    #[test]
    fn test_symmetric_relations_share_a_table() {
        assert_eq!(
            CulinaryCultureRestaurants::TABLE,
            RestaurantCulinaryCultures::TABLE
        );
        assert_eq!(
            <RestaurantCulinaryCultures as Relation>::Owner::KIND,
            EntityKind::Restaurant
        );
    }
}
