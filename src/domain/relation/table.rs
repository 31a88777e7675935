//! Join tables connecting catalog entities

use serde::{Deserialize, Serialize};

use crate::domain::catalog::EntityKind;

/// How many owners a right-hand row may have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    ManyToMany,
    /// Each right-hand entity belongs to at most one left-hand entity
    OneToMany,
}

/// Which column of a join table an id is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkSide {
    Left,
    Right,
}

impl LinkSide {
    pub fn opposite(&self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// One association table. A symmetric relation is one table read from either side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinTable {
    CategoryProduct,
    CulinaryCultureCountry,
    CulinaryCultureProduct,
    CulinaryCultureRecipe,
    CulinaryCultureRestaurant,
    RecipeProduct,
}

impl JoinTable {
    pub const ALL: [JoinTable; 6] = [
        Self::CategoryProduct,
        Self::CulinaryCultureCountry,
        Self::CulinaryCultureProduct,
        Self::CulinaryCultureRecipe,
        Self::CulinaryCultureRestaurant,
        Self::RecipeProduct,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CategoryProduct => "category_product",
            Self::CulinaryCultureCountry => "culinary_culture_country",
            Self::CulinaryCultureProduct => "culinary_culture_product",
            Self::CulinaryCultureRecipe => "culinary_culture_recipe",
            Self::CulinaryCultureRestaurant => "culinary_culture_restaurant",
            Self::RecipeProduct => "recipe_product",
        }
    }

    pub fn cardinality(&self) -> Cardinality {
        match self {
            Self::CulinaryCultureRecipe => Cardinality::OneToMany,
            _ => Cardinality::ManyToMany,
        }
    }

    /// The entity kind stored in the given column
    pub fn kind(&self, side: LinkSide) -> EntityKind {
        let (left, right) = match self {
            Self::CategoryProduct => (EntityKind::Category, EntityKind::Product),
            Self::CulinaryCultureCountry => (EntityKind::CulinaryCulture, EntityKind::Country),
            Self::CulinaryCultureProduct => (EntityKind::CulinaryCulture, EntityKind::Product),
            Self::CulinaryCultureRecipe => (EntityKind::CulinaryCulture, EntityKind::Recipe),
            Self::CulinaryCultureRestaurant => {
                (EntityKind::CulinaryCulture, EntityKind::Restaurant)
            }
            Self::RecipeProduct => (EntityKind::Recipe, EntityKind::Product),
        };

        match side {
            LinkSide::Left => left,
            LinkSide::Right => right,
        }
    }

    /// Sides of this table on which entities of `kind` appear
    pub fn sides_of(&self, kind: EntityKind) -> Vec<LinkSide> {
        [LinkSide::Left, LinkSide::Right]
            .into_iter()
            .filter(|side| self.kind(*side) == kind)
            .collect()
    }
}

impl std::fmt::Display for JoinTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
