//! Seed command - loads a small demo graph into the configured store

use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::catalog::{
    CatalogEntity, CategoryDraft, CountryDraft, CulinaryCultureDraft, ProductDraft, RecipeDraft,
    RestaurantDraft,
};
use crate::infrastructure::catalog::CatalogServices;
use crate::infrastructure::logging;

#[derive(Args, Debug, Default)]
pub struct SeedArgs {
    /// Empty every store before seeding
    #[arg(long)]
    pub clear: bool,
}

/// Number of stored entities per collection after seeding
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories: usize,
    pub countries: usize,
    pub culinary_cultures: usize,
    pub products: usize,
    pub recipes: usize,
    pub restaurants: usize,
}

impl std::fmt::Display for SeedSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "categories:        {}", self.categories)?;
        writeln!(f, "countries:         {}", self.countries)?;
        writeln!(f, "culinary cultures: {}", self.culinary_cultures)?;
        writeln!(f, "products:          {}", self.products)?;
        writeln!(f, "recipes:           {}", self.recipes)?;
        write!(f, "restaurants:       {}", self.restaurants)
    }
}

pub async fn run(args: SeedArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging)?;

    let services = crate::create_catalog_services(&config).await?;

    if args.clear {
        services.store.clear().await?;
        info!("Cleared catalog store");
    }

    seed_catalog(&services).await?;
    let summary = summarize(&services).await?;

    println!("{}", summary);
    Ok(())
}

/// Creates the demo entities and wires their associations
pub async fn seed_catalog(services: &CatalogServices) -> anyhow::Result<()> {
    let peru = services
        .countries
        .create(CountryDraft {
            name: "Peru".to_string(),
        })
        .await?;
    let japan = services
        .countries
        .create(CountryDraft {
            name: "Japan".to_string(),
        })
        .await?;

    let nikkei = services
        .culinary_cultures
        .create(CulinaryCultureDraft {
            name: "Nikkei".to_string(),
            description: "Japanese technique applied to Peruvian produce".to_string(),
        })
        .await?;

    let seafood = services
        .categories
        .create(CategoryDraft {
            name: "Seafood".to_string(),
        })
        .await?;
    let peppers = services
        .categories
        .create(CategoryDraft {
            name: "Peppers".to_string(),
        })
        .await?;

    let corvina = services
        .products
        .create(ProductDraft {
            name: "Corvina".to_string(),
            description: "White-fleshed Pacific fish".to_string(),
            history: "Staple of coastal ceviche".to_string(),
        })
        .await?;
    let aji = services
        .products
        .create(ProductDraft {
            name: "Aji amarillo".to_string(),
            description: "Yellow chili pepper".to_string(),
            history: "Cultivated in the Andes for millennia".to_string(),
        })
        .await?;

    let maido = services
        .restaurants
        .create(RestaurantDraft {
            name: "Maido".to_string(),
            city: "Lima".to_string(),
            country: "Peru".to_string(),
            michelin_stars: None,
            michelin_star_date: None,
        })
        .await?;

    services
        .culinary_culture_countries
        .replace_all(nikkei.id(), &[peru.id().clone(), japan.id().clone()])
        .await?;
    services
        .category_products
        .add(seafood.id(), corvina.id())
        .await?;
    services.category_products.add(peppers.id(), aji.id()).await?;
    services
        .culinary_culture_products
        .replace_all(nikkei.id(), &[corvina.id().clone(), aji.id().clone()])
        .await?;
    services
        .culinary_culture_restaurants
        .add(nikkei.id(), maido.id())
        .await?;

    let tiradito = services
        .culinary_culture_recipes
        .add_new(
            nikkei.id(),
            RecipeDraft {
                name: "Tiradito".to_string(),
                description: "Sashimi-cut fish in a chili and lime sauce".to_string(),
                photo: "https://example.com/tiradito.jpg".to_string(),
                preparation: "Slice the fish thinly and dress with leche de tigre".to_string(),
                video: "https://example.com/tiradito.mp4".to_string(),
            },
        )
        .await?;

    if let Some(recipe) = tiradito.members.first() {
        services
            .recipe_products
            .replace_all(recipe.id(), &[corvina.id().clone(), aji.id().clone()])
            .await?;
    }

    info!(culture = %nikkei.id(), "Seeded demo catalog");
    Ok(())
}

async fn summarize(services: &CatalogServices) -> anyhow::Result<SeedSummary> {
    let store = &services.store;

    Ok(SeedSummary {
        categories: store.categories.count().await?,
        countries: store.countries.count().await?,
        culinary_cultures: store.culinary_cultures.count().await?,
        products: store.products.count().await?,
        recipes: store.recipes.count().await?,
        restaurants: store.restaurants.count().await?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::CulinaryCulture;
    use crate::infrastructure::cache::CacheFactory;
    use crate::infrastructure::catalog::ReadCacheSettings;
    use crate::infrastructure::storage::StorageFactory;

    fn create_services() -> CatalogServices {
        CatalogServices::new(
            StorageFactory::in_memory_catalog(),
            CacheFactory::new().create_in_memory(),
            ReadCacheSettings::default(),
        )
    }

    #[tokio::test]
    async fn test_seed_catalog_counts() {
        let services = create_services();

        seed_catalog(&services).await.unwrap();

        let summary = summarize(&services).await.unwrap();
        assert_eq!(
            summary,
            SeedSummary {
                categories: 2,
                countries: 2,
                culinary_cultures: 1,
                products: 2,
                recipes: 1,
                restaurants: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_seed_catalog_links_culture() {
        let services = create_services();
        seed_catalog(&services).await.unwrap();

        let cultures = services.store.find_all::<CulinaryCulture>().await.unwrap();
        let view = services
            .culinary_cultures
            .find_one(cultures[0].id())
            .await
            .unwrap();

        assert_eq!(view.countries.len(), 2);
        assert_eq!(view.products.len(), 2);
        assert_eq!(view.recipes.len(), 1);
        assert_eq!(view.restaurants.len(), 1);
    }

    #[test]
    fn test_summary_display() {
        let summary = SeedSummary {
            recipes: 3,
            ..SeedSummary::default()
        };

        assert!(summary.to_string().contains("recipes:           3"));
    }
}
