//! CLI module for the culinary catalog
//!
//! - `serve`: HTTP API server (default)
//! - `seed`: loads a demo graph into the configured store

pub mod seed;
pub mod serve;

use clap::{Parser, Subcommand};

/// Culinary Catalog - countries, cultures, products, recipes and restaurants
#[derive(Parser)]
#[command(name = "culinary-catalog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Default)]
pub enum Command {
    /// Run the HTTP API server
    #[default]
    Serve,

    /// Load demo data into the configured store
    Seed(seed::SeedArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_is_default() {
        let cli = Cli::try_parse_from(["culinary-catalog"]).unwrap();
        assert!(matches!(cli.command.unwrap_or_default(), Command::Serve));
    }

    #[test]
    fn test_parse_seed() {
        let cli = Cli::try_parse_from(["culinary-catalog", "seed", "--clear"]).unwrap();
        match cli.command {
            Some(Command::Seed(args)) => assert!(args.clear),
            _ => panic!("expected seed command"),
        }
    }
}
