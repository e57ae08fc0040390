//! CLI command definitions and handlers.

pub mod classifier;
pub mod outfits;
pub mod profile;
pub mod wardrobe;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::services::db::Database;
use crate::services::outfit_service::OutfitStore;
use crate::services::profile_service::ProfileStore;
use crate::services::wardrobe_service::WardrobeStore;

/// Wardrobe - classify clothing photos and keep them in a local wardrobe
#[derive(Parser, Debug)]
#[command(name = "wardrobe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Extra config file, applied over the XDG and project configs
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify images and add the recognized items to the wardrobe
    Analyze(classifier::AnalyzeArgs),
    /// List wardrobe items
    List(wardrobe::ListArgs),
    /// Remove a wardrobe item
    Remove(wardrobe::RemoveArgs),
    /// Show item counts per category
    Counts,
    /// Browse and rate saved outfit suggestions
    Outfits(outfits::OutfitArgs),
    /// View or edit the body profile used for suggestions
    Profile(profile::ProfileArgs),
}

pub fn open_database(config: &AppConfig) -> Result<Database, AppError> {
    let db_path = config.db_path()?;
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AppError {
            message: format!("Failed to create data directory {}: {}", parent.display(), e),
        })?;
    }
    debug!("Opening wardrobe at {}", db_path.display());
    Ok(Database::new(&db_path)?)
}

pub fn open_store(config: &AppConfig) -> Result<WardrobeStore, AppError> {
    Ok(WardrobeStore::new(open_database(config)?))
}

pub async fn run(cli: &Cli) -> Result<(), AppError> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let db = open_database(&config)?;
    let store = WardrobeStore::new(db.clone());

    match &cli.command {
        Commands::Analyze(args) => classifier::analyze(args, &config, &store).await,
        Commands::List(args) => wardrobe::list(args, &store),
        Commands::Remove(args) => wardrobe::remove(args, &store),
        Commands::Counts => wardrobe::counts(&store),
        Commands::Outfits(args) => outfits::run(args, &OutfitStore::new(db)),
        Commands::Profile(args) => profile::run(args, &ProfileStore::new(db)),
    }
}
