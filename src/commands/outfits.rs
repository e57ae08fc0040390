use crate::error::AppError;
use crate::models::outfit_types::{Feedback, OutfitSuggestion};
use crate::services::outfit_service::OutfitStore;
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct OutfitArgs {
    #[command(subcommand)]
    pub command: OutfitCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum OutfitCommand {
    /// List saved outfits, newest first
    List {
        /// Only show favorites
        #[arg(long)]
        favorites: bool,

        /// Print outfits as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add outfits from a JSON file (an array of suggestions)
    Import {
        file: PathBuf,
    },
    /// Rate an outfit as good or bad
    Feedback {
        id: String,
        verdict: Feedback,
        /// Optional note explaining the verdict
        #[arg(long)]
        note: Option<String>,
    },
    /// Toggle the favorite mark on an outfit
    Favorite {
        id: String,
    },
    /// Attach a generated try-on image to an outfit
    Image {
        id: String,
        /// Image URI; omit to clear
        uri: Option<String>,
        /// Mark the image as still being generated
        #[arg(long)]
        generating: bool,
    },
}

pub fn run(args: &OutfitArgs, store: &OutfitStore) -> Result<(), AppError> {
    match &args.command {
        OutfitCommand::List { favorites, json } => list(store, *favorites, *json),
        OutfitCommand::Import { file } => {
            let added = import(store, file)?;
            println!("Added {} outfit(s)", added);
            Ok(())
        }
        OutfitCommand::Feedback { id, verdict, note } => {
            if !store.set_feedback(id, *verdict, note.clone())? {
                return Err(unknown(id));
            }
            println!("Marked {} as {}", id, verdict);
            Ok(())
        }
        OutfitCommand::Favorite { id } => match store.toggle_favorite(id)? {
            Some(true) => {
                println!("Added {} to favorites", id);
                Ok(())
            }
            Some(false) => {
                println!("Removed {} from favorites", id);
                Ok(())
            }
            None => Err(unknown(id)),
        },
        OutfitCommand::Image { id, uri, generating } => {
            if !store.update_outfit_image(id, uri.clone(), *generating)? {
                return Err(unknown(id));
            }
            println!("Updated image for {}", id);
            Ok(())
        }
    }
}

fn unknown(id: &str) -> AppError {
    format!("No outfit with id {}", id).into()
}

pub fn import(store: &OutfitStore, file: &Path) -> Result<usize, AppError> {
    let contents = std::fs::read_to_string(file).map_err(|e| AppError {
        message: format!("Failed to read {}: {}", file.display(), e),
    })?;
    let outfits: Vec<OutfitSuggestion> = serde_json::from_str(&contents).map_err(|e| AppError {
        message: format!("Invalid outfit file {}: {}", file.display(), e),
    })?;
    let added = outfits.len();
    store.add_outfits(outfits)?;
    info!("Imported {} outfit(s) from {}", added, file.display());
    Ok(added)
}

fn list(store: &OutfitStore, favorites: bool, json: bool) -> Result<(), AppError> {
    let outfits = if favorites { store.favorites()? } else { store.outfits()? };

    if json {
        println!("{}", serde_json::to_string_pretty(&outfits)?);
        return Ok(());
    }

    if outfits.is_empty() {
        println!("No outfits yet");
        return Ok(());
    }

    for outfit in &outfits {
        let star = if outfit.is_favorite { "*" } else { " " };
        let verdict = outfit.feedback.map(|f| f.as_str()).unwrap_or("-");
        println!(
            "{} {}  {:<8} {:<4} {} ({} items)",
            star,
            outfit.id,
            outfit.occasion,
            verdict,
            outfit.description,
            outfit.items.len()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::outfit_types::Occasion;
    use crate::services::db::Database;

    fn store() -> OutfitStore {
        OutfitStore::new(Database::in_memory().unwrap())
    }

    #[test]
    fn import_prepends_outfits_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outfits.json");
        let outfits = vec![
            OutfitSuggestion::new(Vec::new(), "Beach day", "Light layers", Occasion::Travel),
            OutfitSuggestion::new(Vec::new(), "Night out", "Dark tones", Occasion::Party),
        ];
        std::fs::write(&path, serde_json::to_string(&outfits).unwrap()).unwrap();

        let store = store();
        assert_eq!(import(&store, &path).unwrap(), 2);
        let stored = store.outfits().unwrap();
        assert_eq!(stored, outfits);
    }

    #[test]
    fn import_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outfits.json");
        std::fs::write(&path, r#"{"not": "an array"}"#).unwrap();

        let err = import(&store(), &path).unwrap_err();
        assert!(err.message.contains("Invalid outfit file"));
    }

    #[test]
    fn commands_on_unknown_outfit_fail() {
        let store = store();
        let feedback = OutfitArgs {
            command: OutfitCommand::Feedback {
                id: "missing".into(),
                verdict: Feedback::Good,
                note: None,
            },
        };
        let favorite = OutfitArgs {
            command: OutfitCommand::Favorite { id: "missing".into() },
        };

        assert!(run(&feedback, &store).unwrap_err().message.contains("No outfit"));
        assert!(run(&favorite, &store).unwrap_err().message.contains("No outfit"));
    }

    #[test]
    fn feedback_command_stores_note() {
        let store = store();
        let outfit = OutfitSuggestion::new(Vec::new(), "Dinner", "Smart casual", Occasion::Date);
        let id = outfit.id.clone();
        store.add_outfits(vec![outfit]).unwrap();

        let args = OutfitArgs {
            command: OutfitCommand::Feedback {
                id: id.clone(),
                verdict: Feedback::Bad,
                note: Some("shoes clash".into()),
            },
        };
        run(&args, &store).unwrap();

        let stored = store.outfit(&id).unwrap().unwrap();
        assert_eq!(stored.feedback, Some(Feedback::Bad));
        assert_eq!(stored.feedback_note.as_deref(), Some("shoes clash"));
    }
}
