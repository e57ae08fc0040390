//! Wardrobe - batch garment classification against a hosted vision model.
//!
//! The core is [`BatchClassifier`]: it classifies a set of images concurrently,
//! reports a [`ProgressSnapshot`] as each one settles and returns a
//! [`BatchOutcome`] that separates successes from failures. The rest of the
//! crate is the surrounding app: the HTTP classifier, image sources, the
//! SQLite-backed wardrobe, outfit history and profile, and the CLI commands.

pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod services;

pub use error::{AppError, ClassifyError};
pub use models::classify_types::{BatchOutcome, ProgressSnapshot};
pub use models::outfit_types::{Feedback, Occasion, OutfitSuggestion};
pub use models::profile_types::{ProfileUpdate, UserProfile};
pub use models::wardrobe_types::{ClassificationResult, ClothingCategory, ImageRef, WardrobeItem};
pub use services::classifier::batch::BatchClassifier;
pub use services::classifier::remote::RemoteClassifier;
pub use services::classifier::ImageClassifier;
