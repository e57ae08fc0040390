//! Outfit history: generated suggestions with the user's feedback and favorites.

use crate::error::AppError;
use crate::models::outfit_types::{Feedback, OutfitSuggestion};
use crate::services::db::Database;

const OUTFITS_KEY: &str = "outfits";

#[derive(Clone)]
pub struct OutfitStore {
    db: Database,
}

impl OutfitStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// All outfits, newest first.
    pub fn outfits(&self) -> Result<Vec<OutfitSuggestion>, AppError> {
        match self.db.get(OUTFITS_KEY)? {
            Some(stored) => serde_json::from_str(&stored).map_err(|e| AppError {
                message: format!("Corrupt outfit data: {}", e),
            }),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, outfits: &[OutfitSuggestion]) -> Result<(), AppError> {
        let json = serde_json::to_string(outfits)?;
        self.db.set(OUTFITS_KEY, &json)?;
        Ok(())
    }

    /// Apply `change` to the outfit with `id`; returns `false` when there is none.
    fn modify<F>(&self, id: &str, change: F) -> Result<bool, AppError>
    where
        F: FnOnce(&mut OutfitSuggestion),
    {
        let mut outfits = self.outfits()?;
        let Some(outfit) = outfits.iter_mut().find(|o| o.id == id) else {
            return Ok(false);
        };
        change(outfit);
        self.save(&outfits)?;
        Ok(true)
    }

    pub fn outfit(&self, id: &str) -> Result<Option<OutfitSuggestion>, AppError> {
        Ok(self.outfits()?.into_iter().find(|o| o.id == id))
    }

    /// Prepend `new_outfits`, keeping their relative order.
    pub fn add_outfits(&self, new_outfits: Vec<OutfitSuggestion>) -> Result<(), AppError> {
        if new_outfits.is_empty() {
            return Ok(());
        }
        let mut updated = new_outfits;
        updated.extend(self.outfits()?);
        self.save(&updated)
    }

    /// Record a verdict. The note replaces any earlier one, including with `None`.
    pub fn set_feedback(&self, id: &str, feedback: Feedback, note: Option<String>) -> Result<bool, AppError> {
        self.modify(id, |outfit| {
            outfit.feedback = Some(feedback);
            outfit.feedback_note = note;
        })
    }

    /// Flip the favorite mark; returns the new state, or `None` for an unknown id.
    pub fn toggle_favorite(&self, id: &str) -> Result<Option<bool>, AppError> {
        let mut state = None;
        self.modify(id, |outfit| {
            outfit.is_favorite = !outfit.is_favorite;
            state = Some(outfit.is_favorite);
        })?;
        Ok(state)
    }

    pub fn update_outfit_image(
        &self,
        id: &str,
        image_uri: Option<String>,
        is_generating: bool,
    ) -> Result<bool, AppError> {
        self.modify(id, |outfit| {
            outfit.generated_image_uri = image_uri;
            outfit.is_generating_image = is_generating;
        })
    }

    pub fn favorites(&self) -> Result<Vec<OutfitSuggestion>, AppError> {
        Ok(self.outfits()?.into_iter().filter(|o| o.is_favorite).collect())
    }
}
