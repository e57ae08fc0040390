use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::wardrobe_types::WardrobeItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Occasion {
    Travel,
    Party,
    Date,
    Weather,
    Celeb,
}

impl Occasion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Occasion::Travel => "travel",
            Occasion::Party => "party",
            Occasion::Date => "date",
            Occasion::Weather => "weather",
            Occasion::Celeb => "celeb",
        }
    }
}

impl fmt::Display for Occasion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user's verdict on a suggested outfit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Good,
    Bad,
}

impl Feedback {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feedback::Good => "good",
            Feedback::Bad => "bad",
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feedback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "good" => Ok(Feedback::Good),
            "bad" => Ok(Feedback::Bad),
            other => Err(format!("unknown feedback: {} (expected good or bad)", other)),
        }
    }
}

/// A generated outfit combining wardrobe items for one occasion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitSuggestion {
    pub id: String,
    pub items: Vec<WardrobeItem>,
    pub description: String,
    pub reasoning: String,
    pub occasion: Occasion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub celeb_name: Option<String>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Feedback>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_note: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_image_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_photo_uri: Option<String>,
    #[serde(default)]
    pub is_generating_image: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub garment_description_en: Option<String>,
}

impl OutfitSuggestion {
    pub fn new(
        items: Vec<WardrobeItem>,
        description: impl Into<String>,
        reasoning: impl Into<String>,
        occasion: Occasion,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            items,
            description: description.into(),
            reasoning: reasoning.into(),
            occasion,
            celeb_name: None,
            created_at: chrono::Utc::now().to_rfc3339(),
            feedback: None,
            feedback_note: None,
            is_favorite: false,
            generated_image_uri: None,
            original_photo_uri: None,
            is_generating_image: false,
            garment_description_en: None,
        }
    }
}
