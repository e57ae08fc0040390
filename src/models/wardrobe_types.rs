use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Locator for a source image: a file path, an http(s) URL or a `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_data_uri(&self) -> bool {
        self.0.starts_with("data:")
    }

    pub fn is_remote(&self) -> bool {
        self.0.starts_with("http://") || self.0.starts_with("https://")
    }

    /// Shortened form for log lines; data URIs can be megabytes long.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(50) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageRef {
    fn from(uri: &str) -> Self {
        Self::new(uri)
    }
}

impl From<String> for ImageRef {
    fn from(uri: String) -> Self {
        Self(uri)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClothingCategory {
    Top,
    Bottom,
    Shoes,
    Accessory,
    Outerwear,
}

impl ClothingCategory {
    pub const ALL: [ClothingCategory; 5] = [
        ClothingCategory::Top,
        ClothingCategory::Bottom,
        ClothingCategory::Shoes,
        ClothingCategory::Outerwear,
        ClothingCategory::Accessory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClothingCategory::Top => "top",
            ClothingCategory::Bottom => "bottom",
            ClothingCategory::Shoes => "shoes",
            ClothingCategory::Accessory => "accessory",
            ClothingCategory::Outerwear => "outerwear",
        }
    }
}

impl fmt::Display for ClothingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClothingCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "top" => Ok(ClothingCategory::Top),
            "bottom" => Ok(ClothingCategory::Bottom),
            "shoes" => Ok(ClothingCategory::Shoes),
            "accessory" => Ok(ClothingCategory::Accessory),
            "outerwear" => Ok(ClothingCategory::Outerwear),
            other => Err(format!("unknown clothing category: {}", other)),
        }
    }
}

/// A successful classification of one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub source_ref: ImageRef,
    pub category: ClothingCategory,
    pub label: String,
    pub color: String,
}

/// An item persisted in the wardrobe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WardrobeItem {
    pub id: String,
    pub image_uri: String,
    pub category: ClothingCategory,
    pub label: String,
    pub color: String,
    pub added_at: String,
}

impl WardrobeItem {
    pub fn from_classification(result: &ClassificationResult) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            image_uri: result.source_ref.as_str().to_string(),
            category: result.category,
            label: result.label.clone(),
            color: result.color.clone(),
            added_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_serde_and_from_str() {
        let json = serde_json::to_string(&ClothingCategory::Outerwear).unwrap();
        assert_eq!(json, "\"outerwear\"");
        let back: ClothingCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ClothingCategory::Outerwear);
        assert_eq!(" Shoes ".parse::<ClothingCategory>(), Ok(ClothingCategory::Shoes));
        assert!("hat".parse::<ClothingCategory>().is_err());
    }

    #[test]
    fn short_truncates_long_refs_on_char_boundary() {
        let long = ImageRef::new(format!("data:image/png;base64,{}", "é".repeat(80)));
        assert_eq!(long.short().chars().count(), 50);
        let short = ImageRef::new("shirt.jpg");
        assert_eq!(short.short(), "shirt.jpg");
    }

    #[test]
    fn item_from_classification_copies_fields() {
        let result = ClassificationResult {
            source_ref: ImageRef::new("/photos/shirt.jpg"),
            category: ClothingCategory::Top,
            label: "White shirt".into(),
            color: "white".into(),
        };
        let item = WardrobeItem::from_classification(&result);
        assert_eq!(item.image_uri, "/photos/shirt.jpg");
        assert_eq!(item.category, ClothingCategory::Top);
        assert_eq!(item.label, "White shirt");
        assert!(uuid::Uuid::parse_str(&item.id).is_ok());
        assert!(chrono::DateTime::parse_from_rfc3339(&item.added_at).is_ok());

        let other = WardrobeItem::from_classification(&result);
        assert_ne!(item.id, other.id);
    }
}
