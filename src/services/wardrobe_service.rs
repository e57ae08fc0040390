//! The user's wardrobe, persisted as one JSON array in the key-value store.

use crate::error::AppError;
use crate::models::wardrobe_types::{ClothingCategory, WardrobeItem};
use crate::services::db::Database;
use std::collections::BTreeMap;

const WARDROBE_KEY: &str = "wardrobe";

#[derive(Clone)]
pub struct WardrobeStore {
    db: Database,
}

impl WardrobeStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// All items, newest first.
    pub fn items(&self) -> Result<Vec<WardrobeItem>, AppError> {
        match self.db.get(WARDROBE_KEY)? {
            Some(stored) => serde_json::from_str(&stored).map_err(|e| AppError {
                message: format!("Corrupt wardrobe data: {}", e),
            }),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, items: &[WardrobeItem]) -> Result<(), AppError> {
        let json = serde_json::to_string(items)?;
        self.db.set(WARDROBE_KEY, &json)?;
        Ok(())
    }

    pub fn add_item(&self, item: WardrobeItem) -> Result<(), AppError> {
        self.add_items(vec![item])
    }

    /// Prepend `new_items`, keeping their relative order.
    pub fn add_items(&self, new_items: Vec<WardrobeItem>) -> Result<(), AppError> {
        if new_items.is_empty() {
            return Ok(());
        }
        let mut updated = new_items;
        updated.extend(self.items()?);
        self.save(&updated)
    }

    /// Returns `false` when no item has that id.
    pub fn remove_item(&self, id: &str) -> Result<bool, AppError> {
        let mut items = self.items()?;
        let before = items.len();
        items.retain(|i| i.id != id);
        if items.len() == before {
            return Ok(false);
        }
        self.save(&items)?;
        Ok(true)
    }

    pub fn items_by_category(&self, category: ClothingCategory) -> Result<Vec<WardrobeItem>, AppError> {
        Ok(self
            .items()?
            .into_iter()
            .filter(|i| i.category == category)
            .collect())
    }

    pub fn category_counts(&self) -> Result<BTreeMap<String, usize>, AppError> {
        let mut counts = BTreeMap::new();
        for item in self.items()? {
            *counts.entry(item.category.to_string()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    pub fn total_items(&self) -> Result<usize, AppError> {
        Ok(self.items()?.len())
    }
}
