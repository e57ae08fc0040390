use crate::error::AppError;
use crate::models::wardrobe_types::{ClothingCategory, WardrobeItem};
use crate::services::wardrobe_service::WardrobeStore;
use clap::Args;

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Only show one category (top, bottom, shoes, accessory, outerwear)
    #[arg(short, long)]
    pub category: Option<ClothingCategory>,

    /// Print items as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RemoveArgs {
    /// Id of the item to remove
    pub id: String,
}

pub fn list_items(store: &WardrobeStore, category: Option<ClothingCategory>) -> Result<Vec<WardrobeItem>, AppError> {
    match category {
        Some(category) => store.items_by_category(category),
        None => store.items(),
    }
}

pub fn list(args: &ListArgs, store: &WardrobeStore) -> Result<(), AppError> {
    let items = list_items(store, args.category)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if items.is_empty() {
        println!("Your wardrobe is empty");
        return Ok(());
    }

    for item in &items {
        println!(
            "{}  {:<10} {} ({})  {}",
            item.id, item.category, item.label, item.color, item.image_uri
        );
    }
    Ok(())
}

pub fn remove(args: &RemoveArgs, store: &WardrobeStore) -> Result<(), AppError> {
    if !store.remove_item(&args.id)? {
        return Err(format!("No wardrobe item with id {}", args.id).into());
    }
    println!("Removed {}", args.id);
    Ok(())
}

pub fn counts(store: &WardrobeStore) -> Result<(), AppError> {
    let counts = store.category_counts()?;
    println!("all: {}", store.total_items()?);
    for category in ClothingCategory::ALL {
        println!("{}: {}", category, counts.get(category.as_str()).copied().unwrap_or(0));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::wardrobe_types::{ClassificationResult, ImageRef};
    use crate::services::db::Database;

    fn seeded_store() -> WardrobeStore {
        let store = WardrobeStore::new(Database::in_memory().unwrap());
        let shoes = ClassificationResult {
            source_ref: ImageRef::new("boots.jpg"),
            category: ClothingCategory::Shoes,
            label: "Chelsea boots".into(),
            color: "brown".into(),
        };
        let coat = ClassificationResult {
            source_ref: ImageRef::new("coat.jpg"),
            category: ClothingCategory::Outerwear,
            label: "Trench coat".into(),
            color: "beige".into(),
        };
        store
            .add_items(vec![
                WardrobeItem::from_classification(&shoes),
                WardrobeItem::from_classification(&coat),
            ])
            .unwrap();
        store
    }

    #[test]
    fn list_items_filters_by_category() {
        let store = seeded_store();
        assert_eq!(list_items(&store, None).unwrap().len(), 2);
        let shoes = list_items(&store, Some(ClothingCategory::Shoes)).unwrap();
        assert_eq!(shoes.len(), 1);
        assert_eq!(shoes[0].label, "Chelsea boots");
    }

    #[test]
    fn removing_unknown_id_is_an_error() {
        let store = seeded_store();
        let err = remove(&RemoveArgs { id: "missing".into() }, &store).unwrap_err();
        assert!(err.message.contains("No wardrobe item"));
    }
}
