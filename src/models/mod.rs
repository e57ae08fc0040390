pub mod classify_types;
pub mod outfit_types;
pub mod profile_types;
pub mod wardrobe_types;
