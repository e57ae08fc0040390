pub mod classifier;
pub mod db;
pub mod fs_service;
pub mod outfit_service;
pub mod profile_service;
pub mod wardrobe_service;
