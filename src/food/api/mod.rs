pub mod fatsecret;
pub mod local;

// Re-export common types
pub use fatsecret::{FatSecretClient, FoodDetail, FoodSearchResult, ServingRecord, DEFAULT_MAX_RESULTS};
pub use local::FoodItem;
