pub mod api;
pub mod commands;
pub mod food;

// Re-export commonly used items
pub use food::{FatSecretClient, FatSecretConfig, FoodApiError, FoodSearchService};
