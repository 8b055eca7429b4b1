pub mod analysis;
pub mod api;
pub mod config;
pub mod error;

pub use analysis::nutrition::{parse_food_description, ParsedMacros};
pub use analysis::search::{FoodDetails, FoodSearchService, FoodSource, SearchOutcome, SearchedFood};
pub use api::FatSecretClient;
pub use config::FatSecretConfig;
pub use error::FoodApiError;
