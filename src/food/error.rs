use thiserror::Error;

/// Failures surfaced by the FatSecret client.
///
/// Messages are generic. The underlying cause is logged where the failure
/// happens and is not handed to callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FoodApiError {
    #[error("FatSecret API not configured")]
    Config,
    #[error("Failed to authenticate with FatSecret API")]
    Auth,
    #[error("Failed to search foods")]
    Search,
}
