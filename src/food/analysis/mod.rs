pub mod nutrition;
pub mod search;
