pub mod api;
pub mod blockchain;
pub mod cache;
pub mod config;
pub mod search;
pub mod state;
pub mod upstream;
pub mod validation;
pub mod xray;

#[cfg(test)]
mod tests;

// Re-export specific items for convenience
pub use api::{create_router, ApiError};
pub use config::Config;
pub use state::AppState;
pub use xray::{parse_transaction, ProtonTransaction};
