pub mod birdeye;
pub mod client;
pub mod helius;
pub mod lookup;

// Re-exports for convenience
pub use birdeye::{BirdeyeClient, BirdeyeToken};
pub use client::SolanaClient;
pub use helius::HeliusClient;
pub use lookup::{lookup, LookupResult};
