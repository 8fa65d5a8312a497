pub mod birdeye;
pub mod error;
pub mod route;
pub mod solana;

pub use error::ApiError;
pub use route::create_router;
