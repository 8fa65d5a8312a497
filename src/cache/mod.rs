pub mod keys;
pub mod session;

pub use keys::SessionId;
pub use session::{SessionCacheManager, SharedSession};

use crate::config::Config;

pub fn init_session_cache(config: &Config) -> SessionCacheManager {
    SessionCacheManager::new(config.session_max_capacity, config.session_ttl)
}
