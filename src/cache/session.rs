//! Chat session cache implementation using Moka

use std::sync::Arc;
use std::time::Duration;
use moka::future::Cache;
use moka::notification::RemovalCause;
use tokio::sync::Mutex;
use super::keys::SessionId;
use crate::search::ChatSession;
use tracing::{debug, info};

pub type SharedSession = Arc<Mutex<ChatSession>>;

/// Keyed store of live chat sessions.
///
/// Entries are dropped after `idle_ttl` without access or when the store
/// exceeds `capacity` (least recently used first).
#[derive(Clone)]
pub struct SessionCacheManager {
    cache: Cache<SessionId, SharedSession>,
}

impl SessionCacheManager {
    /// Create a new session cache manager
    pub fn new(capacity: u64, idle_ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_idle(idle_ttl)
            .eviction_listener(|id: Arc<SessionId>, _session, cause: RemovalCause| {
                if cause.was_evicted() {
                    info!("Evicted chat session {} ({:?})", id, cause);
                }
            })
            .build();

        Self { cache }
    }

    /// Store a session under its own id
    pub async fn insert(&self, session: ChatSession) -> SessionId {
        let id = session.id.clone();
        self.cache
            .insert(id.clone(), Arc::new(Mutex::new(session)))
            .await;
        debug!("Cached chat session {}", id);
        id
    }

    /// Look up a live session
    pub async fn get(&self, id: &SessionId) -> Option<SharedSession> {
        let result = self.cache.get(id).await;
        if result.is_none() {
            debug!("Chat session not found: {}", id);
        }
        result
    }

    /// Drop every session, used on shutdown
    pub async fn clear(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        info!("Cleared all chat sessions");
    }

    /// Number of live sessions after pending evictions are applied
    pub async fn session_count(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}
