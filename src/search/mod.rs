pub mod format;
pub mod gemini;
pub mod session;
pub mod solana;
pub mod sources;

pub use format::format_response;
pub use gemini::{GeminiClient, GenerateContentResponse};
pub use session::ChatSession;
pub use sources::{extract_sources, Source};

use crate::cache::SessionId;
use crate::state::AppState;
use crate::upstream::UpstreamError;
use crate::validation::validate_solana_address;
use serde::Serialize;
use tracing::{info, warn};

/// Answer returned by every search endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub summary: String,
    pub sources: Vec<Source>,
}

impl SearchResponse {
    fn from_model(response: &GenerateContentResponse, session_id: Option<String>) -> Self {
        let text = response.content().map(|c| c.text()).unwrap_or_default();
        Self {
            session_id,
            summary: format_response(&text),
            sources: extract_sources(response.grounding_metadata()),
        }
    }
}

/// Start a new chat for `query` and keep it for follow-ups
pub async fn start_search(state: &AppState, query: &str) -> Result<SearchResponse, UpstreamError> {
    let mut session = ChatSession::new();
    let response = session.send(&state.gemini, query).await?;

    let session_id = state.sessions.insert(session).await;
    info!("Started chat session {}", session_id);

    Ok(SearchResponse::from_model(&response, Some(session_id.as_str().to_string())))
}

/// Continue an existing chat; `Ok(None)` when the session is unknown or expired
pub async fn follow_up(
    state: &AppState,
    session_id: &SessionId,
    query: &str,
) -> Result<Option<SearchResponse>, UpstreamError> {
    let Some(session) = state.sessions.get(session_id).await else {
        return Ok(None);
    };

    let mut session = session.lock().await;
    let response = session.send(&state.gemini, query).await?;
    info!(
        "Follow-up on chat session {} ({} turns, started {})",
        session_id,
        session.turns(),
        session.created_at.to_rfc3339()
    );

    Ok(Some(SearchResponse::from_model(&response, None)))
}

/// Account summary when `query` is a known address, else matching tokens
pub async fn solana_search(state: &AppState, query: &str) -> Result<SearchResponse, UpstreamError> {
    if validate_solana_address(query).is_ok() {
        match state.helius.lookup_address(query).await {
            Ok(record) if record.as_object().is_some_and(|r| !r.is_empty()) => {
                return Ok(solana::account_response(query, &record));
            }
            Ok(_) => info!("No Helius record for {}, falling back to token search", query),
            Err(e) => warn!("Helius lookup for {} failed: {}", query, e),
        }
    }

    let tokens = state.birdeye.search_tokens(query).await?;
    Ok(solana::token_response(query, &tokens).unwrap_or_else(|| solana::no_results_response(query)))
}
