use super::gemini::{Content, GeminiClient, GenerateContentResponse};
use crate::cache::SessionId;
use crate::upstream::UpstreamError;
use chrono::{DateTime, Utc};

/// Multi-turn conversation with the search model
#[derive(Debug, Clone)]
pub struct ChatSession {
    pub id: SessionId,
    pub created_at: DateTime<Utc>,
    pub history: Vec<Content>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            id: SessionId::generate(),
            created_at: Utc::now(),
            history: Vec::new(),
        }
    }

    /// Send a user message and record the model's reply.
    ///
    /// On failure the user turn is dropped again so the history never ends
    /// with an unanswered message.
    pub async fn send(
        &mut self,
        client: &GeminiClient,
        text: &str,
    ) -> Result<GenerateContentResponse, UpstreamError> {
        self.history.push(Content::user(text));

        let response = match client.generate(&self.history).await {
            Ok(response) => response,
            Err(e) => {
                self.history.pop();
                return Err(e);
            }
        };

        let Some(reply) = response.content() else {
            self.history.pop();
            return Err(UpstreamError::Malformed {
                service: "Gemini",
                message: "response has no candidates".to_string(),
            });
        };

        let mut reply = reply.clone();
        reply.role = "model".to_string();
        self.history.push(reply);

        Ok(response)
    }

    pub fn turns(&self) -> usize {
        self.history.len()
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
