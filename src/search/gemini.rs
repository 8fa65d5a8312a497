//! Gemini `generateContent` client with Google Search grounding

use crate::config::Config;
use crate::upstream::{read_json, with_retry, UpstreamError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

const SERVICE: &str = "Gemini";

const TEMPERATURE: f32 = 0.9;
const TOP_P: f32 = 1.0;
const TOP_K: u32 = 1;
const MAX_OUTPUT_TOKENS: u32 = 2048;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

/// One conversation turn, `role` is "user" or "model"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: &str) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part { text: text.to_string() }],
        }
    }

    pub fn text(&self) -> String {
        self.parts.iter().map(|p| p.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSource {
    pub uri: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingChunk {
    pub web: Option<WebSource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSegment {
    #[serde(default)]
    pub start_index: usize,
    #[serde(default)]
    pub end_index: usize,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingSupport {
    pub segment: TextSegment,
    #[serde(default)]
    pub grounding_chunk_indices: Vec<usize>,
    #[serde(default)]
    pub confidence_scores: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
    #[serde(default)]
    pub grounding_supports: Vec<GroundingSupport>,
    #[serde(default)]
    pub web_search_queries: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Content of the first candidate, if the model produced one
    pub fn content(&self) -> Option<&Content> {
        self.candidates.first().and_then(|c| c.content.as_ref())
    }

    pub fn grounding_metadata(&self) -> Option<&GroundingMetadata> {
        self.candidates.first().and_then(|c| c.grounding_metadata.as_ref())
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    retry_max_times: usize,
}

impl GeminiClient {
    pub fn new(config: &Config, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: config.gemini_api_url.trim_end_matches('/').to_string(),
            api_key: config.google_api_key.clone(),
            model: config.gemini_model.clone(),
            retry_max_times: config.retry_max_times,
        }
    }

    /// Generate the next model turn for the given conversation
    pub async fn generate(&self, history: &[Content]) -> Result<GenerateContentResponse, UpstreamError> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model);
        let url = url.as_str();
        let body = json!({
            "contents": history,
            "tools": [{ "google_search": {} }],
            "generationConfig": {
                "temperature": TEMPERATURE,
                "topP": TOP_P,
                "topK": TOP_K,
                "maxOutputTokens": MAX_OUTPUT_TOKENS,
            },
        });
        let body = &body;

        let data = with_retry(SERVICE, self.retry_max_times, || async move {
            let response = self
                .http
                .post(url)
                .query(&[("key", self.api_key.as_str())])
                .json(body)
                .send()
                .await?;
            read_json(SERVICE, response).await
        })
        .await?;

        debug!("Raw Gemini response: {}", data);
        Ok(serde_json::from_value(data)?)
    }
}
