use crate::config::Config;
use crate::upstream::{read_json, with_retry, UpstreamError};
use serde_json::{json, Value};
use tracing::debug;

const SERVICE: &str = "Helius";

/// Helius REST API (address lookup and enriched transactions)
#[derive(Clone)]
pub struct HeliusClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    retry_max_times: usize,
}

impl HeliusClient {
    pub fn new(config: &Config, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: config.helius_api_url.trim_end_matches('/').to_string(),
            api_key: config.helius_api_key.clone(),
            retry_max_times: config.retry_max_times,
        }
    }

    /// Enriched record for one address, or an empty object when Helius has none
    pub async fn lookup_address(&self, address: &str) -> Result<Value, UpstreamError> {
        let body = json!({ "addresses": [address] });
        let data = self.post("/v0/addresses/", &body).await?;

        debug!("Helius address lookup for {} returned {} records", address, list_len(&data));
        Ok(first_or_empty(data))
    }

    /// Enriched transaction records for the given signatures
    pub async fn get_transactions(&self, signatures: &[&str]) -> Result<Vec<Value>, UpstreamError> {
        let body = json!({ "transactions": signatures });
        match self.post("/v0/transactions", &body).await? {
            Value::Array(items) => Ok(items),
            other => Err(UpstreamError::Malformed {
                service: SERVICE,
                message: format!("expected a transaction list, got {}", other),
            }),
        }
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);
        let url = url.as_str();

        with_retry(SERVICE, self.retry_max_times, || async move {
            let response = self
                .http
                .post(url)
                .query(&[("api-key", self.api_key.as_str())])
                .json(body)
                .send()
                .await?;
            read_json(SERVICE, response).await
        })
        .await
    }
}

fn list_len(data: &Value) -> usize {
    data.as_array().map(Vec::len).unwrap_or(0)
}

fn first_or_empty(data: Value) -> Value {
    match data {
        Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
        _ => json!({}),
    }
}
