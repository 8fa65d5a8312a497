use crate::config::Config;
use crate::upstream::{read_json, with_retry, UpstreamError};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::{debug, info};

const SERVICE: &str = "Birdeye";

/// Search result entry that carries at least an address, symbol and name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirdeyeToken {
    pub symbol: String,
    pub name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_24h_usd: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

impl BirdeyeToken {
    /// Accepts any object whose address, symbol and name are strings
    pub fn from_value(value: &Value) -> Option<Self> {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        let number = |key: &str| value.get(key).and_then(Value::as_f64);

        Some(Self {
            symbol: text("symbol")?,
            name: text("name")?,
            address: text("address")?,
            market_cap: number("market_cap"),
            price: number("price"),
            volume_24h_usd: number("volume_24h_usd"),
            logo_uri: text("logo_uri"),
            verified: value.get("verified").and_then(Value::as_bool),
        })
    }
}

/// Pull the validated token list out of a `/defi/v3/search` response
pub fn tokens_from_search(data: &Value) -> Vec<BirdeyeToken> {
    data.pointer("/data/items/0/result")
        .and_then(Value::as_array)
        .map(|results| results.iter().filter_map(BirdeyeToken::from_value).collect())
        .unwrap_or_default()
}

/// Birdeye public API client
#[derive(Clone)]
pub struct BirdeyeClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    tracked_token: String,
    retry_max_times: usize,
    limiter: Option<Arc<DefaultDirectRateLimiter>>,
}

impl BirdeyeClient {
    pub fn new(config: &Config, http: reqwest::Client) -> Self {
        let limiter = config
            .birdeye_rate_limit
            .and_then(NonZeroU32::new)
            .map(|per_second| Arc::new(RateLimiter::direct(Quota::per_second(per_second))));

        if let Some(limit) = config.birdeye_rate_limit {
            info!("Birdeye requests limited to {} per second", limit);
        }

        Self {
            http,
            base_url: config.birdeye_api_url.trim_end_matches('/').to_string(),
            api_key: config.birdeye_api_key.clone(),
            tracked_token: config.tracked_token.clone(),
            retry_max_times: config.retry_max_times,
            limiter,
        }
    }

    pub fn tracked_token(&self) -> &str {
        &self.tracked_token
    }

    pub async fn search_tokens(&self, query: &str) -> Result<Vec<BirdeyeToken>, UpstreamError> {
        let data = self
            .get(
                "/defi/v3/search",
                &[
                    ("chain", "solana"),
                    ("target", "token"),
                    ("search", query),
                    ("sort_by", "volume_24h_usd"),
                    ("sort_type", "desc"),
                    ("offset", "0"),
                    ("limit", "20"),
                ],
            )
            .await?;

        let tokens = tokens_from_search(&data);
        debug!("Birdeye token search for {:?} returned {} tokens", query, tokens.len());
        Ok(tokens)
    }

    pub async fn token_overview(&self) -> Result<Value, UpstreamError> {
        self.get("/defi/token_overview", &[("address", self.tracked_token())])
            .await
    }

    pub async fn token_metadata(&self) -> Result<Value, UpstreamError> {
        self.get("/defi/v3/token/meta-data/single", &[("address", self.tracked_token())])
            .await
    }

    pub async fn token_market_data(&self) -> Result<Value, UpstreamError> {
        self.get("/defi/v3/token/market-data", &[("address", self.tracked_token())])
            .await
    }

    pub async fn wallet_balance(&self, wallet: &str) -> Result<Value, UpstreamError> {
        self.get(
            "/v1/wallet/token_balance",
            &[("wallet", wallet), ("token_address", self.tracked_token())],
        )
        .await
    }

    pub async fn wallet_transactions(&self, wallet: &str) -> Result<Value, UpstreamError> {
        self.get("/v1/wallet/tx_list", &[("wallet", wallet), ("limit", "100")])
            .await
    }

    async fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value, UpstreamError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let url = url.as_str();

        with_retry(SERVICE, self.retry_max_times, || async move {
            if let Some(limiter) = &self.limiter {
                limiter.until_ready().await;
            }

            let response = self
                .http
                .get(url)
                .header("X-API-KEY", &self.api_key)
                .header("x-chain", "solana")
                .query(params)
                .send()
                .await?;
            read_json(SERVICE, response).await
        })
        .await
    }
}
