// Configuration for:
// - Server listening address/port
// - Upstream API keys and base URLs (Gemini, Birdeye, Helius, Solana RPC)
// - Outbound HTTP timeout, retry and rate limit settings
// - Chat session cache settings (size, idle TTL)

use dotenv::dotenv;
use std::env;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Token whose overview, metadata and market data the dashboard tracks
pub const DEFAULT_TRACKED_TOKEN: &str = "FwVFweNUdUbfJUKAzreyTYVQoeW6LyqaPcLcn3tzY1ZS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingVariables(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: String,
    pub server_host: String,
    pub server_port: u16,
    pub google_api_key: String,
    pub birdeye_api_key: String,
    pub helius_api_key: String,
    pub gemini_model: String,
    pub gemini_api_url: String,
    pub birdeye_api_url: String,
    pub helius_api_url: String,
    pub solana_rpc_url: String,
    pub solana_commitment_level: String,
    pub tracked_token: String,
    pub http_timeout: Duration,
    pub birdeye_rate_limit: Option<u32>,
    pub retry_max_times: usize,
    pub session_ttl: Duration,
    pub session_max_capacity: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let environment = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("PORT")
            .unwrap_or_else(|_| "3003".to_string())
            .parse()
            .unwrap_or(3003);

        let mut missing = Vec::new();
        let mut api_key = |name: &str| match env::var(name) {
            Ok(value) if !value.trim().is_empty() => value,
            _ => {
                missing.push(name.to_string());
                String::new()
            }
        };
        let google_api_key = api_key("GOOGLE_API_KEY");
        let birdeye_api_key = api_key("BIRDEYE_API_KEY");
        let helius_api_key = api_key("HELIUS_API_KEY");

        if !missing.is_empty() {
            if environment == "production" {
                return Err(ConfigError::MissingVariables(missing));
            }
            warn!("Missing API keys, related endpoints will fail: {}", missing.join(", "));
        }

        let gemini_model = env::var("GEMINI_MODEL")
            .unwrap_or_else(|_| "gemini-2.0-flash-exp".to_string());
        let gemini_api_url = env::var("GEMINI_API_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string());
        let birdeye_api_url = env::var("BIRDEYE_API_URL")
            .unwrap_or_else(|_| "https://public-api.birdeye.so".to_string());
        let helius_api_url = env::var("HELIUS_API_URL")
            .unwrap_or_else(|_| "https://api.helius.xyz".to_string());
        let solana_rpc_url = env::var("SOLANA_RPC_URL")
            .unwrap_or_else(|_| "https://api.mainnet-beta.solana.com".to_string());
        let solana_commitment_level = env::var("SOLANA_COMMITMENT_LEVEL")
            .unwrap_or_else(|_| "confirmed".to_string());
        let tracked_token = env::var("TRACKED_TOKEN")
            .unwrap_or_else(|_| DEFAULT_TRACKED_TOKEN.to_string());
        let http_timeout = env::var("HTTP_TIMEOUT_SECS")
            .map(|v| v.parse().unwrap_or(10))
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(10));
        let birdeye_rate_limit = env::var("BIRDEYE_RATE_LIMIT")
            .map(|v| v.parse().ok())
            .unwrap_or(None);
        let retry_max_times = env::var("RETRY_MAX_TIMES")
            .map(|v| v.parse().unwrap_or(3))
            .unwrap_or(3);
        let session_ttl = env::var("SESSION_TTL_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(3600));
        let session_max_capacity = env::var("SESSION_MAX_CAPACITY")
            .unwrap_or_else(|_| "1000".to_string())
            .parse()
            .unwrap_or(1000);

        Ok(Self {
            environment,
            server_host,
            server_port,
            google_api_key,
            birdeye_api_key,
            helius_api_key,
            gemini_model,
            gemini_api_url,
            birdeye_api_url,
            helius_api_url,
            solana_rpc_url,
            solana_commitment_level,
            tracked_token,
            http_timeout,
            birdeye_rate_limit,
            retry_max_times,
            session_ttl,
            session_max_capacity,
        })
    }
}
