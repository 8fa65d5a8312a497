//! Shared error type and retry policy for third-party HTTP calls

use backon::{ExponentialBuilder, Retryable};
use reqwest::{Response, StatusCode};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid {0} API key")]
    Unauthorized(&'static str),

    #[error("Rate limit exceeded")]
    RateLimited(&'static str),

    #[error("{service} returned {status}: {body}")]
    Status {
        service: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("Unexpected {service} response: {message}")]
    Malformed {
        service: &'static str,
        message: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Solana RPC error: {0}")]
    Rpc(#[from] solana_client::client_error::ClientError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl UpstreamError {
    /// Whether retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::RateLimited(_) => true,
            Self::Status { status, .. } => status.is_server_error(),
            _ => false,
        }
    }
}

/// Map the response status to an error, or decode the JSON body
pub async fn read_json(service: &'static str, response: Response) -> Result<Value, UpstreamError> {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED {
        return Err(UpstreamError::Unauthorized(service));
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(UpstreamError::RateLimited(service));
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(UpstreamError::Status { service, status, body });
    }

    Ok(response.json::<Value>().await?)
}

/// Run `request` with exponential backoff on transient failures
pub async fn with_retry<F, Fut, T>(
    service: &'static str,
    max_times: usize,
    request: F,
) -> Result<T, UpstreamError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, UpstreamError>>,
{
    request
        .retry(
            ExponentialBuilder::default()
                .with_min_delay(Duration::from_millis(200))
                .with_max_times(max_times),
        )
        .when(UpstreamError::is_transient)
        .notify(|err: &UpstreamError, dur: Duration| {
            warn!("{} request failed, retrying in {:?}: {}", service, dur, err);
        })
        .await
}
