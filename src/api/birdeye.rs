use crate::{
    api::{error::ApiError, route::SearchQuery},
    blockchain::BirdeyeToken,
    state::AppState,
    validation::{require_param, validate_solana_address},
    xray::attach_parsed,
};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/token/search", get(token_search))
        .route("/token/overview", get(token_overview))
        .route("/token/metadata", get(token_metadata))
        .route("/token/market", get(token_market))
        .route("/wallet/balance/{wallet}", get(wallet_balance))
        .route("/wallet/transactions/{wallet}", get(wallet_transactions))
}

// GET /api/birdeye/token/search handler
async fn token_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<BirdeyeToken>>, ApiError> {
    let query = require_param("q", params.q.as_deref())
        .map_err(|_| ApiError::BadRequest("Search query is required".to_string()))?;

    let tokens = state
        .birdeye
        .search_tokens(query)
        .await
        .map_err(ApiError::upstream("Failed to search tokens"))?;

    Ok(Json(tokens))
}

// GET /api/birdeye/token/overview handler
async fn token_overview(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let data = state
        .birdeye
        .token_overview()
        .await
        .map_err(ApiError::upstream("Failed to fetch token overview"))?;

    Ok(Json(attach_parsed(data, None)))
}

// GET /api/birdeye/token/metadata handler
async fn token_metadata(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let data = state
        .birdeye
        .token_metadata()
        .await
        .map_err(ApiError::upstream("Failed to fetch token metadata"))?;

    Ok(Json(data))
}

// GET /api/birdeye/token/market handler
async fn token_market(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let data = state
        .birdeye
        .token_market_data()
        .await
        .map_err(ApiError::upstream("Failed to fetch market data"))?;

    Ok(Json(data))
}

// GET /api/birdeye/wallet/balance/{wallet} handler
async fn wallet_balance(
    State(state): State<Arc<AppState>>,
    Path(wallet): Path<String>,
) -> Result<Json<Value>, ApiError> {
    validate_solana_address(&wallet)?;

    let data = state
        .birdeye
        .wallet_balance(&wallet)
        .await
        .map_err(ApiError::upstream("Failed to fetch wallet balance"))?;

    Ok(Json(data))
}

// GET /api/birdeye/wallet/transactions/{wallet} handler
async fn wallet_transactions(
    State(state): State<Arc<AppState>>,
    Path(wallet): Path<String>,
) -> Result<Json<Value>, ApiError> {
    validate_solana_address(&wallet)?;
    info!("Fetching transaction history for wallet: {}", wallet);

    let data = state
        .birdeye
        .wallet_transactions(&wallet)
        .await
        .map_err(ApiError::upstream("Failed to fetch transaction history"))?;

    Ok(Json(attach_parsed(data, Some(&wallet))))
}
