use crate::{
    api::{error::ApiError, route::SearchQuery},
    blockchain::{self, LookupResult},
    search::{self, SearchResponse},
    state::AppState,
    validation::require_param,
};
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

// POST /api/solana/address body
#[derive(Deserialize)]
pub struct AddressRequest {
    address: Option<String>,
}

// GET /api/solana/search handler
pub async fn solana_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = require_param("q", params.q.as_deref())?;
    info!("Processing Solana search for {:?}", query);

    let response = search::solana_search(&state, query)
        .await
        .map_err(ApiError::upstream(
            "An error occurred while searching the Solana blockchain",
        ))?;

    Ok(Json(response))
}

// POST /api/solana/address handler
pub async fn address_lookup(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AddressRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = payload?;
    let address = require_param("address", body.address.as_deref())
        .map_err(|_| ApiError::BadRequest("Address is required".to_string()))?;

    let record = state
        .helius
        .lookup_address(address)
        .await
        .map_err(ApiError::upstream("Failed to fetch address data"))?;

    Ok(Json(record))
}

// GET /api/solana/lookup handler
pub async fn lookup(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<LookupResult>>, ApiError> {
    let query = require_param("q", params.q.as_deref())?;
    let results = blockchain::lookup(&state.solana, &state.helius, query).await;
    Ok(Json(results))
}
