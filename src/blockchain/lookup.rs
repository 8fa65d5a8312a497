//! Combined Solana RPC + Helius lookup for an address or signature

use crate::blockchain::client::{AccountSummary, SolanaClient, TransactionSummary};
use crate::blockchain::helius::HeliusClient;
use crate::validation::{is_transaction_signature, validate_solana_address};
use crate::xray::parse_transactions;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupKind {
    Account,
    Transaction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupResult {
    #[serde(rename = "type")]
    pub kind: LookupKind,
    pub title: String,
    pub address: String,
    pub details: Map<String, Value>,
}

pub async fn lookup(solana: &SolanaClient, helius: &HeliusClient, query: &str) -> Vec<LookupResult> {
    let mut results = Vec::new();

    if validate_solana_address(query).is_ok() {
        let (account, enriched) = tokio::join!(solana.get_account(query), helius.lookup_address(query));
        let account = account
            .map_err(|e| warn!("Error fetching account {}: {}", query, e))
            .ok()
            .flatten();
        let enriched = enriched
            .map_err(|e| warn!("Error fetching Helius data for {}: {}", query, e))
            .ok();

        if let Some(result) = account_result(query, account, enriched) {
            results.push(result);
        }
    }

    if is_transaction_signature(query) {
        let signatures = [query];
        let (tx, enriched) = tokio::join!(solana.get_transaction(query), helius.get_transactions(&signatures));
        let tx = tx
            .map_err(|e| warn!("Error fetching transaction {}: {}", query, e))
            .ok();
        let enriched = enriched
            .map_err(|e| warn!("Error fetching Helius transaction {}: {}", query, e))
            .ok()
            .and_then(|items| items.into_iter().next());

        if let Some(result) = transaction_result(query, tx, enriched) {
            results.push(result);
        }
    }

    debug!("Lookup for {} produced {} results", query, results.len());
    results
}

/// Merge RPC account facts with Helius fields; Helius wins on conflicts
pub fn account_result(
    address: &str,
    account: Option<AccountSummary>,
    enriched: Option<Value>,
) -> Option<LookupResult> {
    let enriched = enriched.and_then(non_empty_object);
    if account.is_none() && enriched.is_none() {
        return None;
    }

    let mut details = Map::new();
    details.insert(
        "balance".to_string(),
        account.as_ref().map(|a| json!(a.balance)).unwrap_or(Value::Null),
    );
    details.insert(
        "executable".to_string(),
        json!(account.as_ref().map(|a| a.executable).unwrap_or(false)),
    );
    if let Some(account) = &account {
        details.insert("owner".to_string(), json!(account.owner));
        details.insert("ownerProgram".to_string(), json!(account.owner_program));
    }

    let title = enriched
        .as_ref()
        .and_then(|e| e.get("type"))
        .and_then(Value::as_str)
        .unwrap_or("Solana Account")
        .to_string();
    details.extend(enriched.unwrap_or_default());

    Some(LookupResult {
        kind: LookupKind::Account,
        title,
        address: address.to_string(),
        details,
    })
}

/// Merge RPC transaction status with the Helius enriched record and its
/// normalized form
pub fn transaction_result(
    signature: &str,
    tx: Option<TransactionSummary>,
    enriched: Option<Value>,
) -> Option<LookupResult> {
    if tx.is_none() && enriched.is_none() {
        return None;
    }

    let mut details = Map::new();
    details.insert(
        "blockTime".to_string(),
        json!(tx.as_ref().and_then(|t| t.block_time.clone())),
    );
    details.insert("fee".to_string(), json!(tx.as_ref().and_then(|t| t.fee)));
    details.insert(
        "status".to_string(),
        json!(tx.as_ref().map(|t| t.status.as_str()).unwrap_or("Unknown")),
    );

    let title = enriched
        .as_ref()
        .and_then(|e| e.get("type"))
        .and_then(Value::as_str)
        .unwrap_or("Transaction")
        .to_string();

    if let Some(enriched) = enriched {
        let parsed = parse_transactions(std::slice::from_ref(&enriched), None);
        details.insert("description".to_string(), enriched.get("description").cloned().unwrap_or(Value::Null));
        details.insert("type".to_string(), enriched.get("type").cloned().unwrap_or(Value::Null));
        details.insert("source".to_string(), enriched.get("source").cloned().unwrap_or(Value::Null));
        if let Value::Object(fields) = enriched {
            details.extend(fields);
        }
        details.insert("parsed".to_string(), json!(parsed.into_iter().next()));
    }

    Some(LookupResult {
        kind: LookupKind::Transaction,
        title,
        address: signature.to_string(),
        details,
    })
}

fn non_empty_object(value: Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(fields) if !fields.is_empty() => Some(fields),
        _ => None,
    }
}
