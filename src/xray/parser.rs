//! Normalizes enriched provider transactions into Proton transactions

use serde::Deserialize;
use serde_json::{json, Number, Value};
use thiserror::Error;
use tracing::{debug, warn};

use super::types::{
    ActionType, EnrichedTransaction, ProtonAction, ProtonTransaction, ProtonType,
    TransactionKind, DEFAULT_SOURCE, UNKNOWN_ADDRESS,
};

#[derive(Error, Debug)]
pub enum ClassificationFault {
    #[error("Malformed transaction record: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Normalize one raw provider record.
///
/// Never fails: any classification fault is logged and the record degrades
/// to the UNKNOWN shape.
pub fn parse_transaction(raw: &Value, address: Option<&str>) -> ProtonTransaction {
    let primary_user = address.unwrap_or_default();

    match classify(raw, address) {
        Ok(parsed) => parsed,
        Err(fault) => {
            warn!("Error parsing transaction {}: {}", signature_hint(raw), fault);
            ProtonTransaction::unknown(
                signature_hint(raw).to_string(),
                timestamp_hint(raw),
                primary_user.to_string(),
                raw.clone(),
            )
        }
    }
}

/// Map every item of a provider list, keeping order
pub fn parse_transactions(items: &[Value], address: Option<&str>) -> Vec<ProtonTransaction> {
    items.iter().map(|raw| parse_transaction(raw, address)).collect()
}

/// Replace the `items` list of a provider response (top level or under
/// `data`) with `{raw, parsed}` pairs. Everything else passes through.
pub fn attach_parsed(mut body: Value, address: Option<&str>) -> Value {
    let items = if body.get("items").is_some() {
        body.get_mut("items")
    } else {
        body.get_mut("data").and_then(|data| data.get_mut("items"))
    };

    if let Some(Value::Array(items)) = items {
        let pairs = items
            .drain(..)
            .map(|raw| {
                let parsed = parse_transaction(&raw, address);
                json!({ "raw": raw, "parsed": parsed })
            })
            .collect();
        *items = pairs;
    }

    body
}

/// Decode a raw record, dispatch on its provider type and build the actions
/// for it. Fails only when the record does not have the enriched shape.
pub fn classify(raw: &Value, address: Option<&str>) -> Result<ProtonTransaction, ClassificationFault> {
    let tx = EnrichedTransaction::deserialize(raw)?;

    let parsed = match TransactionKind::from_provider(tx.kind.as_deref()) {
        TransactionKind::Transfer => parse_transfer(&tx, address, raw),
        TransactionKind::Swap => parse_swap(&tx, address, raw),
        TransactionKind::NftSale => parse_nft_sale(&tx, address, raw),
        TransactionKind::Unhandled(kind) => {
            debug!("No parser for {} transaction {}", kind.as_str(), tx.signature);
            parse_unknown(&tx, address, raw)
        }
        TransactionKind::Unclassified(kind) => {
            debug!("Unclassified transaction {} with type {:?}", tx.signature, kind);
            parse_unknown(&tx, address, raw)
        }
    };

    Ok(parsed)
}

fn base_transaction(
    tx: &EnrichedTransaction,
    kind: ProtonType,
    address: Option<&str>,
    raw: &Value,
) -> ProtonTransaction {
    ProtonTransaction {
        kind,
        primary_user: address.unwrap_or_default().to_string(),
        fee: tx.fee.clone().unwrap_or_else(zero),
        signature: tx.signature.clone(),
        timestamp: tx.timestamp.clone().unwrap_or_else(zero),
        source: tx.source.clone().unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
        actions: Vec::new(),
        accounts: Vec::new(),
        raw: raw.clone(),
    }
}

fn or_unknown(account: &Option<String>) -> String {
    account.clone().unwrap_or_else(|| UNKNOWN_ADDRESS.to_string())
}

fn is_address(account: &Option<String>, address: Option<&str>) -> bool {
    account.as_deref() == address
}

fn parse_transfer(
    tx: &EnrichedTransaction,
    address: Option<&str>,
    raw: &Value,
) -> ProtonTransaction {
    let mut result = base_transaction(tx, ProtonType::Transfer, address, raw);

    for transfer in tx.token_transfers.iter().flatten() {
        let action_type = if is_address(&transfer.from_user_account, address) {
            ActionType::Sent
        } else {
            ActionType::Received
        };

        result.actions.push(ProtonAction {
            action_type,
            from: or_unknown(&transfer.from_user_account),
            to: or_unknown(&transfer.to_user_account),
            sent: None,
            received: None,
            amount: transfer.token_amount.clone(),
        });
    }

    result
}

// Legs are matched independently, first match wins. Multi-leg swaps can pair
// unrelated legs; kept for compatibility with existing clients.
fn parse_swap(
    tx: &EnrichedTransaction,
    address: Option<&str>,
    raw: &Value,
) -> ProtonTransaction {
    let mut result = base_transaction(tx, ProtonType::Swap, address, raw);
    let transfers = tx.token_transfers.as_deref().unwrap_or_default();

    let sent = transfers
        .iter()
        .find(|t| is_address(&t.from_user_account, address));
    let received = transfers
        .iter()
        .find(|t| is_address(&t.to_user_account, address));

    if let (Some(sent), Some(received)) = (sent, received) {
        result.actions.push(ProtonAction {
            action_type: ActionType::Swap,
            from: or_unknown(&sent.from_user_account),
            to: or_unknown(&received.to_user_account),
            sent: sent.mint.clone(),
            received: received.mint.clone(),
            amount: sent.token_amount.clone(),
        });
    }

    result
}

fn parse_nft_sale(
    tx: &EnrichedTransaction,
    address: Option<&str>,
    raw: &Value,
) -> ProtonTransaction {
    let mut result = base_transaction(tx, ProtonType::NftSale, address, raw);

    for transfer in tx.native_transfers.iter().flatten() {
        result.actions.push(ProtonAction {
            action_type: ActionType::NftSale,
            from: or_unknown(&transfer.from_user_account),
            to: or_unknown(&transfer.to_user_account),
            sent: None,
            received: None,
            amount: transfer.amount.clone(),
        });
    }

    result
}

fn parse_unknown(tx: &EnrichedTransaction, address: Option<&str>, raw: &Value) -> ProtonTransaction {
    ProtonTransaction::unknown(
        tx.signature.clone(),
        tx.timestamp.clone().unwrap_or_else(zero),
        address.unwrap_or_default().to_string(),
        raw.clone(),
    )
}

fn zero() -> Number {
    Number::from(0)
}

fn signature_hint(raw: &Value) -> &str {
    raw.get("signature").and_then(Value::as_str).unwrap_or_default()
}

fn timestamp_hint(raw: &Value) -> Number {
    match raw.get("timestamp") {
        Some(Value::Number(timestamp)) => timestamp.clone(),
        _ => zero(),
    }
}
