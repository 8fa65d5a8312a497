//! Summaries for Solana address and token searches

use super::format::markdown_to_html;
use super::sources::Source;
use super::SearchResponse;
use crate::blockchain::BirdeyeToken;
use serde_json::Value;

const TOP_TOKENS: usize = 5;

/// Account summary from a Helius address record; absent or empty fields are
/// left out
pub fn account_response(address: &str, record: &Value) -> SearchResponse {
    let mut lines = vec!["**Solana Account Details**".to_string(), String::new()];

    let fields = [
        ("Type", "type", ""),
        ("Balance", "balance", " SOL"),
        ("Owner", "owner", ""),
        ("Collection", "collection", ""),
        ("Name", "name", ""),
    ];
    for (label, key, suffix) in fields {
        if let Some(value) = display_value(record.get(key)) {
            lines.push(format!("**{}**: {}{}", label, value, suffix));
        }
    }

    let title = record
        .get("type")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .unwrap_or("Solana Account");

    SearchResponse {
        session_id: None,
        summary: markdown_to_html(&lines.join("\n")),
        sources: vec![Source {
            title: title.to_string(),
            url: format!("https://xray.helius.xyz/account/{}", address),
            snippet: format!("Address: {}", address),
        }],
    }
}

/// Summary of the top token matches, `None` when there are none
pub fn token_response(query: &str, tokens: &[BirdeyeToken]) -> Option<SearchResponse> {
    if tokens.is_empty() {
        return None;
    }

    let top = &tokens[..tokens.len().min(TOP_TOKENS)];
    let mut sections = vec![format!("**Found {} tokens matching \"{}\"**", top.len(), query)];

    for token in top {
        sections.push(format!(
            "**{}**\n\n* Name: {}\n* Address: {}\n* Market Cap: ${}\n* Price: ${}\n* 24h Volume: ${}",
            or_default(&token.symbol, "Unknown Token"),
            or_default(&token.name, "N/A"),
            token.address,
            money(token.market_cap),
            money(token.price),
            money(token.volume_24h_usd),
        ));
    }

    let sources = top
        .iter()
        .map(|token| Source {
            title: or_default(&token.symbol, "Unknown Token").to_string(),
            url: format!("https://birdeye.so/token/{}?chain=solana", token.address),
            snippet: format!(
                "{} - Price: ${} - 24h Volume: ${}",
                or_default(&token.name, "Unknown"),
                money(token.price),
                money(token.volume_24h_usd),
            ),
        })
        .collect();

    Some(SearchResponse {
        session_id: None,
        summary: markdown_to_html(&sections.join("\n\n")),
        sources,
    })
}

pub fn no_results_response(query: &str) -> SearchResponse {
    SearchResponse {
        session_id: None,
        summary: format!("No results found for \"{}\" on the Solana blockchain.", query),
        sources: Vec::new(),
    }
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}

fn display_value(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

fn money(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 && v.is_finite() => group_thousands(v),
        _ => "N/A".to_string(),
    }
}

/// en-US style grouping with at most three fraction digits
pub fn group_thousands(value: f64) -> String {
    let formatted = format!("{:.3}", value.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::new();
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && formatted != "0.000" { "-" } else { "" };
    if fraction.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, fraction)
    }
}
