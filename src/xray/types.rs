//! Enriched (provider) and normalized (Proton) transaction types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Source tag used when the provider did not report one
pub const DEFAULT_SOURCE: &str = "SYSTEM_PROGRAM";

/// Placeholder for addresses the provider omitted
pub const UNKNOWN_ADDRESS: &str = "unknown";

/// One token movement reported by the indexing provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTransfer {
    #[serde(default)]
    pub from_user_account: Option<String>,
    #[serde(default)]
    pub to_user_account: Option<String>,
    #[serde(default)]
    pub token_amount: Option<Number>,
    #[serde(default)]
    pub mint: Option<String>,
}

/// One native (lamport) movement reported by the indexing provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeTransfer {
    #[serde(default)]
    pub from_user_account: Option<String>,
    #[serde(default)]
    pub to_user_account: Option<String>,
    #[serde(default)]
    pub amount: Option<Number>,
}

/// Provider-specific enriched transaction record.
///
/// Only the fields the normalizer reads are typed; everything else the
/// provider sends is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedTransaction {
    #[serde(default)]
    pub signature: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub fee: Option<Number>,
    #[serde(default)]
    pub timestamp: Option<Number>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub token_transfers: Option<Vec<TokenTransfer>>,
    #[serde(default)]
    pub native_transfers: Option<Vec<NativeTransfer>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Transaction types known to the normalized vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProtonType {
    Burn,
    NftSale,
    NftMint,
    Swap,
    Transfer,
    Unknown,
    TokenMint,
    StakeSol,
    StakeToken,
}

impl ProtonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Burn => "BURN",
            Self::NftSale => "NFT_SALE",
            Self::NftMint => "NFT_MINT",
            Self::Swap => "SWAP",
            Self::Transfer => "TRANSFER",
            Self::Unknown => "UNKNOWN",
            Self::TokenMint => "TOKEN_MINT",
            Self::StakeSol => "STAKE_SOL",
            Self::StakeToken => "STAKE_TOKEN",
        }
    }

    pub fn from_provider(value: &str) -> Option<Self> {
        match value {
            "BURN" => Some(Self::Burn),
            "NFT_SALE" => Some(Self::NftSale),
            "NFT_MINT" => Some(Self::NftMint),
            "SWAP" => Some(Self::Swap),
            "TRANSFER" => Some(Self::Transfer),
            "UNKNOWN" => Some(Self::Unknown),
            "TOKEN_MINT" => Some(Self::TokenMint),
            "STAKE_SOL" => Some(Self::StakeSol),
            "STAKE_TOKEN" => Some(Self::StakeToken),
            _ => None,
        }
    }
}

/// Semantic effect of a single action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Sent,
    Received,
    Transfer,
    Swap,
    Unknown,
    NftSale,
    NftMint,
    Burn,
    TokenMint,
    StakeSol,
    StakeToken,
}

/// How the provider's `type` string is dispatched.
///
/// `Unhandled` covers vocabulary entries that have no parser yet, so the gap
/// between declared and handled types stays visible here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionKind {
    Transfer,
    Swap,
    NftSale,
    Unhandled(ProtonType),
    Unclassified(String),
}

impl TransactionKind {
    pub fn from_provider(kind: Option<&str>) -> Self {
        match kind.map(ProtonType::from_provider) {
            Some(Some(ProtonType::Transfer)) => Self::Transfer,
            Some(Some(ProtonType::Swap)) => Self::Swap,
            Some(Some(ProtonType::NftSale)) => Self::NftSale,
            Some(Some(other)) => Self::Unhandled(other),
            Some(None) => Self::Unclassified(kind.unwrap_or_default().to_string()),
            None => Self::Unclassified(String::new()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtonAction {
    pub action_type: ActionType,
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
    /// Provider units, left out when the provider reported none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Number>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtonAccountChange {
    pub mint: String,
    pub amount: Number,
}

/// Per-account balance rollup. Declared but not populated by any parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtonAccount {
    pub account: String,
    pub changes: Vec<ProtonAccountChange>,
}

/// Normalized transaction record returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtonTransaction {
    #[serde(rename = "type")]
    pub kind: ProtonType,
    pub primary_user: String,
    pub fee: Number,
    pub signature: String,
    pub timestamp: Number,
    pub source: String,
    pub actions: Vec<ProtonAction>,
    pub accounts: Vec<ProtonAccount>,
    pub raw: Value,
}

impl ProtonTransaction {
    /// The "unknown transaction" template with the always-copied fields filled in
    pub fn unknown(signature: String, timestamp: Number, primary_user: String, raw: Value) -> Self {
        Self {
            kind: ProtonType::Unknown,
            primary_user,
            fee: Number::from(0),
            signature,
            timestamp,
            source: DEFAULT_SOURCE.to_string(),
            actions: Vec::new(),
            accounts: Vec::new(),
            raw,
        }
    }
}
