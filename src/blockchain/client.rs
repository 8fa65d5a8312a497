use crate::config::Config;
use crate::upstream::UpstreamError;
use crate::xray::program_name;
use chrono::{DateTime, Utc};
use serde::Serialize;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::RpcTransactionConfig;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::native_token::LAMPORTS_PER_SOL;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_transaction_status::UiTransactionEncoding;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

/// On-chain account facts shown in lookups
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountSummary {
    pub lamports: u64,
    pub balance: f64,
    pub executable: bool,
    pub owner: String,
    pub owner_program: String,
}

/// On-chain transaction facts shown in lookups
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub slot: u64,
    pub block_time: Option<String>,
    pub fee: Option<u64>,
    pub status: String,
}

#[derive(Clone)]
pub struct SolanaClient {
    rpc_client: Arc<RpcClient>,
    commitment: CommitmentConfig,
}

impl SolanaClient {
    pub fn new(config: &Config) -> Self {
        let rpc_url = &config.solana_rpc_url;

        // Use commitment level from config or default to "confirmed"
        let commitment = match config.solana_commitment_level.as_str() {
            "processed" => CommitmentConfig::processed(),
            "confirmed" => CommitmentConfig::confirmed(),
            "finalized" => CommitmentConfig::finalized(),
            _ => CommitmentConfig::confirmed(),
        };

        info!("Initializing Solana client with RPC endpoint: {}, commitment: {:?}", rpc_url, commitment);

        let rpc_client = RpcClient::new_with_timeout_and_commitment(
            rpc_url.clone(),
            config.http_timeout,
            commitment,
        );

        Self {
            rpc_client: Arc::new(rpc_client),
            commitment,
        }
    }

    /// Account info for an address, `None` if the account does not exist
    pub async fn get_account(&self, address: &str) -> Result<Option<AccountSummary>, UpstreamError> {
        let pubkey = Pubkey::from_str(address)
            .map_err(|_| UpstreamError::InvalidInput(format!("invalid public key: {}", address)))?;

        let response = self
            .rpc_client
            .get_account_with_commitment(&pubkey, self.commitment)
            .await?;

        let summary = response.value.map(|account| {
            let owner = account.owner.to_string();
            AccountSummary {
                lamports: account.lamports,
                balance: account.lamports as f64 / LAMPORTS_PER_SOL as f64,
                executable: account.executable,
                owner_program: program_name(&owner),
                owner,
            }
        });

        debug!("Fetched account {}: exists = {}", address, summary.is_some());
        Ok(summary)
    }

    /// Status of a confirmed transaction
    pub async fn get_transaction(&self, signature_str: &str) -> Result<TransactionSummary, UpstreamError> {
        let signature = Signature::from_str(signature_str)
            .map_err(|_| UpstreamError::InvalidInput(format!("invalid signature: {}", signature_str)))?;

        let config = RpcTransactionConfig {
            encoding: Some(UiTransactionEncoding::Json),
            commitment: Some(self.commitment),
            max_supported_transaction_version: Some(0),
        };

        let tx = self
            .rpc_client
            .get_transaction_with_config(&signature, config)
            .await?;
        let meta = tx.transaction.meta.as_ref();

        Ok(TransactionSummary {
            slot: tx.slot,
            block_time: tx
                .block_time
                .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
                .map(|time| time.to_rfc3339()),
            fee: meta.map(|m| m.fee),
            status: match meta.and_then(|m| m.err.as_ref()) {
                Some(_) => "Failed".to_string(),
                None => "Success".to_string(),
            },
        })
    }
}
