use crate::blockchain::{BirdeyeClient, HeliusClient, SolanaClient};
use crate::cache::{self, SessionCacheManager};
use crate::config::Config;
use crate::search::GeminiClient;

pub struct AppState {
    pub config: Config,
    pub sessions: SessionCacheManager,
    pub gemini: GeminiClient,
    pub birdeye: BirdeyeClient,
    pub helius: HeliusClient,
    pub solana: SolanaClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            sessions: cache::init_session_cache(&config),
            gemini: GeminiClient::new(&config, http.clone()),
            birdeye: BirdeyeClient::new(&config, http.clone()),
            helius: HeliusClient::new(&config, http),
            solana: SolanaClient::new(&config),
            config,
        })
    }
}
