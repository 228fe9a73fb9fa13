use std::sync::Arc;
use std::time::Duration;

use mk_mirror::{Base64PayloadDecoder, MirrorError, PayloadDecoder};
use mk_resilience::RetryPolicy;
use tokio::sync::RwLock;

use crate::config::{ClientConfig, NetworkTarget, ProviderConfig};

/// Per-request timeout of the HTTP transport.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Read-only client for the mirror node REST API.
///
/// Cloning is cheap and clones share their configuration.
#[derive(Clone)]
pub struct MirrorNodeClient {
    pub(crate) http: reqwest::Client,
    config: Arc<RwLock<Arc<ClientConfig>>>,
    pub(crate) decoder: Arc<dyn PayloadDecoder>,
}

impl std::fmt::Debug for MirrorNodeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MirrorNodeClient").field("decoder", &self.decoder).finish_non_exhaustive()
    }
}

impl MirrorNodeClient {
    pub fn new(config: ClientConfig) -> Result<Self, MirrorError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build().map_err(MirrorError::HttpClient)?;
        Ok(Self::with_http_client(config, http))
    }

    /// Uses a caller-provided transport. Timeouts are whatever that client was built with.
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            config: Arc::new(RwLock::new(Arc::new(config))),
            decoder: Arc::new(Base64PayloadDecoder),
        }
    }

    pub fn for_network(network: NetworkTarget) -> Result<Self, MirrorError> {
        Self::new(ClientConfig::new(network))
    }

    pub fn mainnet() -> Result<Self, MirrorError> {
        Self::for_network(NetworkTarget::Mainnet)
    }

    pub fn testnet() -> Result<Self, MirrorError> {
        Self::for_network(NetworkTarget::Testnet)
    }

    pub fn with_decoder(mut self, decoder: Arc<dyn PayloadDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    /// Snapshot of the current configuration. A request keeps using the snapshot it started with.
    pub async fn config(&self) -> Arc<ClientConfig> {
        Arc::clone(&*self.config.read().await)
    }

    /// Replaces the whole configuration. Requests already in flight keep their snapshot.
    pub async fn reconfigure(&self, config: ClientConfig) {
        let config = Arc::new(config);
        tracing::info!(network = %config.network, base_url = config.base_url(), "Mirror node client reconfigured");
        *self.config.write().await = config;
    }

    pub async fn configure_provider(&self, provider: ProviderConfig) {
        let mut guard = self.config.write().await;
        let config = ClientConfig { provider, ..ClientConfig::clone(&guard) };
        tracing::info!(base_url = config.base_url(), "Mirror node provider reconfigured");
        *guard = Arc::new(config);
    }

    pub async fn configure_retry(&self, retry: RetryPolicy) {
        let mut guard = self.config.write().await;
        tracing::info!(
            max_attempts = retry.max_attempts(),
            initial_delay = ?retry.initial_delay(),
            max_delay = ?retry.max_delay(),
            "Mirror node retry policy reconfigured"
        );
        *guard = Arc::new(ClientConfig { retry, ..ClientConfig::clone(&guard) });
    }
}
