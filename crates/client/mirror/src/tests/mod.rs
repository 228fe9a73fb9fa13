use std::time::Duration;

use httpmock::MockServer;
use mk_resilience::RetryPolicy;

use crate::{ClientConfig, MirrorNodeClient, NetworkTarget, ProviderConfig};

mod retry_tests;

pub struct MirrorMock {
    pub server: MockServer,
}

impl MirrorMock {
    pub async fn start() -> Self {
        Self { server: MockServer::start_async().await }
    }

    pub fn provider(&self) -> ProviderConfig {
        ProviderConfig::default().with_custom_url(self.server.base_url())
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(NetworkTarget::Mainnet).with_provider(self.provider()).with_retry(fast_retry(3))
    }

    pub fn client(&self) -> MirrorNodeClient {
        MirrorNodeClient::with_http_client(self.config(), reqwest::Client::new())
    }
}

/// Millisecond delays so retry tests stay fast.
pub fn fast_retry(max_attempts: usize) -> RetryPolicy {
    RetryPolicy::new(max_attempts, Duration::from_millis(1), Duration::from_millis(4), 2.0).unwrap()
}
