mod accounts;
mod blocks;
mod contracts;
mod network;
mod schedules;
mod tokens;
mod topics;
mod transactions;

use crate::request_builder::RequestBuilder;
use crate::MirrorNodeClient;

const API_V1: &str = "/api/v1";

impl MirrorNodeClient {
    /// Starts a request on `/api/v1/<path>` with a snapshot of the current configuration.
    pub async fn request(&self, path: &str) -> RequestBuilder<'_> {
        let config = self.config().await;
        RequestBuilder::new(self, config, &format!("{API_V1}/{}", path.trim_start_matches('/')))
    }
}
