//! Retrying request executor.
//!
//! Every call goes through [MirrorNodeClient::execute], which sends one logical request up to
//! [RetryPolicy::max_attempts](mk_resilience::RetryPolicy::max_attempts) times. Terminal failures
//! (client errors other than `404` and `429`) are returned after the first attempt, everything else
//! is retried with geometric backoff.

use mk_mirror::MirrorError;
use mk_resilience::RetryState;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::MirrorNodeClient;

/// How a `404` answer is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFound {
    /// Retried like any transient failure, the mirror node may not have caught up yet.
    Retry,
    /// The resource is absent, stop immediately.
    Absent,
}

#[derive(Debug, Clone)]
pub(crate) struct PreparedRequest {
    pub method: Method,
    pub url: String,
    /// Merged on top of the client level headers.
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl PreparedRequest {
    pub fn get(url: String) -> Self {
        Self { method: Method::GET, url, headers: HeaderMap::new(), body: None }
    }
}

impl MirrorNodeClient {
    /// GET an absolute URL and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, MirrorError> {
        let config = self.config().await;
        let request = PreparedRequest::get(url.to_string());
        self.execute(&config, request, NotFound::Retry).await?.ok_or_else(|| unreachable_absent(url))
    }

    /// Same as [Self::get_json], but a `404` is an absent resource.
    pub async fn get_optional<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>, MirrorError> {
        let config = self.config().await;
        self.execute(&config, PreparedRequest::get(url.to_string()), NotFound::Absent).await
    }

    /// POST a JSON body to an absolute URL and decode the JSON answer.
    pub async fn post_json<T, B>(&self, url: &str, body: &B) -> Result<T, MirrorError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let config = self.config().await;
        let request = post_request(url.to_string(), body)?;
        self.execute(&config, request, NotFound::Retry).await?.ok_or_else(|| unreachable_absent(url))
    }

    /// Runs the retry loop for one logical request.
    ///
    /// Returns `Ok(None)` only for a `404` when `not_found` is [NotFound::Absent].
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        config: &ClientConfig,
        request: PreparedRequest,
        not_found: NotFound,
    ) -> Result<Option<T>, MirrorError> {
        let url = reqwest::Url::parse(&request.url)
            .map_err(|source| MirrorError::InvalidUrl { url: request.url.clone(), source })?;
        let mut headers = config.request_headers()?;
        headers.extend(request.headers);

        let mut state = RetryState::new(config.retry.clone());
        loop {
            let attempt = state.begin_attempt();
            tracing::trace!(method = %request.method, url = %request.url, attempt, "Sending mirror node request");

            let err = match self.send_once(&request.method, &url, &headers, request.body.as_deref()).await {
                Ok(value) => return Ok(Some(value)),
                Err(err) => err,
            };

            if not_found == NotFound::Absent && err.status() == Some(StatusCode::NOT_FOUND) {
                tracing::debug!(url = %request.url, "Resource not found");
                return Ok(None);
            }

            if !err.is_retryable() {
                tracing::error!(url = %request.url, attempt, status = ?err.status(), error = %err, "Mirror node request failed");
                return Err(err);
            }

            if state.is_last_attempt() {
                tracing::error!(
                    url = %request.url,
                    attempts = attempt,
                    status = ?err.status(),
                    error = %err,
                    "Mirror node request failed, no attempts left"
                );
                return Err(MirrorError::MaxRetriesReached {
                    url: request.url,
                    attempts: attempt,
                    last_status: err.status(),
                    last_error: err.to_string(),
                });
            }

            let delay = state.advance();
            tracing::warn!(
                url = %request.url,
                attempt,
                max_attempts = state.policy().max_attempts(),
                status = ?err.status(),
                error = %err,
                "Mirror node request failed, retrying in {delay:?}"
            );
            tokio::time::sleep(delay).await;
        }
    }

    async fn send_once<T: DeserializeOwned>(
        &self,
        method: &Method,
        url: &reqwest::Url,
        headers: &HeaderMap,
        body: Option<&[u8]>,
    ) -> Result<T, MirrorError> {
        let transport = |source| MirrorError::Transport { url: url.to_string(), source };

        let mut request = self.http.request(method.clone(), url.clone()).headers(headers.clone());
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body.to_vec());
        }

        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MirrorError::Status { url: url.to_string(), status, body });
        }

        let bytes = response.bytes().await.map_err(transport)?;
        serde_json::from_slice(&bytes)
            .map_err(|serde_error| MirrorError::DeserializeBody { url: url.to_string(), serde_error })
    }
}

pub(crate) fn post_request<B: Serialize + ?Sized>(url: String, body: &B) -> Result<PreparedRequest, MirrorError> {
    Ok(PreparedRequest { method: Method::POST, url, headers: HeaderMap::new(), body: Some(serde_json::to_vec(body)?) })
}

// `execute` only yields `None` under `NotFound::Absent`.
pub(crate) fn unreachable_absent(url: &str) -> MirrorError {
    MirrorError::InvalidArgument(format!("Unexpected absent resource for {url}"))
}
