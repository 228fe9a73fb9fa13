use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use mk_mirror::{MirrorError, QueryPairs};
use mk_resilience::RetryPolicy;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};

/// Token in a custom origin that is replaced by the configured API key.
pub const API_KEY_PLACEHOLDER: &str = "<API-KEY>";

/// Secondary header carrying the API key, for providers that do not read `Authorization`.
pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NetworkTarget {
    Mainnet,
    #[default]
    Testnet,
    Previewnet,
}

impl NetworkTarget {
    pub fn default_origin(&self) -> &'static str {
        match self {
            NetworkTarget::Mainnet => "https://mainnet-public.mirrornode.hedera.com",
            NetworkTarget::Testnet => "https://testnet.mirrornode.hedera.com",
            NetworkTarget::Previewnet => "https://previewnet.mirrornode.hedera.com",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkTarget::Mainnet => "mainnet",
            NetworkTarget::Testnet => "testnet",
            NetworkTarget::Previewnet => "previewnet",
        }
    }
}

impl fmt::Display for NetworkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "mainnet-public" => Ok(NetworkTarget::Mainnet),
            "testnet" => Ok(NetworkTarget::Testnet),
            "previewnet" => Ok(NetworkTarget::Previewnet),
            _ => Err(format!("Unknown network {s:?}, expected mainnet, testnet or previewnet")),
        }
    }
}

/// Third party mirror node provider settings.
#[derive(Clone, Default)]
pub struct ProviderConfig {
    /// Origin used instead of the network default. May contain [API_KEY_PLACEHOLDER].
    pub custom_url: Option<String>,
    pub api_key: Option<String>,
    /// Sent with every request.
    pub headers: HeaderMap,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("custom_url", &self.custom_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ProviderConfig {
    pub fn with_custom_url(mut self, url: impl Into<String>) -> Self {
        self.custom_url = Some(url.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Everything a request needs to know about where and how to call the mirror node.
///
/// A config is never mutated once shared: the client swaps a whole new value in when reconfigured.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub network: NetworkTarget,
    pub provider: ProviderConfig,
    pub retry: RetryPolicy,
}

impl ClientConfig {
    pub fn new(network: NetworkTarget) -> Self {
        Self { network, ..Default::default() }
    }

    pub fn with_provider(mut self, provider: ProviderConfig) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The configured origin, before any API key substitution.
    pub fn base_url(&self) -> &str {
        self.provider.custom_url.as_deref().unwrap_or(self.network.default_origin())
    }

    /// The origin with the API key substituted. Without a key, the placeholder is left as-is.
    pub fn origin(&self) -> Cow<'_, str> {
        let base = self.base_url();
        match &self.provider.api_key {
            Some(key) if base.contains(API_KEY_PLACEHOLDER) => Cow::Owned(base.replace(API_KEY_PLACEHOLDER, key)),
            _ => Cow::Borrowed(base),
        }
    }

    /// Absolute URL of `path`, joined to the origin with exactly one separator.
    ///
    /// The result is not validated, a malformed URL only fails when the request is sent.
    pub fn resolve(&self, path: &str) -> String {
        let origin = self.origin();
        format!("{}/{}", origin.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    /// Resolves a next-page cursor. Cursors that already carry a scheme are used as-is.
    pub fn resolve_cursor(&self, next: &str) -> String {
        if next.starts_with("http://") || next.starts_with("https://") {
            next.to_string()
        } else {
            self.resolve(next)
        }
    }

    /// Client level headers followed by the API key headers, when a key is configured.
    pub fn request_headers(&self) -> Result<HeaderMap, MirrorError> {
        let mut headers = self.provider.headers.clone();
        if let Some(key) = &self.provider.api_key {
            let bearer = HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|_| MirrorError::InvalidArgument("API key is not a valid header value".to_string()))?;
            let raw = HeaderValue::from_str(key)
                .map_err(|_| MirrorError::InvalidArgument("API key is not a valid header value".to_string()))?;
            headers.insert(AUTHORIZATION, bearer);
            headers.insert(API_KEY_HEADER, raw);
        }
        Ok(headers)
    }
}

/// Appends `params` to `url` as a query string.
pub(crate) fn with_query(url: String, params: &QueryPairs) -> String {
    if params.is_empty() {
        return url;
    }
    let query = url::form_urlencoded::Serializer::new(String::new()).extend_pairs(params.iter()).finish();
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{query}")
}
