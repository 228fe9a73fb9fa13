use std::fmt::Display;
use std::sync::Arc;

use mk_mirror::{MirrorError, PageOptions, Paged, QueryPairs};
use reqwest::header::{HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::{with_query, ClientConfig};
use crate::pagination::Paginator;
use crate::retry::{post_request, unreachable_absent, NotFound, PreparedRequest};
use crate::MirrorNodeClient;

/// Builds one request against a configuration snapshot.
#[derive(Debug, Clone)]
pub struct RequestBuilder<'a> {
    client: &'a MirrorNodeClient,
    config: Arc<ClientConfig>,
    url: String,
    params: QueryPairs,
    headers: reqwest::header::HeaderMap,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(client: &'a MirrorNodeClient, config: Arc<ClientConfig>, path: &str) -> Self {
        let url = config.resolve(path);
        Self { client, config, url, params: QueryPairs::new(), headers: Default::default() }
    }

    /// Appends one percent-encoded path segment, so `/`, `?` or `#` in an id stay inside it.
    pub fn add_uri_segment(mut self, segment: impl Display) -> Self {
        let segment = segment.to_string();
        match Url::parse(&self.url) {
            Ok(mut url) => {
                if let Ok(mut segments) = url.path_segments_mut() {
                    segments.pop_if_empty().push(&segment);
                }
                self.url = url.into();
            }
            // Reported as `InvalidUrl` when the request is sent.
            Err(_) => self.url = format!("{}/{}", self.url.trim_end_matches('/'), segment),
        }
        self
    }

    pub fn add_param(mut self, name: &'static str, value: impl Display) -> Self {
        self.params.push(name, value);
        self
    }

    pub fn add_opt_param(mut self, name: &'static str, value: Option<impl Display>) -> Self {
        self.params.push_opt(name, value);
        self
    }

    pub fn add_params(mut self, params: QueryPairs) -> Self {
        self.params.append(params);
        self
    }

    /// Sets the `limit` parameter of the first page from the traversal bounds.
    pub fn with_page_size(self, options: &PageOptions) -> Self {
        let page_size = options.page_size();
        self.add_opt_param("limit", page_size)
    }

    /// Per-call header, takes precedence over the client level headers.
    pub fn add_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn url(&self) -> String {
        with_query(self.url.clone(), &self.params)
    }

    fn prepare(self) -> (&'a MirrorNodeClient, Arc<ClientConfig>, PreparedRequest) {
        let mut request = PreparedRequest::get(self.url());
        request.headers = self.headers;
        (self.client, self.config, request)
    }

    pub async fn send_get<T: DeserializeOwned>(self) -> Result<T, MirrorError> {
        let url = self.url();
        let (client, config, request) = self.prepare();
        client
            .execute(&config, request, NotFound::Retry)
            .await?
            .ok_or_else(|| unreachable_absent(&url))
    }

    /// `Ok(None)` when the mirror node answers `404`.
    pub async fn send_get_optional<T: DeserializeOwned>(self) -> Result<Option<T>, MirrorError> {
        let (client, config, request) = self.prepare();
        client.execute(&config, request, NotFound::Absent).await
    }

    pub async fn send_post<T, B>(self, body: &B) -> Result<T, MirrorError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url();
        let (client, config, get) = self.prepare();
        let mut request = post_request(get.url, body)?;
        request.headers = get.headers;
        client
            .execute(&config, request, NotFound::Retry)
            .await?
            .ok_or_else(|| unreachable_absent(&url))
    }

    /// Follows the next-page cursors starting at this request.
    pub async fn paginate<P: Paged>(self, options: PageOptions) -> Result<Vec<P::Item>, MirrorError> {
        let builder = self.with_page_size(&options);
        let url = builder.url();
        Paginator::new(builder.client, builder.config).with_headers(builder.headers).collect::<P>(&url, options).await
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::{ClientConfig, MirrorNodeClient, NetworkTarget, ProviderConfig};

    fn client() -> MirrorNodeClient {
        let provider = ProviderConfig::default().with_custom_url("https://mirror.example/");
        let config = ClientConfig::new(NetworkTarget::Mainnet).with_provider(provider);
        MirrorNodeClient::with_http_client(config, reqwest::Client::new())
    }

    #[rstest]
    #[case("0.0.1001", "https://mirror.example/api/v1/tokens/0.0.1001")]
    #[case("0.0.1/nfts", "https://mirror.example/api/v1/tokens/0.0.1%2Fnfts")]
    #[case("0.0.1?limit=1", "https://mirror.example/api/v1/tokens/0.0.1%3Flimit=1")]
    #[case("0.0.1#x", "https://mirror.example/api/v1/tokens/0.0.1%23x")]
    #[tokio::test]
    async fn test_segments_are_encoded(#[case] token_id: &str, #[case] expected: &str) {
        let client = client();
        assert_eq!(client.request("tokens").await.add_uri_segment(token_id).url(), expected);
    }

    #[tokio::test]
    async fn test_segments_are_joined_before_query() {
        let client = client();
        let url = client
            .request("accounts")
            .await
            .add_uri_segment("0.0.2")
            .add_uri_segment("nfts")
            .add_param("limit", 5)
            .url();
        assert_eq!(url, "https://mirror.example/api/v1/accounts/0.0.2/nfts?limit=5");
    }
}
