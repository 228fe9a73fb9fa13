use std::time::Duration;

use anyhow::Context;
use mk_mirror_client::{ClientConfig, NetworkTarget, ProviderConfig};
use mk_resilience::RetryPolicy;
use reqwest::header::{HeaderName, HeaderValue};
use url::Url;

#[derive(Clone, Debug, clap::Args)]
pub struct ProviderParams {
    /// Network whose public mirror node is queried when no url is given.
    #[clap(env = "MIRROR_NETWORK", long, value_name = "NETWORK", default_value_t = NetworkTarget::Testnet)]
    pub network: NetworkTarget,

    /// Mirror node origin, overriding the network default. May contain `<API-KEY>`, which is
    /// replaced by the api key.
    #[clap(env = "MIRROR_URL", long, value_name = "URL")]
    pub mirror_url: Option<String>,

    /// Api key of a commercial mirror node provider.
    #[clap(env = "MIRROR_API_KEY", long, value_name = "API KEY")]
    pub api_key: Option<String>,

    /// Extra header sent with every request, as `name:value`. May be repeated.
    #[clap(env = "MIRROR_HEADERS", long = "header", value_name = "NAME:VALUE", value_parser = parse_header, value_delimiter = ',')]
    pub headers: Vec<(HeaderName, HeaderValue)>,
}

impl ProviderParams {
    pub fn provider_config(&self) -> anyhow::Result<ProviderConfig> {
        let mut provider = ProviderConfig::default();
        if let Some(url) = &self.mirror_url {
            // The placeholder is not a valid host, check the url with the key substituted.
            Url::parse(&url.replace(mk_mirror_client::API_KEY_PLACEHOLDER, "key"))
                .with_context(|| format!("Invalid mirror node url {url}"))?;
            provider = provider.with_custom_url(url.trim_end_matches('/'));
        }
        if let Some(api_key) = &self.api_key {
            provider = provider.with_api_key(api_key);
        }
        for (name, value) in &self.headers {
            provider = provider.with_header(name.clone(), value.clone());
        }
        Ok(provider)
    }
}

#[derive(Clone, Debug, clap::Args)]
pub struct RetryParams {
    /// Attempts per request, the first one included.
    #[clap(env = "MIRROR_MAX_ATTEMPTS", long, value_name = "N", default_value_t = 5)]
    pub max_attempts: usize,

    /// Delay before the first retry, in milliseconds.
    #[clap(env = "MIRROR_INITIAL_DELAY_MS", long, value_name = "MS", default_value_t = 2_000)]
    pub initial_delay_ms: u64,

    /// Upper bound of the delay between two attempts, in milliseconds.
    #[clap(env = "MIRROR_MAX_DELAY_MS", long, value_name = "MS", default_value_t = 30_000)]
    pub max_delay_ms: u64,

    #[clap(env = "MIRROR_BACKOFF_MULTIPLIER", long, value_name = "FACTOR", default_value_t = 2.0)]
    pub backoff_multiplier: f64,
}

impl RetryParams {
    pub fn retry_policy(&self) -> anyhow::Result<RetryPolicy> {
        RetryPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.initial_delay_ms),
            Duration::from_millis(self.max_delay_ms),
            self.backoff_multiplier,
        )
        .context("Invalid retry parameters")
    }
}

pub fn client_config(provider: &ProviderParams, retry: &RetryParams) -> anyhow::Result<ClientConfig> {
    Ok(ClientConfig::new(provider.network)
        .with_provider(provider.provider_config()?)
        .with_retry(retry.retry_policy()?))
}

fn parse_header(s: &str) -> anyhow::Result<(HeaderName, HeaderValue)> {
    let (name, value) = s.split_once(':').with_context(|| format!("Header {s:?} is not of the form name:value"))?;
    let name = HeaderName::from_bytes(name.trim().as_bytes()).with_context(|| format!("Invalid header name in {s:?}"))?;
    let value = HeaderValue::from_str(value.trim()).with_context(|| format!("Invalid header value in {s:?}"))?;
    Ok((name, value))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("x-team:mirror", "x-team", "mirror")]
    #[case(" Authorization : Bearer abc ", "authorization", "Bearer abc")]
    fn test_parse_header(#[case] input: &str, #[case] name: &str, #[case] value: &str) {
        let (parsed_name, parsed_value) = parse_header(input).unwrap();
        assert_eq!(parsed_name.as_str(), name);
        assert_eq!(parsed_value, value);
    }

    #[rstest]
    #[case("no-separator")]
    #[case("bad name:value")]
    fn test_parse_header_rejects(#[case] input: &str) {
        assert!(parse_header(input).is_err());
    }
}
