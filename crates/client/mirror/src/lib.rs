//! Read-only client for the mirror node REST API.
//!
//! ```no_run
//! # async fn run() -> Result<(), mk_mirror::MirrorError> {
//! use mk_mirror_client::MirrorNodeClient;
//!
//! let client = MirrorNodeClient::testnet()?;
//! let balance = client.get_account_balance("0.0.2").await?;
//! # Ok(())
//! # }
//! ```

mod builder;
pub mod config;
mod methods;
mod pagination;
mod request_builder;
mod retry;

#[cfg(test)]
mod tests;

pub use builder::{MirrorNodeClient, REQUEST_TIMEOUT};
pub use config::{ClientConfig, NetworkTarget, ProviderConfig, API_KEY_PLACEHOLDER};
pub use pagination::Paginator;
pub use request_builder::RequestBuilder;
pub use retry::NotFound;
