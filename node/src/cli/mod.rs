pub mod provider;

use mk_key::PublicKey;
use mk_mirror::block::BlockRef;
use mk_mirror::transaction::TransactionLookup;
use mk_mirror::{Order, PageOptions, RangeFilter, Timestamp};
pub use provider::*;

/// Query a mirror node from the command line. Results are printed as JSON.
#[derive(Debug, clap::Parser)]
#[command(name = "mirror-kit", version, about)]
pub struct Args {
    #[clap(flatten)]
    pub provider_params: ProviderParams,

    #[clap(flatten)]
    pub retry_params: RetryParams,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Debug, clap::Args)]
pub struct PageParams {
    /// Stop after collecting this many items.
    #[clap(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Stop after fetching this many pages.
    #[clap(long, value_name = "N")]
    pub max_pages: Option<usize>,
}

impl PageParams {
    pub fn page_options(&self) -> PageOptions {
        PageOptions { limit: self.limit, max_pages: self.max_pages }
    }
}

#[derive(Clone, Debug, clap::Subcommand)]
pub enum Command {
    /// Account entity.
    Account { account_id: String },

    /// Hbar balance of an account.
    Balance { account_id: String },

    /// Token relationships of an account.
    Tokens {
        account_id: String,
        #[clap(flatten)]
        page: PageParams,
    },

    /// NFTs owned by an account.
    Nfts {
        account_id: String,
        #[clap(long, value_name = "TOKEN ID")]
        token_id: Option<String>,
        #[clap(flatten)]
        page: PageParams,
    },

    /// Whether a public key appears in the key structure of an account.
    KeyAccess {
        account_id: String,
        /// Hex of the raw or DER encoded public key.
        public_key: PublicKey,
    },

    /// Topic entity.
    Topic { topic_id: String },

    /// Messages of a topic with decoded payloads.
    Messages {
        topic_id: String,
        /// Sequence number filter such as `gt:10`. May be repeated.
        #[clap(long, value_name = "FILTER")]
        sequence_number: Vec<RangeFilter<u64>>,
        /// Consensus timestamp filter such as `lte:1700000000.000000000`. May be repeated.
        #[clap(long, value_name = "FILTER")]
        timestamp: Vec<RangeFilter<Timestamp>>,
        #[clap(long, value_name = "ORDER")]
        order: Option<Order>,
        #[clap(flatten)]
        page: PageParams,
    },

    /// Token entity.
    Token { token_id: String },

    /// Schedule entity and the state of its transaction.
    Schedule { schedule_id: String },

    /// Transaction by id (`0.0.2@1700000000.000000001` or `0.0.2-1700000000-000000001`), hash or
    /// consensus timestamp.
    Transaction {
        #[clap(value_parser = TransactionLookup::parse)]
        lookup: TransactionLookup,
    },

    /// Block by number or hash.
    Block { block: BlockRef },

    /// Contract by id or EVM address.
    Contract { contract: String },

    /// Simulates a read-only contract call.
    Call {
        /// Contract EVM address.
        to: String,
        /// Hex encoded call data.
        data: String,
        #[clap(long, value_name = "ADDRESS")]
        from: Option<String>,
        #[clap(long, value_name = "BLOCK", default_value = "latest")]
        block: String,
    },

    /// Hbar exchange rate, optionally at a past consensus timestamp.
    ExchangeRate {
        #[clap(long, value_name = "TIMESTAMP")]
        at: Option<Timestamp>,
    },

    /// Released and total hbar supply.
    Supply,

    /// Consensus nodes of the network.
    Nodes {
        #[clap(flatten)]
        page: PageParams,
    },
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use clap::Parser;
    use mk_mirror::RangeOp;
    use mk_mirror_client::NetworkTarget;

    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("mirror-kit").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["supply"]);
        assert_eq!(args.provider_params.network, NetworkTarget::Testnet);
        assert_eq!(args.retry_params.retry_policy().unwrap(), mk_resilience::RetryPolicy::default());
        assert_matches!(args.command, Command::Supply);
    }

    #[test]
    fn test_provider_flags() {
        let args = parse(&[
            "--network",
            "mainnet",
            "--mirror-url",
            "https://mirror.example/<API-KEY>/",
            "--api-key",
            "abc",
            "--header",
            "x-team:mirror",
            "account",
            "0.0.2",
        ]);
        let config = client_config(&args.provider_params, &args.retry_params).unwrap();

        assert_eq!(config.network, NetworkTarget::Mainnet);
        assert_eq!(config.origin(), "https://mirror.example/abc");
        assert_eq!(config.provider.headers["x-team"], "mirror");
        assert_matches!(args.command, Command::Account { account_id } if account_id == "0.0.2");
    }

    #[test]
    fn test_invalid_retry_parameters() {
        let args = parse(&["--initial-delay-ms", "5000", "--max-delay-ms", "10", "supply"]);
        assert!(args.retry_params.retry_policy().is_err());
    }

    #[test]
    fn test_messages_filters() {
        let args = parse(&["messages", "0.0.5005", "--sequence-number", "gt:10", "--order", "asc", "--limit", "3"]);
        assert_matches!(
            args.command,
            Command::Messages { topic_id, sequence_number, order: Some(Order::Asc), page, .. } => {
                assert_eq!(topic_id, "0.0.5005");
                assert_eq!(sequence_number, vec![RangeFilter::new(RangeOp::Gt, 10)]);
                assert_eq!(page.page_options(), PageOptions::default().with_limit(3));
            }
        );
    }

    #[test]
    fn test_transaction_lookup_is_normalized() {
        let args = parse(&["transaction", "0.0.2@1700000000.000000001"]);
        assert_matches!(args.command, Command::Transaction { lookup: TransactionLookup::Id(id) } if id == "0.0.2-1700000000-000000001");
    }

    #[test]
    fn test_rejects_unknown_network() {
        let args = Args::try_parse_from(["mirror-kit", "--network", "devnet", "supply"]);
        assert!(args.is_err());
    }
}
