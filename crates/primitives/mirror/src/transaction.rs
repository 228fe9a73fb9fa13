use std::fmt;

use serde::{Deserialize, Serialize};

use crate::decode::PayloadDecoder;
use crate::{paged_response, DecodeError, MirrorError, Timestamp};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transfer {
    pub account: String,
    pub amount: i64,
    pub is_approval: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenTransfer {
    pub token_id: String,
    pub account: String,
    pub amount: i64,
    pub is_approval: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NftTransfer {
    pub token_id: String,
    pub serial_number: i64,
    pub sender_account_id: Option<String>,
    pub receiver_account_id: Option<String>,
    pub is_approval: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    pub charged_tx_fee: i64,
    pub consensus_timestamp: Timestamp,
    pub entity_id: Option<String>,
    pub max_fee: Option<String>,
    pub memo_base64: Option<String>,
    pub name: String,
    pub nft_transfers: Vec<NftTransfer>,
    pub node: Option<String>,
    pub nonce: u32,
    pub parent_consensus_timestamp: Option<Timestamp>,
    pub result: String,
    pub scheduled: bool,
    pub token_transfers: Vec<TokenTransfer>,
    pub transaction_hash: String,
    pub transaction_id: String,
    pub transfers: Vec<Transfer>,
    pub valid_duration_seconds: Option<String>,
    pub valid_start_timestamp: Option<Timestamp>,
}

impl Transaction {
    pub fn is_success(&self) -> bool {
        self.result == "SUCCESS"
    }

    pub fn memo(&self, decoder: &dyn PayloadDecoder) -> Result<Option<String>, DecodeError> {
        match self.memo_base64.as_deref() {
            None | Some("") => Ok(None),
            Some(memo) => decoder.decode_utf8(memo).map(Some),
        }
    }
}

paged_response!(TransactionsResponse, transactions, Transaction);

/// How to find a single transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionLookup {
    /// `0.0.1234-1700000000-000000001`, or the SDK form `0.0.1234@1700000000.000000001`.
    Id(String),
    /// Hex transaction hash, with or without `0x`.
    Hash(String),
    Timestamp(Timestamp),
}

impl TransactionLookup {
    /// Accepts any of the three forms and normalizes SDK-style ids.
    pub fn parse(s: &str) -> Result<Self, MirrorError> {
        let s = s.trim();
        if let Some((account, valid_start)) = s.split_once('@') {
            let (seconds, nanos) = valid_start
                .split_once('.')
                .ok_or_else(|| MirrorError::InvalidArgument(format!("Invalid transaction id {s}")))?;
            return Ok(Self::Id(format!("{account}-{seconds}-{nanos}")));
        }
        if s.matches('-').count() == 2 {
            return Ok(Self::Id(s.to_string()));
        }
        let hex_body = s.strip_prefix("0x").unwrap_or(s);
        if hex_body.len() == 96 && hex_body.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Ok(Self::Hash(s.to_string()));
        }
        Ok(Self::Timestamp(s.parse()?))
    }

    /// Path segment accepted by the id-or-hash endpoints. `None` for timestamp lookups.
    pub fn id_or_hash(&self) -> Option<&str> {
        match self {
            Self::Id(id) => Some(id),
            Self::Hash(hash) => Some(hash),
            Self::Timestamp(_) => None,
        }
    }
}

impl fmt::Display for TransactionLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => f.write_str(id),
            Self::Hash(hash) => f.write_str(hash),
            Self::Timestamp(ts) => write!(f, "{ts}"),
        }
    }
}
