use mk_key::{KeyStructure, PublicKey};
use serde::{Deserialize, Serialize};

use crate::decode::PayloadDecoder;
use crate::{paged_response, DecodeError, MirrorError, Timestamp, TimestampRange};

/// Key type tag used by the mirror node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MirrorKeyType {
    #[serde(rename = "ED25519")]
    Ed25519,
    #[serde(rename = "ECDSA_SECP256K1")]
    EcdsaSecp256k1,
    /// Hex of the protobuf `Key` message. Used for key lists and threshold keys.
    #[serde(rename = "ProtobufEncoded")]
    ProtobufEncoded,
}

/// A key as rendered by the mirror node: `{"_type": "ED25519", "key": "<hex>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorKey {
    #[serde(rename = "_type")]
    pub key_type: MirrorKeyType,
    pub key: String,
}

impl MirrorKey {
    /// The key as a single public key. Key lists and threshold keys are rejected.
    pub fn to_public_key(&self) -> Result<PublicKey, MirrorError> {
        match self.key_type {
            MirrorKeyType::Ed25519 => {
                let bytes = decode_hex(&self.key)?;
                Ok(PublicKey::from_ed25519_bytes(&bytes)?)
            }
            MirrorKeyType::EcdsaSecp256k1 => {
                let bytes = decode_hex(&self.key)?;
                Ok(PublicKey::from_secp256k1_bytes(&bytes)?)
            }
            MirrorKeyType::ProtobufEncoded => {
                Err(MirrorError::InvalidArgument("Key is a complex key, not a single public key".to_string()))
            }
        }
    }

    /// The protobuf wire form of the key, whatever its shape.
    pub fn to_key_bytes(&self) -> Result<Vec<u8>, MirrorError> {
        match self.key_type {
            MirrorKeyType::ProtobufEncoded => Ok(decode_hex(&self.key)?),
            _ => Ok(KeyStructure::Simple(self.to_public_key()?).to_bytes()),
        }
    }
}

fn decode_hex(s: &str) -> Result<Vec<u8>, DecodeError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s).map_err(|e| DecodeError::Hex(format!("{s}: {e}")))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBalance {
    pub token_id: String,
    pub balance: i64,
}

/// Balance snapshot embedded in an account. Amounts are in tinybars.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountBalance {
    pub balance: i64,
    pub timestamp: Option<Timestamp>,
    pub tokens: Vec<TokenBalance>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    pub account: String,
    pub alias: Option<String>,
    pub auto_renew_period: Option<i64>,
    pub balance: Option<AccountBalance>,
    pub created_timestamp: Option<Timestamp>,
    pub decline_reward: bool,
    pub deleted: bool,
    pub ethereum_nonce: Option<i64>,
    pub evm_address: Option<String>,
    pub expiry_timestamp: Option<Timestamp>,
    pub key: Option<MirrorKey>,
    pub max_automatic_token_associations: Option<i32>,
    pub memo: Option<String>,
    pub pending_reward: Option<i64>,
    pub receiver_sig_required: Option<bool>,
    pub staked_account_id: Option<String>,
    pub staked_node_id: Option<i64>,
    pub stake_period_start: Option<Timestamp>,
}

/// An account's association with a token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenRelationship {
    pub automatic_association: bool,
    pub balance: i64,
    pub created_timestamp: Option<Timestamp>,
    pub decimals: Option<u32>,
    pub freeze_status: Option<String>,
    pub kyc_status: Option<String>,
    pub token_id: String,
}

paged_response!(AccountTokensResponse, tokens, TokenRelationship);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Nft {
    pub account_id: Option<String>,
    pub created_timestamp: Option<Timestamp>,
    pub delegating_spender: Option<String>,
    pub deleted: bool,
    /// Base64 metadata as returned by the mirror node.
    pub metadata: Option<String>,
    pub modified_timestamp: Option<Timestamp>,
    pub serial_number: i64,
    pub spender: Option<String>,
    pub token_id: String,
    /// UTF-8 decoding of `metadata`, filled by [Nft::decode_metadata].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_uri: Option<String>,
}

impl Nft {
    /// Decodes `metadata` into `token_uri`. An undecodable payload leaves `token_uri` empty.
    pub fn decode_metadata(mut self, decoder: &dyn PayloadDecoder) -> Self {
        if let Some(metadata) = self.metadata.as_deref().filter(|m| !m.is_empty()) {
            match decoder.decode_utf8(metadata) {
                Ok(uri) => self.token_uri = Some(uri),
                Err(err) => tracing::warn!(
                    token_id = %self.token_id,
                    serial_number = self.serial_number,
                    error = %err,
                    "Could not decode NFT metadata"
                ),
            }
        }
        self
    }
}

paged_response!(NftsResponse, nfts, Nft);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptoAllowance {
    pub amount: i64,
    pub amount_granted: i64,
    pub owner: String,
    pub spender: String,
    pub timestamp: TimestampRange,
}

paged_response!(CryptoAllowancesResponse, allowances, CryptoAllowance);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenAllowance {
    pub amount: i64,
    pub amount_granted: i64,
    pub owner: String,
    pub spender: String,
    pub timestamp: TimestampRange,
    pub token_id: String,
}

paged_response!(TokenAllowancesResponse, allowances, TokenAllowance);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenAirdrop {
    pub amount: i64,
    pub receiver_id: String,
    pub sender_id: String,
    pub serial_number: Option<i64>,
    pub timestamp: TimestampRange,
    pub token_id: String,
}

paged_response!(AirdropsResponse, airdrops, TokenAirdrop);
