use serde::{Deserialize, Serialize};

use crate::account::MirrorKey;
use crate::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenType {
    FungibleCommon,
    NonFungibleUnique,
}

/// Token entity. Fields not modelled here are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub token_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(rename = "type")]
    pub token_type: Option<TokenType>,
    /// The mirror node renders amounts of this entity as strings.
    #[serde(default)]
    pub decimals: Option<String>,
    #[serde(default)]
    pub total_supply: Option<String>,
    #[serde(default)]
    pub max_supply: Option<String>,
    #[serde(default)]
    pub treasury_account_id: Option<String>,
    #[serde(default)]
    pub admin_key: Option<MirrorKey>,
    #[serde(default)]
    pub supply_key: Option<MirrorKey>,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub created_timestamp: Option<Timestamp>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TokenInfo {
    pub fn decimals(&self) -> Option<u32> {
        self.decimals.as_deref()?.parse().ok()
    }

    pub fn is_nft(&self) -> bool {
        self.token_type == Some(TokenType::NonFungibleUnique)
    }
}
