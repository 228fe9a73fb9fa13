use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{paged_response, MirrorQuery, Order, PageOptions, QueryPairs, RangeFilter, Timestamp, TimestampRange};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Block {
    pub count: u64,
    pub gas_used: Option<u64>,
    pub hapi_version: Option<String>,
    pub hash: String,
    pub logs_bloom: Option<String>,
    pub name: Option<String>,
    pub number: u64,
    pub previous_hash: Option<String>,
    pub size: Option<u64>,
    pub timestamp: TimestampRange,
}

paged_response!(BlocksResponse, blocks, Block);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockRef {
    Number(u64),
    /// 32 or 48 byte hex hash, with or without `0x`.
    Hash(String),
}

impl fmt::Display for BlockRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Hash(hash) => f.write_str(hash),
        }
    }
}

impl std::str::FromStr for BlockRef {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<u64>() {
            Ok(number) => Self::Number(number),
            Err(_) => Self::Hash(s.to_string()),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockQuery {
    pub block_number: Vec<RangeFilter<u64>>,
    pub timestamp: Vec<RangeFilter<Timestamp>>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
    pub max_pages: Option<usize>,
}

impl MirrorQuery for BlockQuery {
    fn query_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        pairs
            .push_filters("block.number", &self.block_number)
            .push_filters("timestamp", &self.timestamp)
            .push_opt("order", self.order);
        pairs
    }

    fn page_options(&self) -> PageOptions {
        PageOptions { limit: self.limit, max_pages: self.max_pages }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_ref_from_str() {
        assert_eq!("42".parse::<BlockRef>().unwrap(), BlockRef::Number(42));
        assert_eq!("0xabc".parse::<BlockRef>().unwrap(), BlockRef::Hash("0xabc".to_string()));
    }

    #[test]
    fn test_block_deserializes() {
        let blocks: BlocksResponse = serde_json::from_value(serde_json::json!({
            "blocks": [{"count": 3, "hash": "0x01", "number": 7, "timestamp": {"from": "1.0", "to": "2.5"}}],
            "links": {"next": null},
        }))
        .unwrap();
        assert_eq!(blocks.blocks[0].timestamp.to, Some(Timestamp::new(2, 500_000_000)));
    }
}
