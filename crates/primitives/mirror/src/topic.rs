use serde::{Deserialize, Serialize};

use crate::account::MirrorKey;
use crate::decode::{PayloadDecoder, TopicMessageContent};
use crate::{
    paged_response, DecodeError, MirrorQuery, Order, PageOptions, QueryPairs, RangeFilter, Timestamp, TimestampRange,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedFee {
    pub amount: i64,
    pub collector_account_id: Option<String>,
    /// `None` when the fee is paid in hbar.
    pub denominating_token_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomFees {
    pub created_timestamp: Option<Timestamp>,
    pub fixed_fees: Vec<FixedFee>,
}

impl CustomFees {
    pub fn is_empty(&self) -> bool {
        self.fixed_fees.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicInfo {
    pub admin_key: Option<MirrorKey>,
    pub auto_renew_account: Option<String>,
    pub auto_renew_period: Option<i64>,
    pub created_timestamp: Option<Timestamp>,
    pub custom_fees: Option<CustomFees>,
    pub deleted: Option<bool>,
    pub fee_exempt_key_list: Vec<MirrorKey>,
    pub fee_schedule_key: Option<MirrorKey>,
    pub memo: String,
    pub submit_key: Option<MirrorKey>,
    pub timestamp: TimestampRange,
    pub topic_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkInfo {
    pub initial_transaction_id: Option<serde_json::Value>,
    pub number: u32,
    pub total: u32,
}

/// A topic message as returned by the mirror node, with its payload still base64 encoded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTopicMessage {
    pub chunk_info: Option<ChunkInfo>,
    pub consensus_timestamp: Timestamp,
    pub message: String,
    pub payer_account_id: Option<String>,
    pub running_hash: Option<String>,
    pub running_hash_version: Option<u32>,
    pub sequence_number: u64,
    pub topic_id: Option<String>,
}

paged_response!(TopicMessagesResponse, messages, RawTopicMessage);

/// A topic message with its payload decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicMessage {
    pub topic_id: Option<String>,
    pub sequence_number: u64,
    pub consensus_timestamp: Timestamp,
    pub consensus_time_millis: i64,
    pub payer_account_id: Option<String>,
    pub running_hash: Option<String>,
    pub chunk_info: Option<ChunkInfo>,
    pub content: TopicMessageContent,
}

impl TopicMessage {
    /// Fails when the payload is not base64 or not UTF-8, or the timestamp is out of range. Text that is not JSON is kept raw.
    pub fn decode(raw: RawTopicMessage, decoder: &dyn PayloadDecoder) -> Result<Self, DecodeError> {
        let text = decoder.decode_utf8(&raw.message)?;
        Ok(Self {
            topic_id: raw.topic_id,
            sequence_number: raw.sequence_number,
            consensus_time_millis: raw.consensus_timestamp.to_epoch_millis()?,
            consensus_timestamp: raw.consensus_timestamp,
            payer_account_id: raw.payer_account_id,
            running_hash: raw.running_hash,
            chunk_info: raw.chunk_info,
            content: TopicMessageContent::from_text(text),
        })
    }
}

/// Filters for a topic message listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicMessageQuery {
    pub sequence_number: Vec<RangeFilter<u64>>,
    pub timestamp: Vec<RangeFilter<Timestamp>>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
    pub max_pages: Option<usize>,
}

impl TopicMessageQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sequence_number(mut self, filter: RangeFilter<u64>) -> Self {
        self.sequence_number.push(filter);
        self
    }

    pub fn timestamp(mut self, filter: RangeFilter<Timestamp>) -> Self {
        self.timestamp.push(filter);
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }
}

impl MirrorQuery for TopicMessageQuery {
    fn query_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        pairs
            .push_filters("sequencenumber", &self.sequence_number)
            .push_filters("timestamp", &self.timestamp)
            .push_opt("order", self.order);
        pairs
    }

    fn page_options(&self) -> PageOptions {
        PageOptions { limit: self.limit, max_pages: self.max_pages }.or_default_max_pages()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Base64PayloadDecoder, RangeOp};
    use assert_matches::assert_matches;

    fn raw(message: &str) -> RawTopicMessage {
        RawTopicMessage {
            consensus_timestamp: "1700000000.250000000".parse().unwrap(),
            message: message.to_string(),
            sequence_number: 4,
            topic_id: Some("0.0.5005".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_decode_json_message() {
        // {"op":"register"}
        let message = TopicMessage::decode(raw("eyJvcCI6InJlZ2lzdGVyIn0="), &Base64PayloadDecoder).unwrap();
        assert_eq!(message.content.as_json(), Some(&serde_json::json!({"op": "register"})));
        assert_eq!(message.consensus_time_millis, 1_700_000_000_250);
    }

    #[test]
    fn test_decode_text_message() {
        let message = TopicMessage::decode(raw("aGVsbG8="), &Base64PayloadDecoder).unwrap();
        assert_eq!(message.content, TopicMessageContent::Raw { raw_content: "hello".to_string() });
    }

    #[test]
    fn test_decode_invalid_payload() {
        assert_matches!(TopicMessage::decode(raw("***"), &Base64PayloadDecoder), Err(DecodeError::Base64(_)));
    }

    #[test]
    fn test_decode_out_of_range_timestamp() {
        let message = RawTopicMessage {
            consensus_timestamp: Timestamp::new(i64::MAX, 0),
            ..raw("aGVsbG8=")
        };
        assert_matches!(TopicMessage::decode(message, &Base64PayloadDecoder), Err(DecodeError::Timestamp(_)));
    }

    #[test]
    fn test_query_pairs() {
        let query = TopicMessageQuery::new()
            .sequence_number(RangeFilter::parse_with_default("2", RangeOp::Gt).unwrap())
            .order(Order::Asc)
            .limit(25);

        assert_eq!(query.query_pairs().iter().collect::<Vec<_>>(), vec![("sequencenumber", "gt:2"), ("order", "asc")]);
        assert_eq!(query.page_options(), PageOptions { limit: Some(25), max_pages: Some(crate::DEFAULT_MAX_PAGES) });
    }
}
