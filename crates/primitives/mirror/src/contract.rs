use std::fmt;

use serde::{Deserialize, Serialize};

use crate::account::MirrorKey;
use crate::{paged_response, MirrorQuery, Order, PageOptions, QueryPairs, RangeFilter, Timestamp, TimestampRange};

/// A contract addressed by entity id (`0.0.1234`) or EVM address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractRef {
    Id(String),
    EvmAddress(String),
}

impl ContractRef {
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        let body = s.strip_prefix("0x").unwrap_or(s);
        if body.len() == 40 && body.bytes().all(|b| b.is_ascii_hexdigit()) {
            Self::EvmAddress(format!("0x{}", body.to_ascii_lowercase()))
        } else {
            Self::Id(s.to_string())
        }
    }
}

impl fmt::Display for ContractRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => f.write_str(id),
            Self::EvmAddress(address) => f.write_str(address),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contract {
    pub admin_key: Option<MirrorKey>,
    pub auto_renew_account: Option<String>,
    pub auto_renew_period: Option<i64>,
    pub contract_id: String,
    pub created_timestamp: Option<Timestamp>,
    pub deleted: bool,
    pub evm_address: Option<String>,
    pub expiration_timestamp: Option<Timestamp>,
    pub file_id: Option<String>,
    pub max_automatic_token_associations: Option<i32>,
    pub memo: String,
    pub nonce: Option<i64>,
    pub obtainer_id: Option<String>,
    pub permanent_removal: Option<bool>,
    pub proxy_account_id: Option<String>,
    pub timestamp: TimestampRange,
    /// Only present on single-contract lookups.
    pub bytecode: Option<String>,
    pub runtime_bytecode: Option<String>,
}

paged_response!(ContractsResponse, contracts, Contract);

/// Result of a contract call transaction. Fields not modelled here are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractResult {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub block_number: Option<u64>,
    #[serde(default)]
    pub call_result: Option<String>,
    #[serde(default)]
    pub contract_id: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub function_parameters: Option<String>,
    #[serde(default)]
    pub gas_limit: Option<u64>,
    #[serde(default)]
    pub gas_used: Option<u64>,
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    pub timestamp: Timestamp,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

paged_response!(ContractResultsResponse, results, ContractResult);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractLog {
    pub address: String,
    pub block_hash: Option<String>,
    pub block_number: Option<u64>,
    pub bloom: Option<String>,
    pub contract_id: Option<String>,
    pub data: Option<String>,
    pub index: u32,
    pub root_contract_id: Option<String>,
    pub timestamp: Timestamp,
    pub topics: Vec<String>,
    pub transaction_hash: Option<String>,
    pub transaction_index: Option<u32>,
}

paged_response!(ContractLogsResponse, logs, ContractLog);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractAction {
    pub call_depth: u32,
    pub call_operation_type: Option<String>,
    pub call_type: Option<String>,
    pub caller: Option<String>,
    pub caller_type: Option<String>,
    pub from: Option<String>,
    pub gas: u64,
    pub gas_used: u64,
    pub index: u32,
    pub input: Option<String>,
    pub recipient: Option<String>,
    pub recipient_type: Option<String>,
    pub result_data: Option<String>,
    pub result_data_type: Option<String>,
    pub timestamp: Timestamp,
    pub to: Option<String>,
    pub value: i64,
}

paged_response!(ContractActionsResponse, actions, ContractAction);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractStateEntry {
    pub address: String,
    pub contract_id: String,
    pub timestamp: Timestamp,
    pub slot: String,
    pub value: String,
}

paged_response!(ContractStateResponse, state, ContractStateEntry);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Opcode {
    pub depth: u32,
    pub gas: u64,
    pub gas_cost: u64,
    pub op: String,
    pub pc: u64,
    pub reason: Option<String>,
    pub stack: Vec<String>,
    pub memory: Vec<String>,
    pub storage: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpcodeTraces {
    pub address: String,
    pub contract_id: String,
    pub failed: bool,
    pub gas: u64,
    pub opcodes: Vec<Opcode>,
    pub return_value: Option<String>,
}

/// Which parts of the EVM state the opcode tracer includes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpcodeOptions {
    pub stack: bool,
    pub memory: bool,
    pub storage: bool,
}

impl OpcodeOptions {
    pub fn query_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        pairs.push("stack", self.stack).push("memory", self.memory).push("storage", self.storage);
        pairs
    }
}

/// Body of `POST /api/v1/contracts/call`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractCallRequest {
    /// Block number or tag (`latest`, `earliest`, `pending`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<String>,
    /// Hex encoded call data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default)]
    pub estimate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<u64>,
    #[serde(rename = "gasPrice", skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<u64>,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<u64>,
}

impl ContractCallRequest {
    pub fn new(to: impl Into<String>, data: impl Into<String>) -> Self {
        Self { to: to.into(), data: Some(data.into()), block: Some("latest".to_string()), ..Default::default() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractCallResponse {
    /// Hex encoded return data.
    pub result: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractResultQuery {
    pub from: Option<String>,
    pub block_number: Option<RangeFilter<u64>>,
    pub timestamp: Vec<RangeFilter<Timestamp>>,
    pub internal: Option<bool>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
    pub max_pages: Option<usize>,
}

impl MirrorQuery for ContractResultQuery {
    fn query_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        pairs
            .push_opt("from", self.from.as_deref())
            .push_opt("block.number", self.block_number.as_ref())
            .push_filters("timestamp", &self.timestamp)
            .push_opt("internal", self.internal)
            .push_opt("order", self.order);
        pairs
    }

    fn page_options(&self) -> PageOptions {
        PageOptions { limit: self.limit, max_pages: self.max_pages }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractLogQuery {
    pub index: Vec<RangeFilter<u32>>,
    pub timestamp: Vec<RangeFilter<Timestamp>>,
    /// `topic0` through `topic3`.
    pub topics: [Option<String>; 4],
    pub transaction_hash: Option<String>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
    pub max_pages: Option<usize>,
}

impl MirrorQuery for ContractLogQuery {
    fn query_pairs(&self) -> QueryPairs {
        const TOPIC_PARAMS: [&str; 4] = ["topic0", "topic1", "topic2", "topic3"];
        let mut pairs = QueryPairs::new();
        pairs.push_filters("index", &self.index).push_filters("timestamp", &self.timestamp);
        for (name, topic) in TOPIC_PARAMS.into_iter().zip(&self.topics) {
            pairs.push_opt(name, topic.as_deref());
        }
        pairs.push_opt("transaction.hash", self.transaction_hash.as_deref()).push_opt("order", self.order);
        pairs
    }

    fn page_options(&self) -> PageOptions {
        PageOptions { limit: self.limit, max_pages: self.max_pages }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractStateQuery {
    pub slot: Option<String>,
    pub timestamp: Option<RangeFilter<Timestamp>>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
    pub max_pages: Option<usize>,
}

impl MirrorQuery for ContractStateQuery {
    fn query_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        pairs
            .push_opt("slot", self.slot.as_deref())
            .push_opt("timestamp", self.timestamp.as_ref())
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
    fn test_contract_ref_parse() {
        assert_eq!(ContractRef::parse("0.0.1234"), ContractRef::Id("0.0.1234".to_string()));
        let address = "00000000000000000000000000000000000004D2";
        assert_eq!(ContractRef::parse(address), ContractRef::EvmAddress(format!("0x{}", address.to_lowercase())));
    }

    #[test]
    fn test_call_request_body() {
        let body = serde_json::to_value(ContractCallRequest::new("0x01", "0x06fdde03")).unwrap();
        assert_eq!(body, serde_json::json!({"block": "latest", "data": "0x06fdde03", "estimate": false, "to": "0x01"}));
    }

    #[test]
    fn test_log_query_topics() {
        let query = ContractLogQuery {
            topics: [Some("0xaa".to_string()), None, Some("0xcc".to_string()), None],
            order: Some(Order::Asc),
            ..Default::default()
        };
        assert_eq!(
            query.query_pairs().iter().collect::<Vec<_>>(),
            vec![("topic0", "0xaa"), ("topic2", "0xcc"), ("order", "asc")]
        );
    }

    #[test]
    fn test_opcode_options() {
        let options = OpcodeOptions { stack: true, ..Default::default() };
        assert_eq!(
            options.query_pairs().iter().collect::<Vec<_>>(),
            vec![("stack", "true"), ("memory", "false"), ("storage", "false")]
        );
    }
}
