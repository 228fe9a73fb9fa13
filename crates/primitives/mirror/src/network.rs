use serde::{Deserialize, Serialize};

use crate::{paged_response, Timestamp, TimestampRange};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeRate {
    pub cent_equivalent: i64,
    pub expiration_time: i64,
    pub hbar_equivalent: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeRateSet {
    pub current_rate: ExchangeRate,
    pub next_rate: ExchangeRate,
    pub timestamp: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkFee {
    pub gas: i64,
    pub transaction_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkFees {
    pub fees: Vec<NetworkFee>,
    pub timestamp: Option<Timestamp>,
}

/// Supply figures, in tinybars, rendered as strings by the mirror node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSupply {
    pub released_supply: String,
    pub timestamp: Option<Timestamp>,
    pub total_supply: String,
}

/// Staking parameters of the current period. Fields not modelled here are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkStake {
    #[serde(default)]
    pub max_stake_rewarded: i64,
    #[serde(default)]
    pub max_staking_reward_rate_per_hbar: i64,
    #[serde(default)]
    pub max_total_reward: i64,
    #[serde(default)]
    pub node_reward_fee_fraction: f64,
    #[serde(default)]
    pub stake_total: i64,
    #[serde(default)]
    pub staking_period: Option<TimestampRange>,
    #[serde(default)]
    pub staking_period_duration: i64,
    #[serde(default)]
    pub staking_periods_stored: i64,
    #[serde(default)]
    pub staking_reward_fee_fraction: f64,
    #[serde(default)]
    pub staking_reward_rate: i64,
    #[serde(default)]
    pub staking_start_threshold: i64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceEndpoint {
    pub domain_name: Option<String>,
    pub ip_address_v4: Option<String>,
    pub port: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkNode {
    pub description: Option<String>,
    pub file_id: Option<String>,
    pub max_stake: Option<i64>,
    pub memo: Option<String>,
    pub min_stake: Option<i64>,
    pub node_account_id: String,
    pub node_id: u64,
    pub node_cert_hash: Option<String>,
    pub public_key: Option<String>,
    pub reward_rate_start: Option<i64>,
    pub service_endpoints: Vec<ServiceEndpoint>,
    pub stake: Option<i64>,
    pub stake_not_rewarded: Option<i64>,
    pub stake_rewarded: Option<i64>,
    pub staking_period: Option<TimestampRange>,
    pub timestamp: TimestampRange,
}

paged_response!(NetworkNodesResponse, nodes, NetworkNode);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_rate_set() {
        let rates: ExchangeRateSet = serde_json::from_value(serde_json::json!({
            "current_rate": {"cent_equivalent": 596987, "expiration_time": 1649689200, "hbar_equivalent": 30000},
            "next_rate": {"cent_equivalent": 596987, "expiration_time": 1649692800, "hbar_equivalent": 30000},
            "timestamp": "1649689200.123456789",
        }))
        .unwrap();

        assert_eq!(rates.current_rate.hbar_equivalent, 30000);
        assert_eq!(rates.timestamp, Some(Timestamp::new(1649689200, 123456789)));
    }

    #[test]
    fn test_network_nodes_page() {
        let page: NetworkNodesResponse = serde_json::from_value(serde_json::json!({
            "nodes": [{"node_account_id": "0.0.3", "node_id": 0, "service_endpoints": [{"ip_address_v4": "1.2.3.4", "port": 50211}]}],
            "links": {"next": "/api/v1/network/nodes?node.id=gt:0"},
        }))
        .unwrap();

        assert_eq!(page.nodes[0].service_endpoints[0].port, 50211);
        assert_eq!(page.links.next.as_deref(), Some("/api/v1/network/nodes?node.id=gt:0"));
    }
}
