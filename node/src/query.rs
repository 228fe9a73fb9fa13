use anyhow::Context;
use mk_mirror::contract::{ContractCallRequest, ContractRef};
use mk_mirror::topic::TopicMessageQuery;
use mk_mirror_client::MirrorNodeClient;
use serde::Serialize;
use serde_json::{json, Value};

use crate::cli::Command;

fn to_json(value: impl Serialize) -> anyhow::Result<Value> {
    serde_json::to_value(value).context("Serializing the response")
}

fn found(value: Option<impl Serialize>, what: &str, id: &str) -> anyhow::Result<Value> {
    match value {
        Some(value) => to_json(value),
        None => anyhow::bail!("{what} {id} not found"),
    }
}

impl Command {
    /// Runs the query against `client` and returns what should be printed.
    pub async fn run(self, client: &MirrorNodeClient) -> anyhow::Result<Value> {
        match self {
            Command::Account { account_id } => to_json(client.get_account(&account_id).await?),
            Command::Balance { account_id } => {
                let hbar = client.get_account_balance(&account_id).await?;
                Ok(json!({ "account": account_id, "hbar": hbar.to_string() }))
            }
            Command::Tokens { account_id, page } => {
                to_json(client.get_account_tokens(&account_id, page.page_options()).await?)
            }
            Command::Nfts { account_id, token_id, page } => {
                to_json(client.get_account_nfts(&account_id, token_id.as_deref(), page.page_options()).await?)
            }
            Command::KeyAccess { account_id, public_key } => {
                let has_access = client.check_account_key_access(&account_id, &public_key).await?;
                Ok(json!({ "account": account_id, "public_key": public_key.to_string(), "has_access": has_access }))
            }
            Command::Topic { topic_id } => to_json(client.get_topic_info(&topic_id).await?),
            Command::Messages { topic_id, sequence_number, timestamp, order, page } => {
                let query = TopicMessageQuery {
                    sequence_number,
                    timestamp,
                    order,
                    limit: page.limit,
                    max_pages: page.max_pages,
                };
                to_json(client.get_topic_messages(&topic_id, query).await?)
            }
            Command::Token { token_id } => found(client.get_token_info(&token_id).await?, "Token", &token_id),
            Command::Schedule { schedule_id } => {
                let schedule = client.get_schedule_info(&schedule_id).await?;
                let status = schedule.status();
                Ok(json!({ "schedule": to_json(schedule)?, "state": to_json(status)? }))
            }
            Command::Transaction { lookup } => {
                let id = lookup.to_string();
                found(client.get_transaction(&lookup).await?, "Transaction", &id)
            }
            Command::Block { block } => {
                let id = block.to_string();
                found(client.get_block(&block).await?, "Block", &id)
            }
            Command::Contract { contract } => {
                found(client.get_contract(&ContractRef::parse(&contract), None).await?, "Contract", &contract)
            }
            Command::Call { to, data, from, block } => {
                let request = ContractCallRequest { from, block: Some(block), ..ContractCallRequest::new(to, data) };
                to_json(client.read_contract(&request).await?)
            }
            Command::ExchangeRate { at } => to_json(client.get_exchange_rate(at).await?),
            Command::Supply => to_json(client.get_network_supply(None).await?),
            Command::Nodes { page } => to_json(client.get_network_nodes(page.page_options()).await?),
        }
    }
}
