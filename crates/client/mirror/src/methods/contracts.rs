use mk_mirror::contract::{
    Contract, ContractAction, ContractActionsResponse, ContractCallRequest, ContractCallResponse, ContractLog,
    ContractLogQuery, ContractLogsResponse, ContractRef, ContractResult, ContractResultQuery, ContractResultsResponse,
    ContractStateEntry, ContractStateQuery, ContractStateResponse, ContractsResponse, OpcodeOptions, OpcodeTraces,
};
use mk_mirror::transaction::TransactionLookup;
use mk_mirror::{MirrorError, MirrorQuery, PageOptions, RangeFilter, Timestamp};

use crate::MirrorNodeClient;

/// Contract result endpoints address a transaction by id or hash only.
fn id_or_hash(lookup: &TransactionLookup) -> Result<&str, MirrorError> {
    lookup.id_or_hash().ok_or_else(|| {
        MirrorError::InvalidArgument(format!("Contract results are looked up by transaction id or hash, got {lookup}"))
    })
}

impl MirrorNodeClient {
    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_contracts(&self, options: PageOptions) -> Result<Vec<Contract>, MirrorError> {
        self.request("contracts").await.paginate::<ContractsResponse>(options).await
    }

    /// The contract, as of `timestamp` when given.
    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_contract(
        &self,
        contract: &ContractRef,
        timestamp: Option<RangeFilter<Timestamp>>,
    ) -> Result<Option<Contract>, MirrorError> {
        self.request("contracts")
            .await
            .add_uri_segment(contract)
            .add_opt_param("timestamp", timestamp)
            .send_get_optional()
            .await
    }

    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_contract_results(&self, query: ContractResultQuery) -> Result<Vec<ContractResult>, MirrorError> {
        self.request("contracts/results")
            .await
            .add_params(query.query_pairs())
            .paginate::<ContractResultsResponse>(query.page_options())
            .await
    }

    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_contract_results_by_contract(
        &self,
        contract: &ContractRef,
        query: ContractResultQuery,
    ) -> Result<Vec<ContractResult>, MirrorError> {
        self.request("contracts")
            .await
            .add_uri_segment(contract)
            .add_uri_segment("results")
            .add_params(query.query_pairs())
            .paginate::<ContractResultsResponse>(query.page_options())
            .await
    }

    /// Result of one contract transaction. `nonce` selects a child transaction.
    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_contract_result(
        &self,
        transaction: &TransactionLookup,
        nonce: Option<u32>,
    ) -> Result<Option<ContractResult>, MirrorError> {
        self.request("contracts/results")
            .await
            .add_uri_segment(id_or_hash(transaction)?)
            .add_opt_param("nonce", nonce)
            .send_get_optional()
            .await
    }

    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_contract_logs(&self, query: ContractLogQuery) -> Result<Vec<ContractLog>, MirrorError> {
        self.request("contracts/results/logs")
            .await
            .add_params(query.query_pairs())
            .paginate::<ContractLogsResponse>(query.page_options())
            .await
    }

    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_contract_logs_by_contract(
        &self,
        contract: &ContractRef,
        query: ContractLogQuery,
    ) -> Result<Vec<ContractLog>, MirrorError> {
        self.request("contracts")
            .await
            .add_uri_segment(contract)
            .add_uri_segment("results")
            .add_uri_segment("logs")
            .add_params(query.query_pairs())
            .paginate::<ContractLogsResponse>(query.page_options())
            .await
    }

    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_contract_actions(
        &self,
        transaction: &TransactionLookup,
        options: PageOptions,
    ) -> Result<Vec<ContractAction>, MirrorError> {
        self.request("contracts/results")
            .await
            .add_uri_segment(id_or_hash(transaction)?)
            .add_uri_segment("actions")
            .paginate::<ContractActionsResponse>(options)
            .await
    }

    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_contract_state(
        &self,
        contract: &ContractRef,
        query: ContractStateQuery,
    ) -> Result<Vec<ContractStateEntry>, MirrorError> {
        self.request("contracts")
            .await
            .add_uri_segment(contract)
            .add_uri_segment("state")
            .add_params(query.query_pairs())
            .paginate::<ContractStateResponse>(query.page_options())
            .await
    }

    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_opcode_traces(
        &self,
        transaction: &TransactionLookup,
        options: OpcodeOptions,
    ) -> Result<Option<OpcodeTraces>, MirrorError> {
        self.request("contracts/results")
            .await
            .add_uri_segment(id_or_hash(transaction)?)
            .add_uri_segment("opcodes")
            .add_params(options.query_pairs())
            .send_get_optional()
            .await
    }

    /// Simulates a contract call without submitting a transaction.
    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn read_contract(&self, request: &ContractCallRequest) -> Result<ContractCallResponse, MirrorError> {
        self.request("contracts/call").await.send_post(request).await
    }
}
