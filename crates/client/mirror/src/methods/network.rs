use chrono::{DateTime, Utc};
use mk_mirror::network::{ExchangeRateSet, NetworkFees, NetworkNode, NetworkNodesResponse, NetworkStake, NetworkSupply};
use mk_mirror::units::hbar_price_usd;
use mk_mirror::{MirrorError, PageOptions, RangeFilter, Timestamp};

use crate::MirrorNodeClient;

impl MirrorNodeClient {
    /// Exchange rate in effect at `timestamp`, or the current one.
    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_exchange_rate(&self, timestamp: Option<Timestamp>) -> Result<ExchangeRateSet, MirrorError> {
        self.request("network/exchangerate")
            .await
            .add_opt_param("timestamp", timestamp.map(RangeFilter::lte))
            .send_get()
            .await
    }

    /// USD price of one hbar at `date`. `None` if the exchange rate has a zero hbar equivalent.
    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_hbar_price(&self, date: DateTime<Utc>) -> Result<Option<f64>, MirrorError> {
        let rates = self.get_exchange_rate(Some(Timestamp::from_datetime(date))).await?;
        Ok(hbar_price_usd(&rates.current_rate))
    }

    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_network_fees(&self, timestamp: Option<Timestamp>) -> Result<NetworkFees, MirrorError> {
        self.request("network/fees")
            .await
            .add_opt_param("timestamp", timestamp.map(RangeFilter::lte))
            .send_get()
            .await
    }

    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_network_supply(&self, timestamp: Option<Timestamp>) -> Result<NetworkSupply, MirrorError> {
        self.request("network/supply")
            .await
            .add_opt_param("timestamp", timestamp.map(RangeFilter::lte))
            .send_get()
            .await
    }

    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_network_stake(&self) -> Result<NetworkStake, MirrorError> {
        self.request("network/stake").await.send_get().await
    }

    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_network_nodes(&self, options: PageOptions) -> Result<Vec<NetworkNode>, MirrorError> {
        self.request("network/nodes").await.paginate::<NetworkNodesResponse>(options).await
    }
}
