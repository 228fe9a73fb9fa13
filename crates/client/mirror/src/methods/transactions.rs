use mk_mirror::transaction::{Transaction, TransactionLookup, TransactionsResponse};
use mk_mirror::MirrorError;

use crate::MirrorNodeClient;

impl MirrorNodeClient {
    /// The transaction matching `lookup`, `None` if there is none.
    ///
    /// An id can match a parent transaction and its children, the parent comes first.
    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_transaction(&self, lookup: &TransactionLookup) -> Result<Option<Transaction>, MirrorError> {
        let request = self.request("transactions").await;
        let request = match lookup {
            TransactionLookup::Id(_) | TransactionLookup::Hash(_) => request.add_uri_segment(lookup),
            TransactionLookup::Timestamp(timestamp) => request.add_param("timestamp", timestamp),
        };

        let page: Option<TransactionsResponse> = request.send_get_optional().await?;
        Ok(page.and_then(|page| page.transactions.into_iter().next()))
    }
}
