use mk_mirror::account::{Nft, NftsResponse};
use mk_mirror::token::TokenInfo;
use mk_mirror::{MirrorError, PageOptions};

use crate::MirrorNodeClient;

impl MirrorNodeClient {
    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_token_info(&self, token_id: &str) -> Result<Option<TokenInfo>, MirrorError> {
        self.request("tokens").await.add_uri_segment(token_id).send_get_optional().await
    }

    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_nft_info(&self, token_id: &str, serial_number: i64) -> Result<Option<Nft>, MirrorError> {
        let nft: Option<Nft> = self
            .request("tokens")
            .await
            .add_uri_segment(token_id)
            .add_uri_segment("nfts")
            .add_uri_segment(serial_number)
            .send_get_optional()
            .await?;
        Ok(nft.map(|nft| nft.decode_metadata(self.decoder.as_ref())))
    }

    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_nfts_by_token(&self, token_id: &str, options: PageOptions) -> Result<Vec<Nft>, MirrorError> {
        let nfts = self
            .request("tokens")
            .await
            .add_uri_segment(token_id)
            .add_uri_segment("nfts")
            .paginate::<NftsResponse>(options)
            .await?;
        Ok(nfts.into_iter().map(|nft| nft.decode_metadata(self.decoder.as_ref())).collect())
    }
}
