use mk_mirror::block::{Block, BlockQuery, BlockRef, BlocksResponse};
use mk_mirror::{MirrorError, MirrorQuery};

use crate::MirrorNodeClient;

impl MirrorNodeClient {
    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_blocks(&self, query: BlockQuery) -> Result<Vec<Block>, MirrorError> {
        self.request("blocks")
            .await
            .add_params(query.query_pairs())
            .paginate::<BlocksResponse>(query.page_options())
            .await
    }

    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_block(&self, block: &BlockRef) -> Result<Option<Block>, MirrorError> {
        self.request("blocks").await.add_uri_segment(block).send_get_optional().await
    }
}
