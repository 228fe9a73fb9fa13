use mk_mirror::decode::decode_skipping;
use mk_mirror::topic::{CustomFees, RawTopicMessage, TopicInfo, TopicMessage, TopicMessageQuery, TopicMessagesResponse};
use mk_mirror::{MirrorError, MirrorQuery};

use crate::MirrorNodeClient;

impl MirrorNodeClient {
    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_topic_info(&self, topic_id: &str) -> Result<TopicInfo, MirrorError> {
        self.request("topics").await.add_uri_segment(topic_id).send_get().await
    }

    async fn get_topic_info_optional(&self, topic_id: &str) -> Result<Option<TopicInfo>, MirrorError> {
        self.request("topics").await.add_uri_segment(topic_id).send_get_optional().await
    }

    /// `None` when the topic does not exist or has an empty memo.
    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_topic_memo(&self, topic_id: &str) -> Result<Option<String>, MirrorError> {
        let topic = self.get_topic_info_optional(topic_id).await?;
        Ok(topic.map(|topic| topic.memo).filter(|memo| !memo.is_empty()))
    }

    /// `None` when the topic does not exist or charges no custom fees.
    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_topic_fees(&self, topic_id: &str) -> Result<Option<CustomFees>, MirrorError> {
        let topic = self.get_topic_info_optional(topic_id).await?;
        Ok(topic.and_then(|topic| topic.custom_fees).filter(|fees| !fees.is_empty()))
    }

    /// Messages of a topic with decoded payloads. Messages whose payload cannot be decoded are skipped.
    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_topic_messages(
        &self,
        topic_id: &str,
        query: TopicMessageQuery,
    ) -> Result<Vec<TopicMessage>, MirrorError> {
        let raw: Vec<RawTopicMessage> = self
            .request("topics")
            .await
            .add_uri_segment(topic_id)
            .add_uri_segment("messages")
            .add_params(query.query_pairs())
            .paginate::<TopicMessagesResponse>(query.page_options())
            .await?;

        Ok(decode_skipping(raw, "topic message", |message| TopicMessage::decode(message, self.decoder.as_ref())))
    }

    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_topic_message(
        &self,
        topic_id: &str,
        sequence_number: u64,
    ) -> Result<Option<TopicMessage>, MirrorError> {
        let raw: Option<RawTopicMessage> = self
            .request("topics")
            .await
            .add_uri_segment(topic_id)
            .add_uri_segment("messages")
            .add_uri_segment(sequence_number)
            .send_get_optional()
            .await?;

        raw.map(|message| TopicMessage::decode(message, self.decoder.as_ref())).transpose().map_err(Into::into)
    }
}
