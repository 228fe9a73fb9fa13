use mk_mirror::schedule::{Schedule, ScheduleStatus};
use mk_mirror::MirrorError;

use crate::MirrorNodeClient;

impl MirrorNodeClient {
    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_schedule_info(&self, schedule_id: &str) -> Result<Schedule, MirrorError> {
        self.request("schedules").await.add_uri_segment(schedule_id).send_get().await
    }

    /// `None` when the schedule does not exist.
    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_scheduled_transaction_status(
        &self,
        schedule_id: &str,
    ) -> Result<Option<ScheduleStatus>, MirrorError> {
        let schedule: Option<Schedule> =
            self.request("schedules").await.add_uri_segment(schedule_id).send_get_optional().await?;
        Ok(schedule.map(|schedule| schedule.status()))
    }
}
