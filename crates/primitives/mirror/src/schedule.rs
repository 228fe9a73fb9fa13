use serde::{Deserialize, Serialize};

use crate::account::MirrorKey;
use crate::Timestamp;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleSignature {
    pub consensus_timestamp: Option<Timestamp>,
    pub public_key_prefix: String,
    pub signature: String,
    #[serde(rename = "type")]
    pub signature_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schedule {
    pub admin_key: Option<MirrorKey>,
    pub consensus_timestamp: Option<Timestamp>,
    pub creator_account_id: Option<String>,
    pub deleted: bool,
    pub executed_timestamp: Option<Timestamp>,
    pub expiration_time: Option<Timestamp>,
    pub memo: String,
    pub payer_account_id: Option<String>,
    pub schedule_id: String,
    pub signatures: Vec<ScheduleSignature>,
    /// Base64 of the scheduled transaction body.
    pub transaction_body: Option<String>,
    pub wait_for_expiry: bool,
}

/// Lifecycle state of a scheduled transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScheduleStatus {
    Pending { expiration_time: Option<Timestamp> },
    Executed { executed_timestamp: Timestamp },
    Deleted,
}

impl Schedule {
    pub fn status(&self) -> ScheduleStatus {
        if self.deleted {
            ScheduleStatus::Deleted
        } else if let Some(executed_timestamp) = self.executed_timestamp {
            ScheduleStatus::Executed { executed_timestamp }
        } else {
            ScheduleStatus::Pending { expiration_time: self.expiration_time }
        }
    }
}
