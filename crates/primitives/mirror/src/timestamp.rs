use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::DecodeError;

const NANOS_DIGITS: usize = 9;

/// A consensus timestamp, written `"seconds.nanoseconds"` by the mirror node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp {
    pub seconds: i64,
    pub nanos: u32,
}

impl Timestamp {
    pub fn new(seconds: i64, nanos: u32) -> Self {
        Self { seconds, nanos }
    }

    /// Fails when the value does not fit in an `i64` count of milliseconds.
    pub fn to_epoch_millis(&self) -> Result<i64, DecodeError> {
        self.seconds
            .checked_mul(1000)
            .and_then(|millis| millis.checked_add(i64::from(self.nanos / 1_000_000)))
            .ok_or_else(|| DecodeError::Timestamp(self.to_string()))
    }

    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.seconds, self.nanos)
    }

    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self { seconds: datetime.timestamp(), nanos: datetime.timestamp_subsec_nanos() }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.seconds, self.nanos)
    }
}

impl FromStr for Timestamp {
    type Err = DecodeError;

    /// A missing fractional part is read as zero nanoseconds. Signs are rejected, consensus
    /// timestamps are never before the epoch.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DecodeError::Timestamp(s.to_string());
        let (seconds, fraction) = s.split_once('.').unwrap_or((s, ""));

        if !seconds.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let seconds = seconds.parse::<i64>().map_err(|_| invalid())?;
        if fraction.len() > NANOS_DIGITS || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let nanos = if fraction.is_empty() {
            0
        } else {
            // "1.5" is half a second: right-pad to nanosecond precision.
            format!("{fraction:0<NANOS_DIGITS$}").parse::<u32>().map_err(|_| invalid())?
        };

        Ok(Self { seconds, nanos })
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Validity window of an entity snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimestampRange {
    #[serde(default)]
    pub from: Option<Timestamp>,
    #[serde(default)]
    pub to: Option<Timestamp>,
}
