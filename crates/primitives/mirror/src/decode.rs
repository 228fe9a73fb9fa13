use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize};

use crate::DecodeError;

/// Turns an encoded payload field (topic message contents, NFT metadata) into bytes.
pub trait PayloadDecoder: Send + Sync + fmt::Debug {
    fn decode(&self, encoded: &str) -> Result<Vec<u8>, DecodeError>;

    fn decode_utf8(&self, encoded: &str) -> Result<String, DecodeError> {
        let bytes = self.decode(encoded)?;
        String::from_utf8(bytes).map_err(|e| DecodeError::Utf8(e.to_string()))
    }
}

/// Standard alphabet, padded base64. This is how the mirror node encodes payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64PayloadDecoder;

impl PayloadDecoder for Base64PayloadDecoder {
    fn decode(&self, encoded: &str) -> Result<Vec<u8>, DecodeError> {
        STANDARD.decode(encoded.trim()).map_err(|e| DecodeError::Base64(e.to_string()))
    }
}

/// Decoded body of a topic message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TopicMessageContent {
    /// Text that did not parse as JSON.
    Raw { raw_content: String },
    Json(serde_json::Value),
}

impl<'de> Deserialize<'de> for TopicMessageContent {
    /// Only an object whose sole field is a string `raw_content` reads back as `Raw`.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let raw_content = match &value {
            serde_json::Value::Object(map) if map.len() == 1 => {
                map.get("raw_content").and_then(serde_json::Value::as_str).map(str::to_owned)
            }
            _ => None,
        };
        Ok(match raw_content {
            Some(raw_content) => Self::Raw { raw_content },
            None => Self::Json(value),
        })
    }
}

impl TopicMessageContent {
    pub fn from_text(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Raw { raw_content: text },
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Raw { .. } => None,
        }
    }
}

/// Decodes every item, dropping the ones that fail with a warning.
pub fn decode_skipping<R, T, F>(items: Vec<R>, what: &'static str, mut decode: F) -> Vec<T>
where
    F: FnMut(R) -> Result<T, DecodeError>,
{
    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .filter_map(|item| match decode(item) {
            Ok(item) => Some(item),
            Err(err) => {
                tracing::warn!(what, error = %err, "Skipping undecodable item");
                None
            }
        })
        .collect();

    if decoded.len() < total {
        tracing::debug!(what, total, kept = decoded.len(), "Dropped undecodable items from page");
    }
    decoded
}
