use mk_resilience::{classify_status, FailureClass};
use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum MirrorError {
    #[error("Request to {url} failed with status {status}: {body}")]
    Status { url: String, status: StatusCode, body: String },
    #[error("Error calling {url}: {source:#}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Max retries ({attempts}) reached for {url}: {last_error}")]
    MaxRetriesReached { url: String, attempts: usize, last_status: Option<StatusCode>, last_error: String },
    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Error deserializing response from {url}: {serde_error:#}")]
    DeserializeBody { url: String, serde_error: serde_json::Error },
    #[error("Error serializing request: {0:#}")]
    SerializeRequest(#[from] serde_json::Error),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Key(#[from] mk_key::KeyError),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Failed to build the HTTP client: {0:#}")]
    HttpClient(#[source] reqwest::Error),
}

impl MirrorError {
    /// Whether another attempt of the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            MirrorError::Status { status, .. } => classify_status(status.as_u16()) == FailureClass::Retryable,
            MirrorError::Transport { .. } => true,
            _ => false,
        }
    }

    /// The HTTP status of the failure, if the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            MirrorError::Status { status, .. } => Some(*status),
            MirrorError::MaxRetriesReached { last_status, .. } => *last_status,
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

/// Failure to decode a field of a response.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("Invalid base64 payload: {0}")]
    Base64(String),
    #[error("Payload is not valid UTF-8: {0}")]
    Utf8(String),
    #[error("Invalid hex: {0}")]
    Hex(String),
    #[error("Invalid timestamp {0:?}, expected \"seconds.nanoseconds\"")]
    Timestamp(String),
    #[error("Invalid filter {0:?}")]
    Filter(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(StatusCode::BAD_REQUEST, false)]
    #[case(StatusCode::FORBIDDEN, false)]
    #[case(StatusCode::NOT_FOUND, true)]
    #[case(StatusCode::TOO_MANY_REQUESTS, true)]
    #[case(StatusCode::BAD_GATEWAY, true)]
    fn test_status_retryability(#[case] status: StatusCode, #[case] retryable: bool) {
        let err = MirrorError::Status { url: "https://host/api/v1/x".into(), status, body: String::new() };
        assert_eq!(err.is_retryable(), retryable);
    }

    #[test]
    fn test_message_keeps_status_text() {
        let err = MirrorError::Status {
            url: "https://host/api/v1/x".into(),
            status: StatusCode::UNAUTHORIZED,
            body: "missing api key".into(),
        };
        assert_eq!(err.to_string(), "Request to https://host/api/v1/x failed with status 401 Unauthorized: missing api key");
    }

    #[test]
    fn test_exhausted_not_found_is_not_found() {
        let err = MirrorError::MaxRetriesReached {
            url: "u".into(),
            attempts: 3,
            last_status: Some(StatusCode::NOT_FOUND),
            last_error: "not found".into(),
        };
        assert!(err.is_not_found());
        assert!(!err.is_retryable());
    }
}
