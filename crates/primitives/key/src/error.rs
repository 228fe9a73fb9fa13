#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("Failed to decode key structure: {0}")]
    Decode(#[from] prost::DecodeError),
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),
    #[error("Key structure is nested deeper than {max} levels")]
    DepthExceeded { max: usize },
}
