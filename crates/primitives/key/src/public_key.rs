use std::fmt;
use std::str::FromStr;

use crate::proto;
use crate::KeyError;

/// DER `SubjectPublicKeyInfo` header for a 32-byte ed25519 key.
const ED25519_DER_PREFIX: [u8; 12] = [0x30, 0x2a, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x03, 0x21, 0x00];
/// DER `SubjectPublicKeyInfo` header for a 33-byte compressed secp256k1 key.
const SECP256K1_DER_PREFIX: [u8; 14] =
    [0x30, 0x2d, 0x30, 0x07, 0x06, 0x05, 0x2b, 0x81, 0x04, 0x00, 0x0a, 0x03, 0x22, 0x00];

const ED25519_LEN: usize = 32;
const SECP256K1_COMPRESSED_LEN: usize = 33;

/// A ledger account public key.
///
/// The canonical string form ([fmt::Display]) is the lowercase hex encoding of the DER
/// `SubjectPublicKeyInfo`, which is how the ledger SDKs print keys.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum PublicKey {
    Ed25519([u8; ED25519_LEN]),
    EcdsaSecp256k1([u8; SECP256K1_COMPRESSED_LEN]),
}

impl PublicKey {
    /// Accepts either the raw 32 bytes or the DER encoding.
    pub fn from_ed25519_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let raw = bytes.strip_prefix(&ED25519_DER_PREFIX[..]).unwrap_or(bytes);
        let raw: [u8; ED25519_LEN] = raw
            .try_into()
            .map_err(|_| KeyError::InvalidPublicKey(format!("ed25519 key must be 32 bytes, got {}", raw.len())))?;
        Ok(Self::Ed25519(raw))
    }

    /// Accepts either the raw compressed 33 bytes or the DER encoding.
    pub fn from_secp256k1_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let raw = bytes.strip_prefix(&SECP256K1_DER_PREFIX[..]).unwrap_or(bytes);
        let raw: [u8; SECP256K1_COMPRESSED_LEN] = raw.try_into().map_err(|_| {
            KeyError::InvalidPublicKey(format!("compressed secp256k1 key must be 33 bytes, got {}", raw.len()))
        })?;
        if raw[0] != 0x02 && raw[0] != 0x03 {
            return Err(KeyError::InvalidPublicKey(format!("invalid secp256k1 point prefix 0x{:02x}", raw[0])));
        }
        Ok(Self::EcdsaSecp256k1(raw))
    }

    pub fn to_bytes_raw(&self) -> &[u8] {
        match self {
            Self::Ed25519(raw) => raw.as_slice(),
            Self::EcdsaSecp256k1(raw) => raw.as_slice(),
        }
    }

    pub fn to_bytes_der(&self) -> Vec<u8> {
        let prefix: &[u8] = match self {
            Self::Ed25519(_) => ED25519_DER_PREFIX.as_slice(),
            Self::EcdsaSecp256k1(_) => SECP256K1_DER_PREFIX.as_slice(),
        };
        [prefix, self.to_bytes_raw()].concat()
    }

    pub fn to_string_raw(&self) -> String {
        hex::encode(self.to_bytes_raw())
    }

    pub fn algorithm(&self) -> &'static str {
        match self {
            Self::Ed25519(_) => "ED25519",
            Self::EcdsaSecp256k1(_) => "ECDSA_SECP256K1",
        }
    }

    pub fn to_proto(&self) -> proto::Key {
        let key = match self {
            Self::Ed25519(raw) => proto::key::Key::Ed25519(raw.to_vec()),
            Self::EcdsaSecp256k1(raw) => proto::key::Key::EcdsaSecp256k1(raw.to_vec()),
        };
        proto::Key { key: Some(key) }
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.to_bytes_der()))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({}:{})", self.algorithm(), self.to_string_raw())
    }
}

impl FromStr for PublicKey {
    type Err = KeyError;

    /// Parses DER or raw hex, with or without a `0x` prefix. The algorithm is inferred from the
    /// length and, for DER, from the header.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| KeyError::InvalidPublicKey(format!("invalid hex: {e}")))?;

        if bytes.starts_with(&ED25519_DER_PREFIX) || bytes.len() == ED25519_LEN {
            Self::from_ed25519_bytes(&bytes)
        } else if bytes.starts_with(&SECP256K1_DER_PREFIX) || bytes.len() == SECP256K1_COMPRESSED_LEN {
            Self::from_secp256k1_bytes(&bytes)
        } else {
            Err(KeyError::InvalidPublicKey(format!("unrecognized key encoding of {} bytes", bytes.len())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rstest::rstest;

    const ED_RAW: &str = "0101010101010101010101010101010101010101010101010101010101010101";

    #[test]
    fn test_display_is_der_hex() {
        let key = PublicKey::Ed25519([1; 32]);
        assert_eq!(key.to_string(), format!("302a300506032b6570032100{ED_RAW}"));
        assert_eq!(key.to_string_raw(), ED_RAW);
    }

    #[rstest]
    #[case(ED_RAW)]
    #[case("0x0101010101010101010101010101010101010101010101010101010101010101")]
    #[case("302a300506032b65700321000101010101010101010101010101010101010101010101010101010101010101")]
    fn test_parse_ed25519(#[case] input: &str) {
        assert_eq!(input.parse::<PublicKey>().unwrap(), PublicKey::Ed25519([1; 32]));
    }

    #[test]
    fn test_parse_secp256k1_roundtrips_through_display() {
        let mut raw = [7u8; 33];
        raw[0] = 0x02;
        let key = PublicKey::EcdsaSecp256k1(raw);
        assert!(key.to_string().starts_with("302d300706052b8104000a032200"));
        assert_eq!(key.to_string().parse::<PublicKey>().unwrap(), key);
        assert_eq!(key.to_string_raw().parse::<PublicKey>().unwrap(), key);
    }

    #[rstest]
    #[case("zz")]
    #[case("0102")]
    #[case("040404040404040404040404040404040404040404040404040404040404040404")]
    fn test_parse_rejects_garbage(#[case] input: &str) {
        assert_matches!(input.parse::<PublicKey>(), Err(KeyError::InvalidPublicKey(_)));
    }
}
