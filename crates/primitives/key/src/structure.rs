use prost::Message;

use crate::access::MAX_KEY_DEPTH;
use crate::proto::{self, key::Key as ProtoKeyKind};
use crate::{KeyError, PublicKey};

/// A decoded key structure.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyStructure {
    /// A single public key.
    Simple(PublicKey),
    /// Every key of the list must sign for the list to be satisfied.
    KeyList(Vec<KeyStructure>),
    /// At least `threshold` keys of the list must sign.
    Threshold { threshold: u32, keys: Vec<KeyStructure> },
    /// Key material that is not a comparable public key. Kept so lists retain their shape.
    Opaque(OpaqueKey),
}

#[derive(Debug, Clone, PartialEq)]
pub enum OpaqueKey {
    ContractId(proto::ContractId),
    DelegatableContractId(proto::ContractId),
    Rsa3072(Vec<u8>),
    Ecdsa384(Vec<u8>),
    /// An ed25519 entry whose bytes are not a valid key.
    InvalidEd25519(Vec<u8>),
    /// A secp256k1 entry whose bytes are not a valid compressed key.
    InvalidSecp256k1(Vec<u8>),
    /// A `Key` message with no variant set.
    Empty,
}

impl OpaqueKey {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::ContractId(_) => "contract id",
            Self::DelegatableContractId(_) => "delegatable contract id",
            Self::Rsa3072(_) => "RSA-3072 key",
            Self::Ecdsa384(_) => "ECDSA-384 key",
            Self::InvalidEd25519(_) => "malformed ed25519 key",
            Self::InvalidSecp256k1(_) => "malformed secp256k1 key",
            Self::Empty => "empty key",
        }
    }
}

impl KeyStructure {
    /// Decode the protobuf wire form.
    ///
    /// Fails if the bytes are not a `Key` message or if lists are nested deeper than
    /// [MAX_KEY_DEPTH]. Malformed leaves do not fail decoding, they become [KeyStructure::Opaque].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let key = proto::Key::decode(bytes)?;
        Self::from_proto(key)
    }

    pub fn from_proto(key: proto::Key) -> Result<Self, KeyError> {
        Self::from_proto_at(key, 0)
    }

    fn from_proto_at(key: proto::Key, depth: usize) -> Result<Self, KeyError> {
        if depth > MAX_KEY_DEPTH {
            return Err(KeyError::DepthExceeded { max: MAX_KEY_DEPTH });
        }

        let Some(kind) = key.key else {
            return Ok(Self::Opaque(OpaqueKey::Empty));
        };

        let structure = match kind {
            ProtoKeyKind::Ed25519(bytes) => match PublicKey::from_ed25519_bytes(&bytes) {
                Ok(key) => Self::Simple(key),
                Err(_) => Self::Opaque(OpaqueKey::InvalidEd25519(bytes)),
            },
            ProtoKeyKind::EcdsaSecp256k1(bytes) => match PublicKey::from_secp256k1_bytes(&bytes) {
                Ok(key) => Self::Simple(key),
                Err(_) => Self::Opaque(OpaqueKey::InvalidSecp256k1(bytes)),
            },
            ProtoKeyKind::KeyList(list) => Self::KeyList(Self::list_from_proto(list, depth)?),
            ProtoKeyKind::ThresholdKey(threshold_key) => Self::Threshold {
                threshold: threshold_key.threshold,
                keys: Self::list_from_proto(threshold_key.keys.unwrap_or_default(), depth)?,
            },
            ProtoKeyKind::ContractId(id) => Self::Opaque(OpaqueKey::ContractId(id)),
            ProtoKeyKind::DelegatableContractId(id) => Self::Opaque(OpaqueKey::DelegatableContractId(id)),
            ProtoKeyKind::Rsa3072(bytes) => Self::Opaque(OpaqueKey::Rsa3072(bytes)),
            ProtoKeyKind::Ecdsa384(bytes) => Self::Opaque(OpaqueKey::Ecdsa384(bytes)),
        };
        Ok(structure)
    }

    fn list_from_proto(list: proto::KeyList, depth: usize) -> Result<Vec<Self>, KeyError> {
        list.keys.into_iter().map(|key| Self::from_proto_at(key, depth + 1)).collect()
    }

    pub fn to_proto(&self) -> proto::Key {
        let kind = match self {
            Self::Simple(key) => return key.to_proto(),
            Self::KeyList(keys) => ProtoKeyKind::KeyList(Self::list_to_proto(keys)),
            Self::Threshold { threshold, keys } => ProtoKeyKind::ThresholdKey(proto::ThresholdKey {
                threshold: *threshold,
                keys: Some(Self::list_to_proto(keys)),
            }),
            Self::Opaque(opaque) => match opaque {
                OpaqueKey::ContractId(id) => ProtoKeyKind::ContractId(id.clone()),
                OpaqueKey::DelegatableContractId(id) => ProtoKeyKind::DelegatableContractId(id.clone()),
                OpaqueKey::Rsa3072(bytes) => ProtoKeyKind::Rsa3072(bytes.clone()),
                OpaqueKey::Ecdsa384(bytes) => ProtoKeyKind::Ecdsa384(bytes.clone()),
                OpaqueKey::InvalidEd25519(bytes) => ProtoKeyKind::Ed25519(bytes.clone()),
                OpaqueKey::InvalidSecp256k1(bytes) => ProtoKeyKind::EcdsaSecp256k1(bytes.clone()),
                OpaqueKey::Empty => return proto::Key { key: None },
            },
        };
        proto::Key { key: Some(kind) }
    }

    fn list_to_proto(keys: &[Self]) -> proto::KeyList {
        proto::KeyList { keys: keys.iter().map(Self::to_proto).collect() }
    }

    /// Encode to the protobuf wire form.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_proto().encode_to_vec()
    }
}

impl From<PublicKey> for KeyStructure {
    fn from(key: PublicKey) -> Self {
        Self::Simple(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_wire_roundtrip_keeps_shape() {
        let structure = KeyStructure::Threshold {
            threshold: 2,
            keys: vec![
                KeyStructure::Simple(PublicKey::Ed25519([1; 32])),
                KeyStructure::KeyList(vec![
                    KeyStructure::Simple(PublicKey::Ed25519([2; 32])),
                    KeyStructure::Opaque(OpaqueKey::Rsa3072(vec![9, 9])),
                ]),
            ],
        };
        assert_eq!(KeyStructure::from_bytes(&structure.to_bytes()).unwrap(), structure);
    }

    #[test]
    fn test_short_ed25519_becomes_opaque() {
        let key = proto::Key { key: Some(ProtoKeyKind::Ed25519(vec![1, 2, 3])) };
        assert_eq!(
            KeyStructure::from_proto(key).unwrap(),
            KeyStructure::Opaque(OpaqueKey::InvalidEd25519(vec![1, 2, 3]))
        );
    }

    #[test]
    fn test_threshold_without_list_is_empty() {
        let key = proto::Key { key: Some(ProtoKeyKind::ThresholdKey(proto::ThresholdKey { threshold: 1, keys: None })) };
        assert_eq!(KeyStructure::from_proto(key).unwrap(), KeyStructure::Threshold { threshold: 1, keys: vec![] });
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        assert_matches!(KeyStructure::from_bytes(&[0xff, 0xff, 0xff]), Err(KeyError::Decode(_)));
    }
}
