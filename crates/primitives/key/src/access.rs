use crate::{KeyError, KeyStructure, PublicKey};

/// Maximum number of nested key lists accepted in a key structure.
pub const MAX_KEY_DEPTH: usize = 32;

/// Whether `candidate` appears anywhere in the serialized key structure.
///
/// This answers "could this key ever be one of the signers", not "is this key enough to sign":
/// threshold counts are not consulted and key lists match if any member matches.
///
/// Fails only if `key_bytes` cannot be decoded as a key structure. Entries that are not
/// comparable public keys are skipped.
pub fn has_access(key_bytes: &[u8], candidate: &PublicKey) -> Result<bool, KeyError> {
    let structure = KeyStructure::from_bytes(key_bytes)?;
    Ok(structure.contains_key(candidate))
}

impl KeyStructure {
    /// Depth-first search for `candidate`, stopping at the first match.
    pub fn contains_key(&self, candidate: &PublicKey) -> bool {
        let candidate = candidate.to_string();
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            match node {
                KeyStructure::Simple(key) => {
                    if key.to_string() == candidate {
                        return true;
                    }
                }
                KeyStructure::KeyList(keys) | KeyStructure::Threshold { keys, .. } => {
                    // Reversed so children are visited in list order.
                    stack.extend(keys.iter().rev());
                }
                KeyStructure::Opaque(opaque) => {
                    tracing::debug!(kind = opaque.describe(), "Skipping key entry during access check");
                }
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::{self, key::Key as ProtoKeyKind};
    use crate::OpaqueKey;
    use assert_matches::assert_matches;
    use prost::Message;
    use rstest::rstest;

    fn ed(byte: u8) -> PublicKey {
        PublicKey::Ed25519([byte; 32])
    }

    fn simple(byte: u8) -> KeyStructure {
        KeyStructure::Simple(ed(byte))
    }

    #[rstest]
    #[case(1, true)]
    #[case(2, false)]
    fn test_simple_key(#[case] candidate: u8, #[case] expected: bool) {
        let bytes = simple(1).to_bytes();
        assert_eq!(has_access(&bytes, &ed(candidate)).unwrap(), expected);
    }

    #[rstest]
    #[case(1, true)]
    #[case(2, true)]
    #[case(3, false)]
    fn test_key_list_is_a_disjunction(#[case] candidate: u8, #[case] expected: bool) {
        let bytes = KeyStructure::KeyList(vec![simple(1), simple(2)]).to_bytes();
        assert_eq!(has_access(&bytes, &ed(candidate)).unwrap(), expected);
    }

    #[test]
    fn test_nested_threshold_matches_at_depth_two() {
        let structure = KeyStructure::Threshold {
            threshold: 1,
            keys: vec![simple(1), KeyStructure::KeyList(vec![simple(2), simple(3)])],
        };
        assert!(has_access(&structure.to_bytes(), &ed(3)).unwrap());
        assert!(!has_access(&structure.to_bytes(), &ed(4)).unwrap());
    }

    #[test]
    fn test_threshold_count_is_ignored() {
        let structure = KeyStructure::Threshold { threshold: 3, keys: vec![simple(1), simple(2), simple(3)] };
        assert!(has_access(&structure.to_bytes(), &ed(2)).unwrap());
    }

    #[test]
    fn test_secp256k1_leaf_matches() {
        let mut raw = [5u8; 33];
        raw[0] = 0x03;
        let key = PublicKey::EcdsaSecp256k1(raw);
        let bytes = KeyStructure::KeyList(vec![simple(1), KeyStructure::Simple(key.clone())]).to_bytes();
        assert!(has_access(&bytes, &key).unwrap());
    }

    #[test]
    fn test_malformed_children_are_skipped() {
        let list = proto::KeyList {
            keys: vec![
                proto::Key { key: Some(ProtoKeyKind::Ed25519(vec![1, 2, 3])) },
                proto::Key { key: None },
                proto::Key {
                    key: Some(ProtoKeyKind::ContractId(proto::ContractId {
                        shard_num: 0,
                        realm_num: 0,
                        contract: Some(proto::contract_id::Contract::ContractNum(1001)),
                    })),
                },
                ed(7).to_proto(),
            ],
        };
        let bytes = proto::Key { key: Some(ProtoKeyKind::KeyList(list)) }.encode_to_vec();

        assert!(has_access(&bytes, &ed(7)).unwrap());
        assert!(!has_access(&bytes, &ed(8)).unwrap());
    }

    #[test]
    fn test_only_opaque_entries_never_match() {
        let structure = KeyStructure::KeyList(vec![
            KeyStructure::Opaque(OpaqueKey::Ecdsa384(vec![1; 48])),
            KeyStructure::Opaque(OpaqueKey::Empty),
        ]);
        assert!(!has_access(&structure.to_bytes(), &ed(1)).unwrap());
    }

    #[test]
    fn test_empty_bytes_are_an_empty_key() {
        assert!(!has_access(&[], &ed(1)).unwrap());
    }

    #[test]
    fn test_undecodable_structure_is_an_error() {
        assert_matches!(has_access(&[0x32, 0x05, 0x01], &ed(1)), Err(KeyError::Decode(_)));
    }

    #[test]
    fn test_depth_guard() {
        let mut structure = simple(1);
        for _ in 0..MAX_KEY_DEPTH {
            structure = KeyStructure::KeyList(vec![structure]);
        }
        assert!(has_access(&structure.to_bytes(), &ed(1)).unwrap());

        let too_deep = KeyStructure::KeyList(vec![structure]);
        assert_matches!(
            has_access(&too_deep.to_bytes(), &ed(1)),
            Err(KeyError::DepthExceeded { max: MAX_KEY_DEPTH })
        );
    }
}
