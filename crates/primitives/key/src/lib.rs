//! Ledger key structures and the key authorization evaluator.
//!
//! A key structure is either a single public key, an ordered list of key structures, or a
//! threshold-gated list of key structures, nested to any depth. [`has_access`] answers whether a
//! candidate public key appears anywhere in such a structure.

mod access;
mod error;
pub mod proto;
mod public_key;
mod structure;

pub use access::{has_access, MAX_KEY_DEPTH};
pub use error::KeyError;
pub use public_key::PublicKey;
pub use structure::{KeyStructure, OpaqueKey};
