//! Wire form of the ledger's `Key` protobuf messages.
//!
//! Only the messages reachable from `Key` are declared here. Field tags match the ledger's
//! `basic_types.proto`.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Key {
    #[prost(oneof = "key::Key", tags = "1, 2, 3, 4, 5, 6, 7, 8")]
    pub key: ::core::option::Option<key::Key>,
}

pub mod key {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Key {
        #[prost(message, tag = "1")]
        ContractId(super::ContractId),
        #[prost(bytes = "vec", tag = "2")]
        Ed25519(::prost::alloc::vec::Vec<u8>),
        #[prost(bytes = "vec", tag = "3")]
        Rsa3072(::prost::alloc::vec::Vec<u8>),
        #[prost(bytes = "vec", tag = "4")]
        Ecdsa384(::prost::alloc::vec::Vec<u8>),
        #[prost(message, tag = "5")]
        ThresholdKey(super::ThresholdKey),
        #[prost(message, tag = "6")]
        KeyList(super::KeyList),
        #[prost(bytes = "vec", tag = "7")]
        EcdsaSecp256k1(::prost::alloc::vec::Vec<u8>),
        #[prost(message, tag = "8")]
        DelegatableContractId(super::ContractId),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct KeyList {
    #[prost(message, repeated, tag = "1")]
    pub keys: ::prost::alloc::vec::Vec<Key>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ThresholdKey {
    #[prost(uint32, tag = "1")]
    pub threshold: u32,
    #[prost(message, optional, tag = "2")]
    pub keys: ::core::option::Option<KeyList>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ContractId {
    #[prost(int64, tag = "1")]
    pub shard_num: i64,
    #[prost(int64, tag = "2")]
    pub realm_num: i64,
    #[prost(oneof = "contract_id::Contract", tags = "3, 4")]
    pub contract: ::core::option::Option<contract_id::Contract>,
}

pub mod contract_id {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Contract {
        #[prost(int64, tag = "3")]
        ContractNum(i64),
        #[prost(bytes = "vec", tag = "4")]
        EvmAddress(::prost::alloc::vec::Vec<u8>),
    }
}
