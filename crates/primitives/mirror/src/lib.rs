//! Models and decoders for the mirror node REST API.
//!
//! Every listing endpoint returns a paged envelope (see [Paged]) whose items are decoded into the
//! types of the matching resource module. Payload fields that the mirror node encodes (topic
//! messages, NFT metadata, memos) are decoded through a [PayloadDecoder].

pub mod account;
pub mod block;
pub mod contract;
pub mod decode;
pub mod error;
pub mod filter;
pub mod network;
pub mod page;
pub mod schedule;
pub mod timestamp;
pub mod token;
pub mod topic;
pub mod transaction;
pub mod units;

pub use decode::{Base64PayloadDecoder, PayloadDecoder, TopicMessageContent};
pub use error::{DecodeError, MirrorError};
pub use filter::{MirrorQuery, Order, QueryPairs, RangeFilter, RangeOp};
pub use page::{Links, PageOptions, Paged, DEFAULT_MAX_PAGES, MAX_PAGE_SIZE};
pub use timestamp::{Timestamp, TimestampRange};
