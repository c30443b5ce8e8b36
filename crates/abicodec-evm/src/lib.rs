//! # abicodec-evm
//!
//! The ABI codec engine: type resolution, head/tail encoding and
//! decoding, selector and topic hashing, event log splitting, and the
//! whole-contract `ContractAbi` dispatcher.
//!
//! ## Implementation notes
//! - Closed `TypeDescriptor` taxonomy; every codec match is exhaustive
//! - Offsets are relative to each nesting level's own head start
//! - Keccak-256 via `tiny-keccak`, big integers via `alloy-primitives`
//! - Wire lengths and offsets are bounds checked before any allocation

pub mod api;
pub mod contract;
pub mod decode;
pub mod encode;
pub mod logs;
pub mod resolver;
pub mod selector;
pub mod words;

pub use api::{
    decode_function_call, decode_log, decode_parameter, decode_parameters, encode_event_signature,
    encode_function_call, encode_function_signature, encode_parameter, encode_parameters,
};
pub use contract::ContractAbi;
