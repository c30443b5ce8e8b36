//! # abicodec-core
//!
//! Shared data model for the AbiCodec workspace: the canonical ABI type
//! system, decoded value trees, fragment descriptors, and the error
//! taxonomy. The codec engine itself lives in `abicodec-evm`; batch
//! tooling in `abicodec-batch`.

pub mod abi;
pub mod error;
pub mod log;
pub mod result;
pub mod types;
pub mod value;

pub use abi::{EventAbi, FunctionAbi, Param};
pub use error::AbiError;
pub use log::{DecodedLog, RawLog};
pub use result::DecodedParams;
pub use types::{TypeDescriptor, WORD_BYTES};
pub use value::AbiValue;
