//! # abicodec-batch
//!
//! High-throughput batch log decoding over a `ContractAbi`.
//!
//! ## Features
//! - Memory-bounded chunking (default 10,000 logs per chunk)
//! - CPU-parallel decoding via Rayon
//! - Progress callbacks (for progress bars / ETAs)
//! - Three error modes: Skip, Collect, Throw
//!
//! ## Usage
//! ```no_run
//! use abicodec_batch::{BatchDecoder, BatchRequest, ErrorMode};
//! # fn main() -> Result<(), abicodec_core::AbiError> {
//! # let abi_json = "[]";
//! # let logs = Vec::new();
//! let abi = abicodec_evm::ContractAbi::from_json(abi_json)?;
//! let report = BatchDecoder::new(abi)
//!     .decode(BatchRequest::new(logs).error_mode(ErrorMode::Collect))?;
//! println!("{} decoded, {} errors", report.decoded.len(), report.errors.len());
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod request;

pub use engine::{BatchDecoder, BatchReport, ErrorMode};
pub use request::BatchRequest;
