//! Selector and topic hashing.
//!
//! Both derive from the keccak256 hash of a canonical signature string,
//! e.g.:
//!   keccak256("transfer(address,uint256)")        → 0xa9059cbb… (first 4 bytes)
//!   keccak256("Transfer(address,address,uint256)") → full 32-byte topic
//!
//! Function calls use the truncated form as a dispatch prefix; events
//! carry the full hash as topics[0].

use abicodec_core::{EventAbi, FunctionAbi};
use tiny_keccak::{Hasher, Keccak};

/// keccak256 of arbitrary bytes.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut output);
    output
}

/// First 4 bytes of the hash of a canonical function signature.
pub fn selector_from_signature(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash[..4]);
    selector
}

/// Full 32-byte hash of a canonical event signature.
pub fn topic_from_signature(signature: &str) -> [u8; 32] {
    keccak256(signature.as_bytes())
}

/// Dispatch selector of a resolved function.
pub fn function_selector(function: &FunctionAbi) -> [u8; 4] {
    selector_from_signature(&function.signature())
}

/// topics[0] value of a resolved, non-anonymous event.
pub fn event_topic(event: &EventAbi) -> [u8; 32] {
    topic_from_signature(&event.signature())
}
