//! The error taxonomy shared by every AbiCodec crate.

use thiserror::Error;

/// Errors raised while resolving types, encoding, or decoding.
///
/// Every variant is raised at the point of detection and propagated to the
/// immediate caller unchanged; there are no retries and no partial
/// results. Variants carry the offending type string, offsets, and
/// expected/actual counts so boundary callers can report precisely.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    /// The input matched no known type grammar, or a value's shape does
    /// not fit its descriptor.
    #[error("invalid type '{ty}': {reason}")]
    InvalidType { ty: String, reason: String },

    /// Parameter list lengths disagree (types vs. values, or indexed
    /// inputs vs. topics).
    #[error("argument count mismatch: expected {expected}, got {actual}")]
    ArgumentCount { expected: usize, actual: usize },

    /// A fixed-size array was given the wrong number of elements.
    #[error("array length mismatch for '{ty}': expected {expected} elements, got {actual}")]
    ArrayLengthMismatch {
        ty: String,
        expected: usize,
        actual: usize,
    },

    /// A numeric value does not fit the declared bit width.
    #[error("value {value} does not fit in '{ty}'")]
    NumericRange { ty: String, value: String },

    /// A byte payload violates the declared size of a fixed-bytes type.
    #[error("invalid byte length for '{ty}': expected {expected}, got {actual}")]
    InvalidLength {
        ty: String,
        expected: usize,
        actual: usize,
    },

    /// Malformed hex at the boundary: odd length or non-hex characters.
    #[error("invalid hex input: {reason}")]
    InvalidHex { reason: String },

    /// Decode was asked to produce values from zero bytes. Callers
    /// typically surface this as "call reverted or ran out of gas".
    #[error("cannot decode empty data (no return data, likely revert or out of gas)")]
    EmptyData,

    /// An offset word points past the end of the buffer.
    #[error("offset {offset} out of bounds for {len}-byte buffer")]
    OffsetOutOfBounds { offset: usize, len: usize },

    /// The buffer ends before a declared width or length is satisfied.
    /// Also raised for adversarial length words that exceed the buffer,
    /// before any allocation happens.
    #[error("truncated data: need {needed} bytes at offset {offset}, buffer holds {len}")]
    TruncatedData {
        offset: usize,
        needed: usize,
        len: usize,
    },
}
