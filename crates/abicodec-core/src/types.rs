//! The canonical ABI type system.
//!
//! Every raw type string, fragment object, or simplified-struct shorthand
//! is lowered into a `TypeDescriptor` before any encoding or decoding
//! happens. Descriptors are immutable value objects: resolve once, then
//! share or clone freely across encode/decode calls.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of bytes in one ABI word, the alignment granularity of the
/// entire encoding.
pub const WORD_BYTES: usize = 32;

/// A resolved ABI type.
///
/// Widths only exist on the numeric kinds and are always a multiple of 8
/// in `8..=256`; `FixedBytes` lengths are in `1..=32`. The resolver
/// enforces both, so descriptors in circulation are well-formed by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeDescriptor {
    /// Unsigned integer, width in bits (`uint8` .. `uint256`).
    Uint(u16),
    /// Signed two's-complement integer, width in bits (`int8` .. `int256`).
    Int(u16),
    /// Boolean, one word holding 0 or 1.
    Bool,
    /// 20-byte EVM address, right-aligned in its word.
    Address,
    /// Fixed-size byte array (`bytes1` .. `bytes32`), left-aligned.
    FixedBytes(u8),
    /// Dynamic-length byte array.
    Bytes,
    /// UTF-8 string, wire-encoded exactly like `bytes`.
    Str,
    /// Fixed-length array `T[N]`.
    FixedArray {
        elem: Box<TypeDescriptor>,
        len: usize,
    },
    /// Dynamic-length array `T[]`.
    Array(Box<TypeDescriptor>),
    /// Tuple / struct: ordered `(name, type)` components. Names may be
    /// empty for output-only tuples.
    Tuple(Vec<(String, TypeDescriptor)>),
}

impl TypeDescriptor {
    /// `true` if the encoded width of a value depends on the value itself.
    ///
    /// Dynamic types occupy one offset word in their parent's head region;
    /// static types are laid out inline. Dynamism of composites is the
    /// logical OR over their children.
    pub fn is_dynamic(&self) -> bool {
        match self {
            TypeDescriptor::Bytes | TypeDescriptor::Str | TypeDescriptor::Array(_) => true,
            TypeDescriptor::FixedArray { elem, .. } => elem.is_dynamic(),
            TypeDescriptor::Tuple(fields) => fields.iter().any(|(_, ty)| ty.is_dynamic()),
            _ => false,
        }
    }

    /// Width in bytes this type contributes to its enclosing head region.
    ///
    /// Dynamic types always contribute exactly one offset word; static
    /// composites contribute the flattened sum of their children; every
    /// other type is a single word.
    pub fn head_size(&self) -> usize {
        if self.is_dynamic() {
            return WORD_BYTES;
        }
        match self {
            TypeDescriptor::FixedArray { elem, len } => elem.head_size() * len,
            TypeDescriptor::Tuple(fields) => fields.iter().map(|(_, ty)| ty.head_size()).sum(),
            _ => WORD_BYTES,
        }
    }

    /// Convenience constructor for an unnamed-component tuple.
    pub fn tuple_of(types: Vec<TypeDescriptor>) -> Self {
        TypeDescriptor::Tuple(types.into_iter().map(|ty| (String::new(), ty)).collect())
    }
}

impl fmt::Display for TypeDescriptor {
    /// Renders the canonical form used in signatures: `uint256`,
    /// `bytes32`, `(address,uint256)[]`. Tuples print as parenthesized
    /// component lists, never as the word `tuple`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Uint(bits) => write!(f, "uint{bits}"),
            TypeDescriptor::Int(bits) => write!(f, "int{bits}"),
            TypeDescriptor::Bool => write!(f, "bool"),
            TypeDescriptor::Address => write!(f, "address"),
            TypeDescriptor::FixedBytes(n) => write!(f, "bytes{n}"),
            TypeDescriptor::Bytes => write!(f, "bytes"),
            TypeDescriptor::Str => write!(f, "string"),
            TypeDescriptor::FixedArray { elem, len } => write!(f, "{elem}[{len}]"),
            TypeDescriptor::Array(elem) => write!(f, "{elem}[]"),
            TypeDescriptor::Tuple(fields) => {
                f.write_str("(")?;
                for (i, (_, ty)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{ty}")?;
                }
                f.write_str(")")
            }
        }
    }
}
