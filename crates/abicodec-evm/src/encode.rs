//! Head/tail parameter encoding.
//!
//! Each value encodes to a head part and a tail part. Static values put
//! their bytes in the head; dynamic values put a placeholder offset word
//! in the head and their payload in the tail. Offsets are byte distances
//! from the start of the enclosing block's head, so nested dynamic
//! composites restart the frame at their own tail.

use abicodec_core::{AbiError, AbiValue, TypeDescriptor, WORD_BYTES};
use alloy_primitives::U256;

use crate::words;

/// Encode a flat parameter list into ABI words.
///
/// `types` and `values` are matched positionally and must agree in
/// length. Width and length constraints are enforced here, on the way
/// in; decoding is deliberately more forgiving.
pub fn encode(types: &[TypeDescriptor], values: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
    if types.len() != values.len() {
        return Err(AbiError::ArgumentCount {
            expected: types.len(),
            actual: values.len(),
        });
    }
    let parts = types
        .iter()
        .zip(values)
        .map(|(ty, value)| encode_value(ty, value))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(assemble(parts))
}

/// A value's encoded form before block assembly.
struct EncodedValue {
    head: Vec<u8>,
    tail: Vec<u8>,
    is_dynamic: bool,
}

impl EncodedValue {
    fn fixed(head: Vec<u8>) -> Self {
        Self {
            head,
            tail: Vec::new(),
            is_dynamic: false,
        }
    }

    fn dynamic(tail: Vec<u8>) -> Self {
        Self {
            head: Vec::new(),
            tail,
            is_dynamic: true,
        }
    }
}

/// Lay out one block: concatenated heads, then concatenated tails, with
/// each dynamic head slot holding the offset of its tail relative to
/// the block start.
fn assemble(parts: Vec<EncodedValue>) -> Vec<u8> {
    let head_size: usize = parts
        .iter()
        .map(|p| if p.is_dynamic { WORD_BYTES } else { p.head.len() })
        .sum();
    let mut head = Vec::with_capacity(head_size);
    let mut tail = Vec::new();
    for part in parts {
        if part.is_dynamic {
            let offset = U256::from(head_size + tail.len());
            head.extend_from_slice(&offset.to_be_bytes::<WORD_BYTES>());
            tail.extend_from_slice(&part.tail);
        } else {
            head.extend_from_slice(&part.head);
        }
    }
    head.extend_from_slice(&tail);
    head
}

fn encode_value(ty: &TypeDescriptor, value: &AbiValue) -> Result<EncodedValue, AbiError> {
    match ty {
        TypeDescriptor::Uint(_)
        | TypeDescriptor::Int(_)
        | TypeDescriptor::Bool
        | TypeDescriptor::Address
        | TypeDescriptor::FixedBytes(_) => {
            Ok(EncodedValue::fixed(words::encode_word(ty, value)?.to_vec()))
        }
        TypeDescriptor::Bytes => match value {
            AbiValue::Bytes(data) | AbiValue::FixedBytes(data) => {
                Ok(EncodedValue::dynamic(length_prefixed(data)))
            }
            other => Err(mismatch(ty, other)),
        },
        TypeDescriptor::Str => match value {
            AbiValue::Str(s) => Ok(EncodedValue::dynamic(length_prefixed(s.as_bytes()))),
            other => Err(mismatch(ty, other)),
        },
        TypeDescriptor::FixedArray { elem, len } => {
            let items = as_array(ty, value)?;
            if items.len() != *len {
                return Err(AbiError::ArrayLengthMismatch {
                    ty: ty.to_string(),
                    expected: *len,
                    actual: items.len(),
                });
            }
            let parts = encode_items(elem, items)?;
            // No length word: the count is part of the type.
            if elem.is_dynamic() {
                Ok(EncodedValue::dynamic(assemble(parts)))
            } else {
                Ok(EncodedValue::fixed(concat_heads(parts)))
            }
        }
        TypeDescriptor::Array(elem) => {
            let items = as_array(ty, value)?;
            let parts = encode_items(elem, items)?;
            let mut tail = U256::from(items.len())
                .to_be_bytes::<WORD_BYTES>()
                .to_vec();
            tail.extend_from_slice(&assemble(parts));
            Ok(EncodedValue::dynamic(tail))
        }
        TypeDescriptor::Tuple(fields) => {
            let items = match value {
                AbiValue::Tuple(items) | AbiValue::Array(items) => items,
                other => return Err(mismatch(ty, other)),
            };
            if items.len() != fields.len() {
                return Err(AbiError::ArgumentCount {
                    expected: fields.len(),
                    actual: items.len(),
                });
            }
            let parts = fields
                .iter()
                .zip(items)
                .map(|((_, field_ty), item)| encode_value(field_ty, item))
                .collect::<Result<Vec<_>, _>>()?;
            if ty.is_dynamic() {
                Ok(EncodedValue::dynamic(assemble(parts)))
            } else {
                Ok(EncodedValue::fixed(concat_heads(parts)))
            }
        }
    }
}

fn as_array<'a>(ty: &TypeDescriptor, value: &'a AbiValue) -> Result<&'a [AbiValue], AbiError> {
    match value {
        AbiValue::Array(items) | AbiValue::Tuple(items) => Ok(items),
        other => Err(mismatch(ty, other)),
    }
}

fn encode_items(elem: &TypeDescriptor, items: &[AbiValue]) -> Result<Vec<EncodedValue>, AbiError> {
    items.iter().map(|item| encode_value(elem, item)).collect()
}

fn concat_heads(parts: Vec<EncodedValue>) -> Vec<u8> {
    let mut out = Vec::with_capacity(parts.iter().map(|p| p.head.len()).sum());
    for part in parts {
        out.extend_from_slice(&part.head);
    }
    out
}

/// Length word followed by the payload, zero padded to a word multiple.
fn length_prefixed(data: &[u8]) -> Vec<u8> {
    let padded = data.len().div_ceil(WORD_BYTES) * WORD_BYTES;
    let mut out = Vec::with_capacity(WORD_BYTES + padded);
    out.extend_from_slice(&U256::from(data.len()).to_be_bytes::<WORD_BYTES>());
    out.extend_from_slice(data);
    out.resize(WORD_BYTES + padded, 0);
    out
}

fn mismatch(ty: &TypeDescriptor, value: &AbiValue) -> AbiError {
    AbiError::InvalidType {
        ty: ty.to_string(),
        reason: format!("cannot encode {} value", value.kind()),
    }
}
