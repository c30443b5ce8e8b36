//! Head/tail parameter decoding.
//!
//! Decoding walks a block's head left to right, chasing offset words
//! into the tail as it meets dynamic types. Offsets are relative to the
//! start of the block they appear in, so every dynamic composite opens
//! a fresh block at its own tail position.
//!
//! All lengths and offsets come from the wire and are treated as
//! hostile: they are bounds checked against the remaining input before
//! any allocation or read, so a declared length of 2^200 fails with
//! `TruncatedData` instead of an attempted allocation.

use abicodec_core::{AbiError, AbiValue, DecodedParams, Param, TypeDescriptor, WORD_BYTES};
use alloy_primitives::U256;

use crate::words::{self, Word};

/// Decode ABI words into one value per type.
///
/// Empty input is an error unless no types were requested: a contract
/// call that reverts or runs out of gas returns zero bytes, and
/// silently producing zero values would mask that.
pub fn decode(types: &[TypeDescriptor], data: &[u8]) -> Result<Vec<AbiValue>, AbiError> {
    if types.is_empty() {
        return Ok(Vec::new());
    }
    if data.is_empty() {
        return Err(AbiError::EmptyData);
    }
    decode_block(types, data, 0)
}

/// Decode against named parameters, yielding position and name access.
pub fn decode_params(params: &[Param], data: &[u8]) -> Result<DecodedParams, AbiError> {
    if !params.is_empty() && data.is_empty() {
        return Err(AbiError::EmptyData);
    }
    let values = if params.is_empty() {
        Vec::new()
    } else {
        decode_block(params.iter().map(|p| &p.ty), data, 0)?
    };
    let names = params.iter().map(|p| p.name.clone()).collect();
    Ok(DecodedParams::new(names, values))
}

/// Walk one block's head at `head_start`, decoding each type in turn.
/// Dynamic types consume an offset word and are decoded at
/// `head_start + offset`; static types are decoded in place.
pub(crate) fn decode_block<'a, I>(
    types: I,
    data: &[u8],
    head_start: usize,
) -> Result<Vec<AbiValue>, AbiError>
where
    I: IntoIterator<Item = &'a TypeDescriptor>,
{
    let mut values = Vec::new();
    let mut cursor = head_start;
    for ty in types {
        if ty.is_dynamic() {
            let offset = read_offset(data, cursor)?;
            let target = head_start.checked_add(offset).unwrap_or(usize::MAX);
            if target > data.len() {
                return Err(AbiError::OffsetOutOfBounds {
                    offset: target,
                    len: data.len(),
                });
            }
            values.push(decode_dynamic(ty, data, target)?);
            cursor += WORD_BYTES;
        } else {
            values.push(decode_static(ty, data, cursor)?);
            cursor += ty.head_size();
        }
    }
    Ok(values)
}

fn decode_static(ty: &TypeDescriptor, data: &[u8], pos: usize) -> Result<AbiValue, AbiError> {
    match ty {
        TypeDescriptor::Uint(_)
        | TypeDescriptor::Int(_)
        | TypeDescriptor::Bool
        | TypeDescriptor::Address
        | TypeDescriptor::FixedBytes(_) => {
            let word = read_word(data, pos)?;
            words::decode_word(ty, &word)
        }
        TypeDescriptor::FixedArray { elem, len } => {
            let slot = elem.head_size();
            check_span(data, pos, len.checked_mul(slot).unwrap_or(usize::MAX))?;
            let mut items = Vec::with_capacity(*len);
            for i in 0..*len {
                items.push(decode_static(elem, data, pos + i * slot)?);
            }
            Ok(AbiValue::Array(items))
        }
        TypeDescriptor::Tuple(fields) => {
            let mut items = Vec::with_capacity(fields.len());
            let mut cursor = pos;
            for (_, field_ty) in fields {
                items.push(decode_static(field_ty, data, cursor)?);
                cursor += field_ty.head_size();
            }
            Ok(AbiValue::Tuple(items))
        }
        TypeDescriptor::Bytes | TypeDescriptor::Str | TypeDescriptor::Array(_) => {
            Err(AbiError::InvalidType {
                ty: ty.to_string(),
                reason: "dynamic type in static position".to_string(),
            })
        }
    }
}

fn decode_dynamic(ty: &TypeDescriptor, data: &[u8], pos: usize) -> Result<AbiValue, AbiError> {
    match ty {
        TypeDescriptor::Bytes => Ok(AbiValue::Bytes(read_payload(data, pos)?.to_vec())),
        // Event and return data in the wild is not always valid UTF-8;
        // replacing bad sequences beats refusing the whole decode.
        TypeDescriptor::Str => Ok(AbiValue::Str(
            String::from_utf8_lossy(read_payload(data, pos)?).into_owned(),
        )),
        TypeDescriptor::Array(elem) => {
            let len = read_length(data, pos)?;
            let slot = if elem.is_dynamic() {
                WORD_BYTES
            } else {
                elem.head_size()
            };
            let block = pos + WORD_BYTES;
            check_span(data, block, len.checked_mul(slot).unwrap_or(usize::MAX))?;
            let items = decode_block(std::iter::repeat(elem.as_ref()).take(len), data, block)?;
            Ok(AbiValue::Array(items))
        }
        TypeDescriptor::FixedArray { elem, len } => {
            // Dynamic only because the element is; the count is in the
            // type, so there is no length word.
            check_span(data, pos, len.checked_mul(WORD_BYTES).unwrap_or(usize::MAX))?;
            let items = decode_block(std::iter::repeat(elem.as_ref()).take(*len), data, pos)?;
            Ok(AbiValue::Array(items))
        }
        TypeDescriptor::Tuple(fields) => {
            let items = decode_block(fields.iter().map(|(_, t)| t), data, pos)?;
            Ok(AbiValue::Tuple(items))
        }
        _ => Err(AbiError::InvalidType {
            ty: ty.to_string(),
            reason: "static type in dynamic position".to_string(),
        }),
    }
}

// ─── Bounds-checked reads ─────────────────────────────────────────────────────

fn read_word(data: &[u8], pos: usize) -> Result<Word, AbiError> {
    let end = pos.checked_add(WORD_BYTES).unwrap_or(usize::MAX);
    if end > data.len() {
        return Err(AbiError::TruncatedData {
            offset: pos,
            needed: WORD_BYTES,
            len: data.len(),
        });
    }
    let mut word = [0u8; WORD_BYTES];
    word.copy_from_slice(&data[pos..end]);
    Ok(word)
}

/// Read an offset word. Values past the end of the input cannot name a
/// valid tail, so they fail here rather than at the later read.
fn read_offset(data: &[u8], pos: usize) -> Result<usize, AbiError> {
    let value = U256::from_be_bytes(read_word(data, pos)?);
    if value > U256::from(data.len()) {
        return Err(AbiError::OffsetOutOfBounds {
            offset: usize::try_from(value).unwrap_or(usize::MAX),
            len: data.len(),
        });
    }
    Ok(value.to::<usize>())
}

/// Read a length word. A declared length larger than the whole input
/// can never be satisfied, whether it counts bytes or elements.
fn read_length(data: &[u8], pos: usize) -> Result<usize, AbiError> {
    let value = U256::from_be_bytes(read_word(data, pos)?);
    if value > U256::from(data.len()) {
        return Err(AbiError::TruncatedData {
            offset: pos + WORD_BYTES,
            needed: usize::try_from(value).unwrap_or(usize::MAX),
            len: data.len(),
        });
    }
    Ok(value.to::<usize>())
}

/// Length-prefixed payload of a `bytes`/`string` tail.
fn read_payload(data: &[u8], pos: usize) -> Result<&[u8], AbiError> {
    let len = read_length(data, pos)?;
    let start = pos + WORD_BYTES;
    if len > data.len() - start {
        return Err(AbiError::TruncatedData {
            offset: start,
            needed: len,
            len: data.len(),
        });
    }
    Ok(&data[start..start + len])
}

/// Require `needed` bytes starting at `pos` before decoding into them.
fn check_span(data: &[u8], pos: usize, needed: usize) -> Result<(), AbiError> {
    if needed > data.len().saturating_sub(pos) {
        return Err(AbiError::TruncatedData {
            offset: pos,
            needed,
            len: data.len(),
        });
    }
    Ok(())
}
