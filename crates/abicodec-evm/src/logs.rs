//! Event log decoding.
//!
//! An emitted log splits its parameters across two channels: indexed
//! parameters live in the topics array (one word each), everything else
//! is ABI-encoded into the data section as an ordinary parameter block.
//! Indexed reference types (arrays, tuples, `bytes`, `string`) are not
//! stored at all; the topic holds the keccak256 hash of the would-be
//! encoding, which we surface as 32 opaque bytes.

use abicodec_core::{AbiError, AbiValue, DecodedParams, Param, TypeDescriptor};

use crate::{decode, words};

/// Decode an event's parameters from its topics and data.
///
/// `topics` holds only the indexed-parameter topics: for non-anonymous
/// events the signature topic at position 0 must already be stripped.
pub fn decode_log(
    inputs: &[Param],
    topics: &[[u8; 32]],
    data: &[u8],
) -> Result<DecodedParams, AbiError> {
    let indexed_count = inputs.iter().filter(|p| p.indexed).count();
    if indexed_count != topics.len() {
        return Err(AbiError::ArgumentCount {
            expected: indexed_count,
            actual: topics.len(),
        });
    }

    let mut slots: Vec<Option<AbiValue>> = vec![None; inputs.len()];

    // Indexed parameters pair with topics in declaration order.
    for ((pos, param), topic) in inputs
        .iter()
        .enumerate()
        .filter(|(_, p)| p.indexed)
        .zip(topics)
    {
        slots[pos] = Some(decode_topic(&param.ty, topic)?);
    }

    // The rest decode from the data section as one block.
    let data_params: Vec<(usize, &Param)> = inputs
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.indexed)
        .collect();
    if !data_params.is_empty() {
        if data.is_empty() {
            return Err(AbiError::EmptyData);
        }
        let values = decode::decode_block(data_params.iter().map(|&(_, p)| &p.ty), data, 0)?;
        for (&(pos, _), value) in data_params.iter().zip(values) {
            slots[pos] = Some(value);
        }
    }

    let values: Vec<AbiValue> = slots.into_iter().flatten().collect();
    debug_assert_eq!(values.len(), inputs.len());
    let names = inputs.iter().map(|p| p.name.clone()).collect();
    Ok(DecodedParams::new(names, values))
}

/// One indexed parameter from one topic word. Value types decode
/// normally; reference types come back as the stored hash.
fn decode_topic(ty: &TypeDescriptor, topic: &[u8; 32]) -> Result<AbiValue, AbiError> {
    let hashed = ty.is_dynamic()
        || matches!(
            ty,
            TypeDescriptor::FixedArray { .. } | TypeDescriptor::Tuple(_)
        );
    if hashed {
        Ok(AbiValue::FixedBytes(topic.to_vec()))
    } else {
        words::decode_word(ty, topic)
    }
}
