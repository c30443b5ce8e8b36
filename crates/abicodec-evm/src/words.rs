//! Single-word encoding and decoding.
//!
//! Every head-encodable primitive occupies exactly one 32-byte word:
//! unsigned and signed integers are big-endian (signed values in
//! two's complement over the full word), booleans and addresses are
//! right-aligned, fixed bytes are left-aligned. Range checks happen on
//! the encode side only; decoding trusts the word and narrows nothing.

use abicodec_core::{AbiError, AbiValue, TypeDescriptor, WORD_BYTES};
use alloy_primitives::{Address, I256, U256};

pub type Word = [u8; WORD_BYTES];

/// Encode a single-word value, enforcing the declared width.
pub fn encode_word(ty: &TypeDescriptor, value: &AbiValue) -> Result<Word, AbiError> {
    match (ty, value) {
        (TypeDescriptor::Uint(bits), AbiValue::Uint(v)) => encode_uint(ty, *bits, *v),
        (TypeDescriptor::Int(bits), AbiValue::Int(v)) => encode_int(ty, *bits, *v),
        (TypeDescriptor::Bool, AbiValue::Bool(b)) => {
            let mut word = [0u8; WORD_BYTES];
            if *b {
                word[WORD_BYTES - 1] = 1;
            }
            Ok(word)
        }
        (TypeDescriptor::Address, AbiValue::Address(a)) => {
            let mut word = [0u8; WORD_BYTES];
            word[12..].copy_from_slice(a.as_slice());
            Ok(word)
        }
        (TypeDescriptor::FixedBytes(n), AbiValue::FixedBytes(data))
        | (TypeDescriptor::FixedBytes(n), AbiValue::Bytes(data)) => {
            let n = *n as usize;
            if data.len() > n {
                return Err(AbiError::InvalidLength {
                    ty: ty.to_string(),
                    expected: n,
                    actual: data.len(),
                });
            }
            let mut word = [0u8; WORD_BYTES];
            word[..data.len()].copy_from_slice(data);
            Ok(word)
        }
        _ => Err(AbiError::InvalidType {
            ty: ty.to_string(),
            reason: format!("cannot encode {} value", value.kind()),
        }),
    }
}

/// Decode a single word as the given primitive type.
pub fn decode_word(ty: &TypeDescriptor, word: &Word) -> Result<AbiValue, AbiError> {
    match ty {
        TypeDescriptor::Uint(_) => Ok(AbiValue::Uint(U256::from_be_bytes(*word))),
        TypeDescriptor::Int(_) => Ok(AbiValue::Int(I256::from_raw(U256::from_be_bytes(*word)))),
        // Lenient: exactly 1 is true, anything else (including garbage
        // upper bytes) is false. Matches what contracts actually emit.
        TypeDescriptor::Bool => Ok(AbiValue::Bool(U256::from_be_bytes(*word) == U256::from(1u8))),
        TypeDescriptor::Address => Ok(AbiValue::Address(Address::from_slice(&word[12..]))),
        TypeDescriptor::FixedBytes(n) => Ok(AbiValue::FixedBytes(word[..*n as usize].to_vec())),
        _ => Err(AbiError::InvalidType {
            ty: ty.to_string(),
            reason: "not a single-word type".to_string(),
        }),
    }
}

fn encode_uint(ty: &TypeDescriptor, bits: u16, v: U256) -> Result<Word, AbiError> {
    if bits < 256 {
        let max = U256::MAX >> (256 - bits as usize);
        if v > max {
            return Err(AbiError::NumericRange {
                ty: ty.to_string(),
                value: v.to_string(),
            });
        }
    }
    Ok(v.to_be_bytes::<WORD_BYTES>())
}

fn encode_int(ty: &TypeDescriptor, bits: u16, v: I256) -> Result<Word, AbiError> {
    if bits < 256 {
        // Signed range for an N-bit lane: [-2^(N-1), 2^(N-1) - 1].
        let max = I256::from_raw(U256::MAX >> (257 - bits as usize));
        let min = -max - I256::ONE;
        if v > max || v < min {
            return Err(AbiError::NumericRange {
                ty: ty.to_string(),
                value: v.to_string(),
            });
        }
    }
    Ok(v.into_raw().to_be_bytes::<WORD_BYTES>())
}
