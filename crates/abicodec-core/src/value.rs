//! Decoded and encodable ABI values.
//!
//! `AbiValue` is the single value tree both sides of the codec speak:
//! encoders consume it, decoders produce it. Conversion to and from
//! `serde_json::Value` is explicit and descriptor-guided rather than
//! serde-derived, so numeric precision and byte/hex distinctions survive
//! the JSON boundary.

use crate::error::AbiError;
use crate::types::TypeDescriptor;
use alloy_primitives::{Address, I256, U256};
use std::fmt;

/// One decoded (or to-be-encoded) ABI value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    /// Unsigned integer of any declared width, held as a full 256-bit word.
    Uint(U256),
    /// Signed integer of any declared width, two's complement.
    Int(I256),
    Bool(bool),
    /// 20-byte EVM address. Displays checksummed.
    Address(Address),
    /// `bytes1` .. `bytes32` payload, or a raw 32-byte topic word for
    /// indexed dynamic log parameters (which are hashes, not values).
    FixedBytes(Vec<u8>),
    Bytes(Vec<u8>),
    Str(String),
    Array(Vec<AbiValue>),
    Tuple(Vec<AbiValue>),
}

impl AbiValue {
    /// Short noun for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            AbiValue::Uint(_) => "unsigned integer",
            AbiValue::Int(_) => "signed integer",
            AbiValue::Bool(_) => "bool",
            AbiValue::Address(_) => "address",
            AbiValue::FixedBytes(_) => "fixed bytes",
            AbiValue::Bytes(_) => "bytes",
            AbiValue::Str(_) => "string",
            AbiValue::Array(_) => "array",
            AbiValue::Tuple(_) => "tuple",
        }
    }

    pub fn as_uint(&self) -> Option<U256> {
        match self {
            AbiValue::Uint(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<I256> {
        match self {
            AbiValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AbiValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<Address> {
        match self {
            AbiValue::Address(a) => Some(*a),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AbiValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            AbiValue::FixedBytes(b) | AbiValue::Bytes(b) => Some(b.as_slice()),
            _ => None,
        }
    }

    /// Build a value from JSON, guided by the descriptor.
    ///
    /// Integers accept JSON numbers or strings (decimal, or `0x` hex; hex
    /// against a signed type is read as a 256-bit two's-complement
    /// pattern). Addresses and byte payloads accept hex strings. Tuples
    /// accept positional arrays, or objects when every component is named.
    ///
    /// # Errors
    /// `InvalidType` on shape mismatches or unparseable literals,
    /// `NumericRange` on overflow, `InvalidHex` on malformed hex,
    /// `ArgumentCount` on tuple arity mismatches.
    pub fn from_json(ty: &TypeDescriptor, value: &serde_json::Value) -> Result<Self, AbiError> {
        use serde_json::Value;

        match ty {
            TypeDescriptor::Uint(_) => parse_uint_json(ty, value).map(AbiValue::Uint),
            TypeDescriptor::Int(_) => parse_int_json(ty, value).map(AbiValue::Int),
            TypeDescriptor::Bool => match value {
                Value::Bool(b) => Ok(AbiValue::Bool(*b)),
                other => Err(mismatch(ty, "a boolean", other)),
            },
            TypeDescriptor::Address => match value {
                Value::String(s) => s
                    .parse::<Address>()
                    .map(AbiValue::Address)
                    .map_err(|e| AbiError::InvalidHex {
                        reason: format!("bad address '{s}': {e}"),
                    }),
                other => Err(mismatch(ty, "an address string", other)),
            },
            TypeDescriptor::FixedBytes(_) => match value {
                Value::String(s) => hex_bytes(s).map(AbiValue::FixedBytes),
                other => Err(mismatch(ty, "a hex string", other)),
            },
            TypeDescriptor::Bytes => match value {
                Value::String(s) => hex_bytes(s).map(AbiValue::Bytes),
                other => Err(mismatch(ty, "a hex string", other)),
            },
            TypeDescriptor::Str => match value {
                Value::String(s) => Ok(AbiValue::Str(s.clone())),
                other => Err(mismatch(ty, "a string", other)),
            },
            TypeDescriptor::FixedArray { elem, .. } | TypeDescriptor::Array(elem) => {
                match value {
                    Value::Array(items) => items
                        .iter()
                        .map(|item| AbiValue::from_json(elem, item))
                        .collect::<Result<Vec<_>, _>>()
                        .map(AbiValue::Array),
                    other => Err(mismatch(ty, "an array", other)),
                }
            }
            TypeDescriptor::Tuple(fields) => match value {
                Value::Array(items) => {
                    if items.len() != fields.len() {
                        return Err(AbiError::ArgumentCount {
                            expected: fields.len(),
                            actual: items.len(),
                        });
                    }
                    fields
                        .iter()
                        .zip(items.iter())
                        .map(|((_, fty), item)| AbiValue::from_json(fty, item))
                        .collect::<Result<Vec<_>, _>>()
                        .map(AbiValue::Tuple)
                }
                Value::Object(map) => fields
                    .iter()
                    .map(|(name, fty)| {
                        if name.is_empty() {
                            return Err(AbiError::InvalidType {
                                ty: ty.to_string(),
                                reason: "object value given for a tuple with unnamed components"
                                    .to_string(),
                            });
                        }
                        let field = map.get(name).ok_or_else(|| AbiError::InvalidType {
                            ty: ty.to_string(),
                            reason: format!("missing tuple component '{name}'"),
                        })?;
                        AbiValue::from_json(fty, field)
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(AbiValue::Tuple),
                other => Err(mismatch(ty, "an array or object", other)),
            },
        }
    }

    /// Render back to JSON. Integers become decimal strings so values
    /// beyond 53 bits survive; byte payloads become `0x` hex; addresses
    /// are checksummed.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;

        match self {
            AbiValue::Uint(v) => Value::String(v.to_string()),
            AbiValue::Int(v) => Value::String(v.to_string()),
            AbiValue::Bool(b) => Value::Bool(*b),
            AbiValue::Address(a) => Value::String(a.to_string()),
            AbiValue::FixedBytes(b) | AbiValue::Bytes(b) => {
                Value::String(format!("0x{}", hex::encode(b)))
            }
            AbiValue::Str(s) => Value::String(s.clone()),
            AbiValue::Array(items) | AbiValue::Tuple(items) => {
                Value::Array(items.iter().map(AbiValue::to_json).collect())
            }
        }
    }
}

impl fmt::Display for AbiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiValue::Uint(v) => write!(f, "{v}"),
            AbiValue::Int(v) => write!(f, "{v}"),
            AbiValue::Bool(b) => write!(f, "{b}"),
            AbiValue::Address(a) => write!(f, "{a}"),
            AbiValue::FixedBytes(b) | AbiValue::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
            AbiValue::Str(s) => write!(f, "{s}"),
            AbiValue::Array(items) => {
                let parts: Vec<_> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            AbiValue::Tuple(items) => {
                let parts: Vec<_> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "({})", parts.join(", "))
            }
        }
    }
}

fn mismatch(ty: &TypeDescriptor, expected: &str, got: &serde_json::Value) -> AbiError {
    AbiError::InvalidType {
        ty: ty.to_string(),
        reason: format!("expected {expected}, got {got}"),
    }
}

fn hex_bytes(s: &str) -> Result<Vec<u8>, AbiError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(digits).map_err(|e| AbiError::InvalidHex {
        reason: format!("'{s}': {e}"),
    })
}

fn parse_uint_json(ty: &TypeDescriptor, value: &serde_json::Value) -> Result<U256, AbiError> {
    match value {
        serde_json::Value::Number(n) => match n.as_u64() {
            Some(u) => Ok(U256::from(u)),
            None => Err(AbiError::InvalidType {
                ty: ty.to_string(),
                reason: format!("expected a non-negative integer, got {n}"),
            }),
        },
        serde_json::Value::String(s) => parse_uint_str(ty, s),
        other => Err(mismatch(ty, "an integer or numeric string", other)),
    }
}

fn parse_uint_str(ty: &TypeDescriptor, s: &str) -> Result<U256, AbiError> {
    let (digits, radix) = match s.strip_prefix("0x") {
        Some(h) => (h, 16u32),
        None => (s, 10u32),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(AbiError::InvalidType {
            ty: ty.to_string(),
            reason: format!("'{s}' is not a valid integer literal"),
        });
    }
    U256::from_str_radix(digits, radix as u64).map_err(|_| AbiError::NumericRange {
        ty: ty.to_string(),
        value: s.to_string(),
    })
}

fn parse_int_json(ty: &TypeDescriptor, value: &serde_json::Value) -> Result<I256, AbiError> {
    match value {
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                let mag = U256::from(i.unsigned_abs());
                let raw = if i < 0 { mag.wrapping_neg() } else { mag };
                Ok(I256::from_raw(raw))
            } else if let Some(u) = n.as_u64() {
                Ok(I256::from_raw(U256::from(u)))
            } else {
                Err(AbiError::InvalidType {
                    ty: ty.to_string(),
                    reason: format!("expected an integer, got {n}"),
                })
            }
        }
        serde_json::Value::String(s) => parse_int_str(ty, s),
        other => Err(mismatch(ty, "an integer or numeric string", other)),
    }
}

fn parse_int_str(ty: &TypeDescriptor, s: &str) -> Result<I256, AbiError> {
    // Hex input is read as a raw 256-bit two's-complement pattern.
    if s.starts_with("0x") {
        return parse_uint_str(ty, s).map(I256::from_raw);
    }
    let (neg, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let mag = parse_uint_str(ty, digits)?;
    let top_bit = U256::from(1u8) << 255;
    if neg {
        // Magnitude up to 2^255 is representable as a negative value.
        if mag.bit(255) && mag != top_bit {
            return Err(AbiError::NumericRange {
                ty: ty.to_string(),
                value: s.to_string(),
            });
        }
        Ok(I256::from_raw(mag.wrapping_neg()))
    } else {
        if mag.bit(255) {
            return Err(AbiError::NumericRange {
                ty: ty.to_string(),
                value: s.to_string(),
            });
        }
        Ok(I256::from_raw(mag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn uint_from_number_and_string() {
        let ty = TypeDescriptor::Uint(256);
        let a = AbiValue::from_json(&ty, &json!(1_000_000)).unwrap();
        let b = AbiValue::from_json(&ty, &json!("1000000")).unwrap();
        let c = AbiValue::from_json(&ty, &json!("0xf4240")).unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.as_uint(), Some(U256::from(1_000_000u64)));
    }

    #[test]
    fn uint_rejects_garbage_and_floats() {
        let ty = TypeDescriptor::Uint(256);
        assert!(matches!(
            AbiValue::from_json(&ty, &json!("12abc")),
            Err(AbiError::InvalidType { .. })
        ));
        assert!(matches!(
            AbiValue::from_json(&ty, &json!(1.5)),
            Err(AbiError::InvalidType { .. })
        ));
    }

    #[test]
    fn uint_string_overflow_is_range_error() {
        let ty = TypeDescriptor::Uint(256);
        // 2^256 in decimal: one digit past U256::MAX.
        let too_big =
            "115792089237316195423570985008687907853269984665640564039457584007913129639936";
        assert!(matches!(
            AbiValue::from_json(&ty, &json!(too_big)),
            Err(AbiError::NumericRange { .. })
        ));
    }

    #[test]
    fn int_negative_roundtrip() {
        let ty = TypeDescriptor::Int(256);
        let v = AbiValue::from_json(&ty, &json!(-42)).unwrap();
        assert_eq!(v.as_int(), Some(I256::try_from(-42i64).unwrap()));
        assert_eq!(v.to_json(), json!("-42"));

        let s = AbiValue::from_json(&ty, &json!("-42")).unwrap();
        assert_eq!(v, s);
    }

    #[test]
    fn int_hex_is_twos_complement() {
        let ty = TypeDescriptor::Int(256);
        let minus_one = "0x".to_string() + &"ff".repeat(32);
        let v = AbiValue::from_json(&ty, &json!(minus_one)).unwrap();
        assert_eq!(v.as_int(), Some(I256::MINUS_ONE));
    }

    #[test]
    fn address_displays_checksummed() {
        let ty = TypeDescriptor::Address;
        let v = AbiValue::from_json(&ty, &json!("0xd8da6bf26964af9d7eed9e03e53415d37aa96045"))
            .unwrap();
        assert_eq!(v.to_string(), "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045");
    }

    #[test]
    fn tuple_accepts_object_when_named() {
        let ty = TypeDescriptor::Tuple(vec![
            ("to".into(), TypeDescriptor::Address),
            ("amount".into(), TypeDescriptor::Uint(256)),
        ]);
        let positional = AbiValue::from_json(
            &ty,
            &json!(["0xd8da6bf26964af9d7eed9e03e53415d37aa96045", "7"]),
        )
        .unwrap();
        let named = AbiValue::from_json(
            &ty,
            &json!({"amount": "7", "to": "0xd8da6bf26964af9d7eed9e03e53415d37aa96045"}),
        )
        .unwrap();
        assert_eq!(positional, named);
    }

    #[test]
    fn tuple_arity_mismatch() {
        let ty = TypeDescriptor::tuple_of(vec![TypeDescriptor::Bool, TypeDescriptor::Bool]);
        assert!(matches!(
            AbiValue::from_json(&ty, &json!([true])),
            Err(AbiError::ArgumentCount {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn bytes_json_roundtrip() {
        let ty = TypeDescriptor::Bytes;
        let v = AbiValue::from_json(&ty, &json!("0xdeadbeef")).unwrap();
        assert_eq!(v.as_bytes(), Some(&[0xde, 0xad, 0xbe, 0xef][..]));
        assert_eq!(v.to_json(), json!("0xdeadbeef"));
    }

    #[test]
    fn odd_length_hex_rejected() {
        let ty = TypeDescriptor::Bytes;
        assert!(matches!(
            AbiValue::from_json(&ty, &json!("0xabc")),
            Err(AbiError::InvalidHex { .. })
        ));
    }
}
