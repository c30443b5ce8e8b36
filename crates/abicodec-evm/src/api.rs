//! The string-facing boundary.
//!
//! Everything here speaks hex strings and `serde_json::Value`s: types
//! arrive as plain strings, fragment objects, or simplified structs;
//! values arrive as JSON and are converted against the resolved
//! descriptor. Outputs are 0x-prefixed lowercase hex. The typed layers
//! underneath (`encode`, `decode`, `logs`) never see a string.

use abicodec_core::{AbiError, AbiValue, DecodedParams, FunctionAbi, Param, TypeDescriptor};
use serde_json::Value;

use crate::{decode, encode, logs, resolver, selector};

/// Parse a hex string, tolerating a missing `0x` prefix.
pub fn hex_to_bytes(s: &str) -> Result<Vec<u8>, AbiError> {
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(stripped).map_err(|e| AbiError::InvalidHex {
        reason: format!("'{s}': {e}"),
    })
}

/// Format bytes as 0x-prefixed lowercase hex.
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// One 32-byte topic from its hex form.
pub(crate) fn parse_topic(s: &str) -> Result<[u8; 32], AbiError> {
    let bytes = hex_to_bytes(s)?;
    <[u8; 32]>::try_from(bytes).map_err(|b| AbiError::InvalidLength {
        ty: "bytes32".to_string(),
        expected: 32,
        actual: b.len(),
    })
}

/// Encode one value against one type input.
pub fn encode_parameter(ty: &Value, value: &Value) -> Result<String, AbiError> {
    encode_parameters(std::slice::from_ref(ty), std::slice::from_ref(value))
}

/// Encode a parameter list against a type list.
pub fn encode_parameters(types: &[Value], values: &[Value]) -> Result<String, AbiError> {
    if types.len() != values.len() {
        return Err(AbiError::ArgumentCount {
            expected: types.len(),
            actual: values.len(),
        });
    }
    let params = resolver::resolve_params(types)?;
    let (tys, vals) = convert_values(&params, values)?;
    Ok(to_hex(&encode::encode(&tys, &vals)?))
}

/// Decode hex data against one type input.
pub fn decode_parameter(ty: &Value, data: &str) -> Result<AbiValue, AbiError> {
    decode_parameters(std::slice::from_ref(ty), data)?
        .into_values()
        .into_iter()
        .next()
        .ok_or(AbiError::EmptyData)
}

/// Decode hex data against a type list.
pub fn decode_parameters(types: &[Value], data: &str) -> Result<DecodedParams, AbiError> {
    let params = resolver::resolve_params(types)?;
    let bytes = hex_to_bytes(data)?;
    decode::decode_params(&params, &bytes)
}

/// 4-byte dispatch selector of a signature string or JSON fragment.
pub fn encode_function_signature(sig_or_fragment: &str) -> Result<String, AbiError> {
    let function = parse_function_input(sig_or_fragment)?;
    Ok(to_hex(&selector::function_selector(&function)))
}

/// 32-byte signature topic of a signature string or JSON fragment.
pub fn encode_event_signature(sig_or_fragment: &str) -> Result<String, AbiError> {
    let trimmed = sig_or_fragment.trim_start();
    let topic = if trimmed.starts_with('{') {
        let fragment: Value =
            serde_json::from_str(trimmed).map_err(|e| AbiError::InvalidType {
                ty: sig_or_fragment.to_string(),
                reason: format!("invalid fragment JSON: {e}"),
            })?;
        selector::event_topic(&resolver::resolve_event(&fragment)?)
    } else {
        // Reuse the function grammar; only the name and input types
        // matter for hashing.
        let parsed = resolver::parse_signature(trimmed)?;
        selector::topic_from_signature(&parsed.signature())
    };
    Ok(to_hex(&topic))
}

/// Build full calldata: selector followed by the encoded arguments.
pub fn encode_function_call(fragment: &str, values: &[Value]) -> Result<String, AbiError> {
    let function = parse_function_input(fragment)?;
    if function.inputs.len() != values.len() {
        return Err(AbiError::ArgumentCount {
            expected: function.inputs.len(),
            actual: values.len(),
        });
    }
    let (tys, vals) = convert_values(&function.inputs, values)?;
    let mut out = selector::function_selector(&function).to_vec();
    out.extend_from_slice(&encode::encode(&tys, &vals)?);
    Ok(to_hex(&out))
}

/// Decode calldata produced for the given function, verifying its
/// selector before touching the arguments.
pub fn decode_function_call(fragment: &str, data: &str) -> Result<DecodedParams, AbiError> {
    let function = parse_function_input(fragment)?;
    let bytes = hex_to_bytes(data)?;
    if bytes.len() < 4 {
        return Err(AbiError::TruncatedData {
            offset: 0,
            needed: 4,
            len: bytes.len(),
        });
    }
    let expected = selector::function_selector(&function);
    if bytes[..4] != expected {
        return Err(AbiError::InvalidType {
            ty: function.signature(),
            reason: format!(
                "selector mismatch: calldata starts with 0x{}, expected 0x{}",
                hex::encode(&bytes[..4]),
                hex::encode(expected)
            ),
        });
    }
    decode::decode_params(&function.inputs, &bytes[4..])
}

/// Decode an event's parameters from hex data and hex topics.
///
/// `topics` holds only indexed-parameter topics; strip the signature
/// topic of a non-anonymous event before calling.
pub fn decode_log(
    inputs: &[Value],
    data: &str,
    topics: &[String],
) -> Result<DecodedParams, AbiError> {
    let params = resolver::resolve_params(inputs)?;
    let bytes = hex_to_bytes(data)?;
    let topic_words = topics
        .iter()
        .map(|t| parse_topic(t))
        .collect::<Result<Vec<_>, _>>()?;
    logs::decode_log(&params, &topic_words, &bytes)
}

/// A function given either as a canonical signature string or as a
/// `{name, inputs}` fragment JSON object.
fn parse_function_input(input: &str) -> Result<FunctionAbi, AbiError> {
    let trimmed = input.trim_start();
    if trimmed.starts_with('{') {
        let fragment: Value =
            serde_json::from_str(trimmed).map_err(|e| AbiError::InvalidType {
                ty: input.to_string(),
                reason: format!("invalid fragment JSON: {e}"),
            })?;
        resolver::resolve_function(&fragment)
    } else {
        resolver::parse_signature(trimmed)
    }
}

/// Resolve JSON values against resolved parameters, pairing each
/// descriptor with its converted value.
fn convert_values(
    params: &[Param],
    values: &[Value],
) -> Result<(Vec<TypeDescriptor>, Vec<AbiValue>), AbiError> {
    let mut tys = Vec::with_capacity(params.len());
    let mut vals = Vec::with_capacity(params.len());
    for (param, value) in params.iter().zip(values) {
        vals.push(AbiValue::from_json(&param.ty, value)?);
        tys.push(param.ty.clone());
    }
    Ok((tys, vals))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scenario_mixed_params_golden() {
        let out = encode_parameters(
            &[
                json!("uint256"),
                json!("uint32[]"),
                json!("bytes10"),
                json!("bytes"),
            ],
            &[
                json!("0x123"),
                json!(["0x456", "0x789"]),
                json!("0x31323334353637383930"),
                json!("0x48656c6c6f2c20776f726c6421"),
            ],
        )
        .unwrap();
        let expected = concat!(
            "0x",
            "0000000000000000000000000000000000000000000000000000000000000123",
            "0000000000000000000000000000000000000000000000000000000000000080",
            "3132333435363738393000000000000000000000000000000000000000000000",
            "00000000000000000000000000000000000000000000000000000000000000e0",
            "0000000000000000000000000000000000000000000000000000000000000002",
            "0000000000000000000000000000000000000000000000000000000000000456",
            "0000000000000000000000000000000000000000000000000000000000000789",
            "000000000000000000000000000000000000000000000000000000000000000d",
            "48656c6c6f2c20776f726c642100000000000000000000000000000000000000",
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn single_parameter_round_trip() {
        let encoded = encode_parameter(&json!("uint256"), &json!(42)).unwrap();
        let decoded = decode_parameter(&json!("uint256"), &encoded).unwrap();
        assert_eq!(decoded.to_json(), json!("42"));
    }

    #[test]
    fn prefix_is_optional_on_input() {
        let with = decode_parameter(&json!("bool"), &format!("0x{}", "0".repeat(63) + "1"));
        let without = decode_parameter(&json!("bool"), &("0".repeat(63) + "1"));
        assert_eq!(with.unwrap(), without.unwrap());
    }

    #[test]
    fn bad_hex_is_rejected_before_decoding() {
        assert!(matches!(
            decode_parameters(&[json!("bool")], "0xzz"),
            Err(AbiError::InvalidHex { .. })
        ));
        assert!(matches!(
            decode_parameters(&[json!("bool")], "0xabc"),
            Err(AbiError::InvalidHex { .. })
        ));
    }

    #[test]
    fn function_signature_from_string_and_fragment() {
        assert_eq!(
            encode_function_signature("transfer(address,uint256)").unwrap(),
            "0xa9059cbb"
        );
        let fragment = r#"{
            "name": "transfer",
            "inputs": [
                {"name": "to", "type": "address"},
                {"name": "amount", "type": "uint256"}
            ]
        }"#;
        assert_eq!(encode_function_signature(fragment).unwrap(), "0xa9059cbb");
    }

    #[test]
    fn function_signature_canonicalizes_widths() {
        assert_eq!(
            encode_function_signature("transfer(address,uint)").unwrap(),
            "0xa9059cbb"
        );
    }

    #[test]
    fn event_signature_hashes_whole_topic() {
        assert_eq!(
            encode_event_signature("Transfer(address,address,uint256)").unwrap(),
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
        );
    }

    #[test]
    fn function_call_builds_and_verifies() {
        let calldata = encode_function_call(
            "transfer(address,uint256)",
            &[
                json!("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"),
                json!("1000000"),
            ],
        )
        .unwrap();
        assert!(calldata.starts_with("0xa9059cbb"));

        let params = decode_function_call("transfer(address,uint256)", &calldata).unwrap();
        assert_eq!(params.get(1).map(|v| v.to_json()), Some(json!("1000000")));

        let err = decode_function_call("approve(address,uint256)", &calldata).unwrap_err();
        assert!(matches!(err, AbiError::InvalidType { .. }));
    }

    #[test]
    fn log_boundary_decodes_from_hex() {
        let topics = vec![format!(
            "0x000000000000000000000000{}",
            "d8da6bf26964af9d7eed9e03e53415d37aa96045"
        )];
        let data = encode_parameter(&json!("uint256"), &json!(7)).unwrap();
        let decoded = decode_log(
            &[
                json!({"name": "owner", "type": "address", "indexed": true}),
                json!({"name": "nonce", "type": "uint256"}),
            ],
            &data,
            &topics,
        )
        .unwrap();
        assert_eq!(decoded.name_of(0), Some("owner"));
        assert_eq!(decoded.by_name("nonce").map(|v| v.to_json()), Some(json!("7")));
    }

    #[test]
    fn argument_count_checked_before_resolution() {
        let err = encode_parameters(&[json!("bool")], &[]).unwrap_err();
        assert_eq!(
            err,
            AbiError::ArgumentCount {
                expected: 1,
                actual: 0,
            }
        );
    }
}
