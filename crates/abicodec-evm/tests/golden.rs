//! Golden vector integration tests.
//!
//! Known-good encodings (produced by widely deployed tooling and
//! on-chain data) are byte-compared against this codec's output, and
//! the documented decoding behaviors are exercised end to end through
//! the string boundary in `abicodec_evm::api`.

use abicodec_core::{AbiError, AbiValue, Param, TypeDescriptor};
use abicodec_evm::{api, ContractAbi};
use alloy_primitives::{Address, U256};
use serde_json::json;

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// Parse hex bytes from a `"0x..."` string.
fn hex_to_bytes(s: &str) -> Vec<u8> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s).unwrap_or_else(|e| panic!("bad hex '{s}': {e}"))
}

/// Read head word `idx` of an encoding as a u64.
fn word_as_u64(data: &[u8], idx: usize) -> u64 {
    let word = &data[idx * 32..(idx + 1) * 32];
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&word[24..]);
    u64::from_be_bytes(buf)
}

const HOLDER: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";
const RECIPIENT: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

// ─── Mixed static/dynamic parameters ──────────────────────────────────────────

#[test]
fn mixed_parameters_golden() {
    let out = api::encode_parameters(
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
    .expect("encode failed");

    // Head: value, offset, padded bytes10, offset. Tails: uint32[] then bytes.
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
fn head_offsets_point_at_their_tails() {
    let out = hex_to_bytes(
        &api::encode_parameters(
            &[json!("uint256"), json!("uint32[]"), json!("bytes10"), json!("bytes")],
            &[
                json!("0x123"),
                json!(["0x456", "0x789"]),
                json!("0x31323334353637383930"),
                json!("0x48656c6c6f2c20776f726c6421"),
            ],
        )
        .unwrap(),
    );

    // The array's offset word leads to its length word.
    let array_offset = word_as_u64(&out, 1) as usize;
    assert_eq!(word_as_u64(&out, array_offset / 32), 2);

    // The bytes' offset word leads to its byte length.
    let bytes_offset = word_as_u64(&out, 3) as usize;
    assert_eq!(word_as_u64(&out, bytes_offset / 32), 13);
}

// ─── Decoding behaviors ───────────────────────────────────────────────────────

#[test]
fn bool_decode_is_lenient() {
    let one = format!("0x{:0>64}", "1");
    assert_eq!(
        api::decode_parameter(&json!("bool"), &one).unwrap(),
        AbiValue::Bool(true)
    );

    let three = format!("0x{:0>64}", "3");
    assert_eq!(
        api::decode_parameter(&json!("bool"), &three).unwrap(),
        AbiValue::Bool(false)
    );
}

#[test]
fn empty_data_reports_the_likely_cause() {
    let err = api::decode_parameters(&[json!("uint256")], "0x").unwrap_err();
    assert_eq!(err, AbiError::EmptyData);
    assert!(err.to_string().contains("revert"));
}

#[test]
fn fixed_array_arity_is_strict() {
    let err = api::encode_parameter(&json!("uint8[3]"), &json!([1, 2, 3, 4])).unwrap_err();
    assert_eq!(
        err,
        AbiError::ArrayLengthMismatch {
            ty: "uint8[3]".to_string(),
            expected: 3,
            actual: 4,
        }
    );
}

#[test]
fn negative_one_is_all_ff_both_ways() {
    let encoded = api::encode_parameter(&json!("int256"), &json!("-1")).unwrap();
    assert_eq!(encoded, format!("0x{}", "ff".repeat(32)));

    let decoded = api::decode_parameter(&json!("int256"), &encoded).unwrap();
    assert_eq!(decoded.to_json(), json!("-1"));
}

#[test]
fn static_tuples_occupy_exactly_one_word_per_leaf() {
    // 8 static leaves in total, nested or not: always 8 words.
    let out = hex_to_bytes(
        &api::encode_parameters(
            &[
                json!("uint256"),
                json!("bool"),
                json!("address"),
                json!("bytes32"),
                json!("uint8[2]"),
                json!({"pair": {"x": "uint16", "y": "uint16"}}),
            ],
            &[
                json!("1"),
                json!(true),
                json!(HOLDER),
                json!(format!("0x{}", "ab".repeat(32))),
                json!([3, 4]),
                json!([5, 6]),
            ],
        )
        .unwrap(),
    );
    assert_eq!(out.len(), 8 * 32);
}

#[test]
fn nested_dynamic_arrays_round_trip() {
    let ty = json!("uint256[][]");
    let value = json!([["1"], ["2", "3"], []]);
    let encoded = api::encode_parameter(&ty, &value).unwrap();
    let decoded = api::decode_parameter(&ty, &encoded).unwrap();
    assert_eq!(decoded.to_json(), json!([["1"], ["2", "3"], []]));
}

#[test]
fn resolution_is_stable_across_calls() {
    let first = api::encode_parameter(&json!("uint32[8][]"), &json!([[1, 2, 3, 4, 5, 6, 7, 8]]))
        .unwrap();
    let second = api::encode_parameter(&json!("uint32[8][]"), &json!([[1, 2, 3, 4, 5, 6, 7, 8]]))
        .unwrap();
    assert_eq!(first, second);
}

// ─── Selectors ────────────────────────────────────────────────────────────────

#[test]
fn transfer_selector_golden() {
    assert_eq!(
        api::encode_function_signature("transfer(address,uint256)").unwrap(),
        "0xa9059cbb"
    );
}

#[test]
fn transfer_event_topic_golden() {
    assert_eq!(
        api::encode_event_signature("Transfer(address,address,uint256)").unwrap(),
        "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
    );
}

// ─── ERC-20 transfer calldata ─────────────────────────────────────────────────

#[test]
fn erc20_transfer_calldata_golden() {
    let calldata = api::encode_function_call(
        "transfer(address,uint256)",
        &[json!(HOLDER), json!("1000000")],
    )
    .unwrap();
    let expected = concat!(
        "0xa9059cbb",
        "000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045",
        "00000000000000000000000000000000000000000000000000000000000f4240",
    );
    assert_eq!(calldata, expected);

    let params = decode_via_contract(&calldata);
    assert_eq!(params.0, "transfer");
    assert_eq!(
        params.1.by_name("to"),
        Some(&AbiValue::Address(HOLDER.parse::<Address>().unwrap()))
    );
    assert_eq!(
        params.1.by_name("amount"),
        Some(&AbiValue::Uint(U256::from(1_000_000u64)))
    );
}

fn decode_via_contract(calldata: &str) -> (String, abicodec_core::DecodedParams) {
    let abi = ContractAbi::from_json(
        r#"[{
            "type": "function",
            "name": "transfer",
            "inputs": [
                {"name": "to", "type": "address"},
                {"name": "amount", "type": "uint256"}
            ]
        }]"#,
    )
    .unwrap();
    let (function, params) = abi.decode_call(&hex_to_bytes(calldata)).unwrap();
    (function.name.clone(), params)
}

// ─── ERC-20 Transfer log ──────────────────────────────────────────────────────

#[test]
fn erc20_transfer_log_golden() {
    // One indexed address, one non-indexed value: topics feed the
    // address back directly, data carries the amount.
    let inputs = vec![
        Param::indexed("from", TypeDescriptor::Address),
        Param::indexed("to", TypeDescriptor::Address),
        Param::new("value", TypeDescriptor::Uint(256)),
    ];
    let inputs_json: Vec<serde_json::Value> = inputs
        .iter()
        .map(|p| {
            json!({
                "name": p.name,
                "type": p.ty.to_string(),
                "indexed": p.indexed,
            })
        })
        .collect();

    let topics = vec![
        "0x000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045".to_string(),
        "0x0000000000000000000000005aaeb6053f3e94c9b9a09f33669435e7ef1beaed".to_string(),
    ];
    let data = "0x000000000000000000000000000000000000000000000000000000003b9aca00";

    let decoded = api::decode_log(&inputs_json, data, &topics).unwrap();
    assert_eq!(
        decoded.by_name("from"),
        Some(&AbiValue::Address(HOLDER.parse::<Address>().unwrap()))
    );
    assert_eq!(
        decoded.by_name("to"),
        Some(&AbiValue::Address(RECIPIENT.parse::<Address>().unwrap()))
    );
    assert_eq!(
        decoded.by_name("value"),
        Some(&AbiValue::Uint(U256::from(1_000_000_000u64)))
    );
}

#[test]
fn full_log_dispatch_through_contract_abi() {
    let abi = ContractAbi::from_json(
        r#"[{
            "type": "event",
            "name": "Transfer",
            "inputs": [
                {"name": "from", "type": "address", "indexed": true},
                {"name": "to", "type": "address", "indexed": true},
                {"name": "value", "type": "uint256", "indexed": false}
            ]
        }]"#,
    )
    .unwrap();
    let log = abicodec_core::RawLog::new(
        vec![
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef".to_string(),
            "0x000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045".to_string(),
            "0x0000000000000000000000005aaeb6053f3e94c9b9a09f33669435e7ef1beaed".to_string(),
        ],
        "0x000000000000000000000000000000000000000000000000000000003b9aca00",
    );

    let decoded = abi.decode_log(&log).unwrap();
    assert_eq!(decoded.event, "Transfer");
    assert_eq!(
        decoded.params.by_name("value"),
        Some(&AbiValue::Uint(U256::from(1_000_000_000u64)))
    );
}

// ─── Nested dynamic tuple ─────────────────────────────────────────────────────

#[test]
fn dynamic_tuple_golden() {
    let out = api::encode_parameter(
        &json!({
            "name": "order",
            "type": "tuple",
            "components": [
                {"name": "id", "type": "uint256"},
                {"name": "note", "type": "string"}
            ]
        }),
        &json!({"id": "7", "note": "hi"}),
    )
    .unwrap();

    // Offset to the tuple block, then the tuple's own head and tail.
    let expected = concat!(
        "0x",
        "0000000000000000000000000000000000000000000000000000000000000020",
        "0000000000000000000000000000000000000000000000000000000000000007",
        "0000000000000000000000000000000000000000000000000000000000000040",
        "0000000000000000000000000000000000000000000000000000000000000002",
        "6869000000000000000000000000000000000000000000000000000000000000",
    );
    assert_eq!(out, expected);

    let decoded = api::decode_parameter(
        &json!({
            "name": "order",
            "type": "tuple",
            "components": [
                {"name": "id", "type": "uint256"},
                {"name": "note", "type": "string"}
            ]
        }),
        &out,
    )
    .unwrap();
    assert_eq!(decoded.to_json(), json!(["7", "hi"]));
}

// ─── Adversarial input ────────────────────────────────────────────────────────

#[test]
fn hostile_length_prefix_fails_closed() {
    // Well-formed offset, then a length word claiming 2^200 bytes.
    let mut data = vec![0u8; 64];
    data[31] = 32;
    data[32 + 6] = 1;
    let err = api::decode_parameters(&[json!("bytes")], &api::to_hex(&data)).unwrap_err();
    assert!(matches!(err, AbiError::TruncatedData { .. }));
}

#[test]
fn hostile_offset_fails_closed() {
    let mut data = vec![0u8; 32];
    data[30] = 0xff; // offset 0xff00
    let err = api::decode_parameters(&[json!("string")], &api::to_hex(&data)).unwrap_err();
    assert!(matches!(err, AbiError::OffsetOutOfBounds { .. }));
}
