//! # encode_roundtrip
//!
//! Demonstrates ABI encoding of a mixed static/dynamic parameter list and
//! the decode roundtrip back to JSON-friendly values.
//!
//! Run with:
//! ```sh
//! cargo run --bin encode_roundtrip
//! ```

use abicodec_evm::{decode_parameters, encode_parameters};
use anyhow::Result;
use serde_json::json;

fn main() -> Result<()> {
    println!("AbiCodec — Parameter Encode + Decode Roundtrip");
    println!("═══════════════════════════════════════════════════════");

    // ── 1. Encode a mixed parameter list ─────────────────────────────────────
    // Two static params (one word each in the head) and two dynamic ones
    // (an offset in the head, the payload in the tail).
    let types = vec![
        json!("uint256"),
        json!("string"),
        json!("address"),
        json!("uint8[]"),
    ];
    let values = vec![
        json!("1000000"),
        json!("hello abi"),
        json!("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"),
        json!([1, 2, 3]),
    ];

    let encoded = encode_parameters(&types, &values)?;

    println!("\n─── Encoded layout ──────────────────────────────────");
    let words = (encoded.len() - 2) / 64;
    for i in 0..words {
        println!("  [{:>2}] 0x{}", i, &encoded[2 + i * 64..2 + (i + 1) * 64]);
    }
    println!("  {} words, {} bytes", words, words * 32);

    // ── 2. Decode it back — proving the roundtrip ────────────────────────────
    let decoded = decode_parameters(&types, &encoded)?;

    println!("\n─── Decoded back ────────────────────────────────────");
    for (pos, (_, value)) in decoded.iter().enumerate() {
        println!("  [{}] {}", pos, value);
    }

    assert_eq!(decoded.get(1).and_then(|v| v.as_str()), Some("hello abi"));
    println!("\n  ✓ roundtrip verified: the string survives intact");

    // ── 3. Wrong argument count is rejected up front ─────────────────────────
    println!("\n─── Error handling ──────────────────────────────────");
    match encode_parameters(&types, &values[..2]) {
        Err(e) => println!("  ✓ wrong arg count detected: {e}"),
        Ok(_) => println!("  unexpected success"),
    }

    // ── 4. Out-of-range numerics are rejected ────────────────────────────────
    match encode_parameters(&[json!("uint8")], &[json!(300)]) {
        Err(e) => println!("  ✓ uint8 range enforced: {e}"),
        Ok(_) => println!("  unexpected success"),
    }

    println!("\n✓ Encoding examples complete");
    Ok(())
}
