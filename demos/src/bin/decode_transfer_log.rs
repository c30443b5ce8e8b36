//! # decode_transfer_log
//!
//! Demonstrates decoding a real ERC-20 Transfer event from raw log data.
//!
//! Run with:
//! ```sh
//! cargo run --bin decode_transfer_log
//! ```

use abicodec_core::RawLog;
use abicodec_evm::ContractAbi;
use anyhow::Result;

const ERC20_ABI: &str = r#"[
    {
        "name": "Transfer",
        "type": "event",
        "inputs": [
            {"name": "from",  "type": "address", "indexed": true},
            {"name": "to",    "type": "address", "indexed": true},
            {"name": "value", "type": "uint256", "indexed": false}
        ]
    },
    {
        "name": "Approval",
        "type": "event",
        "inputs": [
            {"name": "owner",   "type": "address", "indexed": true},
            {"name": "spender", "type": "address", "indexed": true},
            {"name": "value",   "type": "uint256", "indexed": false}
        ]
    }
]"#;

fn main() -> Result<()> {
    // ── 1. Load the contract ABI ─────────────────────────────────────────────
    let abi = ContractAbi::from_json(ERC20_ABI)?;
    println!("✓ ABI loaded ({} events)", abi.events().len());

    // ── 2. Construct a raw ERC-20 Transfer log ───────────────────────────────
    // This matches the well-known USDC Transfer event structure:
    //   from:  0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045
    //   to:    0xAb5801a7D398351b8bE11C439e05C5B3259aeC9B
    //   value: 1,000,000,000 (1000 USDC at 6 decimals)
    let log = RawLog {
        address: "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".into(),
        topics: vec![
            // topics[0] = keccak256("Transfer(address,address,uint256)")
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef".into(),
            // topics[1] = from address (indexed, 32-byte padded)
            "0x000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045".into(),
            // topics[2] = to address (indexed, 32-byte padded)
            "0x000000000000000000000000ab5801a7d398351b8be11c439e05c5b3259aec9b".into(),
        ],
        // data = ABI-encoded value: 1,000,000,000 = 0x3B9ACA00
        data: "0x000000000000000000000000000000000000000000000000000000003b9aca00".into(),
    };

    // ── 3. Dispatch on topics[0] and decode ──────────────────────────────────
    let decoded = abi.decode_log(&log)?;
    println!("✓ Matched event: {}", decoded.event);

    println!("\n─── Decoded Event ───────────────────────────────");
    println!("  event:     {}", decoded.event);
    println!("  address:   {}", decoded.address);
    println!();
    for (name, value) in decoded.params.iter() {
        println!("  {:12} = {}", name.unwrap_or("<unnamed>"), value);
    }

    // ── 4. Force a specific event by name ────────────────────────────────────
    // decode_event() verifies topics[0] against the requested event's
    // signature topic, so asking for Approval here fails cleanly.
    match abi.decode_event("Approval", &log) {
        Err(e) => println!("\n✓ wrong event rejected: {e}"),
        Ok(_) => println!("\nunexpected success"),
    }

    println!("\n✓ Log decode complete");
    Ok(())
}
