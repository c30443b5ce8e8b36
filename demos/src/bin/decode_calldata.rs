//! # decode_calldata
//!
//! Demonstrates selector dispatch: raw transaction calldata in, function
//! name and arguments out.
//!
//! Run with:
//! ```sh
//! cargo run --bin decode_calldata
//! ```

use abicodec_evm::{api, ContractAbi};
use anyhow::Result;
use serde_json::json;

const ERC20_ABI: &str = r#"[
    {
        "name": "transfer",
        "type": "function",
        "inputs": [
            {"name": "to",     "type": "address"},
            {"name": "amount", "type": "uint256"}
        ]
    },
    {
        "name": "approve",
        "type": "function",
        "inputs": [
            {"name": "spender", "type": "address"},
            {"name": "amount",  "type": "uint256"}
        ]
    }
]"#;

fn main() -> Result<()> {
    let abi = ContractAbi::from_json(ERC20_ABI)?;
    println!("✓ ABI loaded ({} functions)", abi.functions().len());

    // ── 1. Encode a transfer() call from a plain signature ───────────────────
    let recipient = "0xd8da6bf26964af9d7eed9e03e53415d37aa96045";
    let amount = "1000000"; // 1 USDC (6 decimals)

    let calldata = api::encode_function_call(
        "transfer(address,uint256)",
        &[json!(recipient), json!(amount)],
    )?;

    println!("\n─── Encoded transfer() ──────────────────────────────");
    println!("  to:        {recipient}");
    println!("  amount:    {amount} (1 USDC at 6 decimals)");
    println!("  calldata:  {calldata}");
    println!("  selector:  {}", &calldata[..10]);

    // ── 2. Decode it back through the contract ABI ───────────────────────────
    let bytes = api::hex_to_bytes(&calldata)?;
    let (func, args) = abi.decode_call(&bytes)?;

    println!("\n─── Decoded calldata ────────────────────────────────");
    println!("  function:  {}", func.signature());
    for (name, value) in args.iter() {
        println!("    {:10} = {}", name.unwrap_or("<unnamed>"), value);
    }

    assert_eq!(func.name, "transfer");
    assert_eq!(
        args.by_name("amount").map(|v| v.to_json()),
        Some(json!("1000000"))
    );
    println!("  ✓ roundtrip verified: amount matches exactly");

    // ── 3. The same decode without a full ABI ────────────────────────────────
    // A single fragment (or signature) is enough when the caller already
    // knows which function produced the calldata.
    let standalone = api::decode_function_call("transfer(address,uint256)", &calldata)?;
    println!("\n─── Standalone fragment decode ──────────────────────");
    println!("  {} inputs ✓", standalone.len());

    // ── 4. Unknown selectors fail loudly ─────────────────────────────────────
    println!("\n─── Error handling ──────────────────────────────────");
    let alien = api::hex_to_bytes("0xdeadbeef")?;
    match abi.decode_call(&alien) {
        Err(e) => println!("  ✓ unknown selector rejected: {e}"),
        Ok(_) => println!("  unexpected success"),
    }

    println!("\n✓ Calldata examples complete");
    Ok(())
}
