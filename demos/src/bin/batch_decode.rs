//! # batch_decode
//!
//! Demonstrates high-throughput batch decoding of ERC-20 logs using
//! `BatchDecoder` with progress reporting and error collection.
//!
//! Run with:
//! ```sh
//! cargo run --bin batch_decode
//! ```

use abicodec_batch::{BatchDecoder, BatchRequest, ErrorMode};
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
    // Set up structured logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    // ── 1. Load the contract ABI ─────────────────────────────────────────────
    let abi = ContractAbi::from_json(ERC20_ABI)?;
    println!("✓ ABI loaded ({} events)", abi.events().len());

    // ── 2. Build a batch of raw logs ─────────────────────────────────────────
    // Simulate 6 real EVM logs: 4 Transfers + 1 Approval + 1 unknown topic
    let usdc = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48";
    let alice = "0x000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045";
    let bob = "0x000000000000000000000000ab5801a7d398351b8be11c439e05c5b3259aec9b";
    let carol = "0x000000000000000000000000c1912fee45d61c87cc5ea59dae31190ff64f1e39";

    let transfer_topic = "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef";
    let approval_topic = "0x8c5be1e5ebec7d5bd14f71427d1e84f3dd0314c0f7b2291e5b200ac8c7c3b925";
    let unknown_topic = "0xdeadbeefdeadbeefdeadbeefdeadbeefdeadbeefdeadbeefdeadbeefdeadbeef";

    // value = 1_000_000 (1 USDC at 6 decimals)
    let one_usdc = "0x00000000000000000000000000000000000000000000000000000000000f4240";
    // value = 5_000_000 (5 USDC)
    let five_usdc = "0x00000000000000000000000000000000000000000000000000000000004c4b40";
    // allowance = max uint256
    let max_allowance = "0xffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff";

    let log = |topic0: &str, a: &str, b: &str, data: &str| RawLog {
        address: usdc.into(),
        topics: vec![topic0.into(), a.into(), b.into()],
        data: data.into(),
    };

    let logs = vec![
        // Transfer: Alice → Bob, 1 USDC
        log(transfer_topic, alice, bob, one_usdc),
        // Transfer: Alice → Carol, 1 USDC
        log(transfer_topic, alice, carol, one_usdc),
        // Transfer: Bob → Carol, 5 USDC
        log(transfer_topic, bob, carol, five_usdc),
        // Transfer: Bob → Alice, 1 USDC (back-transfer)
        log(transfer_topic, bob, alice, one_usdc),
        // Approval: Alice approves Bob for max allowance
        log(approval_topic, alice, bob, max_allowance),
        // Unknown topic, not in the ABI (skipped/collected depending on mode)
        RawLog {
            address: usdc.into(),
            topics: vec![unknown_topic.into()],
            data: "0x".into(),
        },
    ];

    println!("✓ Prepared {} raw logs (5 known + 1 unknown)", logs.len());

    // ── 3. Run the BatchDecoder in Collect mode ──────────────────────────────
    let request = BatchRequest::new(logs)
        .chunk_size(100)
        .error_mode(ErrorMode::Collect)
        .on_progress(|done, total| {
            print!("\r  Progress: {done}/{total}");
            let _ = std::io::Write::flush(&mut std::io::stdout());
        });

    let decoder = BatchDecoder::new(abi);
    let report = decoder.decode(request)?;
    println!(); // newline after progress

    // ── 4. Print results ─────────────────────────────────────────────────────
    println!("\n─── Batch Result ────────────────────────────────────────");
    println!("  total input:  {}", report.total_input);
    println!("  decoded:      {}", report.decoded.len());
    println!("  errors:       {}", report.errors.len());

    println!("\n─── Decoded Logs ────────────────────────────────────────");
    for (i, decoded) in report.decoded.iter().enumerate() {
        let fields: Vec<String> = decoded
            .params
            .iter()
            .map(|(name, value)| format!("{}={}", name.unwrap_or("?"), value))
            .collect();
        println!("  [{i}] {} | {}", decoded.event, fields.join(", "));
    }

    if !report.errors.is_empty() {
        println!("\n─── Skipped / Errors ────────────────────────────────────");
        for (idx, err) in &report.errors {
            println!("  [input #{idx}] {err}");
        }
    }

    println!("\n✓ Batch decode complete");
    Ok(())
}
