//! Batch decode throughput benchmarks.
//!
//! Measures decode throughput at various batch sizes using Criterion.
//!
//! # Running
//! ```bash
//! cargo bench --package abicodec-batch
//! ```
//!
//! # Targets
//! - Single-thread: >1M ERC-20 Transfer logs/second
//! - Rayon 8-thread: >5M logs/second

use abicodec_batch::{BatchDecoder, BatchRequest, ErrorMode};
use abicodec_core::RawLog;
use abicodec_evm::{api, ContractAbi};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::json;

// ─── ABI setup ────────────────────────────────────────────────────────────────

const ERC20_ABI: &str = r#"[
    {
        "type": "function",
        "name": "transfer",
        "inputs": [
            {"name": "to", "type": "address"},
            {"name": "amount", "type": "uint256"}
        ]
    },
    {
        "type": "event",
        "name": "Transfer",
        "inputs": [
            {"name": "from", "type": "address", "indexed": true},
            {"name": "to", "type": "address", "indexed": true},
            {"name": "value", "type": "uint256", "indexed": false}
        ]
    }
]"#;

// ─── Log factory ──────────────────────────────────────────────────────────────

fn make_transfer_log(i: u64) -> RawLog {
    // Vary addresses and amounts so branch prediction cannot cheat.
    let sender_byte = (i & 0xff) as u8;
    let amount_bytes = i.to_be_bytes();

    let mut from_topic = [0u8; 32];
    from_topic[31] = sender_byte;
    let mut to_topic = [0u8; 32];
    to_topic[31] = sender_byte.wrapping_add(1);

    let mut data = [0u8; 32];
    data[24..].copy_from_slice(&amount_bytes);

    RawLog {
        address: "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".into(),
        topics: vec![
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef".into(),
            format!("0x{}", hex::encode(from_topic)),
            format!("0x{}", hex::encode(to_topic)),
        ],
        data: format!("0x{}", hex::encode(data)),
    }
}

fn make_batch(n: usize) -> Vec<RawLog> {
    (0..n).map(|i| make_transfer_log(i as u64)).collect()
}

// ─── Benchmarks ───────────────────────────────────────────────────────────────

fn bench_single_encode_decode(c: &mut Criterion) {
    let types = [json!("address"), json!("uint256")];
    let values = [
        json!("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"),
        json!("1000000000000000000"),
    ];
    let encoded = api::encode_parameters(&types, &values).expect("encode");

    c.bench_function("encode_parameters_pair", |b| {
        b.iter(|| api::encode_parameters(&types, &values));
    });

    c.bench_function("decode_parameters_pair", |b| {
        b.iter(|| api::decode_parameters(&types, &encoded));
    });
}

fn bench_sequential_decode(c: &mut Criterion) {
    let abi = ContractAbi::from_json(ERC20_ABI).expect("parse abi");

    let mut group = c.benchmark_group("sequential_decode");
    for batch_size in [100, 1_000, 10_000, 100_000] {
        let batch = make_batch(batch_size);
        group.throughput(Throughput::Elements(batch_size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(batch_size),
            &batch,
            |b, batch| {
                b.iter(|| {
                    for log in batch {
                        let _ = abi.decode_log(log);
                    }
                });
            },
        );
    }
    group.finish();
}

fn bench_parallel_decode(c: &mut Criterion) {
    let decoder = BatchDecoder::new(ContractAbi::from_json(ERC20_ABI).expect("parse abi"));

    let mut group = c.benchmark_group("parallel_decode_rayon");
    for batch_size in [1_000, 10_000, 100_000, 1_000_000] {
        group.throughput(Throughput::Elements(batch_size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(batch_size),
            &batch_size,
            |b, &batch_size| {
                b.iter_batched(
                    || make_batch(batch_size),
                    |batch| decoder.decode(BatchRequest::new(batch).error_mode(ErrorMode::Skip)),
                    criterion::BatchSize::LargeInput,
                );
            },
        );
    }
    group.finish();
}

fn bench_selector_hash(c: &mut Criterion) {
    c.bench_function("function_selector", |b| {
        b.iter(|| api::encode_function_signature("transfer(address,uint256)"));
    });
}

criterion_group!(
    benches,
    bench_single_encode_decode,
    bench_sequential_decode,
    bench_parallel_decode,
    bench_selector_hash,
);
criterion_main!(benches);
