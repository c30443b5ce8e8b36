//! `BatchDecoder` orchestrates chunked, parallel log decoding.

use crate::request::BatchRequest;
use abicodec_core::{AbiError, DecodedLog};
use abicodec_evm::ContractAbi;
use rayon::prelude::*;
use tracing::{info, warn};

/// How a batch job treats logs that fail to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Silently skip logs that fail to decode. Suitable for best-effort
    /// analytics over mixed streams.
    #[default]
    Skip,
    /// Collect decode errors alongside successes and return both.
    Collect,
    /// Abort the entire batch on the first error.
    Throw,
}

/// Result of a batch decode job.
#[derive(Debug)]
pub struct BatchReport {
    /// Successfully decoded logs
    pub decoded: Vec<DecodedLog>,
    /// (original_index, error) pairs, populated only in Collect mode
    pub errors: Vec<(usize, AbiError)>,
    /// Total raw logs processed
    pub total_input: usize,
}

/// Batch decode engine over one contract's ABI.
pub struct BatchDecoder {
    abi: ContractAbi,
}

impl BatchDecoder {
    pub fn new(abi: ContractAbi) -> Self {
        Self { abi }
    }

    pub fn abi(&self) -> &ContractAbi {
        &self.abi
    }

    /// Execute a batch decode request.
    pub fn decode(&self, req: BatchRequest) -> Result<BatchReport, AbiError> {
        if req.concurrency > 0 {
            match rayon::ThreadPoolBuilder::new()
                .num_threads(req.concurrency)
                .build()
            {
                Ok(pool) => pool.install(|| self.run(&req)),
                Err(e) => {
                    warn!(
                        "BatchDecoder: could not build a {}-thread pool ({e}), using the global pool",
                        req.concurrency
                    );
                    self.run(&req)
                }
            }
        } else {
            self.run(&req)
        }
    }

    fn run(&self, req: &BatchRequest) -> Result<BatchReport, AbiError> {
        let total_input = req.logs.len();
        let chunk_size = req.chunk_size.max(1);
        info!(
            "BatchDecoder: decoding {} logs (chunk_size={})",
            total_input, chunk_size
        );

        let mut decoded: Vec<DecodedLog> = Vec::with_capacity(total_input);
        let mut errors: Vec<(usize, AbiError)> = Vec::new();
        let mut processed = 0usize;

        for chunk in req.logs.chunks(chunk_size) {
            let results: Vec<(usize, Result<DecodedLog, AbiError>)> = chunk
                .par_iter()
                .enumerate()
                .map(|(idx, log)| (processed + idx, self.abi.decode_log(log)))
                .collect();

            for (idx, result) in results {
                match result {
                    Ok(log) => decoded.push(log),
                    Err(err) => match req.error_mode {
                        ErrorMode::Skip => {}
                        ErrorMode::Collect => errors.push((idx, err)),
                        ErrorMode::Throw => return Err(err),
                    },
                }
            }

            processed += chunk.len();
            if let Some(cb) = &req.on_progress {
                cb(processed, total_input);
            }
        }

        info!(
            "BatchDecoder: complete ({} decoded, {} errors)",
            decoded.len(),
            errors.len()
        );

        Ok(BatchReport {
            decoded,
            errors,
            total_input,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use abicodec_core::RawLog;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const TRANSFER_ABI: &str = r#"[{
        "type": "event",
        "name": "Transfer",
        "inputs": [
            {"name": "from", "type": "address", "indexed": true},
            {"name": "to", "type": "address", "indexed": true},
            {"name": "value", "type": "uint256", "indexed": false}
        ]
    }]"#;

    const TRANSFER_TOPIC: &str =
        "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef";

    fn transfer_log(value_byte: u8) -> RawLog {
        let mut data = vec![0u8; 32];
        data[31] = value_byte;
        RawLog::new(
            vec![
                TRANSFER_TOPIC.to_string(),
                format!("0x{:064x}", 0x11u8),
                format!("0x{:064x}", 0x22u8),
            ],
            format!("0x{}", hex::encode(data)),
        )
    }

    fn unknown_log() -> RawLog {
        RawLog::new(vec![format!("0x{:064x}", 0xdeadbeefu32)], "0x".to_string())
    }

    fn decoder() -> BatchDecoder {
        BatchDecoder::new(ContractAbi::from_json(TRANSFER_ABI).unwrap())
    }

    #[test]
    fn skip_mode_drops_failures() {
        let logs = vec![transfer_log(1), unknown_log(), transfer_log(2)];
        let report = decoder().decode(BatchRequest::new(logs)).unwrap();
        assert_eq!(report.total_input, 3);
        assert_eq!(report.decoded.len(), 2);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn collect_mode_keeps_indexed_errors() {
        let logs = vec![transfer_log(1), unknown_log(), transfer_log(2)];
        let report = decoder()
            .decode(BatchRequest::new(logs).error_mode(ErrorMode::Collect))
            .unwrap();
        assert_eq!(report.decoded.len(), 2);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].0, 1);
    }

    #[test]
    fn throw_mode_aborts_on_first_failure() {
        let logs = vec![transfer_log(1), unknown_log(), transfer_log(2)];
        let err = decoder()
            .decode(BatchRequest::new(logs).error_mode(ErrorMode::Throw))
            .unwrap_err();
        assert!(matches!(err, AbiError::InvalidType { .. }));
    }

    #[test]
    fn progress_fires_once_per_chunk() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let logs = (0..5).map(|i| transfer_log(i as u8)).collect();
        let report = decoder()
            .decode(
                BatchRequest::new(logs)
                    .chunk_size(2)
                    .on_progress(move |processed, total| {
                        seen.fetch_add(1, Ordering::SeqCst);
                        assert!(processed <= total);
                    }),
            )
            .unwrap();
        assert_eq!(report.decoded.len(), 5);
        assert_eq!(calls.load(Ordering::SeqCst), 3); // chunks of 2, 2, 1
    }

    #[test]
    fn bounded_concurrency_still_decodes_everything() {
        let logs = (0..64).map(|i| transfer_log(i as u8)).collect();
        let report = decoder()
            .decode(BatchRequest::new(logs).concurrency(2))
            .unwrap();
        assert_eq!(report.decoded.len(), 64);
    }
}
