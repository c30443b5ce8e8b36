//! Batch decode request configuration.

use crate::engine::ErrorMode;
use abicodec_core::RawLog;

/// Configuration for a batch decode job.
pub struct BatchRequest {
    /// The raw logs to decode
    pub logs: Vec<RawLog>,
    /// Number of parallel Rayon workers (0 = use all available CPUs)
    pub concurrency: usize,
    /// Max logs per chunk (memory safety)
    pub chunk_size: usize,
    /// How to handle decode errors
    pub error_mode: ErrorMode,
    /// Optional progress callback, called once per finished chunk with
    /// `(processed, total)`
    pub on_progress: Option<Box<dyn Fn(usize, usize) + Send + Sync>>,
}

impl BatchRequest {
    pub fn new(logs: Vec<RawLog>) -> Self {
        Self {
            logs,
            concurrency: 0,
            chunk_size: 10_000,
            error_mode: ErrorMode::Skip,
            on_progress: None,
        }
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.concurrency = n;
        self
    }

    pub fn chunk_size(mut self, n: usize) -> Self {
        self.chunk_size = n;
        self
    }

    pub fn error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    pub fn on_progress<F: Fn(usize, usize) + Send + Sync + 'static>(mut self, f: F) -> Self {
        self.on_progress = Some(Box::new(f));
        self
    }
}
