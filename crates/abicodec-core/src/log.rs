//! Raw and decoded event log types.

use crate::result::DecodedParams;
use serde::{Deserialize, Serialize};

/// An undecoded EVM log as delivered by RPC nodes or batch loaders.
/// Topics and data are hex strings so the type deserializes straight from
/// `eth_getLogs`-shaped JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLog {
    /// Contract address that emitted the log.
    #[serde(default)]
    pub address: String,
    /// `topics[0]` is the signature topic for non-anonymous events; the
    /// remaining topics are indexed parameters, one 32-byte word each.
    pub topics: Vec<String>,
    /// ABI-encoded non-indexed parameters.
    #[serde(default = "empty_hex")]
    pub data: String,
}

fn empty_hex() -> String {
    "0x".to_string()
}

impl RawLog {
    pub fn new(topics: Vec<String>, data: impl Into<String>) -> Self {
        Self {
            address: String::new(),
            topics,
            data: data.into(),
        }
    }

    /// The signature topic, if any topic is present at all.
    pub fn signature_topic(&self) -> Option<&str> {
        self.topics.first().map(|s| s.as_str())
    }
}

/// A decoded log: the matched event name plus its parameters.
#[derive(Debug, Clone)]
pub struct DecodedLog {
    pub event: String,
    pub address: String,
    pub params: DecodedParams,
}

impl DecodedLog {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "event": self.event,
            "address": self.address,
            "params": self.params.to_json(),
        })
    }
}
