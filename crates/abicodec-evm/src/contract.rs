//! Whole-contract ABI handling.
//!
//! `ContractAbi` parses a contract's ABI JSON array once and indexes the
//! function and event fragments by name, selector, and signature topic,
//! so calldata and logs can be dispatched without re-hashing anything on
//! the hot path. Entries of other kinds (constructor, fallback, receive,
//! error) carry no selector and are skipped.

use std::collections::HashMap;

use abicodec_core::{AbiError, AbiValue, DecodedLog, DecodedParams, EventAbi, FunctionAbi, RawLog};
use serde::Deserialize;
use serde_json::Value;

use crate::{api, decode, encode, resolver, selector};

#[derive(Debug, Clone, Default)]
pub struct ContractAbi {
    functions: Vec<FunctionAbi>,
    events: Vec<EventAbi>,
    by_selector: HashMap<[u8; 4], usize>,
    fn_by_name: HashMap<String, usize>,
    by_topic: HashMap<[u8; 32], usize>,
    event_by_name: HashMap<String, usize>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    inputs: Vec<Value>,
    #[serde(default)]
    anonymous: bool,
}

impl ContractAbi {
    /// Parse a contract ABI JSON array (the `abi` field of compiler
    /// output, or the array served by explorers).
    pub fn from_json(json: &str) -> Result<Self, AbiError> {
        let entries: Vec<Value> =
            serde_json::from_str(json).map_err(|e| AbiError::InvalidType {
                ty: "abi".to_string(),
                reason: format!("invalid ABI JSON: {e}"),
            })?;
        let mut abi = ContractAbi::default();
        for entry in &entries {
            let raw: RawEntry =
                serde_json::from_value(entry.clone()).map_err(|e| AbiError::InvalidType {
                    ty: "abi".to_string(),
                    reason: format!("invalid ABI entry: {e}"),
                })?;
            // Solidity's JSON always carries `type`; some hand-written
            // ABIs omit it for functions.
            let kind = if raw.kind.is_empty() {
                "function"
            } else {
                raw.kind.as_str()
            };
            match kind {
                "function" => {
                    if raw.name.is_empty() {
                        return Err(AbiError::InvalidType {
                            ty: "function".to_string(),
                            reason: "fragment has no name".to_string(),
                        });
                    }
                    abi.push_function(FunctionAbi {
                        name: raw.name,
                        inputs: resolver::resolve_params(&raw.inputs)?,
                    });
                }
                "event" => {
                    if raw.name.is_empty() {
                        return Err(AbiError::InvalidType {
                            ty: "event".to_string(),
                            reason: "fragment has no name".to_string(),
                        });
                    }
                    abi.push_event(EventAbi {
                        name: raw.name,
                        inputs: resolver::resolve_params(&raw.inputs)?,
                        anonymous: raw.anonymous,
                    });
                }
                _ => {}
            }
        }
        Ok(abi)
    }

    // On duplicate names or selectors the first entry wins, mirroring
    // how explorers present overloaded functions.
    fn push_function(&mut self, function: FunctionAbi) {
        let idx = self.functions.len();
        self.by_selector
            .entry(selector::function_selector(&function))
            .or_insert(idx);
        self.fn_by_name.entry(function.name.clone()).or_insert(idx);
        self.functions.push(function);
    }

    fn push_event(&mut self, event: EventAbi) {
        let idx = self.events.len();
        if !event.anonymous {
            self.by_topic
                .entry(selector::event_topic(&event))
                .or_insert(idx);
        }
        self.event_by_name.entry(event.name.clone()).or_insert(idx);
        self.events.push(event);
    }

    pub fn functions(&self) -> &[FunctionAbi] {
        &self.functions
    }

    pub fn events(&self) -> &[EventAbi] {
        &self.events
    }

    pub fn function(&self, name: &str) -> Option<&FunctionAbi> {
        self.fn_by_name.get(name).map(|&idx| &self.functions[idx])
    }

    pub fn function_by_selector(&self, selector: &[u8; 4]) -> Option<&FunctionAbi> {
        self.by_selector.get(selector).map(|&idx| &self.functions[idx])
    }

    pub fn event(&self, name: &str) -> Option<&EventAbi> {
        self.event_by_name.get(name).map(|&idx| &self.events[idx])
    }

    pub fn event_by_topic(&self, topic: &[u8; 32]) -> Option<&EventAbi> {
        self.by_topic.get(topic).map(|&idx| &self.events[idx])
    }

    /// Build calldata for a named function: selector plus encoded
    /// arguments.
    pub fn encode_call(&self, name: &str, values: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
        let function = self.function(name).ok_or_else(|| AbiError::InvalidType {
            ty: name.to_string(),
            reason: "function not found in ABI".to_string(),
        })?;
        let mut out = selector::function_selector(function).to_vec();
        out.extend_from_slice(&encode::encode(&function.input_types(), values)?);
        Ok(out)
    }

    /// Match calldata to a function by its selector and decode the
    /// arguments. Zero-argument calls are exactly four bytes.
    pub fn decode_call(&self, data: &[u8]) -> Result<(&FunctionAbi, DecodedParams), AbiError> {
        if data.len() < 4 {
            return Err(AbiError::TruncatedData {
                offset: 0,
                needed: 4,
                len: data.len(),
            });
        }
        let mut sel = [0u8; 4];
        sel.copy_from_slice(&data[..4]);
        let function = self
            .function_by_selector(&sel)
            .ok_or_else(|| AbiError::InvalidType {
                ty: format!("0x{}", hex::encode(sel)),
                reason: "no function with this selector in ABI".to_string(),
            })?;
        let params = decode::decode_params(&function.inputs, &data[4..])?;
        Ok((function, params))
    }

    /// Match a raw log to an event by its signature topic and decode it.
    pub fn decode_log(&self, log: &RawLog) -> Result<DecodedLog, AbiError> {
        let first = log.signature_topic().ok_or_else(|| AbiError::InvalidType {
            ty: "log".to_string(),
            reason: "log has no signature topic".to_string(),
        })?;
        let topic0 = api::parse_topic(first)?;
        let event = self
            .event_by_topic(&topic0)
            .ok_or_else(|| AbiError::InvalidType {
                ty: first.to_string(),
                reason: "no event with this signature topic in ABI".to_string(),
            })?;
        decode_as_event(event, log)
    }

    /// Decode a raw log as a specific named event. For non-anonymous
    /// events the log's signature topic must match; anonymous events
    /// treat every topic as a parameter.
    pub fn decode_event(&self, name: &str, log: &RawLog) -> Result<DecodedLog, AbiError> {
        let event = self.event(name).ok_or_else(|| AbiError::InvalidType {
            ty: name.to_string(),
            reason: "event not found in ABI".to_string(),
        })?;
        decode_as_event(event, log)
    }
}

fn decode_as_event(event: &EventAbi, log: &RawLog) -> Result<DecodedLog, AbiError> {
    let mut topics = log.topics.iter();
    if !event.anonymous {
        let first = topics.next().ok_or_else(|| AbiError::InvalidType {
            ty: event.name.clone(),
            reason: "log has no signature topic".to_string(),
        })?;
        if api::parse_topic(first)? != selector::event_topic(event) {
            return Err(AbiError::InvalidType {
                ty: event.name.clone(),
                reason: "signature topic does not match this event".to_string(),
            });
        }
    }
    let param_topics = topics
        .map(|t| api::parse_topic(t))
        .collect::<Result<Vec<_>, _>>()?;
    let data = api::hex_to_bytes(&log.data)?;
    let params = crate::logs::decode_log(&event.inputs, &param_topics, &data)?;
    Ok(DecodedLog {
        event: event.name.clone(),
        address: log.address.clone(),
        params,
    })
}
