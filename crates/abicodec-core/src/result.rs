//! Decoded parameter collections.

use crate::value::AbiValue;
use indexmap::IndexMap;

/// The output of decoding a parameter list: an ordered sequence of values
/// plus a name -> position index for every parameter that declared a name.
///
/// Both views reference the same decoded values; nothing is decoded twice.
/// Duplicate names are evicted from the index (positional access still
/// works), unnamed parameters simply never enter it. Built once per decode
/// call and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedParams {
    values: Vec<AbiValue>,
    names: Vec<String>,
    index: IndexMap<String, usize>,
}

impl DecodedParams {
    /// Pair up declared names with decoded values. `names` and `values`
    /// must be the same length; an empty string means "unnamed".
    pub fn new(names: Vec<String>, values: Vec<AbiValue>) -> Self {
        debug_assert_eq!(names.len(), values.len());
        let mut index: IndexMap<String, usize> = IndexMap::new();
        let mut duplicates: Vec<String> = Vec::new();
        for (pos, name) in names.iter().enumerate() {
            if name.is_empty() {
                continue;
            }
            if index.insert(name.clone(), pos).is_some() {
                duplicates.push(name.clone());
            }
        }
        // A name claimed by two parameters is ambiguous, so neither keeps it.
        for name in duplicates {
            index.shift_remove(&name);
        }
        Self {
            values,
            names,
            index,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at position `pos`.
    pub fn get(&self, pos: usize) -> Option<&AbiValue> {
        self.values.get(pos)
    }

    /// Value by declared parameter name.
    pub fn by_name(&self, name: &str) -> Option<&AbiValue> {
        self.index.get(name).map(|&pos| &self.values[pos])
    }

    /// Declared name of the parameter at `pos`, if it had one.
    pub fn name_of(&self, pos: usize) -> Option<&str> {
        self.names
            .get(pos)
            .map(|s| s.as_str())
            .filter(|s| !s.is_empty())
    }

    /// The ordered values.
    pub fn values(&self) -> &[AbiValue] {
        &self.values
    }

    /// Iterate `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Option<&str>, &AbiValue)> {
        self.names.iter().zip(self.values.iter()).map(|(n, v)| {
            let name = if n.is_empty() { None } else { Some(n.as_str()) };
            (name, v)
        })
    }

    /// Consume into the ordered value list.
    pub fn into_values(self) -> Vec<AbiValue> {
        self.values
    }

    /// JSON object with positional keys plus named aliases, e.g.
    /// `{"0": "...", "1": "...", "to": "...", "amount": "..."}`.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (pos, value) in self.values.iter().enumerate() {
            map.insert(pos.to_string(), value.to_json());
        }
        for (name, &pos) in &self.index {
            map.insert(name.clone(), self.values[pos].to_json());
        }
        serde_json::Value::Object(map)
    }
}
