//! ABI fragment descriptors: named parameters, functions, events.
//!
//! These are the resolved forms of contract-ABI JSON entries. The
//! resolver in `abicodec-evm` produces them; the selector builder and log
//! splitter consume them.

use crate::types::TypeDescriptor;
use serde::{Deserialize, Serialize};

/// One named parameter of a function or event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    /// Declared name; empty for unnamed (output-only) parameters.
    #[serde(default)]
    pub name: String,
    /// Resolved type.
    pub ty: TypeDescriptor,
    /// Event-only: whether the parameter is topic-encoded.
    #[serde(default)]
    pub indexed: bool,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
            indexed: false,
        }
    }

    pub fn indexed(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
            indexed: true,
        }
    }
}

/// A function fragment: name plus input parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionAbi {
    pub name: String,
    pub inputs: Vec<Param>,
}

impl FunctionAbi {
    /// Canonical signature, e.g. `transfer(address,uint256)`. Tuple inputs
    /// render as parenthesized component lists.
    pub fn signature(&self) -> String {
        render_signature(&self.name, self.inputs.iter().map(|p| &p.ty))
    }

    /// The input types alone, for the parameter encoder/decoder.
    pub fn input_types(&self) -> Vec<TypeDescriptor> {
        self.inputs.iter().map(|p| p.ty.clone()).collect()
    }
}

/// An event fragment: name, inputs with indexed flags, anonymity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAbi {
    pub name: String,
    pub inputs: Vec<Param>,
    /// Anonymous events emit no signature topic.
    #[serde(default)]
    pub anonymous: bool,
}

impl EventAbi {
    /// Canonical signature, e.g. `Transfer(address,address,uint256)`.
    pub fn signature(&self) -> String {
        render_signature(&self.name, self.inputs.iter().map(|p| &p.ty))
    }

    /// Topic-encoded inputs, in declaration order.
    pub fn indexed_inputs(&self) -> Vec<&Param> {
        self.inputs.iter().filter(|p| p.indexed).collect()
    }

    /// Data-encoded inputs, in declaration order.
    pub fn data_inputs(&self) -> Vec<&Param> {
        self.inputs.iter().filter(|p| !p.indexed).collect()
    }
}

fn render_signature<'a>(name: &str, types: impl Iterator<Item = &'a TypeDescriptor>) -> String {
    let mut out = String::with_capacity(name.len() + 16);
    out.push_str(name);
    out.push('(');
    for (i, ty) in types.enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&ty.to_string());
    }
    out.push(')');
    out
}
