//! The type resolver: raw ABI inputs to `TypeDescriptor`s.
//!
//! Three input grammars, tried in order:
//! 1. plain type strings (`"uint256"`, `"bytes32[4][]"`),
//! 2. simplified structs (single-key objects mapping a field name to a
//!    nested struct or type string),
//! 3. standard `{name, type, components?, indexed?}` fragment objects.
//!
//! Anything that matches none of them fails closed with `InvalidType`;
//! there is no permissive fallback. Resolution is deterministic, so
//! resolving the same input twice yields structurally equal descriptors.

use abicodec_core::{AbiError, EventAbi, FunctionAbi, Param, TypeDescriptor};
use serde::Deserialize;
use serde_json::Value;

/// Resolve a plain type string.
pub fn resolve_str(raw: &str) -> Result<TypeDescriptor, AbiError> {
    let (base, suffixes) = match raw.find('[') {
        Some(idx) => (&raw[..idx], &raw[idx..]),
        None => (raw, ""),
    };
    let ty = parse_base(raw, base)?;
    apply_suffixes(raw, ty, suffixes)
}

/// Resolve any accepted type input into a (possibly named) parameter.
pub fn resolve(input: &Value) -> Result<Param, AbiError> {
    match input {
        Value::String(s) => Ok(Param::new("", resolve_str(s)?)),
        Value::Object(map) => {
            // A single-key object whose value is a string or object is the
            // simplified-struct shorthand; everything else must be a
            // standard fragment.
            if map.len() == 1 {
                if let Some((key, val)) = map.iter().next() {
                    if matches!(val, Value::String(_) | Value::Object(_)) {
                        return resolve_simplified(key, val);
                    }
                }
            }
            resolve_fragment(input)
        }
        other => Err(AbiError::InvalidType {
            ty: other.to_string(),
            reason: "expected a type string or object".to_string(),
        }),
    }
}

/// Resolve a whole parameter list (the boundary's `types[]` argument).
pub fn resolve_params(types: &[Value]) -> Result<Vec<Param>, AbiError> {
    types.iter().map(resolve).collect()
}

/// Resolve a `{name, inputs}` function fragment.
pub fn resolve_function(input: &Value) -> Result<FunctionAbi, AbiError> {
    let raw: RawFunction = serde_json::from_value(input.clone()).map_err(|e| {
        AbiError::InvalidType {
            ty: input.to_string(),
            reason: format!("not a function fragment: {e}"),
        }
    })?;
    Ok(FunctionAbi {
        name: raw.name,
        inputs: resolve_params(&raw.inputs)?,
    })
}

/// Resolve a `{name, inputs, anonymous?}` event fragment.
pub fn resolve_event(input: &Value) -> Result<EventAbi, AbiError> {
    let raw: RawEvent = serde_json::from_value(input.clone()).map_err(|e| {
        AbiError::InvalidType {
            ty: input.to_string(),
            reason: format!("not an event fragment: {e}"),
        }
    })?;
    Ok(EventAbi {
        name: raw.name,
        inputs: resolve_params(&raw.inputs)?,
        anonymous: raw.anonymous,
    })
}

/// Parse a canonical signature string like `transfer(address,uint256)`
/// or `swap((address,uint24)[],bytes)` into a function fragment.
/// Parameters parsed this way are unnamed.
pub fn parse_signature(signature: &str) -> Result<FunctionAbi, AbiError> {
    let open = signature.find('(').ok_or_else(|| AbiError::InvalidType {
        ty: signature.to_string(),
        reason: "missing '(' in signature".to_string(),
    })?;
    if !signature.ends_with(')') {
        return Err(AbiError::InvalidType {
            ty: signature.to_string(),
            reason: "missing ')' in signature".to_string(),
        });
    }
    let name = &signature[..open];
    let args = &signature[open + 1..signature.len() - 1];
    let inputs = split_top_level(signature, args)?
        .into_iter()
        .map(|part| parse_signature_type(signature, part).map(|ty| Param::new("", ty)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(FunctionAbi {
        name: name.to_string(),
        inputs,
    })
}

// ─── Grammar 1: plain strings ─────────────────────────────────────────────────

fn parse_base(raw: &str, base: &str) -> Result<TypeDescriptor, AbiError> {
    match base {
        "bool" => return Ok(TypeDescriptor::Bool),
        "address" => return Ok(TypeDescriptor::Address),
        "string" => return Ok(TypeDescriptor::Str),
        "bytes" => return Ok(TypeDescriptor::Bytes),
        "tuple" => return Ok(TypeDescriptor::Tuple(Vec::new())),
        _ => {}
    }
    if let Some(width) = base.strip_prefix("uint") {
        return Ok(TypeDescriptor::Uint(parse_width(raw, width)?));
    }
    if let Some(width) = base.strip_prefix("int") {
        return Ok(TypeDescriptor::Int(parse_width(raw, width)?));
    }
    if let Some(len) = base.strip_prefix("bytes") {
        return Ok(TypeDescriptor::FixedBytes(parse_bytes_len(raw, len)?));
    }
    Err(AbiError::InvalidType {
        ty: raw.to_string(),
        reason: format!("unknown base type '{base}'"),
    })
}

/// Bit width suffix of `uint`/`int`. Empty means the 256 default.
fn parse_width(raw: &str, digits: &str) -> Result<u16, AbiError> {
    if digits.is_empty() {
        return Ok(256);
    }
    let bits: u16 = parse_digits(raw, digits)?;
    if bits == 0 || bits > 256 || bits % 8 != 0 {
        return Err(AbiError::InvalidType {
            ty: raw.to_string(),
            reason: format!("width {bits} is not a multiple of 8 in 8..=256"),
        });
    }
    Ok(bits)
}

fn parse_bytes_len(raw: &str, digits: &str) -> Result<u8, AbiError> {
    let len: u8 = parse_digits(raw, digits)?;
    if len == 0 || len > 32 {
        return Err(AbiError::InvalidType {
            ty: raw.to_string(),
            reason: format!("fixed bytes length {len} is not in 1..=32"),
        });
    }
    Ok(len)
}

fn parse_digits<T: std::str::FromStr>(raw: &str, digits: &str) -> Result<T, AbiError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AbiError::InvalidType {
            ty: raw.to_string(),
            reason: format!("'{digits}' is not a number"),
        });
    }
    digits.parse().map_err(|_| AbiError::InvalidType {
        ty: raw.to_string(),
        reason: format!("'{digits}' is out of range"),
    })
}

/// Apply array suffixes left to right, wrapping as we go, so the
/// rightmost suffix ends up outermost: `T[2][]` is a dynamic array of
/// fixed-size-2 arrays of `T`.
fn apply_suffixes(
    raw: &str,
    base: TypeDescriptor,
    suffixes: &str,
) -> Result<TypeDescriptor, AbiError> {
    let mut ty = base;
    let mut rest = suffixes;
    while !rest.is_empty() {
        let close = match (rest.starts_with('['), rest.find(']')) {
            (true, Some(close)) => close,
            _ => {
                return Err(AbiError::InvalidType {
                    ty: raw.to_string(),
                    reason: format!("malformed array suffix '{rest}'"),
                })
            }
        };
        let inner = &rest[1..close];
        ty = if inner.is_empty() {
            TypeDescriptor::Array(Box::new(ty))
        } else {
            let len: usize = parse_digits(raw, inner)?;
            TypeDescriptor::FixedArray {
                elem: Box::new(ty),
                len,
            }
        };
        rest = &rest[close + 1..];
    }
    Ok(ty)
}

// ─── Grammar 2: simplified structs ────────────────────────────────────────────

/// `{"user": {"addr": "address", "scores": "uint256[]"}}` lowers to a
/// tuple named `user`; a `[]`/`[N]` suffix on the key makes it an array
/// of that tuple. Component order is the object's key order.
fn resolve_simplified(key: &str, value: &Value) -> Result<Param, AbiError> {
    let (name, suffixes) = match key.find('[') {
        Some(idx) => (&key[..idx], &key[idx..]),
        None => (key, ""),
    };
    let base = match value {
        Value::String(s) => resolve_str(s)?,
        Value::Object(map) => {
            let components = map
                .iter()
                .map(|(k, v)| resolve_simplified(k, v).map(|p| (p.name, p.ty)))
                .collect::<Result<Vec<_>, _>>()?;
            TypeDescriptor::Tuple(components)
        }
        other => {
            return Err(AbiError::InvalidType {
                ty: key.to_string(),
                reason: format!("simplified struct field must be a string or object, got {other}"),
            })
        }
    };
    let ty = apply_suffixes(key, base, suffixes)?;
    Ok(Param::new(name, ty))
}

// ─── Grammar 3: standard fragments ────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RawFragmentParam {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    components: Option<Vec<Value>>,
    #[serde(default)]
    indexed: bool,
}

#[derive(Debug, Deserialize)]
struct RawFunction {
    name: String,
    #[serde(default)]
    inputs: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    name: String,
    #[serde(default)]
    inputs: Vec<Value>,
    #[serde(default)]
    anonymous: bool,
}

fn resolve_fragment(input: &Value) -> Result<Param, AbiError> {
    let raw: RawFragmentParam = serde_json::from_value(input.clone()).map_err(|e| {
        AbiError::InvalidType {
            ty: input.to_string(),
            reason: format!("not a valid fragment: {e}"),
        }
    })?;
    let mut ty = resolve_str(&raw.ty)?;
    if let Some(components) = raw.components {
        if !tuple_at_base(&ty) {
            return Err(AbiError::InvalidType {
                ty: raw.ty.clone(),
                reason: "components given for a non-tuple type".to_string(),
            });
        }
        let resolved = components
            .iter()
            .map(|c| resolve(c).map(|p| (p.name, p.ty)))
            .collect::<Result<Vec<_>, _>>()?;
        ty = graft_components(ty, resolved);
    }
    Ok(Param {
        name: raw.name,
        ty,
        indexed: raw.indexed,
    })
}

/// `true` if peeling every array layer ends at a tuple.
fn tuple_at_base(ty: &TypeDescriptor) -> bool {
    match ty {
        TypeDescriptor::Tuple(_) => true,
        TypeDescriptor::Array(elem) => tuple_at_base(elem),
        TypeDescriptor::FixedArray { elem, .. } => tuple_at_base(elem),
        _ => false,
    }
}

/// Replace the innermost tuple's (empty) component list with the resolved
/// components, preserving any array layers around it.
fn graft_components(ty: TypeDescriptor, components: Vec<(String, TypeDescriptor)>) -> TypeDescriptor {
    match ty {
        TypeDescriptor::Tuple(_) => TypeDescriptor::Tuple(components),
        TypeDescriptor::Array(elem) => {
            TypeDescriptor::Array(Box::new(graft_components(*elem, components)))
        }
        TypeDescriptor::FixedArray { elem, len } => TypeDescriptor::FixedArray {
            elem: Box::new(graft_components(*elem, components)),
            len,
        },
        other => other,
    }
}

// ─── Signature strings ────────────────────────────────────────────────────────

/// Split a signature's argument list at top-level commas, tracking
/// bracket depth so tuple and array punctuation stays intact.
fn split_top_level<'a>(raw: &str, args: &'a str) -> Result<Vec<&'a str>, AbiError> {
    if args.is_empty() {
        return Ok(Vec::new());
    }
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    for (i, c) in args.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(&args[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        if depth < 0 {
            return Err(AbiError::InvalidType {
                ty: raw.to_string(),
                reason: "unbalanced brackets in signature".to_string(),
            });
        }
    }
    if depth != 0 {
        return Err(AbiError::InvalidType {
            ty: raw.to_string(),
            reason: "unbalanced brackets in signature".to_string(),
        });
    }
    parts.push(&args[start..]);
    Ok(parts)
}

/// One argument of a signature: either a plain type string or a
/// parenthesized tuple, with optional array suffixes.
fn parse_signature_type(raw: &str, part: &str) -> Result<TypeDescriptor, AbiError> {
    if !part.starts_with('(') {
        return resolve_str(part);
    }
    let close = matching_paren(part).ok_or_else(|| AbiError::InvalidType {
        ty: raw.to_string(),
        reason: format!("unbalanced parentheses in '{part}'"),
    })?;
    let components = split_top_level(raw, &part[1..close])?
        .into_iter()
        .map(|p| parse_signature_type(raw, p).map(|ty| (String::new(), ty)))
        .collect::<Result<Vec<_>, _>>()?;
    apply_suffixes(raw, TypeDescriptor::Tuple(components), &part[close + 1..])
}

fn matching_paren(s: &str) -> Option<usize> {
    let mut depth = 0i32;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
