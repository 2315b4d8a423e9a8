//! Canonical bt-encoded values.
//!
//! The format is bencode-shaped: `i<digits>e` for unsigned integers,
//! `<len>:<bytes>` for byte strings, `l...e` for lists, `d...e` for
//! dictionaries. Dictionaries are keyed by short ASCII strings and encode
//! their entries in lexicographic key order, so any two nodes that agree on
//! a payload's contents produce byte-identical encodings.
//!
//! Decoding is strict: truncation, trailing bytes, unordered or duplicate
//! dictionary keys, and non-canonical integers (leading zeros, negatives)
//! are all errors. Gossip payloads come from untrusted peers.

use crate::error::WireError;
use std::collections::BTreeMap;

/// A dictionary of bt values. `BTreeMap` keeps keys sorted, which is what
/// makes the encoding canonical.
pub type BtDict = BTreeMap<String, BtValue>;

/// A single bt-encoded value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BtValue {
    /// Unsigned integer. The protocol never sends negative values.
    Int(u64),
    /// Raw byte string.
    Bytes(Vec<u8>),
    List(Vec<BtValue>),
    Dict(BtDict),
}

impl BtValue {
    pub fn int(&self) -> Option<u64> {
        match self {
            BtValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            BtValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn list(&self) -> Option<&[BtValue]> {
        match self {
            BtValue::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn dict(&self) -> Option<&BtDict> {
        match self {
            BtValue::Dict(d) => Some(d),
            _ => None,
        }
    }
}

impl From<u64> for BtValue {
    fn from(v: u64) -> Self {
        BtValue::Int(v)
    }
}

impl From<&[u8]> for BtValue {
    fn from(v: &[u8]) -> Self {
        BtValue::Bytes(v.to_vec())
    }
}

impl From<Vec<u8>> for BtValue {
    fn from(v: Vec<u8>) -> Self {
        BtValue::Bytes(v)
    }
}

impl From<&str> for BtValue {
    fn from(v: &str) -> Self {
        BtValue::Bytes(v.as_bytes().to_vec())
    }
}

// ── Encoding ───────────────────────────────────────────────────────────

/// Encode a single value.
pub fn encode(value: &BtValue) -> Vec<u8> {
    let mut out = Vec::new();
    encode_into(value, &mut out);
    out
}

fn encode_into(value: &BtValue, out: &mut Vec<u8>) {
    match value {
        BtValue::Int(v) => {
            out.push(b'i');
            out.extend_from_slice(v.to_string().as_bytes());
            out.push(b'e');
        }
        BtValue::Bytes(b) => {
            out.extend_from_slice(b.len().to_string().as_bytes());
            out.push(b':');
            out.extend_from_slice(b);
        }
        BtValue::List(items) => {
            out.push(b'l');
            for item in items {
                encode_into(item, out);
            }
            out.push(b'e');
        }
        BtValue::Dict(dict) => {
            out.push(b'd');
            // BTreeMap iteration is already in lexicographic key order.
            for (key, val) in dict {
                out.extend_from_slice(key.len().to_string().as_bytes());
                out.push(b':');
                out.extend_from_slice(key.as_bytes());
                encode_into(val, out);
            }
            out.push(b'e');
        }
    }
}

/// Encode a command payload: a one-element list wrapping the dictionary.
pub fn encode_payload(dict: BtDict) -> Vec<u8> {
    encode(&BtValue::List(vec![BtValue::Dict(dict)]))
}

// ── Decoding ───────────────────────────────────────────────────────────

/// Decode a single value, rejecting trailing bytes.
pub fn decode(input: &[u8]) -> Result<BtValue, WireError> {
    let mut pos = 0;
    let value = decode_at(input, &mut pos)?;
    if pos != input.len() {
        return Err(WireError::TrailingData);
    }
    Ok(value)
}

/// Decode a command payload and unwrap the one-element-list envelope.
pub fn decode_payload(input: &[u8]) -> Result<BtDict, WireError> {
    let value = decode(input)?;
    let BtValue::List(mut items) = value else {
        return Err(WireError::BadEnvelope);
    };
    if items.len() != 1 {
        return Err(WireError::BadEnvelope);
    }
    match items.pop() {
        Some(BtValue::Dict(d)) => Ok(d),
        _ => Err(WireError::BadEnvelope),
    }
}

fn decode_at(input: &[u8], pos: &mut usize) -> Result<BtValue, WireError> {
    match input.get(*pos) {
        None => Err(WireError::Truncated(*pos)),
        Some(b'i') => {
            *pos += 1;
            let v = decode_uint(input, pos, b'e')?;
            Ok(BtValue::Int(v))
        }
        Some(b'l') => {
            *pos += 1;
            let mut items = Vec::new();
            loop {
                match input.get(*pos) {
                    None => return Err(WireError::Truncated(*pos)),
                    Some(b'e') => {
                        *pos += 1;
                        return Ok(BtValue::List(items));
                    }
                    Some(_) => items.push(decode_at(input, pos)?),
                }
            }
        }
        Some(b'd') => {
            *pos += 1;
            let mut dict = BtDict::new();
            let mut last_key: Option<String> = None;
            loop {
                match input.get(*pos) {
                    None => return Err(WireError::Truncated(*pos)),
                    Some(b'e') => {
                        *pos += 1;
                        return Ok(BtValue::Dict(dict));
                    }
                    Some(_) => {
                        let key_start = *pos;
                        let key_bytes = decode_bytes(input, pos)?;
                        let key = String::from_utf8(key_bytes)
                            .map_err(|_| WireError::BadKey(key_start))?;
                        if let Some(prev) = &last_key {
                            if *prev >= key {
                                return Err(WireError::UnorderedKeys(key_start));
                            }
                        }
                        let value = decode_at(input, pos)?;
                        last_key = Some(key.clone());
                        dict.insert(key, value);
                    }
                }
            }
        }
        Some(b'0'..=b'9') => Ok(BtValue::Bytes(decode_bytes(input, pos)?)),
        Some(&byte) => Err(WireError::UnexpectedByte { byte, pos: *pos }),
    }
}

/// Decode ASCII digits up to `terminator`, canonical form only.
fn decode_uint(input: &[u8], pos: &mut usize, terminator: u8) -> Result<u64, WireError> {
    let start = *pos;
    let mut value: u64 = 0;
    let mut digits = 0usize;
    loop {
        match input.get(*pos) {
            None => return Err(WireError::Truncated(*pos)),
            Some(&b) if b == terminator => {
                *pos += 1;
                break;
            }
            Some(&b @ b'0'..=b'9') => {
                value = value
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(u64::from(b - b'0')))
                    .ok_or(WireError::IntOverflow(*pos))?;
                digits += 1;
                *pos += 1;
            }
            Some(&byte) => return Err(WireError::UnexpectedByte { byte, pos: *pos }),
        }
    }
    if digits == 0 {
        return Err(WireError::NonCanonicalInt(start));
    }
    // Leading zeros are non-canonical except for the value 0 itself.
    if digits > 1 && input[start] == b'0' {
        return Err(WireError::NonCanonicalInt(start));
    }
    Ok(value)
}

fn decode_bytes(input: &[u8], pos: &mut usize) -> Result<Vec<u8>, WireError> {
    let len = decode_uint(input, pos, b':')? as usize;
    let end = pos
        .checked_add(len)
        .ok_or(WireError::IntOverflow(*pos))?;
    if end > input.len() {
        return Err(WireError::Truncated(input.len()));
    }
    let bytes = input[*pos..end].to_vec();
    *pos = end;
    Ok(bytes)
}
