//! Length-prefixed binary tree codec (RLP).
//!
//! A node is either a byte-string leaf or an ordered list of nodes. Decoding
//! is strict: non-canonical length prefixes and trailing bytes are rejected,
//! so `decode` followed by `encode` reproduces the input byte-for-byte.

use thiserror::Error;

/// Maximum length encodable with a short prefix.
const SHORT_MAX: usize = 55;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("unexpected end of input")]
    Truncated,

    #[error("non-canonical encoding at offset {0}")]
    NonCanonical(usize),

    #[error("trailing bytes after root node")]
    TrailingBytes,

    #[error("length prefix too large")]
    LengthOverflow,
}

/// A node in the binary tree: a byte-string leaf or an ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(Vec<u8>),
    List(Vec<Node>),
}

impl Node {
    /// Leaf from raw bytes.
    pub fn leaf(bytes: impl Into<Vec<u8>>) -> Self {
        Node::Leaf(bytes.into())
    }

    /// Leaf holding a canonical (minimal big-endian) unsigned integer.
    /// Zero encodes as the empty byte string.
    pub fn uint(value: u64) -> Self {
        if value == 0 {
            return Node::Leaf(Vec::new());
        }
        let be = value.to_be_bytes();
        let skip = be.iter().take_while(|b| **b == 0).count();
        Node::Leaf(be[skip..].to_vec())
    }

    pub fn as_leaf(&self) -> Option<&[u8]> {
        match self {
            Node::Leaf(b) => Some(b),
            Node::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::Leaf(_) => None,
            Node::List(items) => Some(items),
        }
    }

    /// Read a leaf as a canonical unsigned integer.
    ///
    /// Rejects leading zeros and values wider than 8 bytes.
    pub fn as_uint(&self) -> Option<u64> {
        let bytes = self.as_leaf()?;
        if bytes.is_empty() {
            return Some(0);
        }
        if bytes[0] == 0 || bytes.len() > 8 {
            return None;
        }
        let mut v = 0u64;
        for b in bytes {
            v = (v << 8) | u64::from(*b);
        }
        Some(v)
    }

    /// Serialize this node.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_into(&mut out);
        out
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        match self {
            Node::Leaf(bytes) => {
                if bytes.len() == 1 && bytes[0] < 0x80 {
                    out.push(bytes[0]);
                } else {
                    encode_length(out, bytes.len(), 0x80);
                    out.extend_from_slice(bytes);
                }
            }
            Node::List(items) => {
                let mut payload = Vec::new();
                for item in items {
                    item.encode_into(&mut payload);
                }
                encode_length(out, payload.len(), 0xc0);
                out.extend_from_slice(&payload);
            }
        }
    }
}

fn encode_length(out: &mut Vec<u8>, len: usize, offset: u8) {
    if len <= SHORT_MAX {
        out.push(offset + len as u8);
    } else {
        let be = (len as u64).to_be_bytes();
        let skip = be.iter().take_while(|b| **b == 0).count();
        out.push(offset + SHORT_MAX as u8 + (8 - skip) as u8);
        out.extend_from_slice(&be[skip..]);
    }
}

/// Decode a byte buffer into a tree.
///
/// The buffer must contain exactly one root node.
pub fn decode(bytes: &[u8]) -> Result<Node, TreeError> {
    let (node, consumed) = decode_at(bytes, 0)?;
    if consumed != bytes.len() {
        return Err(TreeError::TrailingBytes);
    }
    Ok(node)
}

fn decode_at(bytes: &[u8], pos: usize) -> Result<(Node, usize), TreeError> {
    let first = *bytes.get(pos).ok_or(TreeError::Truncated)?;

    match first {
        0x00..=0x7f => Ok((Node::Leaf(vec![first]), pos + 1)),
        0x80..=0xb7 => {
            let len = (first - 0x80) as usize;
            let end = pos + 1 + len;
            if end > bytes.len() {
                return Err(TreeError::Truncated);
            }
            let payload = &bytes[pos + 1..end];
            // A single byte below 0x80 must use the literal form.
            if len == 1 && payload[0] < 0x80 {
                return Err(TreeError::NonCanonical(pos));
            }
            Ok((Node::Leaf(payload.to_vec()), end))
        }
        0xb8..=0xbf => {
            let (len, data_pos) = decode_long_length(bytes, pos, first - 0xb7)?;
            let end = data_pos.checked_add(len).ok_or(TreeError::Truncated)?;
            if end > bytes.len() {
                return Err(TreeError::Truncated);
            }
            Ok((Node::Leaf(bytes[data_pos..end].to_vec()), end))
        }
        0xc0..=0xf7 => {
            let len = (first - 0xc0) as usize;
            decode_list(bytes, pos + 1, len)
        }
        0xf8..=0xff => {
            let (len, data_pos) = decode_long_length(bytes, pos, first - 0xf7)?;
            decode_list(bytes, data_pos, len)
        }
    }
}

fn decode_long_length(
    bytes: &[u8],
    pos: usize,
    len_of_len: u8,
) -> Result<(usize, usize), TreeError> {
    let len_of_len = len_of_len as usize;
    let end = pos + 1 + len_of_len;
    if end > bytes.len() {
        return Err(TreeError::Truncated);
    }
    let len_bytes = &bytes[pos + 1..end];
    if len_bytes[0] == 0 {
        return Err(TreeError::NonCanonical(pos));
    }
    if len_of_len > std::mem::size_of::<usize>() {
        return Err(TreeError::LengthOverflow);
    }
    let mut len = 0usize;
    for b in len_bytes {
        len = len
            .checked_shl(8)
            .and_then(|l| l.checked_add(*b as usize))
            .ok_or(TreeError::LengthOverflow)?;
    }
    // The long form is only canonical above the short maximum.
    if len <= SHORT_MAX {
        return Err(TreeError::NonCanonical(pos));
    }
    Ok((len, end))
}

fn decode_list(bytes: &[u8], start: usize, len: usize) -> Result<(Node, usize), TreeError> {
    let end = start.checked_add(len).ok_or(TreeError::Truncated)?;
    if end > bytes.len() {
        return Err(TreeError::Truncated);
    }
    let mut items = Vec::new();
    let mut pos = start;
    while pos < end {
        let (item, next) = decode_at(bytes, pos)?;
        if next > end {
            return Err(TreeError::Truncated);
        }
        items.push(item);
        pos = next;
    }
    Ok((Node::List(items), end))
}
