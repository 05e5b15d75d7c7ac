//! Account addresses and validator public keys.
//!
//! Addresses are 20 bytes rendered as `Mx` + 40 hex chars; validator public
//! keys are 32 bytes rendered as `Mp` + 64 hex chars. Parsing accepts mixed
//! case hex; rendering is lowercase.

use crate::rlp::Node;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

pub const ADDRESS_LEN: usize = 20;
pub const PUBLIC_KEY_LEN: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("missing {0:?} prefix")]
    BadPrefix(&'static str),

    #[error("invalid length: expected {expected} hex chars, got {actual}")]
    BadLength { expected: usize, actual: usize },

    #[error("invalid hex: {0}")]
    BadHex(String),
}

/// 20-byte account address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    pub fn parse(s: &str) -> Result<Self, AddressError> {
        let bytes = parse_prefixed(s, "Mx", ADDRESS_LEN)?;
        let mut out = [0u8; ADDRESS_LEN];
        out.copy_from_slice(&bytes);
        Ok(Address(out))
    }

    pub fn to_node(&self) -> Node {
        Node::leaf(self.0.to_vec())
    }

    pub fn from_node(node: &Node) -> Option<Self> {
        let bytes = node.as_leaf()?;
        let arr: [u8; ADDRESS_LEN] = bytes.try_into().ok()?;
        Some(Address(arr))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mx{}", hex::encode(self.0))
    }
}

impl Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// 32-byte validator public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(pub [u8; PUBLIC_KEY_LEN]);

impl PublicKey {
    pub fn parse(s: &str) -> Result<Self, AddressError> {
        let bytes = parse_prefixed(s, "Mp", PUBLIC_KEY_LEN)?;
        let mut out = [0u8; PUBLIC_KEY_LEN];
        out.copy_from_slice(&bytes);
        Ok(PublicKey(out))
    }

    pub fn to_node(&self) -> Node {
        Node::leaf(self.0.to_vec())
    }

    pub fn from_node(node: &Node) -> Option<Self> {
        let bytes = node.as_leaf()?;
        let arr: [u8; PUBLIC_KEY_LEN] = bytes.try_into().ok()?;
        Some(PublicKey(arr))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mp{}", hex::encode(self.0))
    }
}

impl Serialize for PublicKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

fn parse_prefixed(
    s: &str,
    prefix: &'static str,
    byte_len: usize,
) -> Result<Vec<u8>, AddressError> {
    let body = s
        .strip_prefix(prefix)
        .ok_or(AddressError::BadPrefix(prefix))?;
    if body.len() != byte_len * 2 {
        return Err(AddressError::BadLength {
            expected: byte_len * 2,
            actual: body.len(),
        });
    }
    hex::decode(body).map_err(|e| AddressError::BadHex(e.to_string()))
}

/// Address syntax check.
pub fn is_valid_address(s: &str) -> bool {
    Address::parse(s).is_ok()
}

/// Validator public key syntax check.
pub fn is_valid_public_key(s: &str) -> bool {
    PublicKey::parse(s).is_ok()
}
