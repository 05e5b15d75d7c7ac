//! Coin symbols, numeric coin ids, and symbol ⇄ id resolution.

use crate::amount::Pip;
use crate::rlp::Node;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Ticker of the network's base coin (id 0), which pays fees by default.
pub const BASE_COIN_TICKER: &str = "BIP";

pub const MIN_SYMBOL_LEN: usize = 3;
pub const MAX_SYMBOL_LEN: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoinError {
    #[error("invalid coin symbol: {0:?}")]
    InvalidSymbol(String),
}

/// Numeric coin id assigned by the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CoinId(pub u32);

impl CoinId {
    pub fn to_node(self) -> Node {
        Node::uint(u64::from(self.0))
    }

    pub fn from_node(node: &Node) -> Option<CoinId> {
        let v = node.as_uint()?;
        u32::try_from(v).ok().map(CoinId)
    }
}

impl fmt::Display for CoinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "COIN-{}", self.0)
    }
}

/// Validated coin ticker: 3-10 chars, `A-Z0-9`, starting with a letter.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CoinSymbol(String);

impl CoinSymbol {
    pub fn new(s: &str) -> Result<Self, CoinError> {
        if !is_valid_symbol(s) {
            return Err(CoinError::InvalidSymbol(s.to_string()));
        }
        Ok(CoinSymbol(s.to_string()))
    }

    /// The base coin ticker.
    pub fn base() -> Self {
        CoinSymbol(BASE_COIN_TICKER.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CoinSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Coin ticker syntax check.
pub fn is_valid_symbol(s: &str) -> bool {
    if s.len() < MIN_SYMBOL_LEN || s.len() > MAX_SYMBOL_LEN {
        return false;
    }
    let mut bytes = s.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_uppercase() => {}
        _ => return false,
    }
    s.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

/// Symbol ⇄ numeric id lookup.
///
/// The authoritative table lives on the network side; implementations here
/// only mirror whatever snapshot the caller currently holds.
pub trait CoinResolver {
    fn resolve_id(&self, symbol: &CoinSymbol) -> Option<CoinId>;
    fn resolve_symbol(&self, id: CoinId) -> Option<CoinSymbol>;
}

/// In-memory resolver backed by a snapshot of the chain's coin table.
#[derive(Debug, Default, Clone)]
pub struct CoinTable {
    by_id: BTreeMap<u32, CoinSymbol>,
    by_symbol: BTreeMap<CoinSymbol, u32>,
}

impl CoinTable {
    /// Empty table with the base coin preloaded at id 0.
    pub fn with_base() -> Self {
        let mut table = CoinTable::default();
        table.insert(CoinId(0), CoinSymbol::base());
        table
    }

    pub fn insert(&mut self, id: CoinId, symbol: CoinSymbol) {
        self.by_id.insert(id.0, symbol.clone());
        self.by_symbol.insert(symbol, id.0);
    }
}

impl CoinResolver for CoinTable {
    fn resolve_id(&self, symbol: &CoinSymbol) -> Option<CoinId> {
        self.by_symbol.get(symbol).copied().map(CoinId)
    }

    fn resolve_symbol(&self, id: CoinId) -> Option<CoinSymbol> {
        self.by_id.get(&id.0).cloned()
    }
}

/// Coin requirement of a parsed transaction, captured once at parse time.
///
/// Used only for the insufficient-funds hint; it is not updated when the
/// user edits amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NeededCoin {
    pub coin: CoinSymbol,
    pub amount: Pip,
}
