//! Core types for the Pipnet chain.
//!
//! This crate provides the foundational types used across all Pipnet crates:
//! the length-prefixed binary tree codec, coin symbols and ids, account
//! addresses, validator public keys, and PIP amount arithmetic.

pub mod address;
pub mod amount;
pub mod coin;
pub mod rlp;

pub use address::{Address, AddressError, PublicKey};
pub use amount::{AmountError, Pip, AMOUNT_DECIMALS};
pub use coin::{CoinId, CoinResolver, CoinSymbol, CoinTable, NeededCoin, BASE_COIN_TICKER};
pub use rlp::{Node, TreeError};
