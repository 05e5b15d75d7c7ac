//! Pipnet wallet-side state consumed by the transaction review flow.

pub mod balance;

pub use balance::{missing_funds, BalanceSnapshot};
