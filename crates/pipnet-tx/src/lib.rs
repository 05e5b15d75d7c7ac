//! Pipnet transaction decoding, editing, re-encoding, and commission math.
//!
//! Provides the transaction kind enumeration, strict decoding of kind-specific
//! data bodies into typed structures and editable field lists, re-encoding of
//! edited fields back into canonical bytes, and the commission formula.

pub mod builder;
pub mod check;
pub mod data;
pub mod fee;
pub mod fields;
pub mod kind;
pub mod parser;

pub use builder::{build, build_redeem_check};
pub use check::{CheckBody, ProofDeriver, PROOF_LEN};
pub use data::TxData;
pub use fields::{Field, FieldRole, FieldRule, FieldView, MAX_PAYLOAD_BYTES};
pub use kind::TransactionKind;
pub use parser::{parse, ParsedTx};

use pipnet_types::CoinId;
use thiserror::Error;

/// Fatal decode failures raised once at session construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("incorrect transaction data")]
    IncorrectTransactionData,

    #[error("unresolvable coin {0}")]
    UnknownCoin(CoinId),

    #[error("unknown transaction type {0}")]
    UnknownKind(u64),
}
