//! Redeem-check body decoding and the proof derivation seam.
//!
//! A check is a pre-signed bearer voucher. Its body is a nested tree inside
//! the redeem transaction's first leaf. Redeeming requires a 65-byte proof
//! derived from the redeemer's address and a shared passphrase; the actual
//! derivation involves secp256k1 signing and lives with the external signer,
//! behind the [`ProofDeriver`] trait.

use crate::ParseError;
use pipnet_types::{Address, CoinId, Node, Pip};

/// Byte length of a redemption proof (recoverable signature).
pub const PROOF_LEN: usize = 65;

/// Decoded check body: `[nonce, chain_id, coin, value, gas_coin, due_block, lock]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckBody {
    pub nonce: Vec<u8>,
    pub chain_id: u64,
    pub coin: CoinId,
    pub value: Pip,
    pub gas_coin: CoinId,
    pub due_block: u64,
    pub lock: Vec<u8>,
}

impl CheckBody {
    /// Decode a raw check byte string.
    pub fn decode(raw: &[u8]) -> Result<Self, ParseError> {
        let tree = pipnet_types::rlp::decode(raw)
            .map_err(|_| ParseError::IncorrectTransactionData)?;
        let items = tree
            .as_list()
            .ok_or(ParseError::IncorrectTransactionData)?;
        if items.len() != 7 {
            return Err(ParseError::IncorrectTransactionData);
        }

        let leaf = |i: usize| -> Result<Vec<u8>, ParseError> {
            items[i]
                .as_leaf()
                .map(|b| b.to_vec())
                .ok_or(ParseError::IncorrectTransactionData)
        };
        let uint = |i: usize| -> Result<u64, ParseError> {
            items[i].as_uint().ok_or(ParseError::IncorrectTransactionData)
        };
        let coin = |i: usize| -> Result<CoinId, ParseError> {
            CoinId::from_node(&items[i]).ok_or(ParseError::IncorrectTransactionData)
        };

        Ok(CheckBody {
            nonce: leaf(0)?,
            chain_id: uint(1)?,
            coin: coin(2)?,
            value: amount(&items[3])?,
            gas_coin: coin(4)?,
            due_block: uint(5)?,
            lock: leaf(6)?,
        })
    }
}

fn amount(node: &Node) -> Result<Pip, ParseError> {
    let bytes = node.as_leaf().ok_or(ParseError::IncorrectTransactionData)?;
    if !bytes.is_empty() && bytes[0] == 0 {
        return Err(ParseError::IncorrectTransactionData);
    }
    Ok(Pip::from_be_bytes(bytes))
}

/// Derives a redemption proof from the redeemer's address and the check
/// passphrase. Implemented by the signing collaborator.
pub trait ProofDeriver: Send + Sync {
    fn derive_proof(&self, address: &Address, passphrase: &str) -> [u8; PROOF_LEN];
}
