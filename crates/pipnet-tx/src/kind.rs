//! Transaction kind enumeration.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of transaction kinds, tagged with their wire type bytes.
///
/// The kind is fixed for the lifetime of an editing session and selects both
/// the field layout and the payload builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Send,
    SellCoin,
    SellAllCoins,
    BuyCoin,
    CreateCoin,
    DeclareCandidacy,
    Delegate,
    Unbond,
    RedeemCheck,
    SetCandidateOnline,
    SetCandidateOffline,
    CreateMultisigAddress,
    Multisend,
    EditCandidate,
    SetHaltBlock,
    RecreateCoin,
    ChangeCoinOwner,
    EditMultisigOwner,
    PriceVote,
    EditCandidatePublicKey,
}

impl TransactionKind {
    /// All kinds, in wire-tag order.
    pub const ALL: [TransactionKind; 20] = [
        TransactionKind::Send,
        TransactionKind::SellCoin,
        TransactionKind::SellAllCoins,
        TransactionKind::BuyCoin,
        TransactionKind::CreateCoin,
        TransactionKind::DeclareCandidacy,
        TransactionKind::Delegate,
        TransactionKind::Unbond,
        TransactionKind::RedeemCheck,
        TransactionKind::SetCandidateOnline,
        TransactionKind::SetCandidateOffline,
        TransactionKind::CreateMultisigAddress,
        TransactionKind::Multisend,
        TransactionKind::EditCandidate,
        TransactionKind::SetHaltBlock,
        TransactionKind::RecreateCoin,
        TransactionKind::ChangeCoinOwner,
        TransactionKind::EditMultisigOwner,
        TransactionKind::PriceVote,
        TransactionKind::EditCandidatePublicKey,
    ];

    /// Wire type byte.
    pub fn tag(self) -> u8 {
        match self {
            TransactionKind::Send => 1,
            TransactionKind::SellCoin => 2,
            TransactionKind::SellAllCoins => 3,
            TransactionKind::BuyCoin => 4,
            TransactionKind::CreateCoin => 5,
            TransactionKind::DeclareCandidacy => 6,
            TransactionKind::Delegate => 7,
            TransactionKind::Unbond => 8,
            TransactionKind::RedeemCheck => 9,
            TransactionKind::SetCandidateOnline => 10,
            TransactionKind::SetCandidateOffline => 11,
            TransactionKind::CreateMultisigAddress => 12,
            TransactionKind::Multisend => 13,
            TransactionKind::EditCandidate => 14,
            TransactionKind::SetHaltBlock => 15,
            TransactionKind::RecreateCoin => 16,
            TransactionKind::ChangeCoinOwner => 17,
            TransactionKind::EditMultisigOwner => 18,
            TransactionKind::PriceVote => 19,
            TransactionKind::EditCandidatePublicKey => 20,
        }
    }

    pub fn from_tag(tag: u64) -> Result<Self, ParseError> {
        TransactionKind::ALL
            .iter()
            .copied()
            .find(|k| u64::from(k.tag()) == tag)
            .ok_or(ParseError::UnknownKind(tag))
    }

    /// Human-readable name shown as the review screen title.
    pub fn name(self) -> &'static str {
        match self {
            TransactionKind::Send => "Send Coins",
            TransactionKind::SellCoin => "Sell Coins",
            TransactionKind::SellAllCoins => "Sell All Coins",
            TransactionKind::BuyCoin => "Buy Coins",
            TransactionKind::CreateCoin => "Create Coin",
            TransactionKind::DeclareCandidacy => "Declare Candidacy",
            TransactionKind::Delegate => "Delegate",
            TransactionKind::Unbond => "Unbond",
            TransactionKind::RedeemCheck => "Redeem Check",
            TransactionKind::SetCandidateOnline => "Set Candidate Online",
            TransactionKind::SetCandidateOffline => "Set Candidate Offline",
            TransactionKind::CreateMultisigAddress => "Create Multisig Address",
            TransactionKind::Multisend => "Multisend",
            TransactionKind::EditCandidate => "Edit Candidate",
            TransactionKind::SetHaltBlock => "Set Halt Block",
            TransactionKind::RecreateCoin => "Recreate Coin",
            TransactionKind::ChangeCoinOwner => "Change Coin Owner",
            TransactionKind::EditMultisigOwner => "Edit Multisig Owner",
            TransactionKind::PriceVote => "Price Vote",
            TransactionKind::EditCandidatePublicKey => "Edit Candidate Public Key",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_dense_and_unique() {
        for (i, kind) in TransactionKind::ALL.iter().enumerate() {
            assert_eq!(kind.tag() as usize, i + 1);
            assert_eq!(TransactionKind::from_tag(kind.tag() as u64), Ok(*kind));
        }
    }

    #[test]
    fn test_unknown_tag() {
        assert_eq!(
            TransactionKind::from_tag(0),
            Err(ParseError::UnknownKind(0))
        );
        assert_eq!(
            TransactionKind::from_tag(21),
            Err(ParseError::UnknownKind(21))
        );
    }
}
