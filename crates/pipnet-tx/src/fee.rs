//! Commission calculation.
//!
//! The fee formula is
//! `(base_units + PAYLOAD_BYTE_UNITS * payload_len) * UNIT_PIP * gas_price`,
//! where one unit is 10^15 PIP (0.001 of the base coin). Base units are
//! kind-specific; multisend scales with the recipient count and coin
//! creation with the issued symbol length. Redeeming a check is always free
//! for the redeemer — the issuer pre-paid the fee.

use crate::kind::TransactionKind;
use pipnet_types::Pip;

/// Commission units charged per payload byte.
pub const PAYLOAD_BYTE_UNITS: u64 = 2;

/// PIP value of one commission unit (10^15).
pub fn unit_pip() -> Pip {
    Pip::pow10(15)
}

/// Kind-specific base commission in units.
pub fn base_units(kind: TransactionKind, multisend_count: u32, symbol_length: u32) -> u64 {
    match kind {
        TransactionKind::Send => 10,
        TransactionKind::SellCoin
        | TransactionKind::SellAllCoins
        | TransactionKind::BuyCoin => 100,
        TransactionKind::CreateCoin => create_coin_units(symbol_length),
        TransactionKind::RecreateCoin => 10_000_000,
        TransactionKind::DeclareCandidacy => 10_000,
        TransactionKind::Delegate | TransactionKind::Unbond => 200,
        TransactionKind::RedeemCheck => 0,
        TransactionKind::SetCandidateOnline | TransactionKind::SetCandidateOffline => 100,
        TransactionKind::CreateMultisigAddress => 100,
        TransactionKind::Multisend => 10 + 5 * u64::from(multisend_count.saturating_sub(1)),
        TransactionKind::EditCandidate => 10_000,
        TransactionKind::SetHaltBlock => 1_000,
        TransactionKind::ChangeCoinOwner => 10_000_000,
        TransactionKind::EditMultisigOwner => 1_000,
        TransactionKind::PriceVote => 10,
        TransactionKind::EditCandidatePublicKey => 100_000_000,
    }
}

/// Coin creation tier: shorter tickers cost more.
fn create_coin_units(symbol_length: u32) -> u64 {
    match symbol_length {
        0..=3 => 1_000_000,
        4 => 100_000,
        5 => 10_000,
        6 => 1_000,
        _ => 100,
    }
}

/// Compute the commission in PIP.
pub fn commission(
    kind: TransactionKind,
    payload_len: usize,
    multisend_count: u32,
    symbol_length: u32,
    gas_price: u64,
) -> Pip {
    if kind == TransactionKind::RedeemCheck {
        return Pip::zero();
    }
    let units =
        base_units(kind, multisend_count, symbol_length) + PAYLOAD_BYTE_UNITS * payload_len as u64;
    unit_pip().scaled(units).scaled(gas_price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_fee_at_gas_price_one() {
        // 10 units = 0.01 of the base coin.
        let fee = commission(TransactionKind::Send, 0, 0, 0, 1);
        assert_eq!(fee.to_decimal_string(), "0.01");
    }

    #[test]
    fn test_gas_price_scales_linearly() {
        let one = commission(TransactionKind::Delegate, 0, 0, 0, 1);
        let four = commission(TransactionKind::Delegate, 0, 0, 0, 4);
        assert_eq!(one.scaled(4), four);
    }

    #[test]
    fn test_payload_bytes_increase_fee() {
        let empty = commission(TransactionKind::Send, 0, 0, 0, 1);
        let with_payload = commission(TransactionKind::Send, 12, 0, 0, 1);
        assert!(with_payload > empty);
        // 12 bytes at 2 units each on top of 10 base units.
        assert_eq!(with_payload.to_decimal_string(), "0.034");
    }

    #[test]
    fn test_fee_monotone_in_payload_length() {
        let mut last = Pip::zero();
        for len in 0..64 {
            let fee = commission(TransactionKind::SellCoin, len, 0, 0, 1);
            assert!(fee >= last);
            last = fee;
        }
    }

    #[test]
    fn test_redeem_check_is_free() {
        assert!(commission(TransactionKind::RedeemCheck, 0, 0, 0, 1).is_zero());
        // Even with a payload and a high gas price.
        assert!(commission(TransactionKind::RedeemCheck, 500, 0, 0, 50).is_zero());
    }

    #[test]
    fn test_multisend_scales_with_recipients() {
        assert_eq!(base_units(TransactionKind::Multisend, 1, 0), 10);
        assert_eq!(base_units(TransactionKind::Multisend, 3, 0), 20);
        assert_eq!(base_units(TransactionKind::Multisend, 10, 0), 55);
        let three = commission(TransactionKind::Multisend, 0, 3, 0, 1);
        let one = commission(TransactionKind::Multisend, 0, 1, 0, 1);
        assert!(three > one);
    }

    #[test]
    fn test_create_coin_tiers() {
        assert_eq!(base_units(TransactionKind::CreateCoin, 0, 3), 1_000_000);
        assert_eq!(base_units(TransactionKind::CreateCoin, 0, 4), 100_000);
        assert_eq!(base_units(TransactionKind::CreateCoin, 0, 5), 10_000);
        assert_eq!(base_units(TransactionKind::CreateCoin, 0, 6), 1_000);
        assert_eq!(base_units(TransactionKind::CreateCoin, 0, 7), 100);
        assert_eq!(base_units(TransactionKind::CreateCoin, 0, 10), 100);
    }

    #[test]
    fn test_expensive_kind_exceeds_u64_pip() {
        // 100_000_000 units * 10^15 PIP does not fit in u64; the big-int
        // amount type must carry it.
        let fee = commission(TransactionKind::EditCandidatePublicKey, 0, 0, 0, 1);
        assert_eq!(fee.to_decimal_string(), "100000");
    }
}
