//! Wallet balance snapshots and insufficient-funds detection.

use log::debug;
use pipnet_types::{CoinSymbol, NeededCoin, Pip};
use serde::Serialize;
use std::collections::BTreeMap;

/// Point-in-time view of the wallet's balances, pushed by the balance feed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BalanceSnapshot {
    coins: BTreeMap<CoinSymbol, Pip>,
}

impl BalanceSnapshot {
    pub fn new() -> Self {
        BalanceSnapshot::default()
    }

    pub fn set(&mut self, coin: CoinSymbol, amount: Pip) {
        self.coins.insert(coin, amount);
    }

    /// Balance of a coin; zero when the wallet holds none of it.
    pub fn balance_of(&self, coin: &CoinSymbol) -> Pip {
        self.coins.get(coin).cloned().unwrap_or_else(Pip::zero)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CoinSymbol, &Pip)> {
        self.coins.iter()
    }
}

impl FromIterator<(CoinSymbol, Pip)> for BalanceSnapshot {
    fn from_iter<I: IntoIterator<Item = (CoinSymbol, Pip)>>(iter: I) -> Self {
        BalanceSnapshot {
            coins: iter.into_iter().collect(),
        }
    }
}

/// Compare a transaction's parse-time coin requirement against a snapshot.
///
/// Returns the coin and the missing amount when the balance falls short,
/// `None` when the wallet can cover it. The requirement is the originally
/// parsed one; live edits do not feed into this hint.
pub fn missing_funds(
    needed: &NeededCoin,
    balances: &BalanceSnapshot,
) -> Option<(CoinSymbol, Pip)> {
    let have = balances.balance_of(&needed.coin);
    match needed.amount.checked_sub(&have) {
        Some(short) if !short.is_zero() => {
            debug!("insufficient funds: {} {} short", short, needed.coin);
            Some((needed.coin.clone(), short))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> CoinSymbol {
        CoinSymbol::new("ABC").unwrap()
    }

    fn needed(amount: u64) -> NeededCoin {
        NeededCoin {
            coin: abc(),
            amount: Pip::unit().scaled(amount),
        }
    }

    #[test]
    fn test_short_balance_yields_hint() {
        let mut balances = BalanceSnapshot::new();
        balances.set(abc(), Pip::unit().scaled(4));

        let (coin, short) = missing_funds(&needed(10), &balances).unwrap();
        assert_eq!(coin.as_str(), "ABC");
        assert_eq!(short, Pip::unit().scaled(6));
    }

    #[test]
    fn test_exact_balance_yields_none() {
        let mut balances = BalanceSnapshot::new();
        balances.set(abc(), Pip::unit().scaled(10));
        assert_eq!(missing_funds(&needed(10), &balances), None);
    }

    #[test]
    fn test_surplus_yields_none() {
        let mut balances = BalanceSnapshot::new();
        balances.set(abc(), Pip::unit().scaled(11));
        assert_eq!(missing_funds(&needed(10), &balances), None);
    }

    #[test]
    fn test_absent_coin_counts_as_zero() {
        let balances = BalanceSnapshot::new();
        let (_, short) = missing_funds(&needed(10), &balances).unwrap();
        assert_eq!(short, Pip::unit().scaled(10));
    }

    #[test]
    fn test_zero_requirement_never_hints() {
        let balances = BalanceSnapshot::new();
        let zero = NeededCoin {
            coin: abc(),
            amount: Pip::zero(),
        };
        assert_eq!(missing_funds(&zero, &balances), None);
    }
}
