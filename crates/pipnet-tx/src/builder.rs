//! Re-encoding edited fields back into a canonical byte body.
//!
//! `build` reads the current field values, reconstructs the typed data for
//! the kind, and encodes it. Any required value that fails to parse makes
//! the whole payload unbuildable (`None`) — the caller disables the send
//! action but keeps the user's text untouched.

use crate::check::PROOF_LEN;
use crate::data::{
    BuyData, ChangeCoinOwnerData, CoinIssueData, DeclareCandidacyData, EditCandidateData,
    EditCandidatePublicKeyData, SellAllData, SellData, SendData, SetHaltBlockData, StakeData,
    TxData,
};
use crate::fields::Field;
use log::debug;
use pipnet_types::coin::is_valid_symbol;
use pipnet_types::{Address, CoinId, CoinResolver, CoinSymbol, Node, Pip, PublicKey};

/// Rebuild the data body from the current field values.
///
/// `original` supplies the kind and every part the field list does not edit
/// (multisend entries, multisig owner sets, redeem-check contents).
pub fn build(original: &TxData, fields: &[Field], resolver: &dyn CoinResolver) -> Option<Vec<u8>> {
    let rebuilt = rebuild_data(original, fields, resolver);
    if rebuilt.is_none() {
        debug!("payload unbuildable for {}", original.kind());
    }
    rebuilt.map(|data| data.encode())
}

/// Redeem-check payload with a freshly derived proof.
///
/// When a passphrase is supplied the edited field set is ignored entirely;
/// only the proof changes.
pub fn build_redeem_check(raw_check: &[u8], proof: &[u8; PROOF_LEN]) -> Vec<u8> {
    Node::List(vec![
        Node::leaf(raw_check.to_vec()),
        Node::leaf(proof.to_vec()),
    ])
    .encode()
}

fn rebuild_data(
    original: &TxData,
    fields: &[Field],
    resolver: &dyn CoinResolver,
) -> Option<TxData> {
    match original {
        TxData::Send(_) => Some(TxData::Send(SendData {
            value: amount_at(fields, 0)?,
            coin: coin_at(fields, 1, resolver)?,
            to: address_at(fields, 2)?,
        })),
        TxData::SellCoin(_) => Some(TxData::SellCoin(SellData {
            value_to_sell: amount_at(fields, 0)?,
            coin_to_sell: coin_at(fields, 1, resolver)?,
            coin_to_buy: coin_at(fields, 2, resolver)?,
            min_value_to_buy: amount_at(fields, 3)?,
        })),
        TxData::SellAllCoins(_) => Some(TxData::SellAllCoins(SellAllData {
            coin_to_sell: coin_at(fields, 0, resolver)?,
            coin_to_buy: coin_at(fields, 1, resolver)?,
            min_value_to_buy: amount_at(fields, 2)?,
        })),
        TxData::BuyCoin(_) => Some(TxData::BuyCoin(BuyData {
            value_to_buy: amount_at(fields, 0)?,
            coin_to_buy: coin_at(fields, 1, resolver)?,
            coin_to_sell: coin_at(fields, 2, resolver)?,
            max_value_to_sell: amount_at(fields, 3)?,
        })),
        TxData::CreateCoin(_) => Some(TxData::CreateCoin(coin_issue_from(fields)?)),
        TxData::RecreateCoin(_) => Some(TxData::RecreateCoin(coin_issue_from(fields)?)),
        TxData::DeclareCandidacy(_) => Some(TxData::DeclareCandidacy(DeclareCandidacyData {
            address: address_at(fields, 0)?,
            public_key: pubkey_at(fields, 1)?,
            commission: u32_at(fields, 2)?,
            coin: coin_at(fields, 3, resolver)?,
            stake: amount_at(fields, 4)?,
        })),
        TxData::Delegate(_) => Some(TxData::Delegate(stake_from(fields, resolver)?)),
        TxData::Unbond(_) => Some(TxData::Unbond(stake_from(fields, resolver)?)),
        // Display-only kinds re-encode the original data unchanged.
        TxData::RedeemCheck(_)
        | TxData::Multisend(_)
        | TxData::CreateMultisigAddress(_)
        | TxData::EditMultisigOwner(_) => Some(original.clone()),
        TxData::SetCandidateOnline(_) => {
            Some(TxData::SetCandidateOnline(pubkey_at(fields, 0)?))
        }
        TxData::SetCandidateOffline(_) => {
            Some(TxData::SetCandidateOffline(pubkey_at(fields, 0)?))
        }
        TxData::EditCandidate(_) => Some(TxData::EditCandidate(EditCandidateData {
            public_key: pubkey_at(fields, 0)?,
            reward_address: address_at(fields, 1)?,
            owner_address: address_at(fields, 2)?,
            control_address: address_at(fields, 3)?,
        })),
        TxData::SetHaltBlock(_) => Some(TxData::SetHaltBlock(SetHaltBlockData {
            public_key: pubkey_at(fields, 0)?,
            height: uint_at(fields, 1)?,
        })),
        TxData::ChangeCoinOwner(_) => Some(TxData::ChangeCoinOwner(ChangeCoinOwnerData {
            symbol: symbol_text_at(fields, 0)?,
            new_owner: address_at(fields, 1)?,
        })),
        TxData::PriceVote(_) => Some(TxData::PriceVote(uint_at(fields, 0)?)),
        TxData::EditCandidatePublicKey(_) => {
            Some(TxData::EditCandidatePublicKey(EditCandidatePublicKeyData {
                public_key: pubkey_at(fields, 0)?,
                new_public_key: pubkey_at(fields, 1)?,
            }))
        }
    }
}

fn coin_issue_from(fields: &[Field]) -> Option<CoinIssueData> {
    Some(CoinIssueData {
        name: fields.get(0)?.value_str().to_string(),
        symbol: symbol_text_at(fields, 1)?,
        initial_amount: amount_at(fields, 2)?,
        initial_reserve: amount_at(fields, 3)?,
        reserve_ratio: u32_at(fields, 4)?,
        max_supply: amount_at(fields, 5)?,
    })
}

fn stake_from(fields: &[Field], resolver: &dyn CoinResolver) -> Option<StakeData> {
    Some(StakeData {
        public_key: pubkey_at(fields, 0)?,
        coin: coin_at(fields, 1, resolver)?,
        stake: amount_at(fields, 2)?,
    })
}

// ─── Typed field readers ─────────────────────────────────────────────────────
//
// Each returns None when the current text cannot serve as the typed value,
// which makes the payload unbuildable without touching field state.

fn amount_at(fields: &[Field], i: usize) -> Option<Pip> {
    Pip::parse_decimal(fields.get(i)?.value_str()).ok()
}

fn coin_at(fields: &[Field], i: usize, resolver: &dyn CoinResolver) -> Option<CoinId> {
    let symbol = CoinSymbol::new(fields.get(i)?.value_str()).ok()?;
    resolver.resolve_id(&symbol)
}

fn address_at(fields: &[Field], i: usize) -> Option<Address> {
    Address::parse(fields.get(i)?.value_str()).ok()
}

fn pubkey_at(fields: &[Field], i: usize) -> Option<PublicKey> {
    PublicKey::parse(fields.get(i)?.value_str()).ok()
}

fn uint_at(fields: &[Field], i: usize) -> Option<u64> {
    fields.get(i)?.value_str().parse::<u64>().ok()
}

fn u32_at(fields: &[Field], i: usize) -> Option<u32> {
    fields.get(i)?.value_str().parse::<u32>().ok()
}

fn symbol_text_at(fields: &[Field], i: usize) -> Option<String> {
    let text = fields.get(i)?.value_str();
    if is_valid_symbol(text) {
        Some(text.to_string())
    } else {
        None
    }
}
