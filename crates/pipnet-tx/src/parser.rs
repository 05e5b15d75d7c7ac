//! Kind-specific decoding into an ordered, editable field list.
//!
//! `parse` is the single entry point for opening a transaction review: it
//! decodes the data body, builds the typed representation, derives the field
//! layout for the kind, and captures the structural fee counters and the
//! parse-time coin requirement.

use crate::data::TxData;
use crate::fields::{
    Field, FieldRole, ADDRESS_RULE, AMOUNT_RULE, COIN_RULE, INTEGER_RULE, PUBLIC_KEY_RULE,
    TEXT_RULE,
};
use crate::kind::TransactionKind;
use crate::ParseError;
use pipnet_types::{CoinId, CoinResolver, NeededCoin, BASE_COIN_TICKER};

/// Result of opening a transaction for review.
#[derive(Debug, PartialEq)]
pub struct ParsedTx {
    pub kind: TransactionKind,
    pub data: TxData,
    pub fields: Vec<Field>,
    /// Display text of the fee coin (base coin unless a check overrides it).
    pub gas_coin: String,
    pub multisend_address_count: u32,
    pub create_coin_symbol_length: u32,
    pub needed: Option<NeededCoin>,
}

/// Decode a raw data body for `kind` into its editable representation.
pub fn parse(
    kind: TransactionKind,
    bytes: &[u8],
    resolver: &dyn CoinResolver,
) -> Result<ParsedTx, ParseError> {
    let tree =
        pipnet_types::rlp::decode(bytes).map_err(|_| ParseError::IncorrectTransactionData)?;
    let data = TxData::decode(kind, &tree)?;
    let fields = fields_for(&data, resolver)?;
    let gas_coin = match data.gas_coin_override() {
        Some(id) => coin_text(id, resolver),
        None => BASE_COIN_TICKER.to_string(),
    };

    Ok(ParsedTx {
        kind,
        needed: data.needed_coin(resolver),
        multisend_address_count: data.multisend_count(),
        create_coin_symbol_length: data.issued_symbol_length(),
        gas_coin,
        fields,
        data,
    })
}

/// Resolved symbol text, falling back to the numeric id for display-only use.
pub fn coin_text(id: CoinId, resolver: &dyn CoinResolver) -> String {
    resolver
        .resolve_symbol(id)
        .map(|s| s.to_string())
        .unwrap_or_else(|| id.to_string())
}

/// Resolved symbol for an editable coin field; unresolvable ids are fatal
/// here because re-encoding the edit needs a valid id.
fn editable_coin_text(id: CoinId, resolver: &dyn CoinResolver) -> Result<String, ParseError> {
    resolver
        .resolve_symbol(id)
        .map(|s| s.to_string())
        .ok_or(ParseError::UnknownCoin(id))
}

/// Build the ordered field list for decoded data.
///
/// Re-invoked when the session re-enters edit mode, always from the original
/// decoded data so prior uncommitted edits are discarded.
pub fn fields_for(data: &TxData, resolver: &dyn CoinResolver) -> Result<Vec<Field>, ParseError> {
    let fields = match data {
        TxData::Send(d) => vec![
            amount_field(None, &d.value),
            coin_field("Coin", editable_coin_text(d.coin, resolver)?),
            address_field("To", d.to.to_string()),
        ],
        TxData::SellCoin(d) => vec![
            amount_field(None, &d.value_to_sell),
            coin_field("Coin To Sell", editable_coin_text(d.coin_to_sell, resolver)?),
            coin_field("Coin To Buy", editable_coin_text(d.coin_to_buy, resolver)?),
            amount_field(Some("Minimum Value To Buy"), &d.min_value_to_buy),
        ],
        TxData::SellAllCoins(d) => vec![
            coin_field("Coin To Sell", editable_coin_text(d.coin_to_sell, resolver)?),
            coin_field("Coin To Buy", editable_coin_text(d.coin_to_buy, resolver)?),
            amount_field(Some("Minimum Value To Buy"), &d.min_value_to_buy),
        ],
        TxData::BuyCoin(d) => vec![
            amount_field(None, &d.value_to_buy),
            coin_field("Coin To Buy", editable_coin_text(d.coin_to_buy, resolver)?),
            coin_field("Coin To Sell", editable_coin_text(d.coin_to_sell, resolver)?),
            amount_field(Some("Maximum Value To Sell"), &d.max_value_to_sell),
        ],
        TxData::CreateCoin(d) | TxData::RecreateCoin(d) => vec![
            Field::new(
                Some("Name"),
                some_text(&d.name),
                true,
                FieldRole::Text,
                &TEXT_RULE,
            ),
            coin_field("Symbol", d.symbol.clone()),
            amount_field(Some("Initial Amount"), &d.initial_amount),
            amount_field(Some("Initial Reserve"), &d.initial_reserve),
            integer_field("Constant Reserve Ratio", u64::from(d.reserve_ratio)),
            amount_field(Some("Max Supply"), &d.max_supply),
        ],
        TxData::DeclareCandidacy(d) => vec![
            address_field("Address", d.address.to_string()),
            pubkey_field("Public Key", d.public_key.to_string()),
            integer_field("Commission", u64::from(d.commission)),
            coin_field("Coin", editable_coin_text(d.coin, resolver)?),
            amount_field(Some("Stake"), &d.stake),
        ],
        TxData::Delegate(d) | TxData::Unbond(d) => vec![
            pubkey_field("Public Key", d.public_key.to_string()),
            coin_field("Coin", editable_coin_text(d.coin, resolver)?),
            amount_field(Some("Stake"), &d.stake),
        ],
        TxData::RedeemCheck(d) => vec![
            Field::readonly(
                "Check",
                format!("Mc{}", hex::encode(&d.raw_check)),
                FieldRole::Text,
            ),
            Field::readonly("Proof", hex::encode(&d.proof), FieldRole::Text),
            Field::readonly("Coin", coin_text(d.body.coin, resolver), FieldRole::Coin),
            Field::readonly(
                "Amount",
                d.body.value.to_decimal_string(),
                FieldRole::Amount,
            ),
        ],
        TxData::SetCandidateOnline(key) | TxData::SetCandidateOffline(key) => {
            vec![pubkey_field("Public Key", key.to_string())]
        }
        TxData::CreateMultisigAddress(d) | TxData::EditMultisigOwner(d) => {
            // Weighted owner sets are structural; shown but not editable.
            let mut fields = vec![Field::readonly(
                "Threshold",
                d.threshold.to_string(),
                FieldRole::Integer,
            )];
            for (i, (addr, weight)) in d.addresses.iter().zip(&d.weights).enumerate() {
                fields.push(Field::readonly(
                    &format!("Owner #{}", i + 1),
                    addr.to_string(),
                    FieldRole::Address,
                ));
                fields.push(Field::readonly(
                    &format!("Weight #{}", i + 1),
                    weight.to_string(),
                    FieldRole::Integer,
                ));
            }
            fields
        }
        TxData::Multisend(items) => {
            let mut fields = Vec::with_capacity(items.len() * 2);
            for item in items {
                fields.push(Field::readonly(
                    "Sending",
                    format!(
                        "{} {}",
                        item.value.to_decimal_string(),
                        coin_text(item.coin, resolver)
                    ),
                    FieldRole::Amount,
                ));
                fields.push(Field::readonly("To", item.to.to_string(), FieldRole::Address));
            }
            fields
        }
        TxData::EditCandidate(d) => vec![
            pubkey_field("Public Key", d.public_key.to_string()),
            address_field("Reward Address", d.reward_address.to_string()),
            address_field("Owner Address", d.owner_address.to_string()),
            address_field("Control Address", d.control_address.to_string()),
        ],
        TxData::SetHaltBlock(d) => vec![
            pubkey_field("Public Key", d.public_key.to_string()),
            integer_field("Height", d.height),
        ],
        TxData::ChangeCoinOwner(d) => vec![
            coin_field("Symbol", d.symbol.clone()),
            address_field("New Owner", d.new_owner.to_string()),
        ],
        TxData::PriceVote(price) => vec![integer_field("Price", *price)],
        TxData::EditCandidatePublicKey(d) => vec![
            pubkey_field("Public Key", d.public_key.to_string()),
            pubkey_field("New Public Key", d.new_public_key.to_string()),
        ],
    };
    Ok(fields)
}

fn some_text(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

fn amount_field(key: Option<&str>, value: &pipnet_types::Pip) -> Field {
    Field::new(
        key,
        Some(value.to_decimal_string()),
        true,
        FieldRole::Amount,
        &AMOUNT_RULE,
    )
}

fn coin_field(key: &str, value: String) -> Field {
    Field::new(Some(key), Some(value), true, FieldRole::Coin, &COIN_RULE)
}

fn address_field(key: &str, value: String) -> Field {
    Field::new(Some(key), Some(value), true, FieldRole::Address, &ADDRESS_RULE)
}

fn pubkey_field(key: &str, value: String) -> Field {
    Field::new(
        Some(key),
        Some(value),
        true,
        FieldRole::PublicKey,
        &PUBLIC_KEY_RULE,
    )
}

fn integer_field(key: &str, value: u64) -> Field {
    Field::new(
        Some(key),
        Some(value.to_string()),
        true,
        FieldRole::Integer,
        &INTEGER_RULE,
    )
}
