//! Typed transaction data, one variant per kind.
//!
//! `TxData` is the decoded form of the kind-specific data body. Decoding is
//! strict about list shape and canonical integer leaves so that re-encoding
//! an unedited transaction reproduces the original bytes.

use crate::check::{CheckBody, PROOF_LEN};
use crate::kind::TransactionKind;
use crate::ParseError;
use pipnet_types::coin::is_valid_symbol;
use pipnet_types::{Address, CoinId, CoinResolver, NeededCoin, Node, Pip, PublicKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendData {
    pub coin: CoinId,
    pub to: Address,
    pub value: Pip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultisendItem {
    pub coin: CoinId,
    pub to: Address,
    pub value: Pip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellData {
    pub coin_to_sell: CoinId,
    pub value_to_sell: Pip,
    pub coin_to_buy: CoinId,
    pub min_value_to_buy: Pip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellAllData {
    pub coin_to_sell: CoinId,
    pub coin_to_buy: CoinId,
    pub min_value_to_buy: Pip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyData {
    pub coin_to_buy: CoinId,
    pub value_to_buy: Pip,
    pub coin_to_sell: CoinId,
    pub max_value_to_sell: Pip,
}

/// Shared by createCoin and recreateCoin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinIssueData {
    pub name: String,
    pub symbol: String,
    pub initial_amount: Pip,
    pub initial_reserve: Pip,
    pub reserve_ratio: u32,
    pub max_supply: Pip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclareCandidacyData {
    pub address: Address,
    pub public_key: PublicKey,
    pub commission: u32,
    pub coin: CoinId,
    pub stake: Pip,
}

/// Shared by delegate and unbond.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakeData {
    pub public_key: PublicKey,
    pub coin: CoinId,
    pub stake: Pip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemCheckData {
    /// Original check bytes, kept verbatim for re-encoding.
    pub raw_check: Vec<u8>,
    pub proof: Vec<u8>,
    pub body: CheckBody,
}

/// Shared by createMultisigAddress and editMultisigOwner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultisigData {
    pub threshold: u32,
    pub weights: Vec<u32>,
    pub addresses: Vec<Address>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCandidateData {
    pub public_key: PublicKey,
    pub reward_address: Address,
    pub owner_address: Address,
    pub control_address: Address,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetHaltBlockData {
    pub public_key: PublicKey,
    pub height: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeCoinOwnerData {
    pub symbol: String,
    pub new_owner: Address,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCandidatePublicKeyData {
    pub public_key: PublicKey,
    pub new_public_key: PublicKey,
}

/// Decoded kind-specific data body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxData {
    Send(SendData),
    SellCoin(SellData),
    SellAllCoins(SellAllData),
    BuyCoin(BuyData),
    CreateCoin(CoinIssueData),
    DeclareCandidacy(DeclareCandidacyData),
    Delegate(StakeData),
    Unbond(StakeData),
    RedeemCheck(RedeemCheckData),
    SetCandidateOnline(PublicKey),
    SetCandidateOffline(PublicKey),
    CreateMultisigAddress(MultisigData),
    Multisend(Vec<MultisendItem>),
    EditCandidate(EditCandidateData),
    SetHaltBlock(SetHaltBlockData),
    RecreateCoin(CoinIssueData),
    ChangeCoinOwner(ChangeCoinOwnerData),
    EditMultisigOwner(MultisigData),
    PriceVote(u64),
    EditCandidatePublicKey(EditCandidatePublicKeyData),
}

impl TxData {
    pub fn kind(&self) -> TransactionKind {
        match self {
            TxData::Send(_) => TransactionKind::Send,
            TxData::SellCoin(_) => TransactionKind::SellCoin,
            TxData::SellAllCoins(_) => TransactionKind::SellAllCoins,
            TxData::BuyCoin(_) => TransactionKind::BuyCoin,
            TxData::CreateCoin(_) => TransactionKind::CreateCoin,
            TxData::DeclareCandidacy(_) => TransactionKind::DeclareCandidacy,
            TxData::Delegate(_) => TransactionKind::Delegate,
            TxData::Unbond(_) => TransactionKind::Unbond,
            TxData::RedeemCheck(_) => TransactionKind::RedeemCheck,
            TxData::SetCandidateOnline(_) => TransactionKind::SetCandidateOnline,
            TxData::SetCandidateOffline(_) => TransactionKind::SetCandidateOffline,
            TxData::CreateMultisigAddress(_) => TransactionKind::CreateMultisigAddress,
            TxData::Multisend(_) => TransactionKind::Multisend,
            TxData::EditCandidate(_) => TransactionKind::EditCandidate,
            TxData::SetHaltBlock(_) => TransactionKind::SetHaltBlock,
            TxData::RecreateCoin(_) => TransactionKind::RecreateCoin,
            TxData::ChangeCoinOwner(_) => TransactionKind::ChangeCoinOwner,
            TxData::EditMultisigOwner(_) => TransactionKind::EditMultisigOwner,
            TxData::PriceVote(_) => TransactionKind::PriceVote,
            TxData::EditCandidatePublicKey(_) => TransactionKind::EditCandidatePublicKey,
        }
    }

    /// Decode a data tree for the given kind.
    ///
    /// Any shape mismatch is a hard failure; there is no partial decode.
    pub fn decode(kind: TransactionKind, tree: &Node) -> Result<Self, ParseError> {
        match kind {
            TransactionKind::Send => {
                let items = expect_list(tree, 3)?;
                Ok(TxData::Send(SendData {
                    coin: coin_at(items, 0)?,
                    to: address_at(items, 1)?,
                    value: amount_at(items, 2)?,
                }))
            }
            TransactionKind::SellCoin => {
                let items = expect_list(tree, 4)?;
                Ok(TxData::SellCoin(SellData {
                    coin_to_sell: coin_at(items, 0)?,
                    value_to_sell: amount_at(items, 1)?,
                    coin_to_buy: coin_at(items, 2)?,
                    min_value_to_buy: amount_at(items, 3)?,
                }))
            }
            TransactionKind::SellAllCoins => {
                let items = expect_list(tree, 3)?;
                Ok(TxData::SellAllCoins(SellAllData {
                    coin_to_sell: coin_at(items, 0)?,
                    coin_to_buy: coin_at(items, 1)?,
                    min_value_to_buy: amount_at(items, 2)?,
                }))
            }
            TransactionKind::BuyCoin => {
                let items = expect_list(tree, 4)?;
                Ok(TxData::BuyCoin(BuyData {
                    coin_to_buy: coin_at(items, 0)?,
                    value_to_buy: amount_at(items, 1)?,
                    coin_to_sell: coin_at(items, 2)?,
                    max_value_to_sell: amount_at(items, 3)?,
                }))
            }
            TransactionKind::CreateCoin => {
                Ok(TxData::CreateCoin(decode_coin_issue(tree)?))
            }
            TransactionKind::RecreateCoin => {
                Ok(TxData::RecreateCoin(decode_coin_issue(tree)?))
            }
            TransactionKind::DeclareCandidacy => {
                let items = expect_list(tree, 5)?;
                Ok(TxData::DeclareCandidacy(DeclareCandidacyData {
                    address: address_at(items, 0)?,
                    public_key: pubkey_at(items, 1)?,
                    commission: u32_at(items, 2)?,
                    coin: coin_at(items, 3)?,
                    stake: amount_at(items, 4)?,
                }))
            }
            TransactionKind::Delegate => Ok(TxData::Delegate(decode_stake(tree)?)),
            TransactionKind::Unbond => Ok(TxData::Unbond(decode_stake(tree)?)),
            TransactionKind::RedeemCheck => {
                let items = expect_list(tree, 2)?;
                let raw_check = leaf_at(items, 0)?;
                let proof = leaf_at(items, 1)?;
                if proof.len() != PROOF_LEN {
                    return Err(ParseError::IncorrectTransactionData);
                }
                let body = CheckBody::decode(&raw_check)?;
                Ok(TxData::RedeemCheck(RedeemCheckData {
                    raw_check,
                    proof,
                    body,
                }))
            }
            TransactionKind::SetCandidateOnline => {
                let items = expect_list(tree, 1)?;
                Ok(TxData::SetCandidateOnline(pubkey_at(items, 0)?))
            }
            TransactionKind::SetCandidateOffline => {
                let items = expect_list(tree, 1)?;
                Ok(TxData::SetCandidateOffline(pubkey_at(items, 0)?))
            }
            TransactionKind::CreateMultisigAddress => {
                Ok(TxData::CreateMultisigAddress(decode_multisig(tree)?))
            }
            TransactionKind::EditMultisigOwner => {
                Ok(TxData::EditMultisigOwner(decode_multisig(tree)?))
            }
            TransactionKind::Multisend => {
                let items = expect_list(tree, 1)?;
                let entries = items[0]
                    .as_list()
                    .ok_or(ParseError::IncorrectTransactionData)?;
                if entries.is_empty() {
                    return Err(ParseError::IncorrectTransactionData);
                }
                let mut out = Vec::with_capacity(entries.len());
                for entry in entries {
                    let parts = expect_list(entry, 3)?;
                    out.push(MultisendItem {
                        coin: coin_at(parts, 0)?,
                        to: address_at(parts, 1)?,
                        value: amount_at(parts, 2)?,
                    });
                }
                Ok(TxData::Multisend(out))
            }
            TransactionKind::EditCandidate => {
                let items = expect_list(tree, 4)?;
                Ok(TxData::EditCandidate(EditCandidateData {
                    public_key: pubkey_at(items, 0)?,
                    reward_address: address_at(items, 1)?,
                    owner_address: address_at(items, 2)?,
                    control_address: address_at(items, 3)?,
                }))
            }
            TransactionKind::SetHaltBlock => {
                let items = expect_list(tree, 2)?;
                Ok(TxData::SetHaltBlock(SetHaltBlockData {
                    public_key: pubkey_at(items, 0)?,
                    height: uint_at(items, 1)?,
                }))
            }
            TransactionKind::ChangeCoinOwner => {
                let items = expect_list(tree, 2)?;
                Ok(TxData::ChangeCoinOwner(ChangeCoinOwnerData {
                    symbol: text_at(items, 0)?,
                    new_owner: address_at(items, 1)?,
                }))
            }
            TransactionKind::PriceVote => {
                let items = expect_list(tree, 1)?;
                Ok(TxData::PriceVote(uint_at(items, 0)?))
            }
            TransactionKind::EditCandidatePublicKey => {
                let items = expect_list(tree, 2)?;
                Ok(TxData::EditCandidatePublicKey(EditCandidatePublicKeyData {
                    public_key: pubkey_at(items, 0)?,
                    new_public_key: pubkey_at(items, 1)?,
                }))
            }
        }
    }

    /// Build the canonical tree for this data.
    pub fn to_node(&self) -> Node {
        match self {
            TxData::Send(d) => Node::List(vec![
                d.coin.to_node(),
                d.to.to_node(),
                amount_node(&d.value),
            ]),
            TxData::SellCoin(d) => Node::List(vec![
                d.coin_to_sell.to_node(),
                amount_node(&d.value_to_sell),
                d.coin_to_buy.to_node(),
                amount_node(&d.min_value_to_buy),
            ]),
            TxData::SellAllCoins(d) => Node::List(vec![
                d.coin_to_sell.to_node(),
                d.coin_to_buy.to_node(),
                amount_node(&d.min_value_to_buy),
            ]),
            TxData::BuyCoin(d) => Node::List(vec![
                d.coin_to_buy.to_node(),
                amount_node(&d.value_to_buy),
                d.coin_to_sell.to_node(),
                amount_node(&d.max_value_to_sell),
            ]),
            TxData::CreateCoin(d) | TxData::RecreateCoin(d) => Node::List(vec![
                Node::leaf(d.name.as_bytes().to_vec()),
                Node::leaf(d.symbol.as_bytes().to_vec()),
                amount_node(&d.initial_amount),
                amount_node(&d.initial_reserve),
                Node::uint(u64::from(d.reserve_ratio)),
                amount_node(&d.max_supply),
            ]),
            TxData::DeclareCandidacy(d) => Node::List(vec![
                d.address.to_node(),
                d.public_key.to_node(),
                Node::uint(u64::from(d.commission)),
                d.coin.to_node(),
                amount_node(&d.stake),
            ]),
            TxData::Delegate(d) | TxData::Unbond(d) => Node::List(vec![
                d.public_key.to_node(),
                d.coin.to_node(),
                amount_node(&d.stake),
            ]),
            TxData::RedeemCheck(d) => Node::List(vec![
                Node::leaf(d.raw_check.clone()),
                Node::leaf(d.proof.clone()),
            ]),
            TxData::SetCandidateOnline(key) | TxData::SetCandidateOffline(key) => {
                Node::List(vec![key.to_node()])
            }
            TxData::CreateMultisigAddress(d) | TxData::EditMultisigOwner(d) => Node::List(vec![
                Node::uint(u64::from(d.threshold)),
                Node::List(d.weights.iter().map(|w| Node::uint(u64::from(*w))).collect()),
                Node::List(d.addresses.iter().map(|a| a.to_node()).collect()),
            ]),
            TxData::Multisend(items) => Node::List(vec![Node::List(
                items
                    .iter()
                    .map(|item| {
                        Node::List(vec![
                            item.coin.to_node(),
                            item.to.to_node(),
                            amount_node(&item.value),
                        ])
                    })
                    .collect(),
            )]),
            TxData::EditCandidate(d) => Node::List(vec![
                d.public_key.to_node(),
                d.reward_address.to_node(),
                d.owner_address.to_node(),
                d.control_address.to_node(),
            ]),
            TxData::SetHaltBlock(d) => {
                Node::List(vec![d.public_key.to_node(), Node::uint(d.height)])
            }
            TxData::ChangeCoinOwner(d) => Node::List(vec![
                Node::leaf(d.symbol.as_bytes().to_vec()),
                d.new_owner.to_node(),
            ]),
            TxData::PriceVote(price) => Node::List(vec![Node::uint(*price)]),
            TxData::EditCandidatePublicKey(d) => {
                Node::List(vec![d.public_key.to_node(), d.new_public_key.to_node()])
            }
        }
    }

    /// Canonical byte body.
    pub fn encode(&self) -> Vec<u8> {
        self.to_node().encode()
    }

    /// Number of multisend recipients (fee multiplier).
    pub fn multisend_count(&self) -> u32 {
        match self {
            TxData::Multisend(items) => items.len() as u32,
            _ => 0,
        }
    }

    /// Issued coin symbol length (fee tier selector), 0 for other kinds.
    pub fn issued_symbol_length(&self) -> u32 {
        match self {
            TxData::CreateCoin(d) | TxData::RecreateCoin(d) => d.symbol.len() as u32,
            _ => 0,
        }
    }

    /// The primary coin requirement of this transaction, if it has one.
    ///
    /// Captured once at parse time; deliberately not recomputed from edited
    /// field values.
    pub fn needed_coin(&self, resolver: &dyn CoinResolver) -> Option<NeededCoin> {
        let (coin, amount) = match self {
            TxData::Send(d) => (d.coin, d.value.clone()),
            TxData::SellCoin(d) => (d.coin_to_sell, d.value_to_sell.clone()),
            TxData::BuyCoin(d) => (d.coin_to_sell, d.max_value_to_sell.clone()),
            TxData::DeclareCandidacy(d) => (d.coin, d.stake.clone()),
            TxData::Delegate(d) | TxData::Unbond(d) => (d.coin, d.stake.clone()),
            TxData::CreateCoin(d) | TxData::RecreateCoin(d) => {
                (CoinId(0), d.initial_reserve.clone())
            }
            TxData::Multisend(items) => {
                let first = items.first()?;
                let total = items
                    .iter()
                    .filter(|i| i.coin == first.coin)
                    .fold(Pip::zero(), |acc, i| acc.saturating_add(&i.value));
                (first.coin, total)
            }
            _ => return None,
        };
        let coin = resolver.resolve_symbol(coin)?;
        Some(NeededCoin { coin, amount })
    }

    /// Gas coin override: only a redeem check carries one.
    pub fn gas_coin_override(&self) -> Option<CoinId> {
        match self {
            TxData::RedeemCheck(d) => Some(d.body.gas_coin),
            _ => None,
        }
    }
}

fn decode_coin_issue(tree: &Node) -> Result<CoinIssueData, ParseError> {
    let items = expect_list(tree, 6)?;
    let symbol = text_at(items, 1)?;
    if !is_valid_symbol(&symbol) {
        return Err(ParseError::IncorrectTransactionData);
    }
    Ok(CoinIssueData {
        name: text_at(items, 0)?,
        symbol,
        initial_amount: amount_at(items, 2)?,
        initial_reserve: amount_at(items, 3)?,
        reserve_ratio: u32_at(items, 4)?,
        max_supply: amount_at(items, 5)?,
    })
}

fn decode_stake(tree: &Node) -> Result<StakeData, ParseError> {
    let items = expect_list(tree, 3)?;
    Ok(StakeData {
        public_key: pubkey_at(items, 0)?,
        coin: coin_at(items, 1)?,
        stake: amount_at(items, 2)?,
    })
}

fn decode_multisig(tree: &Node) -> Result<MultisigData, ParseError> {
    let items = expect_list(tree, 3)?;
    let threshold = u32_at(items, 0)?;
    let weight_nodes = items[1]
        .as_list()
        .ok_or(ParseError::IncorrectTransactionData)?;
    let address_nodes = items[2]
        .as_list()
        .ok_or(ParseError::IncorrectTransactionData)?;
    if weight_nodes.len() != address_nodes.len() || address_nodes.is_empty() {
        return Err(ParseError::IncorrectTransactionData);
    }

    let mut weights = Vec::with_capacity(weight_nodes.len());
    for node in weight_nodes {
        let w = node.as_uint().ok_or(ParseError::IncorrectTransactionData)?;
        weights.push(u32::try_from(w).map_err(|_| ParseError::IncorrectTransactionData)?);
    }
    let mut addresses = Vec::with_capacity(address_nodes.len());
    for node in address_nodes {
        addresses.push(Address::from_node(node).ok_or(ParseError::IncorrectTransactionData)?);
    }

    Ok(MultisigData {
        threshold,
        weights,
        addresses,
    })
}

// ─── Leaf extraction helpers ─────────────────────────────────────────────────

fn expect_list(tree: &Node, len: usize) -> Result<&[Node], ParseError> {
    let items = tree.as_list().ok_or(ParseError::IncorrectTransactionData)?;
    if items.len() != len {
        return Err(ParseError::IncorrectTransactionData);
    }
    Ok(items)
}

fn leaf_at(items: &[Node], i: usize) -> Result<Vec<u8>, ParseError> {
    items[i]
        .as_leaf()
        .map(|b| b.to_vec())
        .ok_or(ParseError::IncorrectTransactionData)
}

fn uint_at(items: &[Node], i: usize) -> Result<u64, ParseError> {
    items[i].as_uint().ok_or(ParseError::IncorrectTransactionData)
}

fn u32_at(items: &[Node], i: usize) -> Result<u32, ParseError> {
    u32::try_from(uint_at(items, i)?).map_err(|_| ParseError::IncorrectTransactionData)
}

fn coin_at(items: &[Node], i: usize) -> Result<CoinId, ParseError> {
    CoinId::from_node(&items[i]).ok_or(ParseError::IncorrectTransactionData)
}

fn address_at(items: &[Node], i: usize) -> Result<Address, ParseError> {
    Address::from_node(&items[i]).ok_or(ParseError::IncorrectTransactionData)
}

fn pubkey_at(items: &[Node], i: usize) -> Result<PublicKey, ParseError> {
    PublicKey::from_node(&items[i]).ok_or(ParseError::IncorrectTransactionData)
}

fn text_at(items: &[Node], i: usize) -> Result<String, ParseError> {
    let bytes = leaf_at(items, i)?;
    String::from_utf8(bytes).map_err(|_| ParseError::IncorrectTransactionData)
}

/// Amount leaves must be canonical: empty for zero, no leading zero bytes.
fn amount_at(items: &[Node], i: usize) -> Result<Pip, ParseError> {
    let bytes = items[i]
        .as_leaf()
        .ok_or(ParseError::IncorrectTransactionData)?;
    if !bytes.is_empty() && bytes[0] == 0 {
        return Err(ParseError::IncorrectTransactionData);
    }
    Ok(Pip::from_be_bytes(bytes))
}

fn amount_node(value: &Pip) -> Node {
    Node::leaf(value.to_be_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address([byte; 20])
    }

    fn key(byte: u8) -> PublicKey {
        PublicKey([byte; 32])
    }

    fn roundtrip(data: TxData) {
        let encoded = data.encode();
        let tree = pipnet_types::rlp::decode(&encoded).unwrap();
        let decoded = TxData::decode(data.kind(), &tree).unwrap();
        assert_eq!(decoded, data);
        assert_eq!(decoded.encode(), encoded);
    }

    #[test]
    fn test_send_roundtrip() {
        roundtrip(TxData::Send(SendData {
            coin: CoinId(0),
            to: addr(0x16),
            value: Pip::unit().scaled(10),
        }));
    }

    #[test]
    fn test_exchange_roundtrips() {
        roundtrip(TxData::SellCoin(SellData {
            coin_to_sell: CoinId(0),
            value_to_sell: Pip::unit(),
            coin_to_buy: CoinId(7),
            min_value_to_buy: Pip::zero(),
        }));
        roundtrip(TxData::SellAllCoins(SellAllData {
            coin_to_sell: CoinId(7),
            coin_to_buy: CoinId(0),
            min_value_to_buy: Pip::zero(),
        }));
        roundtrip(TxData::BuyCoin(BuyData {
            coin_to_buy: CoinId(7),
            value_to_buy: Pip::unit().scaled(3),
            coin_to_sell: CoinId(0),
            max_value_to_sell: Pip::unit().scaled(100),
        }));
    }

    #[test]
    fn test_coin_issue_roundtrip() {
        let issue = CoinIssueData {
            name: "Test Coin".to_string(),
            symbol: "TEST".to_string(),
            initial_amount: Pip::unit().scaled(1000),
            initial_reserve: Pip::unit().scaled(10_000),
            reserve_ratio: 70,
            max_supply: Pip::unit().scaled(1_000_000),
        };
        roundtrip(TxData::CreateCoin(issue.clone()));
        roundtrip(TxData::RecreateCoin(issue));
    }

    #[test]
    fn test_candidacy_roundtrips() {
        roundtrip(TxData::DeclareCandidacy(DeclareCandidacyData {
            address: addr(1),
            public_key: key(2),
            commission: 10,
            coin: CoinId(0),
            stake: Pip::unit().scaled(500),
        }));
        roundtrip(TxData::Delegate(StakeData {
            public_key: key(2),
            coin: CoinId(0),
            stake: Pip::unit().scaled(5),
        }));
        roundtrip(TxData::Unbond(StakeData {
            public_key: key(2),
            coin: CoinId(0),
            stake: Pip::unit().scaled(5),
        }));
        roundtrip(TxData::SetCandidateOnline(key(3)));
        roundtrip(TxData::SetCandidateOffline(key(3)));
        roundtrip(TxData::EditCandidate(EditCandidateData {
            public_key: key(2),
            reward_address: addr(1),
            owner_address: addr(2),
            control_address: addr(3),
        }));
        roundtrip(TxData::EditCandidatePublicKey(EditCandidatePublicKeyData {
            public_key: key(2),
            new_public_key: key(9),
        }));
        roundtrip(TxData::SetHaltBlock(SetHaltBlockData {
            public_key: key(2),
            height: 1_234_567,
        }));
    }

    #[test]
    fn test_multisig_roundtrip() {
        roundtrip(TxData::CreateMultisigAddress(MultisigData {
            threshold: 3,
            weights: vec![1, 2, 3],
            addresses: vec![addr(1), addr(2), addr(3)],
        }));
        roundtrip(TxData::EditMultisigOwner(MultisigData {
            threshold: 2,
            weights: vec![1, 1],
            addresses: vec![addr(4), addr(5)],
        }));
    }

    #[test]
    fn test_multisend_roundtrip() {
        roundtrip(TxData::Multisend(vec![
            MultisendItem {
                coin: CoinId(0),
                to: addr(1),
                value: Pip::unit(),
            },
            MultisendItem {
                coin: CoinId(7),
                to: addr(2),
                value: Pip::unit().scaled(2),
            },
        ]));
    }

    #[test]
    fn test_misc_roundtrips() {
        roundtrip(TxData::ChangeCoinOwner(ChangeCoinOwnerData {
            symbol: "TEST".to_string(),
            new_owner: addr(9),
        }));
        roundtrip(TxData::PriceVote(1_000_000));
    }

    #[test]
    fn test_wrong_shape_is_fatal() {
        // A send body decoded as a delegate must fail outright.
        let send = TxData::Send(SendData {
            coin: CoinId(0),
            to: addr(1),
            value: Pip::unit(),
        });
        let tree = pipnet_types::rlp::decode(&send.encode()).unwrap();
        assert_eq!(
            TxData::decode(TransactionKind::Delegate, &tree),
            Err(ParseError::IncorrectTransactionData)
        );
    }

    #[test]
    fn test_non_canonical_amount_rejected() {
        // Hand-build a send whose value leaf has a leading zero byte.
        let tree = Node::List(vec![
            Node::uint(0),
            Node::leaf(vec![0x16; 20]),
            Node::leaf(vec![0x00, 0x01]),
        ]);
        assert_eq!(
            TxData::decode(TransactionKind::Send, &tree),
            Err(ParseError::IncorrectTransactionData)
        );
    }

    #[test]
    fn test_multisig_length_mismatch_rejected() {
        let tree = Node::List(vec![
            Node::uint(2),
            Node::List(vec![Node::uint(1)]),
            Node::List(vec![
                Node::leaf(vec![1; 20]),
                Node::leaf(vec![2; 20]),
            ]),
        ]);
        assert_eq!(
            TxData::decode(TransactionKind::CreateMultisigAddress, &tree),
            Err(ParseError::IncorrectTransactionData)
        );
    }

    #[test]
    fn test_empty_multisend_rejected() {
        let tree = Node::List(vec![Node::List(vec![])]);
        assert_eq!(
            TxData::decode(TransactionKind::Multisend, &tree),
            Err(ParseError::IncorrectTransactionData)
        );
    }

    #[test]
    fn test_counters() {
        let ms = TxData::Multisend(vec![
            MultisendItem {
                coin: CoinId(0),
                to: addr(1),
                value: Pip::unit(),
            };
            3
        ]);
        assert_eq!(ms.multisend_count(), 3);
        assert_eq!(ms.issued_symbol_length(), 0);

        let cc = TxData::CreateCoin(CoinIssueData {
            name: String::new(),
            symbol: "ABCDE".to_string(),
            initial_amount: Pip::unit(),
            initial_reserve: Pip::unit(),
            reserve_ratio: 50,
            max_supply: Pip::unit(),
        });
        assert_eq!(cc.issued_symbol_length(), 5);
    }
}
