//! The transaction review/edit session.
//!
//! One session exists per transaction under review. It owns the decoded
//! original data, the live field list, and the current re-encoded payload;
//! fee, validity, and the insufficient-funds hint are derived on demand from
//! that owned state rather than cached independently.

use crate::debounce::Debouncer;
use log::{debug, warn};
use pipnet_tx::{builder, fee, parser, Field, FieldRole, FieldView, ParseError, ProofDeriver,
    TransactionKind, TxData, MAX_PAYLOAD_BYTES};
use pipnet_tx::fields::PAYLOAD_RULE;
use pipnet_types::{Address, CoinResolver, CoinSymbol, NeededCoin, Pip, BASE_COIN_TICKER};
use pipnet_wallet::{missing_funds, BalanceSnapshot};
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("session is closed")]
    Closed,

    #[error("transaction cannot be edited")]
    NotEditable,

    #[error("not in edit mode")]
    NotEditing,

    #[error("no field at index {0}")]
    FieldIndex(usize),

    #[error("transaction is not a check redemption")]
    NotACheck,

    #[error("no proof deriver configured")]
    NoProofDeriver,
}

/// Presentation state of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Read-only review: the full field set is shown.
    Viewing,
    /// Only editable fields are shown and bound to their rules.
    Editing,
    /// Terminal; the session has been disposed.
    Closed,
}

/// Which stored field a visible index refers to.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Kind(usize),
    GasCoin,
    Payload,
}

pub struct TransactionEditingSession {
    kind: TransactionKind,
    /// Decoded original data; edit-mode re-entry and the insufficient-funds
    /// hint always refer back to this, never to edited field values.
    original: TxData,
    fields: Vec<Field>,
    payload_field: Field,
    original_payload_text: String,
    payload: Option<Vec<u8>>,
    gas_coin: String,
    gas_price: u64,
    multisend_address_count: u32,
    create_coin_symbol_length: u32,
    needed: Option<NeededCoin>,
    hint: Option<(CoinSymbol, Pip)>,
    mode: Mode,
    redeem: Option<(Address, String)>,
    deriver: Option<Box<dyn ProofDeriver>>,
    resolver: Box<dyn CoinResolver>,
    debounce: Debouncer,
}

impl TransactionEditingSession {
    /// Open a review for a raw data body.
    ///
    /// Fails with a fatal parse error when the body does not match the
    /// expected shape for `kind`; nothing is shown in that case.
    pub fn new(
        kind: TransactionKind,
        data: &[u8],
        payload_message: &[u8],
        resolver: Box<dyn CoinResolver>,
    ) -> Result<Self, SessionError> {
        let parsed = parser::parse(kind, data, resolver.as_ref())?;
        let payload_text = String::from_utf8_lossy(payload_message).into_owned();

        let mut payload_field = Field::new(
            Some("Payload Message"),
            None,
            true,
            FieldRole::Payload,
            &PAYLOAD_RULE,
        );
        payload_field.set_value(&payload_text);

        let payload = Some(parsed.data.encode());
        debug!("opened {} review, {} fields", kind, parsed.fields.len());

        Ok(TransactionEditingSession {
            kind,
            original: parsed.data,
            fields: parsed.fields,
            payload_field,
            original_payload_text: payload_text,
            payload,
            gas_coin: parsed.gas_coin,
            gas_price: 1,
            multisend_address_count: parsed.multisend_address_count,
            create_coin_symbol_length: parsed.create_coin_symbol_length,
            needed: parsed.needed,
            hint: None,
            mode: Mode::Viewing,
            redeem: None,
            deriver: None,
            resolver,
            debounce: Debouncer::default(),
        })
    }

    /// Attach the signing collaborator used for check redemption proofs.
    pub fn with_proof_deriver(mut self, deriver: Box<dyn ProofDeriver>) -> Self {
        self.deriver = Some(deriver);
        self
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Display text of the fee coin.
    pub fn gas_coin(&self) -> &str {
        &self.gas_coin
    }

    /// The currently visible fields, in display order.
    pub fn fields(&self) -> Vec<FieldView> {
        self.visible_slots()
            .into_iter()
            .map(|slot| match slot {
                Slot::Kind(i) => self.fields[i].view(),
                Slot::GasCoin => FieldView {
                    key: Some("Gas Coin".to_string()),
                    value: Some(self.gas_coin.clone()),
                    editable: false,
                    error: None,
                },
                Slot::Payload => self.payload_field.view(),
            })
            .collect()
    }

    /// Apply a user edit to the visible field at `index`.
    ///
    /// The edit is sanitized and stored immediately; the payload rebuild is
    /// debounced so intermediate keystrokes never re-encode.
    pub fn set_field_value(&mut self, index: usize, text: &str) -> Result<(), SessionError> {
        match self.mode {
            Mode::Closed => return Err(SessionError::Closed),
            Mode::Viewing => return Err(SessionError::NotEditing),
            Mode::Editing => {}
        }
        let slots = self.visible_slots();
        let slot = *slots.get(index).ok_or(SessionError::FieldIndex(index))?;
        match slot {
            Slot::Kind(i) => self.fields[i].set_value(text),
            Slot::Payload => self.payload_field.set_value(text),
            Slot::GasCoin => return Err(SessionError::NotEditable),
        }
        self.debounce.schedule(Instant::now());
        Ok(())
    }

    /// Drive the debounced rebuild; call with the current time.
    pub fn tick(&mut self, now: Instant) {
        if self.debounce.fire_if_due(now) {
            self.rebuild_payload();
        }
    }

    /// Force any pending rebuild to run now.
    pub fn flush(&mut self) {
        self.debounce.take_pending();
        self.rebuild_payload();
    }

    /// Toggle between viewing and editing.
    ///
    /// Entering edit mode requires a buildable payload and rebuilds the field
    /// list from the original decoded data, discarding uncommitted edits from
    /// any prior edit pass.
    pub fn toggle_edit_mode(&mut self) -> Result<(), SessionError> {
        match self.mode {
            Mode::Closed => Err(SessionError::Closed),
            Mode::Viewing => {
                if self.payload.is_none() {
                    return Err(SessionError::NotEditable);
                }
                self.fields = parser::fields_for(&self.original, self.resolver.as_ref())?;
                let original_text = self.original_payload_text.clone();
                self.payload_field.set_value(&original_text);
                self.debounce.take_pending();
                self.rebuild_payload();
                self.mode = Mode::Editing;
                Ok(())
            }
            Mode::Editing => {
                self.flush();
                self.mode = Mode::Viewing;
                Ok(())
            }
        }
    }

    /// The current canonical byte body, `None` while unbuildable.
    pub fn current_payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }

    /// Commission for the current state, in PIP.
    pub fn current_fee(&self) -> Pip {
        fee::commission(
            self.kind,
            self.payload_field.value_str().len(),
            self.multisend_address_count,
            self.create_coin_symbol_length,
            self.gas_price,
        )
    }

    /// Whether the form can be submitted as-is.
    pub fn is_valid_form(&self) -> bool {
        let fields_ok = self
            .visible_slots()
            .iter()
            .all(|slot| match slot {
                Slot::Kind(i) => !self.fields[*i].is_editable() || self.fields[*i].is_valid(),
                Slot::Payload => self.payload_field.is_valid(),
                Slot::GasCoin => true,
            });
        fields_ok && self.payload.is_some()
    }

    /// Latest insufficient-funds hint, if any.
    pub fn needed_coin_hint(&self) -> Option<(CoinSymbol, Pip)> {
        self.hint.clone()
    }

    /// Push a gas price update from the gas feed.
    pub fn observe_gas_price(&mut self, gas_price: u64) {
        self.gas_price = gas_price;
    }

    /// Push a wallet balance snapshot; recomputes the insufficient-funds
    /// hint against the originally parsed requirement.
    pub fn observe_balances(&mut self, balances: &BalanceSnapshot) {
        self.hint = self
            .needed
            .as_ref()
            .and_then(|needed| missing_funds(needed, balances));
    }

    /// Supply the check passphrase for a redeem transaction.
    ///
    /// From here on the payload always carries a proof derived from
    /// `(address, passphrase)`; edits to the displayed fields are ignored.
    pub fn set_check_passphrase(
        &mut self,
        address: Address,
        passphrase: &str,
    ) -> Result<(), SessionError> {
        if self.mode == Mode::Closed {
            return Err(SessionError::Closed);
        }
        if !matches!(self.original, TxData::RedeemCheck(_)) {
            return Err(SessionError::NotACheck);
        }
        if self.deriver.is_none() {
            return Err(SessionError::NoProofDeriver);
        }
        self.redeem = Some((address, passphrase.to_string()));
        self.debounce.take_pending();
        self.rebuild_payload();
        Ok(())
    }

    /// Re-resolve everything against a refreshed coin table.
    ///
    /// Discards the in-flight field list unconditionally and rebuilds from
    /// the original decoded data, since numeric ids may have shifted.
    pub fn refresh_coins(&mut self, resolver: Box<dyn CoinResolver>) -> Result<(), SessionError> {
        if self.mode == Mode::Closed {
            return Err(SessionError::Closed);
        }
        let fields = parser::fields_for(&self.original, resolver.as_ref())?;
        self.resolver = resolver;
        self.fields = fields;
        self.gas_coin = match self.original.gas_coin_override() {
            Some(id) => parser::coin_text(id, self.resolver.as_ref()),
            None => BASE_COIN_TICKER.to_string(),
        };
        self.needed = self.original.needed_coin(self.resolver.as_ref());
        self.debounce.take_pending();
        self.rebuild_payload();
        Ok(())
    }

    /// Dispose the session. Terminal; every later call fails or yields
    /// nothing.
    pub fn close(&mut self) {
        self.mode = Mode::Closed;
        self.payload = None;
        self.fields.clear();
        self.debounce.take_pending();
    }

    fn rebuild_payload(&mut self) {
        if self.mode == Mode::Closed {
            return;
        }
        self.payload = match (&self.original, &self.redeem, &self.deriver) {
            (TxData::RedeemCheck(d), Some((address, passphrase)), Some(deriver)) => {
                let proof = deriver.derive_proof(address, passphrase);
                Some(builder::build_redeem_check(&d.raw_check, &proof))
            }
            _ => builder::build(&self.original, &self.fields, self.resolver.as_ref()),
        };
        if self.payload.is_none() {
            warn!("{} payload unbuildable, send disabled", self.kind);
        }
    }

    fn visible_slots(&self) -> Vec<Slot> {
        match self.mode {
            Mode::Closed => Vec::new(),
            Mode::Viewing => {
                let mut slots: Vec<Slot> = (0..self.fields.len()).map(Slot::Kind).collect();
                let has_message = !self.payload_field.value_str().is_empty();
                if self.gas_coin != BASE_COIN_TICKER || has_message {
                    slots.push(Slot::GasCoin);
                }
                if has_message {
                    slots.push(Slot::Payload);
                }
                slots
            }
            Mode::Editing => {
                let mut slots: Vec<Slot> = (0..self.fields.len())
                    .filter(|i| self.fields[*i].is_editable())
                    .map(Slot::Kind)
                    .collect();
                slots.push(Slot::Payload);
                slots
            }
        }
    }
}

impl std::fmt::Debug for TransactionEditingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionEditingSession")
            .field("kind", &self.kind)
            .field("mode", &self.mode)
            .field("payload_len", &self.payload.as_ref().map(Vec::len))
            .field("gas_coin", &self.gas_coin)
            .field("gas_price", &self.gas_price)
            .finish()
    }
}

/// Hard cap on the payload message, re-exported for the UI layer.
pub const PAYLOAD_LIMIT_BYTES: usize = MAX_PAYLOAD_BYTES;

#[cfg(test)]
mod tests {
    use super::*;
    use pipnet_tx::data::SendData;
    use pipnet_types::{CoinId, CoinTable};

    fn resolver() -> Box<dyn CoinResolver> {
        let mut table = CoinTable::with_base();
        table.insert(CoinId(7), CoinSymbol::new("ABC").unwrap());
        Box::new(table)
    }

    fn send_session() -> TransactionEditingSession {
        let data = TxData::Send(SendData {
            coin: CoinId(0),
            to: Address([0x16; 20]),
            value: Pip::unit().scaled(10),
        })
        .encode();
        TransactionEditingSession::new(TransactionKind::Send, &data, b"", resolver()).unwrap()
    }

    #[test]
    fn test_viewing_is_initial_mode() {
        let session = send_session();
        assert_eq!(session.mode(), Mode::Viewing);
        assert!(session.current_payload().is_some());
        assert_eq!(session.fields().len(), 3);
    }

    #[test]
    fn test_edits_rejected_outside_edit_mode() {
        let mut session = send_session();
        assert_eq!(
            session.set_field_value(0, "5"),
            Err(SessionError::NotEditing)
        );
    }

    #[test]
    fn test_edit_mode_shows_only_editable_fields() {
        let mut session = send_session();
        session.toggle_edit_mode().unwrap();
        let fields = session.fields();
        // 3 editable kind fields + the payload message field.
        assert_eq!(fields.len(), 4);
        assert!(fields.iter().all(|f| f.editable));
    }

    #[test]
    fn test_reentering_edit_mode_discards_edits() {
        let mut session = send_session();
        session.toggle_edit_mode().unwrap();
        session.set_field_value(0, "999").unwrap();
        session.flush();

        session.toggle_edit_mode().unwrap(); // back to viewing
        session.toggle_edit_mode().unwrap(); // re-enter editing
        assert_eq!(session.fields()[0].value.as_deref(), Some("10"));
    }

    #[test]
    fn test_invalid_edit_disables_send_but_keeps_text() {
        let mut session = send_session();
        session.toggle_edit_mode().unwrap();
        session.set_field_value(0, "oops").unwrap();
        session.flush();

        assert_eq!(session.fields()[0].value.as_deref(), Some("oops"));
        assert_eq!(
            session.fields()[0].error.as_deref(),
            Some("Invalid amount")
        );
        assert!(session.current_payload().is_none());
        assert!(!session.is_valid_form());
    }

    #[test]
    fn test_edit_mode_blocked_when_unbuildable() {
        let mut session = send_session();
        session.toggle_edit_mode().unwrap();
        session.set_field_value(0, "oops").unwrap();
        session.flush();
        session.toggle_edit_mode().unwrap(); // exit is always allowed
        assert_eq!(session.toggle_edit_mode(), Err(SessionError::NotEditable));
    }

    #[test]
    fn test_debounce_last_write_wins() {
        let mut session = send_session();
        session.toggle_edit_mode().unwrap();
        let before = session.current_payload().unwrap().to_vec();

        session.set_field_value(0, "1").unwrap();
        session.set_field_value(0, "12").unwrap();
        // No tick yet: payload unchanged.
        assert_eq!(session.current_payload().unwrap(), &before[..]);

        session.tick(Instant::now() + crate::debounce::DEBOUNCE_DELAY);
        assert_ne!(session.current_payload().unwrap(), &before[..]);
    }

    #[test]
    fn test_gas_coin_field_hidden_for_base_coin_without_message() {
        let session = send_session();
        assert!(session
            .fields()
            .iter()
            .all(|f| f.key.as_deref() != Some("Gas Coin")));
    }

    #[test]
    fn test_payload_message_shows_gas_coin_row() {
        let data = TxData::Send(SendData {
            coin: CoinId(0),
            to: Address([0x16; 20]),
            value: Pip::unit(),
        })
        .encode();
        let session =
            TransactionEditingSession::new(TransactionKind::Send, &data, b"hello", resolver())
                .unwrap();
        let fields = session.fields();
        assert_eq!(fields[3].key.as_deref(), Some("Gas Coin"));
        assert_eq!(fields[3].value.as_deref(), Some("BIP"));
        assert_eq!(fields[4].key.as_deref(), Some("Payload Message"));
        assert_eq!(fields[4].value.as_deref(), Some("hello"));
    }

    #[test]
    fn test_close_is_terminal() {
        let mut session = send_session();
        session.close();
        assert_eq!(session.mode(), Mode::Closed);
        assert!(session.current_payload().is_none());
        assert!(session.fields().is_empty());
        assert_eq!(session.toggle_edit_mode(), Err(SessionError::Closed));
        assert_eq!(session.set_field_value(0, "x"), Err(SessionError::Closed));
    }

    #[test]
    fn test_fee_reflects_payload_and_gas_price() {
        let mut session = send_session();
        assert_eq!(session.current_fee().to_decimal_string(), "0.01");

        session.toggle_edit_mode().unwrap();
        let payload_index = session.fields().len() - 1;
        session.set_field_value(payload_index, "hi").unwrap();
        assert_eq!(session.current_fee().to_decimal_string(), "0.014");

        session.observe_gas_price(2);
        assert_eq!(session.current_fee().to_decimal_string(), "0.028");
    }

    #[test]
    fn test_refresh_coins_discards_edits() {
        let mut session = send_session();
        session.toggle_edit_mode().unwrap();
        session.set_field_value(0, "999").unwrap();
        session.refresh_coins(resolver()).unwrap();
        assert_eq!(session.fields()[0].value.as_deref(), Some("10"));
    }

    #[test]
    fn test_passphrase_on_non_check_kind() {
        let mut session = send_session();
        assert_eq!(
            session.set_check_passphrase(Address([0; 20]), "pass"),
            Err(SessionError::NotACheck)
        );
    }
}
