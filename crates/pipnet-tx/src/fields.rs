//! The editable-field model.
//!
//! Each field pairs a display label with a textual value and a [`FieldRule`]
//! that sanitizes (`modify`) and checks (`validate`) user input. The stored
//! value is always the post-modify string; a field can hold an invalid value
//! with an advisory error without reverting the text.

use pipnet_types::address::{is_valid_address, is_valid_public_key};
use pipnet_types::coin::is_valid_symbol;
use pipnet_types::Pip;
use serde::Serialize;

/// Maximum payload message length in UTF-8 bytes.
pub const MAX_PAYLOAD_BYTES: usize = 1024;

/// What a field's value represents; used by the payload builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldRole {
    Amount,
    Coin,
    Address,
    PublicKey,
    Integer,
    Text,
    Payload,
    GasCoin,
}

/// Sanitization and validation policy for one field role.
///
/// `modify` runs on every raw input before storage; `validate` runs on the
/// post-modify value and returns an advisory message, never an abort.
pub trait FieldRule: Sync {
    fn modify(&self, raw: &str) -> String {
        raw.to_string()
    }

    fn validate(&self, _value: &str) -> Option<String> {
        None
    }
}

pub struct AmountRule;

impl FieldRule for AmountRule {
    fn modify(&self, raw: &str) -> String {
        raw.chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| if c == ',' { '.' } else { c })
            .collect()
    }

    fn validate(&self, value: &str) -> Option<String> {
        if value.is_empty() || Pip::parse_decimal(value).is_ok() {
            None
        } else {
            Some("Invalid amount".to_string())
        }
    }
}

pub struct CoinRule;

impl FieldRule for CoinRule {
    fn modify(&self, raw: &str) -> String {
        raw.chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(|c| c.to_uppercase())
            .collect()
    }

    fn validate(&self, value: &str) -> Option<String> {
        if value.is_empty() || is_valid_symbol(value) {
            None
        } else {
            Some("Invalid coin symbol".to_string())
        }
    }
}

pub struct AddressRule;

impl FieldRule for AddressRule {
    fn modify(&self, raw: &str) -> String {
        raw.chars().filter(|c| !c.is_whitespace()).collect()
    }

    fn validate(&self, value: &str) -> Option<String> {
        if value.is_empty() || is_valid_address(value) {
            None
        } else {
            Some("Invalid address".to_string())
        }
    }
}

pub struct PublicKeyRule;

impl FieldRule for PublicKeyRule {
    fn validate(&self, value: &str) -> Option<String> {
        if value.is_empty() || is_valid_public_key(value) {
            None
        } else {
            Some("Invalid public key".to_string())
        }
    }
}

pub struct IntegerRule;

impl FieldRule for IntegerRule {
    fn modify(&self, raw: &str) -> String {
        raw.chars().filter(|c| !c.is_whitespace()).collect()
    }

    fn validate(&self, value: &str) -> Option<String> {
        if value.is_empty() || value.parse::<u64>().is_ok() {
            None
        } else {
            Some("Invalid number".to_string())
        }
    }
}

/// Free text, no sanitization.
pub struct TextRule;

impl FieldRule for TextRule {}

/// Payload message: truncated to the byte budget before validation, so the
/// stored value is never over the limit.
pub struct PayloadRule {
    pub max_bytes: usize,
}

impl FieldRule for PayloadRule {
    fn modify(&self, raw: &str) -> String {
        truncate_to_bytes(raw, self.max_bytes)
    }

    fn validate(&self, value: &str) -> Option<String> {
        if value.len() <= self.max_bytes {
            None
        } else {
            Some("Too Many Symbols".to_string())
        }
    }
}

pub static AMOUNT_RULE: AmountRule = AmountRule;
pub static COIN_RULE: CoinRule = CoinRule;
pub static ADDRESS_RULE: AddressRule = AddressRule;
pub static PUBLIC_KEY_RULE: PublicKeyRule = PublicKeyRule;
pub static INTEGER_RULE: IntegerRule = IntegerRule;
pub static TEXT_RULE: TextRule = TextRule;
pub static PAYLOAD_RULE: PayloadRule = PayloadRule {
    max_bytes: MAX_PAYLOAD_BYTES,
};

/// Truncate to at most `max` UTF-8 bytes without splitting a character.
fn truncate_to_bytes(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s[..end].to_string()
}

/// One editable (or display-only) field of a transaction under review.
pub struct Field {
    key: Option<String>,
    value: Option<String>,
    editable: bool,
    role: FieldRole,
    rule: &'static dyn FieldRule,
    error: Option<String>,
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.value == other.value
            && self.editable == other.editable
            && self.role == other.role
            && std::ptr::eq(self.rule, other.rule)
            && self.error == other.error
    }
}

impl Field {
    pub fn new(
        key: Option<&str>,
        value: Option<String>,
        editable: bool,
        role: FieldRole,
        rule: &'static dyn FieldRule,
    ) -> Self {
        Field {
            key: key.map(str::to_string),
            value,
            editable,
            role,
            rule,
            error: None,
        }
    }

    /// Display-only field with a label.
    pub fn readonly(key: &str, value: String, role: FieldRole) -> Self {
        Field::new(Some(key), Some(value), false, role, &TEXT_RULE)
    }

    /// Apply a raw user edit: sanitize, validate, store.
    pub fn set_value(&mut self, raw: &str) {
        let value = self.rule.modify(raw);
        self.error = self.rule.validate(&value);
        self.value = if value.is_empty() { None } else { Some(value) };
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Current value, empty string when unset.
    pub fn value_str(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn role(&self) -> FieldRole {
        self.role
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    pub fn view(&self) -> FieldView {
        FieldView {
            key: self.key.clone(),
            value: self.value.clone(),
            editable: self.editable,
            error: self.error.clone(),
        }
    }
}

impl std::fmt::Debug for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("editable", &self.editable)
            .field("role", &self.role)
            .field("error", &self.error)
            .finish()
    }
}

/// Render-ready snapshot of a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub key: Option<String>,
    pub value: Option<String>,
    pub editable: bool,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_rule() {
        assert_eq!(AMOUNT_RULE.modify(" 1 234,5 "), "1234.5");
        assert_eq!(AMOUNT_RULE.validate("1234.5"), None);
        assert_eq!(AMOUNT_RULE.validate(""), None);
        assert_eq!(
            AMOUNT_RULE.validate("12x"),
            Some("Invalid amount".to_string())
        );
        assert_eq!(
            AMOUNT_RULE.validate("-1"),
            Some("Invalid amount".to_string())
        );
    }

    #[test]
    fn test_coin_rule() {
        assert_eq!(COIN_RULE.modify(" abc "), "ABC");
        assert_eq!(COIN_RULE.validate("ABC"), None);
        assert_eq!(
            COIN_RULE.validate("AB"),
            Some("Invalid coin symbol".to_string())
        );
    }

    #[test]
    fn test_address_rule() {
        let addr = "Mx7633980c000139dd3bd24a3f54e06474fa941e16";
        assert_eq!(ADDRESS_RULE.modify(&format!(" {addr} ")), addr);
        assert_eq!(ADDRESS_RULE.validate(addr), None);
        assert_eq!(
            ADDRESS_RULE.validate("Mx123"),
            Some("Invalid address".to_string())
        );
    }

    #[test]
    fn test_public_key_rule_no_modify() {
        // The public key rule deliberately does not sanitize.
        assert_eq!(PUBLIC_KEY_RULE.modify(" Mp "), " Mp ");
        assert_eq!(
            PUBLIC_KEY_RULE.validate("Mp123"),
            Some("Invalid public key".to_string())
        );
    }

    #[test]
    fn test_payload_rule_truncates_before_validate() {
        let long = "a".repeat(MAX_PAYLOAD_BYTES + 10);
        let modified = PAYLOAD_RULE.modify(&long);
        assert_eq!(modified.len(), MAX_PAYLOAD_BYTES);
        assert_eq!(PAYLOAD_RULE.validate(&modified), None);
        assert_eq!(
            PAYLOAD_RULE.validate(&long),
            Some("Too Many Symbols".to_string())
        );
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        // "é" is 2 bytes; truncating at an odd byte budget must not split it.
        let s = "é".repeat(10);
        let t = truncate_to_bytes(&s, 5);
        assert_eq!(t.len(), 4);
        assert!(t.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_field_keeps_invalid_value() {
        let mut field = Field::new(None, None, true, FieldRole::Amount, &AMOUNT_RULE);
        field.set_value("12,5");
        assert_eq!(field.value_str(), "12.5");
        assert!(field.is_valid());

        field.set_value("12.5x");
        assert_eq!(field.value_str(), "12.5x");
        assert_eq!(field.error(), Some("Invalid amount"));
    }

    #[test]
    fn test_field_empty_value_becomes_none() {
        let mut field = Field::new(Some("Coin"), None, true, FieldRole::Coin, &COIN_RULE);
        field.set_value("   ");
        assert_eq!(field.view().value, None);
        assert!(field.is_valid());
    }
}
