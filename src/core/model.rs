//! # Domain Model
//!
//! Values that flow between the controllers and the remote client.
//! All of them are plain snapshots: a fetch replaces an `Account` wholesale,
//! a submission builds a fresh `TransferRequest`.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::core::failure::ValidationError;

/// Currency glyph appended to balances shown to the user.
pub const CURRENCY_SUFFIX: &str = "€";

/// A single login attempt's input. Built per attempt and dropped afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub identifier: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

// Keeps the secret out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"***")
            .finish()
    }
}

/// The authenticated user handle, owned by the shell after a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    pub identifier: String,
}

impl Identity {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    pub is_primary: bool,
    pub balance: Decimal,
}

impl Account {
    /// Balance as shown on the home screen, e.g. `"1234.5€"`.
    pub fn balance_text(&self) -> String {
        format_balance(self.balance)
    }
}

/// A validated transfer submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    sender_id: String,
    recipient_id: String,
    amount: Decimal,
}

impl TransferRequest {
    /// Builds a request, rejecting empty ids, non-positive amounts and
    /// amounts that would be altered on their way to the service.
    pub fn new(
        sender_id: impl Into<String>,
        recipient_id: impl Into<String>,
        amount: Decimal,
    ) -> Result<Self, ValidationError> {
        let sender_id = sender_id.into();
        let recipient_id = recipient_id.into();
        if sender_id.is_empty() {
            return Err(ValidationError::MissingSender);
        }
        if recipient_id.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        if amount <= Decimal::ZERO || !survives_wire(amount) {
            return Err(ValidationError::InvalidAmount);
        }
        Ok(Self {
            sender_id,
            recipient_id,
            amount,
        })
    }

    pub fn sender_id(&self) -> &str {
        &self.sender_id
    }

    pub fn recipient_id(&self) -> &str {
        &self.recipient_id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

/// Result tag of a transfer call. The new balance is fetched separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    Success,
    Failure,
}

/// Parses user-typed amount text.
///
/// Accepts plain (`"100"`, `"12.50"`) and scientific (`"1e3"`) notation.
/// Anything that is not a finite number above zero, or that would lose
/// digits when stored, is rejected.
pub fn parse_amount(text: &str) -> Result<Decimal, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    let amount = Decimal::from_str_exact(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| ValidationError::InvalidAmount)?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::InvalidAmount);
    }
    Ok(amount)
}

/// Whether `amount` reaches the service unchanged. Amounts travel as JSON
/// numbers (binary floats), printed with the shortest round-trip digits.
fn survives_wire(amount: Decimal) -> bool {
    amount
        .to_f64()
        .and_then(|wire| Decimal::from_str(&wire.to_string()).ok())
        .is_some_and(|back| back == amount)
}

/// Decimal text with at least one fractional digit: `10000` → `"10000.0"`.
pub fn format_amount(amount: Decimal) -> String {
    let normalized = amount.normalize();
    if normalized.scale() == 0 {
        format!("{normalized}.0")
    } else {
        normalized.to_string()
    }
}

/// Amount with the currency suffix: `1234.5` → `"1234.5€"`.
pub fn format_balance(amount: Decimal) -> String {
    format!("{}{}", format_amount(amount), CURRENCY_SUFFIX)
}
