use crate::error::PaymentError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The channel a payment is made through.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Paypal,
    CreditCard,
}

impl PaymentMethod {
    /// Tolerant parsing for common variants (`paypal`, `credit-card`,
    /// `Credit Card`, ...): trims, uppercases and normalizes `-` and spaces
    /// to `_` before matching. Unmatched input is an error, never a default.
    pub fn parse(raw: &str) -> Result<Self, PaymentError> {
        let norm = raw.trim().replace(['-', ' '], "_").to_uppercase();
        match norm.as_str() {
            "PAYPAL" => Ok(Self::Paypal),
            "CREDIT_CARD" => Ok(Self::CreditCard),
            _ => Err(PaymentError::ParseError(format!(
                "invalid payment method: {raw:?}"
            ))),
        }
    }

    pub fn try_parse(raw: &str) -> Option<Self> {
        Self::parse(raw).ok()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paypal => "PAYPAL",
            Self::CreditCard => "CREDIT_CARD",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a payment.
///
/// `Registered` is the initial state, `Paid` is terminal. `Failed` payments
/// can be reverted back to `Registered`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Registered,
    Paid,
    Failed,
}

impl PaymentStatus {
    /// Strict parsing: exact match after trimming whitespace.
    pub fn parse(raw: &str) -> Result<Self, PaymentError> {
        match raw.trim() {
            "REGISTERED" => Ok(Self::Registered),
            "PAID" => Ok(Self::Paid),
            "FAILED" => Ok(Self::Failed),
            _ => Err(PaymentError::ParseError(format!(
                "invalid payment status: {raw:?}"
            ))),
        }
    }

    pub fn try_parse(raw: &str) -> Option<Self> {
        Self::parse(raw).ok()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registered => "REGISTERED",
            Self::Paid => "PAID",
            Self::Failed => "FAILED",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked payment.
///
/// The `id` is assigned by the caller and immutable after creation; `amount`
/// and `method` may only change while the payment is still `Registered`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Payment {
    pub id: String,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
}

impl Payment {
    /// Creates a freshly registered payment.
    pub fn register(id: impl Into<String>, amount: Decimal, method: PaymentMethod) -> Self {
        Self {
            id: id.into(),
            amount,
            method,
            status: PaymentStatus::Registered,
        }
    }

    pub fn record(&self) -> PaymentRecord {
        PaymentRecord {
            amount: self.amount,
            payment_method: self.method,
            status: self.status,
        }
    }

    pub fn from_record(id: impl Into<String>, record: PaymentRecord) -> Self {
        Self {
            id: id.into(),
            amount: record.amount,
            method: record.payment_method,
            status: record.status,
        }
    }
}

/// Persisted form of a payment: the non-id fields as plain scalars. The id
/// is the backend key and is not duplicated inside the record.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PaymentRecord {
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub status: PaymentStatus,
}
