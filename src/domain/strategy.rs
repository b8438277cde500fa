use crate::domain::payment::{Payment, PaymentMethod, PaymentStatus};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

const PAYPAL_LIMIT: Decimal = dec!(5000);
const CREDIT_CARD_LIMIT: Decimal = dec!(10000);

/// Per-method rule deciding whether a registered payment may be paid.
///
/// Implementations must be pure: same inputs, same answer, no mutation of
/// either argument.
pub trait ValidationStrategy: Send + Sync {
    fn validate(&self, candidate: &Payment, all_payments: &[Payment]) -> bool;
}

/// Accepts PayPal payments strictly below the 5000 limit. Exactly 5000 is
/// rejected.
pub struct PaypalValidation;

impl ValidationStrategy for PaypalValidation {
    fn validate(&self, candidate: &Payment, _all_payments: &[Payment]) -> bool {
        candidate.amount < PAYPAL_LIMIT
    }
}

/// Accepts credit-card payments strictly below the 10000 limit, and only
/// while the candidate is the single registered payment of its method.
///
/// The count includes the candidate itself: by the time a payment is
/// validated it already sits in the collection as a REGISTERED record, so
/// "exactly one" is a single-outstanding-registration guard, not a
/// duplicate check against the others.
pub struct CreditCardValidation;

impl ValidationStrategy for CreditCardValidation {
    fn validate(&self, candidate: &Payment, all_payments: &[Payment]) -> bool {
        let registered_same_method = all_payments
            .iter()
            .filter(|p| p.method == candidate.method && p.status == PaymentStatus::Registered)
            .count();
        candidate.amount < CREDIT_CARD_LIMIT && registered_same_method == 1
    }
}

/// Fixed mapping from payment method to its validation strategy, built once
/// at startup. No dynamic registration.
pub struct StrategyRegistry {
    strategies: HashMap<PaymentMethod, Box<dyn ValidationStrategy>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        let mut strategies: HashMap<PaymentMethod, Box<dyn ValidationStrategy>> = HashMap::new();
        strategies.insert(PaymentMethod::Paypal, Box::new(PaypalValidation));
        strategies.insert(PaymentMethod::CreditCard, Box::new(CreditCardValidation));
        Self { strategies }
    }

    /// Returns the strategy for `method`, or `None` if nothing is registered
    /// for it. Absence is a distinct outcome from a strategy returning false.
    pub fn get(&self, method: PaymentMethod) -> Option<&dyn ValidationStrategy> {
        self.strategies.get(&method).map(Box::as_ref)
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
