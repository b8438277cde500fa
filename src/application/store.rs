use crate::domain::payment::{Payment, PaymentMethod, PaymentRecord, PaymentStatus};
use crate::domain::ports::PaymentBackendBox;
use crate::domain::strategy::StrategyRegistry;
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Owns the full payment collection and its state-machine transitions.
///
/// The store mirrors the latest persisted state in memory, fully reloads it
/// from the backend before every mutation and fully rewrites it afterwards.
/// Each read-modify-write cycle runs under a single mutex, so operations on
/// one store instance are serialized.
pub struct PaymentStore {
    backend: PaymentBackendBox,
    registry: StrategyRegistry,
    payments: Mutex<HashMap<String, Payment>>,
}

impl PaymentStore {
    /// Creates a store over `backend`, performing the initial load.
    pub async fn load(backend: PaymentBackendBox) -> Result<Self> {
        let payments = Self::decode(backend.read_all().await?);
        Ok(Self {
            backend,
            registry: StrategyRegistry::new(),
            payments: Mutex::new(payments),
        })
    }

    /// Returns a defensive copy of the collection; mutating the result does
    /// not affect the store.
    pub async fn list_all(&self) -> HashMap<String, Payment> {
        self.payments.lock().await.clone()
    }

    /// Registers a new payment with the given caller-assigned id.
    pub async fn create(&self, id: &str, amount: Decimal, method_raw: &str) -> Result<Payment> {
        let mut payments = self.reload().await?;
        if payments.contains_key(id) {
            return Err(PaymentError::DuplicateId(id.to_string()));
        }
        let method = parse_method(method_raw)?;

        let payment = Payment::register(id, amount, method);
        payments.insert(id.to_string(), payment.clone());
        self.persist(&payments).await?;
        Ok(payment)
    }

    /// Applies a partial update to a registered payment.
    ///
    /// Once a payment has left `Registered` the call is a silent no-op that
    /// returns the unchanged entity without touching the backend. This is
    /// deliberate: updates lose effect once the payment is locked, while the
    /// transition operations reject invalid states loudly.
    pub async fn update(
        &self,
        id: &str,
        amount: Option<Decimal>,
        method_raw: Option<&str>,
    ) -> Result<Payment> {
        let mut payments = self.reload().await?;
        let mut payment = get_payment(&payments, id)?.clone();
        if payment.status != PaymentStatus::Registered {
            return Ok(payment);
        }

        if let Some(raw) = method_raw {
            payment.method = parse_method(raw)?;
        }
        if let Some(amount) = amount {
            payment.amount = amount;
        }
        payments.insert(id.to_string(), payment.clone());
        self.persist(&payments).await?;
        Ok(payment)
    }

    /// Attempts to pay a registered payment.
    ///
    /// Runs the method's validation strategy against the full current
    /// collection (the candidate included) and moves the payment to `Paid`
    /// or `Failed` accordingly. The result is persisted either way. This is
    /// the only operation that can set `Paid` or `Failed`.
    pub async fn pay(&self, id: &str) -> Result<Payment> {
        let mut payments = self.reload().await?;
        let payment = get_payment(&payments, id)?;
        if payment.status != PaymentStatus::Registered {
            return Err(PaymentError::InvalidTransition {
                id: id.to_string(),
                status: payment.status,
            });
        }
        let strategy = self
            .registry
            .get(payment.method)
            .ok_or_else(|| PaymentError::InvalidMethod(payment.method.to_string()))?;

        let all: Vec<Payment> = payments.values().cloned().collect();
        let mut payment = payment.clone();
        payment.status = if strategy.validate(&payment, &all) {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Failed
        };
        payments.insert(id.to_string(), payment.clone());
        self.persist(&payments).await?;
        Ok(payment)
    }

    /// Reverts a failed payment back to `Registered`.
    ///
    /// Any other status, `Paid` and `Registered` included, is a silent no-op
    /// returning the unchanged entity. `Paid` is terminal; nothing un-pays a
    /// payment.
    pub async fn revert(&self, id: &str) -> Result<Payment> {
        let mut payments = self.reload().await?;
        let mut payment = get_payment(&payments, id)?.clone();
        if payment.status != PaymentStatus::Failed {
            return Ok(payment);
        }

        payment.status = PaymentStatus::Registered;
        payments.insert(id.to_string(), payment.clone());
        self.persist(&payments).await?;
        Ok(payment)
    }

    /// Reloads the collection from the backend and returns the locked guard,
    /// so the whole read-modify-write cycle stays serialized.
    async fn reload(&self) -> Result<tokio::sync::MutexGuard<'_, HashMap<String, Payment>>> {
        let mut payments = self.payments.lock().await;
        *payments = Self::decode(self.backend.read_all().await?);
        Ok(payments)
    }

    /// Re-serializes the complete in-memory state and overwrites the backend.
    /// A serialization failure on any entity fails the whole write.
    async fn persist(&self, payments: &HashMap<String, Payment>) -> Result<()> {
        let mut records = HashMap::with_capacity(payments.len());
        for (id, payment) in payments {
            records.insert(id.clone(), serde_json::to_value(payment.record())?);
        }
        self.backend.write_all(records).await
    }

    /// Decodes raw records into payments, dropping malformed entries rather
    /// than failing the whole load.
    fn decode(records: HashMap<String, Value>) -> HashMap<String, Payment> {
        records
            .into_iter()
            .filter_map(|(id, value)| {
                let record: PaymentRecord = serde_json::from_value(value).ok()?;
                Some((id.clone(), Payment::from_record(id, record)))
            })
            .collect()
    }
}

fn get_payment<'a>(payments: &'a HashMap<String, Payment>, id: &str) -> Result<&'a Payment> {
    payments
        .get(id)
        .ok_or_else(|| PaymentError::NotFound(id.to_string()))
}

fn parse_method(raw: &str) -> Result<PaymentMethod> {
    PaymentMethod::parse(raw).map_err(|_| PaymentError::InvalidMethod(raw.to_string()))
}
