use async_trait::async_trait;
use payreg::application::store::PaymentStore;
use payreg::domain::payment::PaymentStatus;
use payreg::domain::ports::PaymentBackend;
use payreg::error::Result;
use payreg::infrastructure::in_memory::InMemoryBackend;
use rust_decimal_macros::dec;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Wraps the in-memory backend and counts writes, to assert which store
/// operations actually persist.
#[derive(Clone)]
struct CountingBackend {
    inner: InMemoryBackend,
    writes: Arc<AtomicUsize>,
}

impl CountingBackend {
    fn new() -> Self {
        Self {
            inner: InMemoryBackend::new(),
            writes: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentBackend for CountingBackend {
    async fn read_all(&self) -> Result<HashMap<String, Value>> {
        self.inner.read_all().await
    }

    async fn write_all(&self, records: HashMap<String, Value>) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.write_all(records).await
    }
}

#[tokio::test]
async fn test_update_on_paid_performs_no_write() {
    let backend = CountingBackend::new();
    let store = PaymentStore::load(Box::new(backend.clone())).await.unwrap();

    store.create("p1", dec!(100), "paypal").await.unwrap();
    store.pay("p1").await.unwrap();
    let writes_before = backend.write_count();

    let unchanged = store.update("p1", Some(dec!(999)), None).await.unwrap();

    assert_eq!(unchanged.amount, dec!(100));
    assert_eq!(backend.write_count(), writes_before);
}

#[tokio::test]
async fn test_revert_on_registered_performs_no_write() {
    let backend = CountingBackend::new();
    let store = PaymentStore::load(Box::new(backend.clone())).await.unwrap();

    store.create("p1", dec!(100), "paypal").await.unwrap();
    let writes_before = backend.write_count();

    store.revert("p1").await.unwrap();

    assert_eq!(backend.write_count(), writes_before);
}

#[tokio::test]
async fn test_failed_pay_still_persists() {
    let backend = CountingBackend::new();
    let store = PaymentStore::load(Box::new(backend.clone())).await.unwrap();

    store.create("p1", dec!(5000), "paypal").await.unwrap();
    let writes_before = backend.write_count();

    let failed = store.pay("p1").await.unwrap();

    assert_eq!(failed.status, PaymentStatus::Failed);
    assert_eq!(backend.write_count(), writes_before + 1);
}

#[tokio::test]
async fn test_full_lifecycle_walk() {
    let store = PaymentStore::load(Box::new(InMemoryBackend::new()))
        .await
        .unwrap();

    // Over the PayPal limit: the attempt fails.
    store.create("p1", dec!(6000), "paypal").await.unwrap();
    assert_eq!(store.pay("p1").await.unwrap().status, PaymentStatus::Failed);

    // The only road from FAILED goes back through REGISTERED.
    assert_eq!(
        store.revert("p1").await.unwrap().status,
        PaymentStatus::Registered
    );

    // After lowering the amount the retry succeeds and PAID is terminal.
    store.update("p1", Some(dec!(4000)), None).await.unwrap();
    assert_eq!(store.pay("p1").await.unwrap().status, PaymentStatus::Paid);
    assert_eq!(
        store.revert("p1").await.unwrap().status,
        PaymentStatus::Paid
    );
}
