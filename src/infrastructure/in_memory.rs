use crate::domain::ports::PaymentBackend;
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory backend for payment records.
///
/// Uses `Arc<RwLock<HashMap<String, Value>>>` to allow shared concurrent
/// access. Ideal for tests or ephemeral runs where persistence is not
/// required.
#[derive(Default, Clone)]
pub struct InMemoryBackend {
    records: Arc<RwLock<HashMap<String, Value>>>,
}

impl InMemoryBackend {
    /// Creates a new, empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentBackend for InMemoryBackend {
    async fn read_all(&self) -> Result<HashMap<String, Value>> {
        let records = self.records.read().await;
        Ok(records.clone())
    }

    async fn write_all(&self, records: HashMap<String, Value>) -> Result<()> {
        let mut stored = self.records.write().await;
        *stored = records;
        Ok(())
    }
}
