use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

pub type PaymentBackendBox = Box<dyn PaymentBackend>;

/// Durable key-value storage for payment records, keyed by payment id.
///
/// Records travel through the port as raw JSON values so that the store can
/// skip individual malformed entries on load instead of failing the whole
/// read. Writes are full overwrites of the complete collection.
#[async_trait]
pub trait PaymentBackend: Send + Sync {
    /// Reads the full record collection. Absent storage yields an empty
    /// mapping, never an error.
    async fn read_all(&self) -> Result<HashMap<String, Value>>;

    /// Overwrites the full record collection.
    async fn write_all(&self, records: HashMap<String, Value>) -> Result<()>;
}
