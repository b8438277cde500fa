use crate::domain::ports::PaymentBackend;
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A persistent backend keeping the whole record collection in a single
/// pretty-printed JSON file, one object entry per payment id.
///
/// Reads and writes always cover the full collection; there are no partial
/// writes. A missing file reads as an empty collection.
#[derive(Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl PaymentBackend for JsonFileBackend {
    async fn read_all(&self) -> Result<HashMap<String, Value>> {
        let contents = match tokio::fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&contents)?)
    }

    async fn write_all(&self, records: HashMap<String, Value>) -> Result<()> {
        let contents = serde_json::to_vec_pretty(&records)?;
        tokio::fs::write(&self.path, contents).await?;
        Ok(())
    }
}
