use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tokio::fs;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {collection}: {source}")]
    Read {
        collection: &'static str,
        source: io::Error,
    },

    #[error("failed to write {collection}: {source}")]
    Write {
        collection: &'static str,
        source: io::Error,
    },

    #[error("{collection} holds invalid JSON: {source}")]
    Decode {
        collection: &'static str,
        source: serde_json::Error,
    },

    #[error("failed to encode {collection}: {source}")]
    Encode {
        collection: &'static str,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Users,
    Suppliers,
    Products,
    Sales,
}

impl Collection {
    pub fn file_name(self) -> &'static str {
        match self {
            Collection::Users => "users.json",
            Collection::Suppliers => "suppliers.json",
            Collection::Products => "products.json",
            Collection::Sales => "sales.json",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Suppliers => "suppliers",
            Collection::Products => "products",
            Collection::Sales => "sales",
        }
    }
}

/// Whole-collection JSON persistence: `load` reads a full snapshot of one
/// collection, `commit` rewrites the document in full. There are no partial
/// updates and no cross-collection transaction; callers that mutate more
/// than one collection commit them one after the other.
#[derive(Clone)]
pub struct JsonStore {
    data_dir: Arc<PathBuf>,
}

impl JsonStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Arc::new(data_dir.into()),
        }
    }

    pub fn path(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(collection.file_name())
    }

    /// Load a collection snapshot. A missing file is the empty collection.
    pub async fn load<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Vec<T>, StoreError> {
        let raw = match fs::read(self.path(collection)).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(StoreError::Read {
                    collection: collection.name(),
                    source: err,
                });
            }
        };

        serde_json::from_slice(&raw).map_err(|err| StoreError::Decode {
            collection: collection.name(),
            source: err,
        })
    }

    /// Replace a collection document with the given snapshot.
    pub async fn commit<T: Serialize>(
        &self,
        collection: Collection,
        items: &[T],
    ) -> Result<(), StoreError> {
        let raw = serde_json::to_vec_pretty(items).map_err(|err| StoreError::Encode {
            collection: collection.name(),
            source: err,
        })?;

        fs::write(self.path(collection), raw)
            .await
            .map_err(|err| StoreError::Write {
                collection: collection.name(),
                source: err,
            })
    }
}

pub trait Identified {
    fn id(&self) -> i64;
}

/// Next identifier for a collection: max existing id + 1, or 1 when empty.
pub fn next_id<T: Identified>(items: &[T]) -> i64 {
    items.iter().map(Identified::id).max().unwrap_or(0) + 1
}
