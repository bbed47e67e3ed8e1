mod conversions;
mod dynamodb;
#[cfg(test)]
pub(crate) mod memory;

use async_trait::async_trait;
use serde_json::{Map, Value};

pub(crate) use dynamodb::DynamoUserStore;

/// Primary key attribute of every stored item.
pub(crate) const KEY_ATTRIBUTE: &str = "userId";

pub(crate) type Item = Map<String, Value>;

#[derive(Debug, thiserror::Error)]
pub(crate) enum StoreError {
    #[error("{operation} failed ({code}): {message}")]
    Request {
        operation: &'static str,
        code: String,
        message: String,
    },
    #[error("Invalid item: {0}")]
    InvalidItem(String),
}

pub(crate) type Result<T> = std::result::Result<T, StoreError>;

#[async_trait]
pub(crate) trait UserStore: Send + Sync {
    async fn put(&self, item: Item) -> Result<()>;

    /// Returns `None` when no item exists for `key`.
    async fn get(&self, key: &str) -> Result<Option<Item>>;

    async fn update(&self, key: &str, attribute: &str, value: Value) -> Result<()>;

    /// Deleting a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<()>;
}
