use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use super::{Item, Result, StoreError, UserStore, KEY_ATTRIBUTE};

#[derive(Debug, Clone, Default)]
pub(crate) struct InMemoryUserStore {
    items: Arc<Mutex<HashMap<String, Item>>>,
    calls: Arc<Mutex<usize>>,
}

impl InMemoryUserStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn item(&self, id: &str) -> Option<Item> {
        self.items.lock().expect("poisoned mutex").get(id).cloned()
    }

    pub(crate) fn calls(&self) -> usize {
        *self.calls.lock().expect("poisoned mutex")
    }

    fn record_call(&self) {
        *self.calls.lock().expect("poisoned mutex") += 1;
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn put(&self, item: Item) -> Result<()> {
        self.record_call();
        let id = match item.get(KEY_ATTRIBUTE) {
            Some(Value::String(id)) => id.clone(),
            _ => return Err(StoreError::InvalidItem(format!("missing {KEY_ATTRIBUTE}"))),
        };
        self.items.lock().expect("poisoned mutex").insert(id, item);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Item>> {
        self.record_call();
        Ok(self.item(id))
    }

    async fn update(&self, id: &str, attribute: &str, value: Value) -> Result<()> {
        self.record_call();
        let mut items = self.items.lock().expect("poisoned mutex");
        let item = items.entry(id.to_string()).or_insert_with(|| {
            let mut item = Item::new();
            item.insert(KEY_ATTRIBUTE.to_string(), Value::String(id.to_string()));
            item
        });
        item.insert(attribute.to_string(), value);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.record_call();
        self.items.lock().expect("poisoned mutex").remove(id);
        Ok(())
    }
}

/// Fails every call the way an unreachable table would.
#[derive(Debug, Default)]
pub(crate) struct FailingUserStore;

impl FailingUserStore {
    fn error(operation: &'static str) -> StoreError {
        StoreError::Request {
            operation,
            code: "ResourceNotFoundException".to_string(),
            message: "Requested resource not found".to_string(),
        }
    }
}

#[async_trait]
impl UserStore for FailingUserStore {
    async fn put(&self, _item: Item) -> Result<()> {
        Err(Self::error("PutItem"))
    }

    async fn get(&self, _id: &str) -> Result<Option<Item>> {
        Err(Self::error("GetItem"))
    }

    async fn update(&self, _id: &str, _attribute: &str, _value: Value) -> Result<()> {
        Err(Self::error("UpdateItem"))
    }

    async fn delete(&self, _id: &str) -> Result<()> {
        Err(Self::error("DeleteItem"))
    }
}
