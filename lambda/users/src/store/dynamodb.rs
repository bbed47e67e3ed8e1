use std::fmt::Debug;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_json::Value;

use super::conversions::{attributes_to_item, item_to_attributes, value_to_attribute};
use super::{Item, Result, StoreError, UserStore, KEY_ATTRIBUTE};
use crate::config::Config;

pub(crate) struct DynamoUserStore {
    client: Client,
    table_name: String,
}

impl DynamoUserStore {
    pub(crate) fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub(crate) async fn from_config(config: &Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));

        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        Self::new(Client::new(&sdk_config), &config.table_name)
    }

    pub(crate) fn table_name(&self) -> &str {
        &self.table_name
    }
}

fn key(id: &str) -> AttributeValue {
    AttributeValue::S(id.to_string())
}

fn map_sdk_error<E, R>(operation: &'static str, err: SdkError<E, R>) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: Debug + Send + Sync + 'static,
{
    let code = err.code().unwrap_or("Unknown").to_string();
    let message = match err.message() {
        Some(message) => message.to_string(),
        None => DisplayErrorContext(&err).to_string(),
    };
    StoreError::Request {
        operation,
        code,
        message,
    }
}

#[async_trait]
impl UserStore for DynamoUserStore {
    async fn put(&self, item: Item) -> Result<()> {
        if !item.contains_key(KEY_ATTRIBUTE) {
            return Err(StoreError::InvalidItem(format!("missing {KEY_ATTRIBUTE}")));
        }

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item_to_attributes(&item)))
            .send()
            .await
            .map_err(|e| map_sdk_error("PutItem", e))?;

        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Item>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, key(id))
            .send()
            .await
            .map_err(|e| map_sdk_error("GetItem", e))?;

        match result.item {
            Some(attributes) => Ok(Some(attributes_to_item(&attributes)?)),
            None => Ok(None),
        }
    }

    async fn update(&self, id: &str, attribute: &str, value: Value) -> Result<()> {
        self.client
            .update_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, key(id))
            .update_expression("SET #nm = :n")
            .expression_attribute_names("#nm", attribute)
            .expression_attribute_values(":n", value_to_attribute(&value))
            .send()
            .await
            .map_err(|e| map_sdk_error("UpdateItem", e))?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, key(id))
            .send()
            .await
            .map_err(|e| map_sdk_error("DeleteItem", e))?;

        Ok(())
    }
}
