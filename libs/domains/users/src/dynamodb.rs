//! DynamoDB implementation of RecordStore
//!
//! Records are JSON objects on our side and attribute maps on DynamoDB's.
//! Conversion covers S, N, BOOL, NULL, L and M both ways; SS and NS are read
//! back as arrays. Binary attributes are not supported and fail the read.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use core_config::dynamodb::DynamoConfig;
use serde_json::{Number, Value};
use tracing::instrument;

use crate::models::{Record, USER_KEY_ATTRIBUTE};
use crate::store::{RecordStore, StoreError, StoreResult};

/// DynamoDB attribute map
pub type Item = HashMap<String, AttributeValue>;

/// RecordStore backed by a single DynamoDB table
#[derive(Debug, Clone)]
pub struct DynamoRecordStore {
    client: Client,
    table_name: String,
    key_attribute: String,
}

impl DynamoRecordStore {
    /// Store over `table_name`, keyed by the `email` attribute
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            key_attribute: USER_KEY_ATTRIBUTE.to_string(),
        }
    }

    /// Build a client from the AWS SDK's default credential chain plus the
    /// region and endpoint overrides in `config`.
    pub async fn from_config(config: &DynamoConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }

        if let Some(endpoint_url) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }

        let sdk_config = loader.load().await;
        Self::new(Client::new(&sdk_config), config.table_name.clone())
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    fn key_value(key: &str) -> AttributeValue {
        AttributeValue::S(key.to_string())
    }
}

#[async_trait]
impl RecordStore for DynamoRecordStore {
    #[instrument(skip(self), fields(table = %self.table_name))]
    async fn get(&self, key: &str) -> StoreResult<Option<Record>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(&self.key_attribute, Self::key_value(key))
            .send()
            .await
            .map_err(sdk_error)?;

        output.item().cloned().map(item_to_record).transpose()
    }

    #[instrument(skip(self), fields(table = %self.table_name))]
    async fn scan_all(&self) -> StoreResult<Vec<Record>> {
        // The paginator follows LastEvaluatedKey until the table is exhausted.
        let mut items = self
            .client
            .scan()
            .table_name(&self.table_name)
            .into_paginator()
            .items()
            .send();

        let mut records = Vec::new();
        while let Some(item) = items.next().await {
            records.push(item_to_record(item.map_err(sdk_error)?)?);
        }

        tracing::debug!(count = records.len(), "Scanned table");
        Ok(records)
    }

    #[instrument(skip(self, record), fields(table = %self.table_name))]
    async fn put(&self, record: Record) -> StoreResult<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(record_to_item(record)))
            .send()
            .await
            .map_err(sdk_error)?;

        Ok(())
    }

    #[instrument(skip(self), fields(table = %self.table_name))]
    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(&self.key_attribute, Self::key_value(key))
            .send()
            .await
            .map_err(sdk_error)?;

        Ok(())
    }
}

fn sdk_error<E>(err: E) -> StoreError
where
    E: std::error::Error + 'static,
{
    StoreError::new(DisplayErrorContext(err).to_string())
}

/// Record to DynamoDB attribute map. Total: every JSON value has an attribute form.
pub fn record_to_item(record: Record) -> Item {
    record
        .into_iter()
        .map(|(name, value)| (name, value_to_attribute(value)))
        .collect()
}

fn value_to_attribute(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(flag) => AttributeValue::Bool(flag),
        Value::Number(number) => AttributeValue::N(number.to_string()),
        Value::String(text) => AttributeValue::S(text),
        Value::Array(values) => {
            AttributeValue::L(values.into_iter().map(value_to_attribute).collect())
        }
        Value::Object(map) => AttributeValue::M(record_to_item(map)),
    }
}

/// DynamoDB attribute map to record
pub fn item_to_record(item: Item) -> StoreResult<Record> {
    item.into_iter()
        .map(|(name, attribute)| {
            let value = attribute_to_value(attribute)
                .map_err(|e| StoreError::new(format!("attribute '{name}': {e}")))?;
            Ok((name, value))
        })
        .collect()
}

fn attribute_to_value(attribute: AttributeValue) -> StoreResult<Value> {
    match attribute {
        AttributeValue::S(text) => Ok(Value::String(text)),
        AttributeValue::N(raw) => parse_number(&raw),
        AttributeValue::Bool(flag) => Ok(Value::Bool(flag)),
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::L(values) => values
            .into_iter()
            .map(attribute_to_value)
            .collect::<StoreResult<Vec<_>>>()
            .map(Value::Array),
        AttributeValue::M(map) => item_to_record(map).map(Value::Object),
        AttributeValue::Ss(set) => Ok(Value::Array(set.into_iter().map(Value::String).collect())),
        AttributeValue::Ns(set) => set
            .iter()
            .map(|raw| parse_number(raw))
            .collect::<StoreResult<Vec<_>>>()
            .map(Value::Array),
        other => Err(StoreError::new(format!(
            "unsupported attribute type {other:?}"
        ))),
    }
}

fn parse_number(raw: &str) -> StoreResult<Value> {
    raw.parse::<Number>()
        .map(Value::Number)
        .map_err(|e| StoreError::new(format!("invalid number '{raw}': {e}")))
}
