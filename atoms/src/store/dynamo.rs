use super::{DocumentBackend, Filter, StoreError};
use crate::schema::Fields;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoClient;
use serde_json::{Number, Value};
use std::collections::HashMap;

const PARTITION_KEY: &str = "PK";
const SORT_KEY: &str = "SK";

/// Single-table DynamoDB backend: PK = collection, SK = document id.
pub struct DynamoBackend {
    client: DynamoClient,
    table_name: String,
}

impl DynamoBackend {
    pub fn new(client: DynamoClient, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl DocumentBackend for DynamoBackend {
    fn name(&self) -> &str {
        &self.table_name
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let result = self
            .client
            .describe_table()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(|e| StoreError::Storage(format!("DynamoDB describe_table error: {}", e)))?;

        let status = result
            .table()
            .and_then(|t| t.table_status())
            .map(|s| s.as_str().to_string())
            .unwrap_or_default();
        tracing::info!("DynamoDB table {} status: {}", self.table_name, status);
        Ok(())
    }

    async fn insert(&self, collection: &str, document: Fields) -> Result<(), StoreError> {
        let id = document
            .get(super::ID_FIELD)
            .and_then(|v| v.as_str())
            .ok_or_else(|| StoreError::Encode("document has no _id".to_string()))?
            .to_string();

        let mut item = document_to_item(document);
        item.insert(PARTITION_KEY.to_string(), AttributeValue::S(collection.to_string()));
        item.insert(SORT_KEY.to_string(), AttributeValue::S(id));

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(SK)")
            .send()
            .await
            .map_err(|e| StoreError::Storage(format!("DynamoDB put_item error: {}", e)))?;

        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        filter: &Filter,
        limit: usize,
    ) -> Result<Vec<Fields>, StoreError> {
        let mut documents = Vec::new();
        if limit == 0 {
            return Ok(documents);
        }
        let mut start_key: Option<HashMap<String, AttributeValue>> = None;

        // Limit is applied by DynamoDB before the filter expression, so with a
        // filter we page until enough items matched.
        loop {
            let mut request = self
                .client
                .query()
                .table_name(&self.table_name)
                .key_condition_expression("PK = :pk")
                .expression_attribute_values(":pk", AttributeValue::S(collection.to_string()))
                .set_exclusive_start_key(start_key.take());

            request = match filter {
                Filter::All => {
                    let remaining = limit.saturating_sub(documents.len());
                    request.limit(remaining.min(i32::MAX as usize) as i32)
                }
                Filter::Eq { field, value } => request
                    .filter_expression("#f = :v")
                    .expression_attribute_names("#f", *field)
                    .expression_attribute_values(":v", AttributeValue::S(value.clone())),
            };

            let result = request
                .send()
                .await
                .map_err(|e| StoreError::Storage(format!("DynamoDB query error: {}", e)))?;

            for item in result.items() {
                documents.push(item_to_document(item));
                if documents.len() >= limit {
                    return Ok(documents);
                }
            }

            match result.last_evaluated_key() {
                Some(key) if !key.is_empty() => start_key = Some(key.clone()),
                _ => break,
            }
        }

        Ok(documents)
    }
}

fn document_to_item(document: Fields) -> HashMap<String, AttributeValue> {
    document
        .into_iter()
        .map(|(k, v)| (k, to_attribute(v)))
        .collect()
}

/// Strips the key attributes; `_id` stays as a regular field.
fn item_to_document(item: &HashMap<String, AttributeValue>) -> Fields {
    item.iter()
        .filter(|(k, _)| k.as_str() != PARTITION_KEY && k.as_str() != SORT_KEY)
        .map(|(k, v)| (k.clone(), from_attribute(v)))
        .collect()
}

pub(crate) fn to_attribute(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(items) => AttributeValue::L(items.into_iter().map(to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(
            map.into_iter()
                .map(|(k, v)| (k, to_attribute(v)))
                .collect(),
        ),
    }
}

pub(crate) fn from_attribute(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => parse_number(n),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(items) => Value::Array(items.iter().map(from_attribute).collect()),
        AttributeValue::M(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), from_attribute(v)))
                .collect(),
        ),
        AttributeValue::Ss(items) => Value::Array(items.iter().cloned().map(Value::String).collect()),
        AttributeValue::Ns(items) => Value::Array(items.iter().map(|n| parse_number(n)).collect()),
        _ => Value::Null,
    }
}

fn parse_number(raw: &str) -> Value {
    if let Ok(i) = raw.parse::<i64>() {
        return Value::Number(i.into());
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_values_map_to_attributes() {
        assert_eq!(to_attribute(json!("a")), AttributeValue::S("a".to_string()));
        assert_eq!(to_attribute(json!(null)), AttributeValue::Null(true));
        assert_eq!(to_attribute(json!(true)), AttributeValue::Bool(true));
        assert_eq!(to_attribute(json!(42)), AttributeValue::N("42".to_string()));
        assert_eq!(to_attribute(json!([])), AttributeValue::L(vec![]));
        assert_eq!(
            to_attribute(json!(["u1", "u2"])),
            AttributeValue::L(vec![
                AttributeValue::S("u1".to_string()),
                AttributeValue::S("u2".to_string()),
            ])
        );
    }

    #[test]
    fn attributes_map_back_to_json() {
        let original = json!({
            "name": "Acme",
            "description": null,
            "members": ["u1"],
            "is_active": false,
            "score": 1.5,
            "count": 3,
            "nested": {"k": "v"},
        });
        let back = from_attribute(&to_attribute(original.clone()));
        assert_eq!(back, original);
    }

    #[test]
    fn string_and_number_sets_become_arrays() {
        let ss = AttributeValue::Ss(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(from_attribute(&ss), json!(["a", "b"]));
        let ns = AttributeValue::Ns(vec!["1".to_string(), "2.5".to_string()]);
        assert_eq!(from_attribute(&ns), json!([1, 2.5]));
    }

    #[test]
    fn key_attributes_are_stripped() {
        let mut item = HashMap::new();
        item.insert("PK".to_string(), AttributeValue::S("task".to_string()));
        item.insert("SK".to_string(), AttributeValue::S("abc".to_string()));
        item.insert("_id".to_string(), AttributeValue::S("abc".to_string()));
        item.insert("title".to_string(), AttributeValue::S("Fix bug".to_string()));

        let doc = item_to_document(&item);
        assert_eq!(Value::Object(doc), json!({"_id": "abc", "title": "Fix bug"}));
    }
}
