use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::client::{CatalogClient, CatalogRow};
use crate::error::{DiscoveryError, Result};
use crate::schema::{ColumnDescriptor, Nullable, PrimaryKeyDescriptor};
use crate::typemap::map_type;

/// Build a catalog row from a JSON object literal.
pub fn row(value: Value) -> CatalogRow {
    match value {
        Value::Object(map) => map,
        other => panic!("catalog row must be a JSON object, got {other}"),
    }
}

/// In-memory catalog. Answers each statement with the rows registered for
/// the first fragment the SQL contains, and records every statement.
#[derive(Default)]
pub struct MockCatalog {
    responses: Vec<(String, Vec<CatalogRow>)>,
    failure: Option<String>,
    executed: Mutex<Vec<String>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog whose every statement fails with a protocol error.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn with_rows(mut self, fragment: &str, rows: Vec<CatalogRow>) -> Self {
        self.responses.push((fragment.to_string(), rows));
        self
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogClient for MockCatalog {
    async fn execute(&self, sql: &str) -> Result<Vec<CatalogRow>> {
        self.executed.lock().unwrap().push(sql.to_string());
        if let Some(ref message) = self.failure {
            return Err(DiscoveryError::Database(sqlx::Error::Protocol(message.clone())));
        }
        Ok(self
            .responses
            .iter()
            .find(|(fragment, _)| sql.contains(fragment.as_str()))
            .map(|(_, rows)| rows.clone())
            .unwrap_or_default())
    }
}

/// Create a ColumnDescriptor the way discovery would for the given native type.
pub fn test_column(table: &str, column: &str, data_type: &str) -> ColumnDescriptor {
    ColumnDescriptor {
        table_name: table.to_string(),
        column_name: column.to_string(),
        data_type: data_type.to_string(),
        logical_type: map_type(data_type),
        nullable: Nullable::Yes,
    }
}

/// Create a PrimaryKeyDescriptor in the `doc` schema.
pub fn test_primary_key(table: &str, columns: &[&str]) -> PrimaryKeyDescriptor {
    let pk_names: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
    PrimaryKeyDescriptor {
        owner: "doc".to_string(),
        table_name: table.to_string(),
        pk_cols: pk_names.clone(),
        pk_name: pk_names.join("."),
        pk_names,
    }
}
