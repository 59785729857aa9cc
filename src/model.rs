use std::collections::{BTreeMap, HashMap};

use heck::{ToLowerCamelCase, ToUpperCamelCase};
use serde::Serialize;

use crate::schema::{ColumnDescriptor, Nullable, PrimaryKeyDescriptor};
use crate::typemap::LogicalType;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelDefinition {
    pub name: String,
    pub options: ModelOptions,
    pub properties: BTreeMap<String, PropertyDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelOptions {
    pub id_injection: bool,
    #[serde(rename = "crate")]
    pub crate_options: TableMapping,
}

/// Where the model lives in the cluster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableMapping {
    pub schema: String,
    pub table: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDefinition {
    #[serde(rename = "type")]
    pub logical_type: LogicalType,
    pub required: bool,
    /// 1-based position in the primary key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<usize>,
    #[serde(rename = "crate")]
    pub column: ColumnMapping,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMapping {
    pub column_name: String,
    pub data_type: String,
    pub nullable: Nullable,
}

/// Convert a table name to a model name (e.g. "user_accounts" -> "UserAccounts").
pub fn table_to_model_name(table: &str) -> String {
    table.to_upper_camel_case()
}

/// Convert a column name to a property name (e.g. "first_name" -> "firstName").
pub fn column_to_property_name(column: &str) -> String {
    column.to_lower_camel_case()
}

pub fn build_model_definition(
    owner: &str,
    table: &str,
    columns: &[ColumnDescriptor],
    primary_keys: &[PrimaryKeyDescriptor],
) -> ModelDefinition {
    let key_columns: Vec<&str> = primary_keys
        .iter()
        .filter(|pk| pk.table_name == table)
        .flat_map(|pk| pk.pk_names.iter().map(String::as_str))
        .collect();

    // Columns whose property names collide keep their raw column names.
    let mut name_counts: HashMap<String, usize> = HashMap::new();
    for col in columns {
        *name_counts
            .entry(column_to_property_name(&col.column_name))
            .or_default() += 1;
    }

    let mut properties = BTreeMap::new();
    for col in columns {
        let property = PropertyDefinition {
            logical_type: col.logical_type,
            required: col.nullable == Nullable::No,
            id: key_columns
                .iter()
                .position(|k| *k == col.column_name)
                .map(|i| i + 1),
            column: ColumnMapping {
                column_name: col.column_name.clone(),
                data_type: col.data_type.clone(),
                nullable: col.nullable,
            },
        };
        let name = column_to_property_name(&col.column_name);
        let key = if name_counts.get(&name).copied().unwrap_or(0) > 1 {
            col.column_name.clone()
        } else {
            name
        };
        properties.insert(key, property);
    }

    ModelDefinition {
        name: table_to_model_name(table),
        options: ModelOptions {
            id_injection: false,
            crate_options: TableMapping {
                schema: owner.to_string(),
                table: table.to_string(),
            },
        },
        properties,
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::testutil::{test_column, test_primary_key};

    #[test]
    fn test_model_name() {
        assert_eq!(table_to_model_name("t1"), "T1");
        assert_eq!(table_to_model_name("user_accounts"), "UserAccounts");
    }

    #[test]
    fn test_property_name() {
        assert_eq!(column_to_property_name("id"), "id");
        assert_eq!(column_to_property_name("first_name"), "firstName");
    }

    #[test]
    fn test_composite_key_positions() {
        let columns = vec![
            test_column("orders", "customer_id", "long"),
            test_column("orders", "note", "string"),
            test_column("orders", "order_no", "integer"),
        ];
        let pks = vec![test_primary_key("orders", &["customer_id", "order_no"])];
        let def = build_model_definition("doc", "orders", &columns, &pks);

        assert_eq!(def.name, "Orders");
        assert_eq!(def.properties["customerId"].id, Some(1));
        assert_eq!(def.properties["orderNo"].id, Some(2));
        assert_eq!(def.properties["note"].id, None);
        assert_eq!(def.properties["customerId"].logical_type, LogicalType::Number);
        assert!(!def.properties["note"].required);
    }

    #[test]
    fn test_keys_of_other_tables_ignored() {
        let columns = vec![test_column("a", "id", "string")];
        let pks = vec![test_primary_key("b", &["id"])];
        let def = build_model_definition("doc", "a", &columns, &pks);
        assert_eq!(def.properties["id"].id, None);
    }

    #[test]
    fn test_colliding_property_names() {
        let columns = vec![
            test_column("t", "first_name", "string"),
            test_column("t", "firstName", "string"),
        ];
        let def = build_model_definition("doc", "t", &columns, &[]);
        assert_eq!(def.properties.len(), 2);
        assert_eq!(def.properties["first_name"].column.column_name, "first_name");
        assert_eq!(def.properties["firstName"].column.column_name, "firstName");
    }

    #[test]
    fn test_json_shape() {
        let columns = vec![test_column("t1", "id", "string"), test_column("t1", "t", "string")];
        let pks = vec![test_primary_key("t1", &["id"])];
        let def = build_model_definition("doc", "t1", &columns, &pks);

        let expected = indoc! {r#"
            {
              "name": "T1",
              "options": {
                "idInjection": false,
                "crate": {
                  "schema": "doc",
                  "table": "t1"
                }
              },
              "properties": {
                "id": {
                  "type": "String",
                  "required": false,
                  "id": 1,
                  "crate": {
                    "columnName": "id",
                    "dataType": "string",
                    "nullable": "Y"
                  }
                },
                "t": {
                  "type": "String",
                  "required": false,
                  "crate": {
                    "columnName": "t",
                    "dataType": "string",
                    "nullable": "Y"
                  }
                }
              }
            }"#};
        assert_eq!(serde_json::to_string_pretty(&def).unwrap(), expected);
    }
}
