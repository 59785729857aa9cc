use serde::{Deserialize, Serialize};

use crate::typemap::LogicalType;

/// Kind of a discovered catalog object. CrateDB discovery only reports tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Table,
}

/// A table visible in the discovery namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    #[serde(rename = "type")]
    pub object_type: ObjectType,
    pub name: String,
    pub owner: String,
}

/// Nullability flag in the framework's `"Y"`/`"N"` spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Nullable {
    #[serde(rename = "Y")]
    Yes,
    #[serde(rename = "N")]
    No,
}

/// A column of a discovered table.
///
/// `nullable` is always `Yes`: the CrateDB catalog does not report
/// nullability, so every column is assumed nullable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    pub table_name: String,
    pub column_name: String,
    pub data_type: String,
    #[serde(rename = "type")]
    pub logical_type: LogicalType,
    pub nullable: Nullable,
}

/// The primary key of a discovered table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryKeyDescriptor {
    pub owner: String,
    pub table_name: String,
    /// Key columns in catalog order.
    pub pk_names: Vec<String>,
    /// Same sequence as `pk_names`.
    pub pk_cols: Vec<String>,
    /// `pk_names` joined by `.`. Display label only; ambiguous when a
    /// column name itself contains a dot.
    pub pk_name: String,
}

/// A foreign key relationship. CrateDB has no foreign keys, so discovery
/// never produces one; the shape exists for the framework contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKeyDescriptor {
    pub fk_owner: String,
    pub fk_name: Option<String>,
    pub fk_table_name: String,
    pub fk_column_name: String,
    pub key_seq: u32,
    pub pk_owner: String,
    pub pk_name: Option<String>,
    pub pk_table_name: String,
    pub pk_column_name: String,
}
