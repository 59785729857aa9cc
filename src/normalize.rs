use serde::Deserialize;
use serde_json::Value;

use crate::client::CatalogRow;
use crate::error::Result;
use crate::schema::{ColumnDescriptor, Nullable, PrimaryKeyDescriptor, TableDescriptor};
use crate::typemap::map_type;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ColumnRow {
    table_name: String,
    column_name: String,
    data_type: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrimaryKeyRow {
    owner: String,
    table_name: String,
    pk_names: PkNames,
}

/// Older CrateDB releases report the key columns as an array in
/// `constraint_name`; a plain string is a single-column key.
#[derive(Deserialize)]
#[serde(untagged)]
enum PkNames {
    Many(Vec<String>),
    One(String),
}

impl From<PkNames> for Vec<String> {
    fn from(names: PkNames) -> Self {
        match names {
            PkNames::Many(names) => names,
            PkNames::One(name) => vec![name],
        }
    }
}

fn decode<T: for<'de> Deserialize<'de>>(row: CatalogRow) -> Result<T> {
    Ok(serde_json::from_value(Value::Object(row))?)
}

pub fn tables(rows: Vec<CatalogRow>) -> Result<Vec<TableDescriptor>> {
    rows.into_iter().map(decode::<TableDescriptor>).collect()
}

pub fn columns(rows: Vec<CatalogRow>) -> Result<Vec<ColumnDescriptor>> {
    rows.into_iter()
        .map(|row| {
            let row: ColumnRow = decode(row)?;
            Ok(ColumnDescriptor {
                logical_type: map_type(&row.data_type),
                table_name: row.table_name,
                column_name: row.column_name,
                data_type: row.data_type,
                nullable: Nullable::Yes,
            })
        })
        .collect()
}

pub fn primary_keys(rows: Vec<CatalogRow>) -> Result<Vec<PrimaryKeyDescriptor>> {
    rows.into_iter()
        .map(|row| {
            let row: PrimaryKeyRow = decode(row)?;
            let pk_names: Vec<String> = row.pk_names.into();
            Ok(PrimaryKeyDescriptor {
                owner: row.owner,
                table_name: row.table_name,
                pk_cols: pk_names.clone(),
                pk_name: pk_names.join("."),
                pk_names,
            })
        })
        .collect()
}
