use async_trait::async_trait;
use serde_json::{Map, Number, Value};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Column, Row, TypeInfo, ValueRef};

use crate::error::Result;

/// One catalog result row: column label to value, in select-list order.
pub type CatalogRow = Map<String, Value>;

/// Executes catalog statements. Discovery depends on nothing else.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn execute(&self, sql: &str) -> Result<Vec<CatalogRow>>;
}

/// Catalog client over CrateDB's PostgreSQL wire protocol.
#[derive(Debug, Clone)]
pub struct PgCatalogClient {
    pool: PgPool,
}

impl PgCatalogClient {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a single-connection pool to the given `postgres://` URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new().max_connections(1).connect(url).await?;
        Ok(Self { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl CatalogClient for PgCatalogClient {
    async fn execute(&self, sql: &str) -> Result<Vec<CatalogRow>> {
        let rows = sqlx::query(sql).fetch_all(&self.pool).await?;
        let mut out = Vec::with_capacity(rows.len());
        for row in &rows {
            out.push(row_to_map(row)?);
        }
        Ok(out)
    }
}

fn row_to_map(row: &PgRow) -> Result<CatalogRow> {
    let mut map = Map::new();
    for column in row.columns() {
        let value = decode_cell(row, column.ordinal(), column.type_info().name())?;
        map.insert(column.name().to_string(), value);
    }
    Ok(map)
}

/// Wire types that catalog columns come back as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Bool,
    Int2,
    Int4,
    Int8,
    Float4,
    Float8,
    Text,
    TextArray,
}

fn cell_kind(type_name: &str) -> Option<CellKind> {
    match type_name {
        "BOOL" => Some(CellKind::Bool),
        "INT2" => Some(CellKind::Int2),
        "INT4" => Some(CellKind::Int4),
        "INT8" => Some(CellKind::Int8),
        "FLOAT4" => Some(CellKind::Float4),
        "FLOAT8" => Some(CellKind::Float8),
        "TEXT" | "VARCHAR" | "NAME" | "BPCHAR" => Some(CellKind::Text),
        "TEXT[]" | "VARCHAR[]" | "NAME[]" => Some(CellKind::TextArray),
        _ => None,
    }
}

/// Decode one cell by its wire type. Types outside the catalog set are a
/// decode error rather than a guess.
fn decode_cell(
    row: &PgRow,
    idx: usize,
    type_name: &str,
) -> std::result::Result<Value, sqlx::Error> {
    if row.try_get_raw(idx)?.is_null() {
        return Ok(Value::Null);
    }
    let kind = cell_kind(type_name).ok_or_else(|| {
        sqlx::Error::Decode(format!("unsupported catalog column type {type_name}").into())
    })?;
    let value = match kind {
        CellKind::Bool => Value::Bool(row.try_get::<bool, _>(idx)?),
        CellKind::Int2 => Value::from(row.try_get::<i16, _>(idx)?),
        CellKind::Int4 => Value::from(row.try_get::<i32, _>(idx)?),
        CellKind::Int8 => Value::from(row.try_get::<i64, _>(idx)?),
        CellKind::Float4 => float_value(f64::from(row.try_get::<f32, _>(idx)?)),
        CellKind::Float8 => float_value(row.try_get::<f64, _>(idx)?),
        CellKind::Text => Value::String(row.try_get::<String, _>(idx)?),
        CellKind::TextArray => Value::from(row.try_get::<Vec<String>, _>(idx)?),
    };
    Ok(value)
}

fn float_value(f: f64) -> Value {
    Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
}
