use crate::discovery::DiscoveryOptions;

/// Schema that holds user tables in CrateDB.
pub const DEFAULT_NAMESPACE: &str = "doc";

/// Render a value as a SQL string literal, doubling embedded single quotes.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Append `ORDER BY` and CrateDB's `LIMIT <offset>[,<limit>]` to a statement.
///
/// The limit clause is rendered only when one of offset, skip or limit is
/// set and non-zero. Offset wins over skip.
pub fn paginate(sql: &str, order_by: &str, options: &DiscoveryOptions) -> String {
    let offset = options.offset.filter(|n| *n > 0);
    let skip = options.skip.filter(|n| *n > 0);
    let limit = options.limit.filter(|n| *n > 0);

    let mut out = sql.to_string();
    if !order_by.is_empty() {
        out.push_str(" ORDER BY ");
        out.push_str(order_by);
    }
    if offset.is_some() || skip.is_some() || limit.is_some() {
        out.push_str(&format!(" LIMIT {}", offset.or(skip).unwrap_or(0)));
        if let Some(limit) = limit {
            out.push_str(&format!(",{limit}"));
        }
    }
    out
}

/// List every table in the `doc` schema, ordered by name.
pub fn list_tables_query(options: &DiscoveryOptions) -> String {
    let sql = format!(
        "SELECT 'table' AS \"type\", table_name AS \"name\", schema_name AS \"owner\" \
         FROM information_schema.tables WHERE schema_name = {}",
        quote_literal(DEFAULT_NAMESPACE)
    );
    paginate(&sql, "table_name", options)
}

/// List columns, optionally restricted to one table, ordered by column name.
///
/// `_owner` is not applied: the rendered statement matches columns of the
/// given table name in every schema.
pub fn list_columns_query(_owner: Option<&str>, table: Option<&str>) -> String {
    let mut sql = String::from(
        "SELECT table_name AS \"tableName\", column_name AS \"columnName\", \
         data_type AS \"dataType\" FROM information_schema.columns",
    );
    if let Some(table) = table {
        sql.push_str(&format!(" WHERE table_name = {}", quote_literal(table)));
    }
    paginate(&sql, "column_name", &DiscoveryOptions::default())
}

/// List primary key constraints, optionally filtered by owner and table.
pub fn primary_keys_query(owner: Option<&str>, table: Option<&str>) -> String {
    let mut sql = String::from(
        "SELECT schema_name AS \"owner\", table_name AS \"tableName\", \
         constraint_name AS \"pkNames\" FROM information_schema.table_constraints \
         WHERE constraint_type = 'PRIMARY_KEY'",
    );
    if let Some(owner) = owner {
        sql.push_str(&format!(" AND schema_name = {}", quote_literal(owner)));
    }
    if let Some(table) = table {
        sql.push_str(&format!(" AND table_name = {}", quote_literal(table)));
    }
    sql.push_str(" ORDER BY schema_name, table_name");
    sql
}
