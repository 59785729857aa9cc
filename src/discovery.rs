use serde::Deserialize;
use tracing::debug;

use crate::client::CatalogClient;
use crate::error::{DiscoveryError, Result};
use crate::model::{self, ModelDefinition};
use crate::normalize;
use crate::query;
use crate::schema::{ColumnDescriptor, ForeignKeyDescriptor, PrimaryKeyDescriptor, TableDescriptor};

/// Settings fixed when the discovery component is built.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryConfig {
    /// Owner used when a call names neither `owner` nor `schema`.
    pub default_owner: Option<String>,
}

/// Per-call options. Zero and empty values count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DiscoveryOptions {
    pub owner: Option<String>,
    pub schema: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub skip: Option<u64>,
}

impl DiscoveryOptions {
    /// Explicit owner from `owner`, then `schema`.
    fn explicit_owner(&self) -> Option<&str> {
        self.owner
            .as_deref()
            .filter(|o| !o.is_empty())
            .or_else(|| self.schema.as_deref().filter(|s| !s.is_empty()))
    }
}

pub struct Discovery<C> {
    client: C,
    config: DiscoveryConfig,
}

impl<C: CatalogClient> Discovery<C> {
    pub fn new(client: C, config: DiscoveryConfig) -> Self {
        Self { client, config }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Owner precedence: `options.owner`, `options.schema`, the configured
    /// default owner, then none.
    pub fn resolve_owner<'a>(&'a self, options: &'a DiscoveryOptions) -> Option<&'a str> {
        options.explicit_owner().or_else(|| {
            self.config
                .default_owner
                .as_deref()
                .filter(|o| !o.is_empty())
        })
    }

    /// List the tables of the `doc` schema, ordered by name.
    pub async fn discover_model_definitions(
        &self,
        options: &DiscoveryOptions,
    ) -> Result<Vec<TableDescriptor>> {
        let sql = query::list_tables_query(options);
        let rows = self.run(&sql).await?;
        let tables = normalize::tables(rows)?;
        debug!("Found {} tables", tables.len());
        Ok(tables)
    }

    /// List the columns of `table`, ordered by column name.
    pub async fn discover_model_properties(
        &self,
        table: &str,
        options: &DiscoveryOptions,
    ) -> Result<Vec<ColumnDescriptor>> {
        validate_table(table)?;
        let owner = self.resolve_owner(options);
        let sql = query::list_columns_query(owner, Some(table));
        let rows = self.run(&sql).await?;
        let columns = normalize::columns(rows)?;
        debug!("Found {} columns in {}", columns.len(), table);
        Ok(columns)
    }

    /// List the primary key of `table` under the resolved owner.
    pub async fn discover_primary_keys(
        &self,
        table: &str,
        options: &DiscoveryOptions,
    ) -> Result<Vec<PrimaryKeyDescriptor>> {
        validate_table(table)?;
        let owner = self.resolve_owner(options);
        let sql = query::primary_keys_query(owner, Some(table));
        let rows = self.run(&sql).await?;
        normalize::primary_keys(rows)
    }

    /// CrateDB has no foreign keys; always empty.
    pub async fn discover_foreign_keys(
        &self,
        _table: &str,
        _options: &DiscoveryOptions,
    ) -> Result<Vec<ForeignKeyDescriptor>> {
        Ok(Vec::new())
    }

    /// Foreign keys referencing `table`; always empty.
    pub async fn discover_exported_foreign_keys(
        &self,
        _table: &str,
        _options: &DiscoveryOptions,
    ) -> Result<Vec<ForeignKeyDescriptor>> {
        Ok(Vec::new())
    }

    /// Build the model definition for `table` from its columns and primary key.
    ///
    /// A table without columns does not exist; the key query is skipped.
    pub async fn discover_schema(
        &self,
        table: &str,
        options: &DiscoveryOptions,
    ) -> Result<ModelDefinition> {
        let columns = self.discover_model_properties(table, options).await?;
        if columns.is_empty() {
            return Err(DiscoveryError::TableNotFound(table.to_string()));
        }
        let primary_keys = self.discover_primary_keys(table, options).await?;
        let owner = self
            .resolve_owner(options)
            .or_else(|| primary_keys.first().map(|pk| pk.owner.as_str()))
            .unwrap_or(query::DEFAULT_NAMESPACE);
        Ok(model::build_model_definition(
            owner,
            table,
            &columns,
            &primary_keys,
        ))
    }

    async fn run(&self, sql: &str) -> Result<Vec<crate::client::CatalogRow>> {
        debug!("Executing catalog query: {}", sql);
        self.client.execute(sql).await
    }
}

fn validate_table(table: &str) -> Result<()> {
    if table.is_empty() {
        return Err(DiscoveryError::InvalidArgument(
            "table is a required non-empty string".to_string(),
        ));
    }
    Ok(())
}
