use clap::{Parser, ValueEnum};

use crate::discovery::DiscoveryOptions;
use crate::error::DiscoveryError;

/// Default CrateDB PostgreSQL wire port.
const DEFAULT_PORT: u16 = 5432;

/// Discover table, column and key metadata from a CrateDB cluster.
///
/// Results are printed as JSON in the ORM discovery format.
#[derive(Parser, Debug)]
#[command(name = "crate-discover", version, about)]
pub struct Cli {
    /// Cluster URL (e.g. crate://crate@localhost:5432/doc). The path names the default schema.
    #[arg(env = "CRATE_URL")]
    pub url: String,

    /// What to discover
    #[arg(long, value_enum, default_value_t = Target::Tables)]
    pub discover: Target,

    /// Table to inspect (required for columns, primary-keys and schema)
    #[arg(long)]
    pub table: Option<String>,

    /// Owner (schema) to filter by; wins over --schema
    #[arg(long)]
    pub owner: Option<String>,

    /// Schema to filter by
    #[arg(long)]
    pub schema: Option<String>,

    /// Maximum number of tables to list
    #[arg(long)]
    pub limit: Option<u64>,

    /// Number of tables to skip
    #[arg(long)]
    pub offset: Option<u64>,

    /// Alias for --offset
    #[arg(long)]
    pub skip: Option<u64>,

    /// Output file (default: stdout)
    #[arg(long)]
    pub outfile: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Target {
    Tables,
    Columns,
    PrimaryKeys,
    ForeignKeys,
    ExportedForeignKeys,
    Schema,
}

/// Parsed connection configuration.
#[derive(Debug, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// `postgres://` URL handed to the driver.
    pub url: String,
    /// Database path of the URL; the default owner for discovery.
    pub database: Option<String>,
}

impl Cli {
    /// Collect the per-call discovery options from the flags.
    pub fn discovery_options(&self) -> DiscoveryOptions {
        DiscoveryOptions {
            owner: self.owner.clone(),
            schema: self.schema.clone(),
            limit: self.limit,
            offset: self.offset,
            skip: self.skip,
        }
    }

    /// The --table flag for the chosen target. Foreign-key targets accept no
    /// table; every other table-scoped target errors without one.
    pub fn table_arg(&self) -> Result<&str, DiscoveryError> {
        match (self.discover, self.table.as_deref()) {
            (Target::ForeignKeys | Target::ExportedForeignKeys, table) => {
                Ok(table.unwrap_or_default())
            }
            (_, Some(t)) if !t.is_empty() => Ok(t),
            _ => Err(DiscoveryError::InvalidArgument(format!(
                "--table is required for --discover {}",
                self.discover
                    .to_possible_value()
                    .map(|v| v.get_name().to_string())
                    .unwrap_or_default()
            ))),
        }
    }

    /// Parse the URL into a `ConnectionConfig`.
    pub fn parse_connection(&self) -> Result<ConnectionConfig, DiscoveryError> {
        parse_connection_url(&self.url)
    }
}

pub fn parse_connection_url(raw: &str) -> Result<ConnectionConfig, DiscoveryError> {
    let rest = raw
        .strip_prefix("crate://")
        .or_else(|| raw.strip_prefix("postgresql://"))
        .or_else(|| raw.strip_prefix("postgres://"))
        .ok_or_else(|| {
            DiscoveryError::UnsupportedScheme(
                raw.split("://").next().unwrap_or("unknown").to_string(),
            )
        })?;

    let normalized = format!("postgres://{rest}");
    let mut parsed = url::Url::parse(&normalized)
        .map_err(|e| DiscoveryError::Connection(format!("Invalid URL: {e}")))?;

    if parsed.host_str().is_none() {
        return Err(DiscoveryError::Connection(
            "URL must include a host".to_string(),
        ));
    }
    if parsed.port().is_none() {
        parsed
            .set_port(Some(DEFAULT_PORT))
            .map_err(|_| DiscoveryError::Connection("Cannot set port on URL".to_string()))?;
    }

    let database = percent_encoding::percent_decode_str(parsed.path().trim_start_matches('/'))
        .decode_utf8_lossy()
        .into_owned();

    Ok(ConnectionConfig {
        url: parsed.to_string(),
        database: (!database.is_empty()).then_some(database),
    })
}
