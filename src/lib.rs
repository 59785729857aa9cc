//! Schema discovery for CrateDB.
//!
//! Builds CrateDB catalog queries, runs them through a [`CatalogClient`] and
//! normalizes the rows into the discovery records an ORM framework consumes:
//! tables, columns, primary keys and (always empty) foreign keys, plus a
//! folded model definition per table.

pub mod cli;
pub mod client;
pub mod discovery;
pub mod error;
pub mod model;
pub mod normalize;
pub mod query;
pub mod schema;
#[cfg(test)]
mod testutil;
pub mod typemap;

pub use client::{CatalogClient, CatalogRow, PgCatalogClient};
pub use discovery::{Discovery, DiscoveryConfig, DiscoveryOptions};
pub use error::{DiscoveryError, Result};
pub use model::ModelDefinition;
pub use schema::{ColumnDescriptor, ForeignKeyDescriptor, PrimaryKeyDescriptor, TableDescriptor};
pub use typemap::{map_type, LogicalType};
