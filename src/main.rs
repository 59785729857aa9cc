use std::fs;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate_discover::cli::{Cli, Target};
use crate_discover::{Discovery, DiscoveryConfig, DiscoveryOptions, PgCatalogClient};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = cli.parse_connection()?;
    let options = cli.discovery_options();

    tracing::debug!("Connecting to cluster...");
    let client = PgCatalogClient::connect(&config.url).await?;
    let discovery = Discovery::new(
        client,
        DiscoveryConfig {
            default_owner: config.database,
        },
    );

    tracing::debug!("Discovering {:?}...", cli.discover);
    let result = run(&cli, &discovery, &options).await;
    discovery.client().close().await;
    let output = result?;

    match cli.outfile {
        Some(ref path) => {
            fs::write(path, &output)?;
            tracing::info!("Output written to {path}");
        }
        None => {
            println!("{output}");
        }
    }

    Ok(())
}

async fn run(
    cli: &Cli,
    discovery: &Discovery<PgCatalogClient>,
    options: &DiscoveryOptions,
) -> Result<String> {
    let json = match cli.discover {
        Target::Tables => {
            if cli.table.is_some() {
                tracing::warn!("--table is ignored when listing tables");
            }
            serde_json::to_string_pretty(&discovery.discover_model_definitions(options).await?)?
        }
        Target::Columns => serde_json::to_string_pretty(
            &discovery
                .discover_model_properties(cli.table_arg()?, options)
                .await?,
        )?,
        Target::PrimaryKeys => serde_json::to_string_pretty(
            &discovery
                .discover_primary_keys(cli.table_arg()?, options)
                .await?,
        )?,
        Target::ForeignKeys => serde_json::to_string_pretty(
            &discovery
                .discover_foreign_keys(cli.table_arg()?, options)
                .await?,
        )?,
        Target::ExportedForeignKeys => serde_json::to_string_pretty(
            &discovery
                .discover_exported_foreign_keys(cli.table_arg()?, options)
                .await?,
        )?,
        Target::Schema => serde_json::to_string_pretty(
            &discovery
                .discover_schema(cli.table_arg()?, options)
                .await?,
        )?,
    };
    Ok(json)
}
