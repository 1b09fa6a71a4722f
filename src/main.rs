//! artwork-table CLI.
//!
//! Serves the artwork table page, or runs one table operation against the
//! upstream API and prints the result as JSON.

use std::net::SocketAddr;
use std::path::PathBuf;

use artwork_table::{ArtworkTable, Config, Error, Result, run_with_shutdown};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "artwork-table")]
#[command(about = "Paged, selectable table over a remote artwork collection")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file
    #[arg(short, long, env = "ARTWORK_TABLE_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Upstream API base URL (overrides the configuration file)
    #[arg(long, env = "ARTWORK_TABLE_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the table page and JSON API until SIGTERM/SIGINT.
    Serve {
        /// Address to listen on
        #[arg(short, long)]
        bind: Option<SocketAddr>,
    },

    /// Fetch one page and print the table view.
    Page {
        /// 1-based page number
        #[arg(default_value = "1")]
        page: u32,
        /// Rows per page (default from configuration)
        #[arg(short, long)]
        rows: Option<u32>,
    },

    /// Select the first N rows across pages and print the selection.
    SelectFirst {
        /// Number of rows to select
        #[arg(allow_negative_numbers = true)]
        count: i64,
        /// Page size used while scanning (default from configuration)
        #[arg(short, long)]
        rows: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing (RUST_LOG wins over --verbose)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("artwork_table=debug,tower_http=debug,info")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(base_url) = cli.base_url {
        config.source.base_url = base_url;
    }

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.api.bind_address = bind;
            }
            let table = ArtworkTable::new(config)?;
            run_with_shutdown(table).await?;
        }

        Commands::Page { page, rows } => {
            let rows = rows.unwrap_or(config.table.default_page_size);
            let table = ArtworkTable::new(config)?;
            let view = table.load_page(page, rows).await?;
            info!(
                page = view.page,
                rows = view.rows.len(),
                total = view.total_records,
                "Fetched page"
            );
            print_json(&view)?;
        }

        Commands::SelectFirst { count, rows } => {
            let table = ArtworkTable::new(config)?;
            if let Some(rows) = rows {
                // Scanning uses the displayed page size
                table.load_page(1, rows).await?;
            }
            let report = table.select_first(usize::try_from(count.max(0)).unwrap_or(0)).await?;
            info!(
                added = report.added,
                pages_scanned = report.pages_scanned,
                "Selection finished"
            );
            print_json(&serde_json::json!({
                "report": report,
                "selected": table.selected().await,
            }))?;
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(Error::Serialization)?;
    println!("{json}");
    Ok(())
}
