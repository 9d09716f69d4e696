//! # pdfshelf CLI
//!
//! One binary for the whole catalogue: each `serve` subcommand starts one
//! of the services, and `search`/`indexes` query the external index
//! directly from the terminal.
//!
//! ## Usage
//!
//! ```bash
//! pdfshelf --config ./config/pdfshelf.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `pdfshelf search "<query>"` | Search the index and print hits |
//! | `pdfshelf indexes` | List indexes (uid and primary key) |
//! | `pdfshelf serve api` | Start the search gateway |
//! | `pdfshelf serve documents` | Start the PDF blob server |
//! | `pdfshelf serve thumbnails` | Start the thumbnail blob server |
//! | `pdfshelf serve frontend` | Start the browser-facing proxy |

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use pdfshelf::blob::BlobKind;
use pdfshelf::{blob_server, config, frontend, gateway, search};

/// pdfshelf CLI — a full-text PDF catalogue: search gateway, blob
/// servers, and frontend proxy.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. Every setting has a default, so a missing file section still
/// yields a runnable service.
#[derive(Parser)]
#[command(
    name = "pdfshelf",
    about = "pdfshelf — a full-text PDF catalogue: search gateway, blob servers, and frontend proxy",
    version,
    long_about = "pdfshelf serves a read-only PDF catalogue: a search gateway that normalizes \
    queries and forwards them to an external Meilisearch-compatible index, blob servers that \
    stream stored PDFs and thumbnails by identifier, and a frontend proxy that relays a reduced \
    search surface to browsers."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/pdfshelf.toml`. Index, storage, and server
    /// settings are read from this file.
    #[arg(long, global = true, default_value = "./config/pdfshelf.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Search the catalogue index.
    ///
    /// Sends the query to the external index and prints titles, authors,
    /// and content ids for each hit.
    Search {
        /// The search query string. Empty matches all documents.
        query: String,

        /// Index to search. Defaults to `index.default_index` from config.
        #[arg(long)]
        index: Option<String>,

        /// Maximum number of hits to return.
        #[arg(long)]
        limit: Option<u32>,

        /// Number of hits to skip.
        #[arg(long)]
        offset: Option<u32>,
    },

    /// List indexes the external engine reports.
    ///
    /// Prints only uid and primary key per index; settings and counts are
    /// never fetched.
    Indexes,

    /// Start one of the catalogue services.
    Serve {
        #[command(subcommand)]
        service: ServeService,
    },
}

/// Server subcommands.
#[derive(Subcommand)]
enum ServeService {
    /// Start the search gateway (GET/POST /search, /indexes).
    Api,
    /// Start the PDF blob server (GET /{id} → application/pdf).
    Documents,
    /// Start the thumbnail blob server (GET /{id} → image/png).
    Thumbnails,
    /// Start the browser-facing proxy (GET /api/search).
    Frontend,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // A missing config file falls back to full defaults; an existing but
    // invalid file is still an error.
    let cfg = if cli.config.exists() {
        config::load_config(&cli.config)?
    } else {
        config::Config::default()
    };

    match cli.command {
        Commands::Search {
            query,
            index,
            limit,
            offset,
        } => {
            search::run_search(&cfg, &query, index, limit, offset).await?;
        }
        Commands::Indexes => {
            search::run_list_indexes(&cfg).await?;
        }
        Commands::Serve { service } => match service {
            ServeService::Api => {
                gateway::run_gateway(&cfg).await?;
            }
            ServeService::Documents => {
                blob_server::run_blob_server(&cfg, BlobKind::Document).await?;
            }
            ServeService::Thumbnails => {
                blob_server::run_blob_server(&cfg, BlobKind::Thumbnail).await?;
            }
            ServeService::Frontend => {
                frontend::run_frontend(&cfg).await?;
            }
        },
    }

    Ok(())
}
