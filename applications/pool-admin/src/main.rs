/// Soundpool Admin - import pipeline CLI
use clap::{Parser, Subcommand, ValueEnum};
use pool_admin::{AdminConfig, App, ImportRequest};
use pool_view::PageMode;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pool-admin")]
#[command(about = "Soundpool admin: import uploaded files into the catalog", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./pool.toml when present)
    #[arg(short, long, global = true, env = "POOL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Page,
    Infinite,
}

impl From<Mode> for PageMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Page => PageMode::Page,
            Mode::Infinite => PageMode::Infinite,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List importable files grouped by day
    List {
        /// Only list keys under this prefix
        #[arg(short, long)]
        prefix: Option<String>,
        /// Zero-based page index
        #[arg(long, default_value_t = 0)]
        page: usize,
        /// Override the configured paging mode
        #[arg(long, value_enum)]
        mode: Option<Mode>,
    },
    /// Run AI style detection on files that have none yet
    Detect {
        #[arg(short, long)]
        prefix: Option<String>,
        /// Re-detect one file through the single-item endpoint
        #[arg(short, long)]
        key: Option<String>,
    },
    /// Detect, select, and import files into the catalog
    Import {
        #[arg(short, long)]
        prefix: Option<String>,
        /// Import every listed file
        #[arg(long)]
        all: bool,
        /// Import every file in this folder
        #[arg(long)]
        folder: Option<String>,
        /// Import these keys (repeatable)
        #[arg(short, long = "key")]
        keys: Vec<String>,
        /// Label override for the selected files
        #[arg(long)]
        label: Option<String>,
        /// Style override for the selected files
        #[arg(long)]
        style: Option<String>,
        /// Import with whatever detections already exist
        #[arg(long)]
        skip_detection: bool,
    },
    /// Delete files from storage
    Delete {
        #[arg(short, long)]
        prefix: Option<String>,
        /// Keys to delete
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Browse catalog tracks grouped by day
    Tracks {
        /// One-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Override the configured paging mode
        #[arg(long, value_enum)]
        mode: Option<Mode>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pool_admin=info,pool_importer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AdminConfig::load(cli.config.as_deref())?;
    let app = App::new(config)?;

    match cli.command {
        Commands::List { prefix, page, mode } => {
            let out = app.list(prefix.as_deref(), page, mode.map(Into::into)).await?;
            print!("{out}");
        }
        Commands::Detect { prefix, key } => {
            let summary = app.detect(prefix.as_deref(), key.as_deref()).await?;
            println!(
                "Detected {} of {} ({} failed, {} skipped)",
                summary.detected, summary.requested, summary.failed, summary.skipped
            );
        }
        Commands::Import {
            prefix,
            all,
            folder,
            keys,
            label,
            style,
            skip_detection,
        } => {
            let report = app
                .import(ImportRequest {
                    prefix,
                    all,
                    folder,
                    keys,
                    label,
                    style,
                    skip_detection,
                })
                .await?;
            println!("Imported {} files: {}", report.imported, report.message);
        }
        Commands::Delete { prefix, keys } => {
            let removed = app.delete(prefix.as_deref(), &keys).await?;
            println!("Deleted {removed} files");
        }
        Commands::Tracks { page, mode } => {
            print!("{}", app.tracks(page, mode.map(Into::into)).await?);
        }
    }

    Ok(())
}
