#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod command;

use command::{CommandStrategy, InfoStrategy, InitStrategy, RunInput, RunStrategy, VersionStrategy};

#[derive(Parser)]
#[command(name = "hanzi")]
#[command(
    about = "Export Anki review lapses with word embeddings to CSV",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the review set, attach embeddings and write the CSV
    Run {
        /// Config file (defaults to ~/hanzi/config.json, then built-in defaults)
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,

        /// Output CSV path
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// word2vec text table
        #[arg(short = 'm', long)]
        model: Option<PathBuf>,

        /// Anki note type to search
        #[arg(long)]
        note_type: Option<String>,

        /// Restrict the search to one deck
        #[arg(long)]
        deck: Option<String>,

        /// AnkiConnect endpoint
        #[arg(long)]
        endpoint: Option<String>,
    },
    /// Initialize configuration
    Init,
    /// Show effective configuration and AnkiConnect status
    Info {
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,
    },
    /// Show version
    Version,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            output,
            model,
            note_type,
            deck,
            endpoint,
        } => {
            RunStrategy
                .execute(RunInput {
                    config,
                    output,
                    model,
                    note_type,
                    deck,
                    endpoint,
                })
                .await
        }
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Info { config } => InfoStrategy.execute(config).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
