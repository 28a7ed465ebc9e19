use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use galley::cli;
use galley::config::{EmbeddingsConfig, ServerConfig};

#[derive(Parser)]
#[command(name = "galley")]
#[command(about = "Galley - Recipe Search Service\nAutocomplete, fuzzy and vector search, embedding backfill")]
#[command(version)]
struct Cli {
  /// Enable verbose logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Start the HTTP search server
  Serve {
    #[command(flatten)]
    server: ServerConfig,
    #[command(flatten)]
    embeddings: EmbeddingsConfig,
    /// Use the deterministic offline embedding provider
    #[arg(long)]
    offline: bool,
  },
  /// Backfill embeddings for recipes that lack them
  Embed {
    #[command(flatten)]
    embeddings: EmbeddingsConfig,
    /// Concurrent embedding requests per batch
    #[arg(long, default_value_t = galley::backfill::DEFAULT_BATCH_SIZE)]
    batch_size: usize,
    /// Pause between consecutive batches, in milliseconds
    #[arg(long, default_value_t = 2000)]
    delay_ms: u64,
    /// Use the deterministic offline embedding provider
    #[arg(long)]
    offline: bool,
  },
  /// Fuzzy-search the seed corpus from the command line
  Search {
    /// Search terms (space-separated)
    #[arg(required = true)]
    terms: Vec<String>,
  },
  /// Autocomplete a title prefix against the seed corpus
  Suggest {
    /// Partial title to complete
    prefix: String,
  },
  /// Show the seed corpus
  Seed,
}

async fn handle(command: Command) -> Result<()> {
  match command {
    Command::Serve { server, embeddings, offline } => cli::serve(server, embeddings, offline).await,
    Command::Embed { embeddings, batch_size, delay_ms, offline } => {
      cli::embed(embeddings, batch_size, delay_ms, offline).await
    }
    Command::Search { terms } => cli::search(&terms).await,
    Command::Suggest { prefix } => cli::suggest(&prefix).await,
    Command::Seed => cli::seed(),
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("galley=info,warn"))
  };
  tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

  handle(cli.command).await?;
  Ok(())
}
