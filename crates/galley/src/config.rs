//! Service configuration
//!
//! All settings arrive through clap arguments with environment fallbacks and
//! are passed down explicitly. Nothing here is global.

use clap::{Args, ValueEnum};
use std::net::SocketAddr;

/// Which search pipeline the search endpoint runs
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SearchMode {
  /// Fuzzy full-text matching over title and description
  Text,
  /// Embedding similarity over recipe descriptions
  Vector,
}

impl SearchMode {
  pub fn as_str(&self) -> &'static str {
    match self {
      SearchMode::Text => "text",
      SearchMode::Vector => "vector",
    }
  }
}

/// HTTP server settings
#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
  /// Server bind address
  #[arg(long, env = "GALLEY_BIND", default_value = "127.0.0.1:4780")]
  pub bind: SocketAddr,

  /// Search pipeline for the search endpoint
  #[arg(long, value_enum, env = "GALLEY_SEARCH_MODE", default_value = "text")]
  pub mode: SearchMode,
}

/// Remote embedding provider settings
#[derive(Clone, Debug, Args)]
pub struct EmbeddingsConfig {
  /// Embeddings API endpoint
  #[arg(
    long = "embeddings-url",
    env = "GALLEY_EMBEDDINGS_URL",
    default_value = "https://api.openai.com/v1/embeddings"
  )]
  pub url: String,

  /// Embedding model identifier
  #[arg(
    long = "embeddings-model",
    env = "GALLEY_EMBEDDINGS_MODEL",
    default_value = "text-embedding-3-small"
  )]
  pub model: String,

  /// API key for the embeddings endpoint
  #[arg(long = "api-key", env = "GALLEY_API_KEY")]
  pub api_key: Option<String>,

  /// Expected embedding dimensionality
  #[arg(long = "embeddings-dimension", env = "GALLEY_EMBEDDINGS_DIMENSION", default_value_t = 1536)]
  pub dimension: usize,
}
