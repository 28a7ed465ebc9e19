//! Server startup and middleware stack

use anyhow::Result;
use axum::serve;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::server::routing::create_router;
use crate::server::AppState;

/// Bind and serve the recipe search API
pub async fn start_server(addr: SocketAddr, state: AppState) -> Result<()> {
  let mode = state.mode;
  let app = create_router(state)
    .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()));

  let listener = TcpListener::bind(addr).await?;
  info!(%addr, mode = mode.as_str(), "recipe search server listening");

  serve(listener, app).await?;
  Ok(())
}
