//! HTTP surface: an axum router over the stores and the ingestion adapter.
//!
//! Handlers are stateless; every request re-reads its backing file, so no
//! shared mutable state crosses requests.

mod error;
mod routes;

use anyhow::Result;
use axum::{
    Router,
    routing::{get, post},
};
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::ingest::Ingestor;
use crate::ingest::gemini::GenerateContent;
use crate::store::{InstructionStore, RepoStore};

/// Everything the handlers need. The ingestor is optional: without a
/// configured API key the catalog endpoints still work and only the
/// ingestion path reports a configuration error.
pub struct AppContext<G: GenerateContent> {
    pub repos: RepoStore,
    pub instructions: InstructionStore,
    pub ingestor: Option<Ingestor<G>>,
}

/// Binds the listener and serves until the process is stopped.
pub async fn serve<G: GenerateContent + 'static>(
    ctx: Arc<AppContext<G>>,
    port: u16,
) -> Result<()> {
    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    let router = build_router(ctx);

    info!("Server starting on http://localhost:{}", port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

pub fn build_router<G: GenerateContent + 'static>(ctx: Arc<AppContext<G>>) -> Router {
    Router::new()
        .route("/", get(routes::service_info))
        .route("/api/repos", get(routes::get_repos::<G>))
        .route("/api/instructions/{id}", get(routes::get_instructions::<G>))
        .route("/api/add-repo", post(routes::add_repo::<G>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}
