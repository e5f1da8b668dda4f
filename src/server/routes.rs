use axum::Json;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;

use super::AppContext;
use crate::catalog::{Instructions, Metadata, Repository, SortKey, query, sort_repositories};
use crate::error::CatalogError;
use crate::ingest::gemini::GenerateContent;
use crate::ingest::{UrlOutcome, filter_github_urls};

#[derive(Deserialize, Debug)]
pub struct ReposQuery {
    pub sort: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct ReposResponse {
    pub repositories: Vec<Repository>,
    pub metadata: Metadata,
}

/// `GET /api/repos`: the validated catalog, sorted newest-first by the
/// requested key, with freshness metadata computed per response.
pub async fn get_repos<G: GenerateContent>(
    State(ctx): State<Arc<AppContext<G>>>,
    Query(params): Query<ReposQuery>,
) -> Result<Json<ReposResponse>, CatalogError> {
    let repos = ctx.repos.load()?;
    let sorted = sort_repositories(&repos, SortKey::parse(params.sort.as_deref()));
    let metadata = query::metadata(sorted.len());
    Ok(Json(ReposResponse {
        repositories: sorted,
        metadata,
    }))
}

/// `GET /api/instructions/{id}`: installation instructions for one
/// repository.
pub async fn get_instructions<G: GenerateContent>(
    State(ctx): State<Arc<AppContext<G>>>,
    Path(id): Path<String>,
) -> Result<Json<Instructions>, CatalogError> {
    Ok(Json(ctx.instructions.lookup(&id)?))
}

#[derive(Deserialize, Debug)]
pub struct AddRepoRequest {
    pub urls: Vec<String>,
}

#[derive(Serialize, Debug)]
pub struct AddRepoResponse {
    pub success: bool,
    pub results: Vec<UrlOutcome>,
    pub message: String,
}

/// `POST /api/add-repo`: draft catalog entries for the given URLs. Each URL
/// succeeds or fails on its own; nothing is persisted here, the drafts must
/// be committed to the store by hand.
pub async fn add_repo<G: GenerateContent>(
    State(ctx): State<Arc<AppContext<G>>>,
    Json(body): Json<AddRepoRequest>,
) -> Result<Json<AddRepoResponse>, CatalogError> {
    let github_urls = filter_github_urls(&body.urls);
    if github_urls.is_empty() {
        return Err(CatalogError::InvalidData {
            message: "No valid GitHub repository URLs provided".to_string(),
            violations: vec![],
        });
    }

    let ingestor = ctx.ingestor.as_ref().ok_or_else(|| {
        CatalogError::Configuration(
            "GEMINI_API_KEY not configured. Please set up the environment variable.".to_string(),
        )
    })?;

    let results = ingestor.process_urls(&github_urls).await;
    let message = format!(
        "Processed {} repository URL(s). Manual commit required to persist data.",
        results.len()
    );
    Ok(Json(AddRepoResponse {
        success: true,
        results,
        message,
    }))
}

/// `GET /`: service identity and the endpoint index.
pub async fn service_info() -> Json<Value> {
    Json(json!({
        "name": "GitHub Star Manager API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "repos": "/api/repos",
            "instructions": "/api/instructions/{id}",
            "addRepo": "/api/add-repo",
        },
    }))
}
