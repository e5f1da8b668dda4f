use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;

use super::gemini::GenerateContent;
use super::{GitHubUrl, build_prompt};

/// Result of drafting one candidate URL. Failures carry the reason inline so
/// a bad URL never aborts the rest of the batch.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct UrlOutcome {
    pub url: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UrlOutcome {
    fn ok(url: &str, data: Value) -> Self {
        UrlOutcome {
            url: url.to_string(),
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn failed(url: &str, error: impl Into<String>) -> Self {
        UrlOutcome {
            url: url.to_string(),
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Drives the per-URL drafting pipeline against a generation backend.
pub struct Ingestor<G: GenerateContent> {
    gemini: G,
}

impl<G: GenerateContent> Ingestor<G> {
    pub fn new(gemini: G) -> Self {
        Self { gemini }
    }

    /// Drafts a catalog record for every URL, one generation call each.
    /// Results come back in input order; each entry succeeds or fails on its
    /// own.
    #[tracing::instrument(skip(self, urls))]
    pub async fn process_urls(&self, urls: &[String]) -> Vec<UrlOutcome> {
        let mut results = Vec::with_capacity(urls.len());
        for url in urls {
            let outcome = self.process_one(url).await;
            if let Some(error) = &outcome.error {
                warn!("Drafting {} failed: {}", url, error);
            }
            results.push(outcome);
        }
        results
    }

    async fn process_one(&self, url: &str) -> UrlOutcome {
        let repo: GitHubUrl = match url.parse() {
            Ok(repo) => repo,
            Err(_) => return UrlOutcome::failed(url, "Invalid GitHub URL format"),
        };

        debug!("Drafting catalog entry for {}", repo);

        let prompt = build_prompt(url, &repo);
        let text = match self.gemini.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => return UrlOutcome::failed(url, e.to_string()),
        };

        match serde_json::from_str::<Value>(strip_code_fences(&text)) {
            Ok(data) => UrlOutcome::ok(url, data),
            Err(e) => UrlOutcome::failed(url, format!("Failed to parse generated JSON: {e}")),
        }
    }
}

/// Strips a leading ```` ```json ```` or ```` ``` ```` fence (and the
/// matching trailing fence) that models sometimes wrap around their output.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    for fence in ["```json", "```"] {
        if let Some(rest) = trimmed.strip_prefix(fence) {
            return rest.strip_suffix("```").unwrap_or(rest).trim();
        }
    }
    trimmed
}
