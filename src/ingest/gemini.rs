//! Gemini `generateContent` client.
//!
//! One attempt per call with a bounded timeout; there is deliberately no
//! retry here, a failed URL is reported in its own result entry instead.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::CatalogError;

/// Default Gemini API base URL.
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Model used for repository analysis.
pub const GENERATION_MODEL: &str = "gemini-1.5-flash";

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Explicit configuration for the generation service. The key is handed in
/// at construction; business logic never reads the environment.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub api_url: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerateContent: Send + Sync {
    /// Sends a prompt and returns the first candidate's text.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

pub struct Gemini {
    client: Client,
    api_url: String,
    api_key: String,
}

impl Gemini {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent("ghsm")
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        let api_url = config
            .api_url
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Ok(Self {
            client,
            api_url,
            api_key: config.api_key,
        })
    }
}

#[async_trait]
impl GenerateContent for Gemini {
    #[tracing::instrument(skip(self, prompt))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", self.api_url, GENERATION_MODEL);

        debug!("Requesting content generation from {}...", url);

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.2,
                top_k: 40,
                top_p: 0.95,
                max_output_tokens: 2048,
            },
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .context("Failed to send request to Gemini API")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow::Error::from(CatalogError::External(format!(
                "Gemini API error: {} - {}",
                status.as_u16(),
                text
            ))));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .context("Failed to parse JSON response from Gemini API")?;

        parsed.first_text().ok_or_else(|| {
            anyhow::Error::from(CatalogError::External(
                "No response from Gemini API".to_string(),
            ))
        })
    }
}

#[derive(Serialize, Debug)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize, Debug, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Debug)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize, Debug, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug, Default)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

impl GenerateResponse {
    fn first_text(&self) -> Option<String> {
        let text = &self.candidates.first()?.content.parts.first()?.text;
        if text.is_empty() {
            None
        } else {
            Some(text.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gemini_at(url: &str) -> Gemini {
        Gemini::new(GeminiConfig {
            api_key: "test-key".to_string(),
            api_url: Some(url.to_string()),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_generate_returns_first_candidate_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-1.5-flash:generateContent?key=test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"candidates": [{"content": {"parts": [{"text": "{\"id\": \"foo-bar\"}"}]}}]}"#,
            )
            .create_async()
            .await;

        let text = gemini_at(&server.url()).generate("analyze").await.unwrap();

        mock.assert_async().await;
        assert_eq!(text, r#"{"id": "foo-bar"}"#);
    }

    #[tokio::test]
    async fn test_generate_sends_generation_config() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-1.5-flash:generateContent?key=test-key")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"generationConfig": {"temperature": 0.2, "maxOutputTokens": 2048}}"#
                    .to_string(),
            ))
            .with_status(200)
            .with_body(r#"{"candidates": [{"content": {"parts": [{"text": "ok"}]}}]}"#)
            .create_async()
            .await;

        gemini_at(&server.url()).generate("analyze").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_api_error_is_external() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-1.5-flash:generateContent?key=test-key")
            .with_status(429)
            .with_body("quota exceeded")
            .create_async()
            .await;

        let err = gemini_at(&server.url()).generate("analyze").await.unwrap_err();

        mock.assert_async().await;
        assert!(err.downcast_ref::<CatalogError>().is_some());
        assert!(err.to_string().contains("Gemini API error: 429"));
    }

    #[tokio::test]
    async fn test_generate_empty_candidates_is_external() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/gemini-1.5-flash:generateContent?key=test-key")
            .with_status(200)
            .with_body(r#"{"candidates": []}"#)
            .create_async()
            .await;

        let err = gemini_at(&server.url()).generate("analyze").await.unwrap_err();
        assert!(err.to_string().contains("No response from Gemini API"));
    }

    #[tokio::test]
    async fn test_generate_empty_text_is_external() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/gemini-1.5-flash:generateContent?key=test-key")
            .with_status(200)
            .with_body(r#"{"candidates": [{"content": {"parts": [{"text": ""}]}}]}"#)
            .create_async()
            .await;

        let err = gemini_at(&server.url()).generate("analyze").await.unwrap_err();
        assert!(err.to_string().contains("No response"));
    }

    #[test]
    fn test_default_api_url_applied() {
        let gemini = Gemini::new(GeminiConfig {
            api_key: "k".to_string(),
            api_url: None,
        })
        .unwrap();
        assert_eq!(gemini.api_url, DEFAULT_API_URL);
    }
}
