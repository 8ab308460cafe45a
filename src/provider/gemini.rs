use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::Provider;
use crate::config::Config;
use crate::errors::PlanError;
use crate::wire::{GenerateRequest, GenerateResponse};

/// Longest slice of an error body carried into `PlanError::Transport`.
const BODY_EXCERPT: usize = 300;

pub struct GeminiProvider {
    client: Client,
    api_base: String,
    model: String,
    api_key: String,
}

impl GeminiProvider {
    pub fn new(cfg: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(cfg.timeout())
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            client,
            api_base: cfg.api_base.clone(),
            model: cfg.model.clone(),
            api_key: cfg.api_key()?.to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn generate(&self, prompt: &str) -> Result<String, PlanError> {
        let url = self.endpoint();
        let body = GenerateRequest::user_prompt(prompt);
        debug!(%url, prompt_bytes = prompt.len(), "POST generateContent");

        let resp = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| PlanError::Transport(e.without_url().to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| PlanError::Transport(format!("reading body: {}", e.without_url())))?;
        debug!(%status, body_bytes = text.len(), "generateContent response");

        if !status.is_success() {
            let excerpt: String = text.chars().take(BODY_EXCERPT).collect();
            return Err(PlanError::Transport(format!("HTTP {status}: {excerpt}")));
        }

        let parsed: GenerateResponse = match serde_json::from_str(&text) {
            Ok(p) => p,
            Err(e) => {
                debug!(error = %e, "response body is not a generateContent payload");
                return Err(PlanError::EmptyResponse);
            }
        };

        match parsed.text() {
            Some(t) => Ok(t.to_string()),
            None => {
                debug!(
                    finish_reason = parsed.finish_reason().unwrap_or("none"),
                    "no candidate text in response"
                );
                Err(PlanError::EmptyResponse)
            }
        }
    }
}
