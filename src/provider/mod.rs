use async_trait::async_trait;

use crate::errors::PlanError;

pub mod gemini;

pub use gemini::GeminiProvider;

/// A generative-text backend: one prompt in, the model's raw text out.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, PlanError>;
}
