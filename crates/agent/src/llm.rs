use anyhow::Result;
use async_trait::async_trait;

/// Opaque gateway to a generative model: prompt in, text out. Failures
/// are ordinary `Err` values; callers decide what the user sees.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
