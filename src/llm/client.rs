use async_trait::async_trait;

use crate::config::Settings;
use crate::llm::gemini::{GeminiClient, GeminiRestClient};
use crate::llm::reply::GenerationReply;
use crate::Result;

/// Sampling parameters for one primary call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    pub max_output_tokens: u32,
    pub temperature: f64,
}

/// The primary generation call. One request per invocation, never retried here.
#[async_trait]
pub trait PrimaryGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, config: GenerationConfig) -> Result<GenerationReply>;
}

/// Direct REST call used when the primary path yields nothing.
#[async_trait]
pub trait FallbackGenerator: Send + Sync {
    async fn generate_rest(&self, prompt: &str, model_name: &str) -> Result<GenerationReply>;
}

/// Build both Gemini transports from runtime settings.
pub fn build_generators(
    settings: &Settings,
) -> Result<(Box<dyn PrimaryGenerator>, Box<dyn FallbackGenerator>)> {
    let primary = GeminiClient::from_settings(settings)?;
    let fallback = GeminiRestClient::from_settings(settings)?;
    Ok((Box::new(primary), Box::new(fallback)))
}
