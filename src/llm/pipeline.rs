//! Article generation pipeline
//!
//! Primary call, one retry with a larger token budget, then the REST
//! fallback. A run never fails: when every level comes back empty the caller
//! gets [`GENERATION_FAILED`].

use crate::config::Settings;
use crate::llm::client::{build_generators, FallbackGenerator, GenerationConfig, PrimaryGenerator};
use crate::llm::extract::extract;
use crate::llm::prompts::build_article_prompt;

/// Returned when no generation attempt produced text.
pub const GENERATION_FAILED: &str = "Sorry — generation failed. Please try again.";

/// Token budgets and model names for one pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationPolicy {
    pub first: GenerationConfig,
    pub retry: GenerationConfig,
    pub fallback_model: String,
}

impl GenerationPolicy {
    pub fn from_settings(settings: &Settings) -> Self {
        let temperature = settings.generation.temperature;
        Self {
            first: GenerationConfig {
                max_output_tokens: settings.generation.first_max_tokens,
                temperature,
            },
            retry: GenerationConfig {
                max_output_tokens: settings.generation.retry_max_tokens,
                temperature,
            },
            fallback_model: settings.llm.fallback_model.trim().to_string(),
        }
    }
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

pub struct ContentPipeline {
    primary: Box<dyn PrimaryGenerator>,
    fallback: Box<dyn FallbackGenerator>,
    policy: GenerationPolicy,
}

impl ContentPipeline {
    pub fn new(
        primary: Box<dyn PrimaryGenerator>,
        fallback: Box<dyn FallbackGenerator>,
        policy: GenerationPolicy,
    ) -> Self {
        Self {
            primary,
            fallback,
            policy,
        }
    }

    /// Build a pipeline backed by the Gemini transports.
    pub fn from_settings(settings: &Settings) -> crate::Result<Self> {
        let (primary, fallback) = build_generators(settings)?;
        Ok(Self::new(
            primary,
            fallback,
            GenerationPolicy::from_settings(settings),
        ))
    }

    /// Generate an article for a transcript.
    pub async fn run(&self, transcript: &str) -> String {
        let prompt = build_article_prompt(transcript);

        if let Some(text) = self.run_primary(&prompt).await {
            return text;
        }

        if let Some(text) = self.run_fallback(&prompt).await {
            return text;
        }

        tracing::error!("All generation attempts failed");
        GENERATION_FAILED.to_string()
    }

    async fn run_primary(&self, prompt: &str) -> Option<String> {
        let reply = match self.primary.generate(prompt, self.policy.first).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, "Primary generation failed; attempting REST fallback");
                return None;
            }
        };

        if let Some(text) = extract(&reply) {
            return Some(text);
        }

        tracing::info!(
            max_output_tokens = self.policy.retry.max_output_tokens,
            "No text found in first primary reply; retrying with larger token budget"
        );

        match self.primary.generate(prompt, self.policy.retry).await {
            Ok(reply) => {
                let text = extract(&reply);
                if text.is_none() {
                    tracing::warn!("Primary replies contained no usable text; trying REST fallback");
                }
                text
            }
            Err(e) => {
                tracing::error!(error = %e, "Primary retry failed; attempting REST fallback");
                None
            }
        }
    }

    async fn run_fallback(&self, prompt: &str) -> Option<String> {
        match self
            .fallback
            .generate_rest(prompt, &self.policy.fallback_model)
            .await
        {
            Ok(reply) => {
                let text = extract(&reply);
                if text.is_none() {
                    tracing::warn!(
                        model = %self.policy.fallback_model,
                        "REST fallback returned an unexpected shape"
                    );
                }
                text
            }
            Err(e) => {
                tracing::error!(error = %e, "REST fallback failed");
                None
            }
        }
    }
}

/// Generate a blog article from a transcript using the configured transports.
///
/// Always returns text: the article, or [`GENERATION_FAILED`].
pub async fn generate_blog_content(settings: &Settings, transcript: &str) -> String {
    match ContentPipeline::from_settings(settings) {
        Ok(pipeline) => pipeline.run(transcript).await,
        Err(e) => {
            tracing::error!(error = %e, "Could not set up generation transports");
            GENERATION_FAILED.to_string()
        }
    }
}
