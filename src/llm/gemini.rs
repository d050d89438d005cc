use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::config::{Settings, API_KEY_ENV};
use crate::llm::client::{FallbackGenerator, GenerationConfig, PrimaryGenerator};
use crate::llm::reply::GenerationReply;
use crate::{GenerationError, Result};

const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Connection state shared by both transports.
struct GeminiHttp {
    http: Client,
    api_key: String,
    endpoint: String,
}

impl GeminiHttp {
    fn from_settings(settings: &Settings) -> Result<Self> {
        let endpoint = if settings.llm.endpoint.trim().is_empty() {
            DEFAULT_GEMINI_ENDPOINT.to_string()
        } else {
            settings
                .llm
                .endpoint
                .trim()
                .trim_end_matches('/')
                .to_string()
        };

        let http = Client::builder()
            .timeout(Duration::from_secs(settings.llm.timeout_secs))
            .build()
            .map_err(|e| GenerationError::Other(format!("Failed to build Gemini HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_key: settings.llm.api_key.trim().to_string(),
            endpoint,
        })
    }

    fn api_key(&self) -> Result<&str> {
        if self.api_key.is_empty() {
            return Err(GenerationError::Config(format!(
                "Gemini API key is missing. Set llm.api_key in config or {API_KEY_ENV}."
            )));
        }
        Ok(&self.api_key)
    }

    fn request_url(&self, model: &str, api_key: &str) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.endpoint,
            model_path(model),
            api_key
        )
    }

    async fn post<B: Serialize + ?Sized>(&self, model: &str, body: &B) -> Result<GenerationReply> {
        let api_key = self.api_key()?;

        let response = self
            .http
            .post(self.request_url(model, api_key))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GenerationError::Transport(format!(
                "Gemini returned {status} for {model}: {}",
                truncate(detail.trim(), 200)
            )));
        }

        let raw = response.text().await?;
        GenerationReply::parse(&raw).map_err(|e| {
            GenerationError::Transport(format!("Gemini returned a non-JSON body for {model}: {e}"))
        })
    }
}

/// Primary transport: the full generateContent call with a generation config.
pub struct GeminiClient {
    inner: GeminiHttp,
    model: String,
}

impl GeminiClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            inner: GeminiHttp::from_settings(settings)?,
            model: settings.llm.primary_model.trim().to_string(),
        })
    }
}

#[async_trait]
impl PrimaryGenerator for GeminiClient {
    async fn generate(&self, prompt: &str, config: GenerationConfig) -> Result<GenerationReply> {
        tracing::debug!(
            model = %self.model,
            max_output_tokens = config.max_output_tokens,
            "Calling Gemini"
        );

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfigBody {
                max_output_tokens: config.max_output_tokens,
                temperature: config.temperature,
            },
        };

        self.inner.post(&self.model, &body).await
    }
}

/// Fallback transport: a fixed payload posted straight to the REST endpoint.
pub struct GeminiRestClient {
    inner: GeminiHttp,
    temperature: f64,
    max_output_tokens: u32,
}

impl GeminiRestClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            inner: GeminiHttp::from_settings(settings)?,
            temperature: settings.generation.temperature,
            max_output_tokens: settings.generation.fallback_max_tokens,
        })
    }
}

#[async_trait]
impl FallbackGenerator for GeminiRestClient {
    async fn generate_rest(&self, prompt: &str, model_name: &str) -> Result<GenerationReply> {
        tracing::debug!(model = %model_name, "Calling Gemini REST fallback");

        let body = RestFallbackRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        };

        self.inner.post(model_name, &body).await
    }
}

/// `gemini-2.5-flash` and `models/gemini-2.5-flash` address the same model.
fn model_path(model: &str) -> String {
    if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{model}")
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfigBody,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfigBody {
    max_output_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RestFallbackRequest<'a> {
    contents: Vec<Content<'a>>,
    temperature: f64,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}
