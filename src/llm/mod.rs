//! LLM module for blogsmith
//!
//! Turns transcripts into articles using Gemini, with a retry and a REST
//! fallback around replies whose shape cannot be relied on.

pub mod client;
pub mod extract;
pub mod gemini;
pub mod pipeline;
pub mod prompts;
pub mod reply;

pub use client::{build_generators, FallbackGenerator, GenerationConfig, PrimaryGenerator};
pub use extract::{extract, ShapeMismatch};
pub use pipeline::{generate_blog_content, ContentPipeline, GenerationPolicy, GENERATION_FAILED};
pub use prompts::build_article_prompt;
pub use reply::GenerationReply;
