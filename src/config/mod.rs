//! Configuration module for blogsmith
//!
//! Handles loading and managing application settings from TOML files.

mod settings;

pub use settings::{GenerationSettings, LlmSettings, Settings, API_KEY_ENV};
