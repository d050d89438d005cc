//! CLI command implementations

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::cli::args::ConfigCommand;
use crate::config::Settings;
use crate::llm::{build_article_prompt, extract, generate_blog_content, GenerationReply, GENERATION_FAILED};
use crate::video::extract_video_id;

#[derive(Serialize)]
struct ArticleOutput<'a> {
    link: Option<&'a str>,
    video_id: Option<&'a str>,
    generated: bool,
    content: &'a str,
}

/// Generate an article for a transcript and print or save it
pub async fn generate_article(
    settings: &Settings,
    transcript: Option<PathBuf>,
    link: Option<String>,
    output: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let video_id = match link.as_deref() {
        Some(link) => Some(
            extract_video_id(link)
                .with_context(|| format!("Could not find a video id in link: {}", link))?,
        ),
        None => None,
    };

    let transcript = read_transcript(transcript.as_deref())?;

    tracing::info!(
        video_id = video_id.as_deref().unwrap_or("-"),
        chars = transcript.chars().count(),
        "Generating article"
    );

    let content = generate_blog_content(settings, &transcript).await;
    let generated = content != GENERATION_FAILED;
    if !generated {
        tracing::warn!("No article could be generated");
    }

    let rendered = if json {
        let article = ArticleOutput {
            link: link.as_deref(),
            video_id: video_id.as_deref(),
            generated,
            content: &content,
        };
        serde_json::to_string_pretty(&article)?
    } else {
        content
    };

    if let Some(path) = output {
        std::fs::write(&path, format!("{}\n", rendered))
            .with_context(|| format!("Failed to write article to {}", path.display()))?;
        println!("Article written to: {}", path.display());
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

/// Run the reply extractor over a saved reply
pub fn extract_reply(path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read reply file: {}", path.display()))?;
    let reply = GenerationReply::parse(&raw)
        .with_context(|| format!("Reply file is not valid JSON: {}", path.display()))?;

    let text = extract(&reply).with_context(|| {
        format!(
            "No known reply shape matched in {} (run with -v for details)",
            path.display()
        )
    })?;

    println!("{}", text);
    Ok(())
}

/// Print the prompt for a transcript
pub fn show_prompt(transcript: Option<&Path>) -> Result<()> {
    let transcript = read_transcript(transcript)?;
    println!("{}", build_article_prompt(&transcript));
    Ok(())
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            println!("{}", settings.to_redacted_toml()?);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

// Helper functions

fn read_transcript(path: Option<&Path>) -> Result<String> {
    let transcript = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read transcript: {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read transcript from stdin")?;
            buf
        }
    };

    if transcript.trim().is_empty() {
        anyhow::bail!("Transcript is empty");
    }

    Ok(transcript)
}
