//! blogsmith - Turn video transcripts into blog articles
//!
//! Entry point for the blogsmith CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use blogsmith::cli::{Cli, Commands};
use blogsmith::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Completions { shell } => {
            blogsmith::cli::completions::print(shell);
        }
        Commands::Extract { file } => {
            blogsmith::cli::commands::extract_reply(&file)?;
        }
        Commands::Prompt { transcript } => {
            blogsmith::cli::commands::show_prompt(transcript.as_deref())?;
        }
        command => {
            // Load configuration only for commands that need it.
            let settings = Settings::load()?;

            match command {
                Commands::Generate {
                    transcript,
                    link,
                    output,
                    json,
                } => {
                    blogsmith::cli::commands::generate_article(
                        &settings, transcript, link, output, json,
                    )
                    .await?;
                }
                Commands::Config(config_cmd) => {
                    blogsmith::cli::commands::config_command(&settings, config_cmd)?;
                }
                Commands::Completions { .. } | Commands::Extract { .. } | Commands::Prompt { .. } => {
                    unreachable!()
                }
            }
        }
    }

    Ok(())
}
