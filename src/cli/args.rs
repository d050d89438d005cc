//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// blogsmith - Turn video transcripts into blog articles
#[derive(Parser, Debug)]
#[command(name = "blogsmith")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a blog article from a transcript
    Generate {
        /// Transcript file (reads stdin when omitted)
        #[arg(short, long)]
        transcript: Option<PathBuf>,

        /// Link of the video the transcript belongs to
        #[arg(short, long)]
        link: Option<String>,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit JSON with the video id and article content
        #[arg(long)]
        json: bool,
    },

    /// Extract article text from a saved Gemini reply
    Extract {
        /// JSON file holding the raw reply
        file: PathBuf,
    },

    /// Print the prompt that would be sent for a transcript
    Prompt {
        /// Transcript file (reads stdin when omitted)
        #[arg(short, long)]
        transcript: Option<PathBuf>,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
