//! CLI argument parsing for routinebuilder

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rb")]
#[command(author, version, about = "Chat-based beauty routine assistant", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a routine from the selected products and print it
    Generate,

    /// Ask a one-shot question on a fresh conversation
    Ask {
        /// The question to ask
        #[arg(required = true)]
        question: String,
    },

    /// Start the interactive assistant (default when no command is given)
    Chat {
        /// Question to send before the first prompt
        question: Option<String>,
    },
}
