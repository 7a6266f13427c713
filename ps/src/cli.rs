//! CLI argument parsing for productshelf

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ps")]
#[command(author, version, about = "Product catalog and selection manager", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List catalog categories
    Categories,

    /// List catalog products, optionally filtered
    List {
        /// Category to filter by (exact match)
        #[arg(short, long)]
        category: Option<String>,

        /// Search term (case-insensitive, matches name/brand/description)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Toggle a product in or out of the selection
    Toggle {
        /// Product ID
        #[arg(required = true)]
        id: u32,
    },

    /// Remove a selection entry by position (out-of-range is ignored)
    Remove {
        /// Zero-based position in the selection
        #[arg(required = true)]
        index: usize,
    },

    /// Clear the entire selection
    Clear,

    /// Show the current selection
    Selected,

    /// Show or set the layout direction preference
    Layout {
        /// New direction ("ltr" or "rtl"); omit to show the current value
        direction: Option<String>,
    },
}
