pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "revex")]
#[command(about = "Review-content extraction engine", long_about = None)]
pub struct Cli {
    /// Path to the config file (default: ~/.config/revex/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract review text and date from a review link
    Extract {
        /// Direct review permalink or shortcut link
        url: String,

        /// Store name to match when scanning a feed (shortcut links need one)
        #[arg(short, long)]
        store: Option<String>,

        /// Maximum attempts for failures that may be transient
        #[arg(short, long, default_value_t = 1)]
        retries: u32,

        /// Run the browser with a visible window
        #[arg(long)]
        headed: bool,
    },
    /// Show how a link would be handled
    Classify {
        /// URL to classify
        url: String,
    },
}
