use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hlsvault")]
#[command(author, version, about = "HLS video-on-demand and live playlist server")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Start {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config and PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List servable assets
    List {
        /// List live streams instead of VOD assets
        #[arg(long)]
        live: bool,
    },

    /// Import a local video file as a new VOD asset
    Import {
        /// Video file to import
        #[arg(required = true)]
        file: PathBuf,

        /// Asset name (defaults to the file name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Check that the encoder is available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
