pub use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sealpost")]
#[command(about = "End-to-end encrypted messages with RSA-OAEP wrapped AES-256-GCM keys")]
#[command(version)]
pub struct Args {
    /// Path to the sealpost state directory (defaults to ~/.sealpost)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: crate::Command,
}
