//! Command-line interface for duel_server.

use clap::Parser;
use std::path::PathBuf;

/// Duel - two-player tic-tac-toe rooms over WebSocket
#[derive(Parser, Debug)]
#[command(name = "duel_server")]
#[command(about = "WebSocket server for two-player tic-tac-toe rooms", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults are used if it does not exist)
    #[arg(short, long, default_value = "duel_server.toml")]
    pub config: PathBuf,

    /// Host to bind to (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides config and PORT)
    #[arg(short, long)]
    pub port: Option<u16>,
}
