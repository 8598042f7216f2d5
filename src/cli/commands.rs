//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Airbyte job orchestration CLI
#[derive(Parser, Debug)]
#[command(name = "airlift")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Task definition file (YAML); flags override its fields
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Base URL of the Airbyte instance
    #[arg(short, long, global = true)]
    pub url: Option<String>,

    /// Target the Cloud public API instead of the Config API
    #[arg(long, global = true)]
    pub cloud: bool,

    /// Bearer token / API key
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Basic auth username
    #[arg(long, global = true)]
    pub username: Option<String>,

    /// Basic auth password
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Application client ID
    #[arg(long, global = true)]
    pub client_id: Option<String>,

    /// Application client secret
    #[arg(long, global = true)]
    pub client_secret: Option<String>,

    /// Token endpoint for the client credentials exchange
    #[arg(long, global = true)]
    pub token_url: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, global = true)]
    pub http_timeout: Option<u64>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start a sync on a connection
    Sync {
        /// The connection to sync
        #[arg(long)]
        connection_id: Option<String>,

        /// Return the job id without waiting for the job to end
        #[arg(long)]
        no_wait: bool,

        /// Tolerate an already-active sync instead of failing
        #[arg(long)]
        allow_active_sync: bool,

        /// Seconds between status fetches
        #[arg(long)]
        poll_interval: Option<u64>,

        /// Overall deadline in seconds
        #[arg(long)]
        max_wait: Option<u64>,
    },

    /// Start a reset on a connection
    Reset {
        /// The connection to reset
        #[arg(long)]
        connection_id: Option<String>,

        /// Return the job id without waiting for the job to end
        #[arg(long)]
        no_wait: bool,

        /// Seconds between status fetches
        #[arg(long)]
        poll_interval: Option<u64>,

        /// Overall deadline in seconds
        #[arg(long)]
        max_wait: Option<u64>,
    },

    /// Watch an existing job until it ends
    Status {
        /// The job to watch
        #[arg(long)]
        job_id: Option<i64>,

        /// Seconds between status fetches
        #[arg(long)]
        poll_interval: Option<u64>,

        /// Overall deadline in seconds
        #[arg(long)]
        max_wait: Option<u64>,
    },
}
