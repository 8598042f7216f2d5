//! CLI module
//!
//! Command-line interface for driving Airbyte jobs.
//!
//! # Commands
//!
//! - `sync` - Start a sync on a connection and wait for it
//! - `reset` - Start a reset on a connection and wait for it
//! - `status` - Watch an existing job until it ends

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
