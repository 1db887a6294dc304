//! CLI command definitions.

pub mod agenda;
pub mod events;
pub mod health;
pub mod teachers;

use clap::{Parser, Subcommand, ValueEnum};

use crate::client::DEFAULT_BASE_URL;

/// CLI client for the tangoagenda API.
#[derive(Debug, Parser)]
#[command(name = "tangoagenda-client")]
#[command(about = "CLI client for the tangoagenda API", long_about = None)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "TANGOAGENDA_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolved public agenda.
    Agenda(agenda::AgendaCommand),
    /// Stored event management.
    Events(events::EventsCommand),
    /// Teacher management.
    Teachers(teachers::TeachersCommand),
    /// Server health checks.
    Health(health::HealthCommand),
}
