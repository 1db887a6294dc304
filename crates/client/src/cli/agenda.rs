//! Agenda CLI commands.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Public agenda commands.
#[derive(Debug, Parser)]
pub struct AgendaCommand {
    #[command(subcommand)]
    pub action: AgendaAction,
}

/// Available agenda actions.
#[derive(Debug, Subcommand)]
pub enum AgendaAction {
    /// List occurrences in a date window.
    List {
        /// First day of the window (YYYY-MM-DD).
        #[arg(long)]
        start: NaiveDate,
        /// Last day of the window (YYYY-MM-DD). Omit for a single day.
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// Get one occurrence by ID, e.g. `abc` or `abc_2024-01-22`.
    Get {
        /// Plain or composite occurrence ID.
        id: String,
    },
}
