//! Teacher CLI commands.

use clap::{Parser, Subcommand};

/// Teacher management commands.
#[derive(Debug, Parser)]
pub struct TeachersCommand {
    #[command(subcommand)]
    pub action: TeachersAction,
}

/// Available teacher actions.
#[derive(Debug, Subcommand)]
pub enum TeachersAction {
    /// List all teachers.
    List,
    /// Create a new teacher.
    Create {
        /// Full name.
        #[arg(long)]
        name: String,
        /// Name used on the agenda.
        #[arg(long)]
        nickname: Option<String>,
        /// Contact phone.
        #[arg(long)]
        phone: Option<String>,
    },
    /// Get teacher by ID.
    Get {
        /// Teacher ID.
        id: String,
    },
    /// Update a teacher.
    Update {
        /// Teacher ID.
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        nickname: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        bio: Option<String>,
    },
    /// Delete teacher by ID.
    Delete {
        /// Teacher ID.
        id: String,
    },
}
