//! tangoagenda_client - CLI client for the tangoagenda API.

pub mod cli;
pub mod client;
pub mod error;
pub mod output;

pub use client::TangoAgendaClient;
pub use error::{ClientError, Result};
