//! tangoagenda_core - pure domain logic for the tango agenda.
//!
//! Contains the event model, the occurrence resolver that projects weekly
//! events onto calendar dates, and the storage traits implemented by the
//! server backends. Nothing in this crate performs I/O on its own.

pub mod agenda;
pub mod serde;
pub mod storage;
