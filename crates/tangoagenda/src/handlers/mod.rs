pub mod admin;
pub mod error;
pub mod events;
pub mod health;
pub mod teachers;

pub use error::AppError;
