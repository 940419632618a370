//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// A single-row fetch matched zero or several rows.
    #[error("Expected exactly one row from '{table}', found {found}")]
    NotSingle { table: String, found: usize },

    #[error("Failed to decode row: {0}")]
    Decode(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Only the owner of this page can add contributions")]
    NotOwner,

    #[error("{0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("UI error: {0}")]
    Ui(String),
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Decode(e.to_string())
    }
}
