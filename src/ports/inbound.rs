//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: the interactive front end drives navigation until the user quits.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the navigation loop starting at `start_path`.
    async fn run(&self, start_path: &str) -> Result<(), DomainError>;
}
