//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::DomainError;
use crate::ports::query::Query;

/// A JSON object as returned by the remote store.
pub type Row = serde_json::Value;

/// Key under which the logged-in profile id is kept.
pub const SESSION_KEY: &str = "legacyProfileId";

/// Remote data gateway. Table-scoped reads and inserts.
#[async_trait::async_trait]
pub trait DataGateway: Send + Sync {
    /// All rows matching the query, in the requested (or store-default) order.
    async fn select(&self, query: &Query) -> Result<Vec<Row>, DomainError>;

    /// Exactly one row. Zero or several matches yield `DomainError::NotSingle`.
    async fn select_single(&self, query: &Query) -> Result<Row, DomainError>;

    /// Insert rows into `table`. The store fills ids and timestamps.
    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<(), DomainError>;
}

/// Ephemeral session: at most one logged-in profile id, gone when the process exits.
pub trait SessionStore: Send + Sync {
    fn get(&self) -> Option<String>;

    fn set(&self, profile_id: &str);

    fn clear(&self);

    fn is_logged_in(&self) -> bool {
        self.get().is_some()
    }
}
