//! DataGateway adapters: the hosted PostgREST API and an in-memory stand-in.

pub mod memory;
pub mod postgrest;
pub mod seed;

pub use memory::MemoryGateway;
pub use postgrest::PostgrestGateway;
pub use seed::demo_gateway;

use crate::domain::DomainError;
use crate::ports::Row;

/// Exactly one row, otherwise `NotSingle` with the count seen.
pub(crate) fn single_row(table: &str, mut rows: Vec<Row>) -> Result<Row, DomainError> {
    if rows.len() != 1 {
        return Err(DomainError::NotSingle {
            table: table.to_string(),
            found: rows.len(),
        });
    }
    Ok(rows.remove(0))
}
