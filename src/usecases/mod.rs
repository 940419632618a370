//! Application use cases. One service per screen, plus routing.

pub mod blog_service;
pub mod directory_service;
pub mod forum_service;
pub mod login_service;
pub mod profile_service;
pub mod router;
pub mod view_slot;

pub use blog_service::BlogService;
pub use directory_service::DirectoryService;
pub use forum_service::ForumService;
pub use login_service::LoginService;
pub use profile_service::{ProfilePage, ProfileService};
pub use router::{Navigation, Route, Router};
pub use view_slot::{FetchTicket, ViewSlot};

use crate::domain::DomainError;
use crate::ports::Row;
use serde::de::DeserializeOwned;

pub(crate) fn decode_row<T: DeserializeOwned>(row: Row) -> Result<T, DomainError> {
    Ok(serde_json::from_value(row)?)
}

pub(crate) fn decode_rows<T: DeserializeOwned>(rows: Vec<Row>) -> Result<Vec<T>, DomainError> {
    rows.into_iter().map(decode_row).collect()
}

/// Mirrors a `required` form field: empty input is rejected, whitespace is not.
pub(crate) fn require(field: &str, value: &str) -> Result<(), DomainError> {
    if value.is_empty() {
        return Err(DomainError::Validation(format!("{} is required", field)));
    }
    Ok(())
}
