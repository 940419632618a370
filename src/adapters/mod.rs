//! Infrastructure adapters. Implement outbound ports and the interactive UI.
//!
//! Remote store, session storage, terminal front end. Map errors to DomainError.

pub mod gateway;
pub mod session;
pub mod ui;
