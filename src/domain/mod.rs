//! Core domain layer. No external I/O dependencies.
//!
//! Entities mirror the remote tables; the store owns them, we only hold copies.

pub mod entities;
pub mod errors;
pub mod view_state;

pub use entities::{
    BlogPost, Contribution, Credential, ForumPost, NewContribution, NewForumPost, OwnerRef,
    Profile,
};
pub use errors::DomainError;
pub use view_state::Loadable;
