//! legacy-hub: directory, forum and blog client for the Legacy Leaders backend.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
