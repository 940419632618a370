//! Implements SessionStore in process memory.
//!
//! Lives as long as the process, the terminal equivalent of per-tab storage.

use crate::ports::{SessionStore, SESSION_KEY};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

#[derive(Default)]
pub struct MemorySession {
    values: RwLock<HashMap<&'static str, String>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySession {
    fn get(&self) -> Option<String> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        values.get(SESSION_KEY).cloned()
    }

    fn set(&self, profile_id: &str) {
        debug!(profile_id, "session set");
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.insert(SESSION_KEY, profile_id.to_string());
    }

    fn clear(&self) {
        debug!("session cleared");
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.remove(SESSION_KEY);
    }
}
