//! Application configuration. Backend endpoint and access key.

use crate::domain::DomainError;
use serde::Deserialize;

/// Message shown when the backend is not configured. Startup aborts with it.
pub const MISSING_BACKEND_MSG: &str =
    "Please configure the backend: set SUPABASE_URL and SUPABASE_ANON_KEY (env or .env)";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Backend project URL. Read from LEGACY_HUB_SUPABASE_URL, SUPABASE_URL or VITE_SUPABASE_URL.
    #[serde(default)]
    pub supabase_url: Option<String>,

    /// Public anon key. Read from LEGACY_HUB_SUPABASE_ANON_KEY, SUPABASE_ANON_KEY or VITE_SUPABASE_ANON_KEY.
    #[serde(default)]
    pub supabase_anon_key: Option<String>,

    /// Path the UI opens first (default "/"). Read from LEGACY_HUB_START_PATH.
    #[serde(default)]
    pub start_path: Option<String>,
}

/// Resolved backend connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("LEGACY_HUB"));
        if let Ok(path) = std::env::var("LEGACY_HUB_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Backend URL from config, then SUPABASE_URL, then VITE_SUPABASE_URL.
    pub fn supabase_url(&self) -> Option<String> {
        non_empty(self.supabase_url.clone())
            .or_else(|| env_non_empty("SUPABASE_URL"))
            .or_else(|| env_non_empty("VITE_SUPABASE_URL"))
    }

    /// Anon key from config, then SUPABASE_ANON_KEY, then VITE_SUPABASE_ANON_KEY.
    pub fn supabase_anon_key(&self) -> Option<String> {
        non_empty(self.supabase_anon_key.clone())
            .or_else(|| env_non_empty("SUPABASE_ANON_KEY"))
            .or_else(|| env_non_empty("VITE_SUPABASE_ANON_KEY"))
    }

    pub fn start_path_or_default(&self) -> String {
        self.start_path.clone().unwrap_or_else(|| "/".to_string())
    }

    /// Both values are required; either one missing is fatal.
    pub fn backend(&self) -> Result<BackendConfig, DomainError> {
        backend_from(self.supabase_url(), self.supabase_anon_key())
    }
}

fn backend_from(url: Option<String>, key: Option<String>) -> Result<BackendConfig, DomainError> {
    match (url, key) {
        (Some(url), Some(anon_key)) => Ok(BackendConfig {
            url: url.trim_end_matches('/').to_string(),
            anon_key,
        }),
        _ => Err(DomainError::Config(MISSING_BACKEND_MSG.to_string())),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn env_non_empty(key: &str) -> Option<String> {
    non_empty(std::env::var(key).ok())
}
