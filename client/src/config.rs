//! Client configuration loaded via OrthoConfig.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::DEFAULT_TOAST_DURATION;
use crate::domain::session_store::DEFAULT_STORAGE_PREFIX;

const DEFAULT_API_BASE_URL: &str = "http://localhost:3333/";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_STORAGE_DIR: &str = ".barber";

/// Settings for the API connection, local storage and toast display.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BARBER")]
pub struct ClientSettings {
    /// Base URL every endpoint path is joined onto.
    pub api_base_url: Option<String>,
    /// Per-request timeout in seconds.
    #[ortho_config(default = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,
    /// Directory holding the persisted session.
    pub storage_dir: Option<PathBuf>,
    /// Namespace for the token and user storage keys.
    pub storage_prefix: Option<String>,
    /// How long toasts stay visible, in milliseconds.
    pub toast_duration_ms: Option<u64>,
}

impl ClientSettings {
    /// Return the configured API base URL, falling back to the local server.
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    /// Return the per-request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Return the configured storage directory, falling back to `.barber`.
    #[must_use]
    pub fn storage_dir(&self) -> PathBuf {
        self.storage_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR))
    }

    /// Return the storage key namespace, falling back to `@GoBarber`.
    #[must_use]
    pub fn storage_prefix(&self) -> &str {
        self.storage_prefix
            .as_deref()
            .unwrap_or(DEFAULT_STORAGE_PREFIX)
    }

    /// Return how long each toast stays visible.
    #[must_use]
    pub fn toast_duration(&self) -> Duration {
        self.toast_duration_ms
            .map_or(DEFAULT_TOAST_DURATION, Duration::from_millis)
    }
}
