//! Configuration management
//!
//! Settings live in `settings.json` inside the agenda directory:
//! ```json
//! {
//!   "api": {
//!     "baseUrl": "http://localhost:8081/transfer",
//!     "withCredentials": true,
//!     "allowedOrigin": "http://localhost:8083",
//!     "timeoutSecs": null
//!   },
//!   "pageSize": 10,
//!   "toastDurationMs": 3000,
//!   "demoMode": false
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::result::Result;
use crate::ports::DEFAULT_PAGE_SIZE;
use crate::services::DEFAULT_TOAST_DURATION;

/// Default transfer service location
pub const DEFAULT_BASE_URL: &str = "http://localhost:8081/transfer";

/// Default trusted origin credentials are shared with
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:8083";

/// Environment variable overriding the transfer service base URL
pub const BASE_URL_ENV: &str = "AGENDA_BASE_URL";

/// Environment variable overriding the trusted origin
pub const ALLOWED_ORIGIN_ENV: &str = "AGENDA_ALLOWED_ORIGIN";

/// Environment variable forcing demo mode on or off (for CI/testing)
pub const DEMO_MODE_ENV: &str = "AGENDA_DEMO_MODE";

const SETTINGS_FILE: &str = "settings.json";

/// Connection settings handed to the transfer service client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Keep and replay session cookies on every call
    pub with_credentials: bool,
    /// Origin credentials are shared with
    pub allowed_origin: Option<String>,
    /// Transport timeout; `None` leaves it to the HTTP stack
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            with_credentials: true,
            allowed_origin: Some(DEFAULT_ALLOWED_ORIGIN.to_string()),
            timeout: None,
        }
    }
}

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    api: ApiSettings,
    #[serde(default)]
    page_size: Option<u32>,
    #[serde(default)]
    toast_duration_ms: Option<u64>,
    #[serde(default)]
    demo_mode: bool,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSettings {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    with_credentials: Option<bool>,
    #[serde(default)]
    allowed_origin: Option<String>,
    #[serde(default)]
    timeout_secs: Option<u64>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Agenda configuration (resolved view of settings)
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub client: ClientConfig,
    pub page_size: u32,
    pub toast_duration: Duration,
    /// Serve transfers from the in-memory demo service instead of the network
    pub demo_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            page_size: DEFAULT_PAGE_SIZE,
            toast_duration: DEFAULT_TOAST_DURATION,
            demo_mode: false,
        }
    }
}

impl Config {
    /// Load config from the agenda directory
    ///
    /// A missing settings file yields the defaults. The service location can
    /// be overridden with `AGENDA_BASE_URL` and `AGENDA_ALLOWED_ORIGIN`.
    pub fn load(agenda_dir: &Path) -> Result<Self> {
        let settings_path = agenda_dir.join(SETTINGS_FILE);

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content)?
        } else {
            SettingsFile::default()
        };

        let mut config = Self::from_settings(&raw);

        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                config.client.base_url = url;
            }
        }
        if let Ok(origin) = std::env::var(ALLOWED_ORIGIN_ENV) {
            config.client.allowed_origin = (!origin.trim().is_empty()).then_some(origin);
        }
        match std::env::var(DEMO_MODE_ENV).ok().as_deref() {
            Some("true" | "1" | "yes" | "TRUE" | "YES") => config.demo_mode = true,
            Some("false" | "0" | "no" | "FALSE" | "NO") => config.demo_mode = false,
            _ => {}
        }

        Ok(config)
    }

    fn from_settings(raw: &SettingsFile) -> Self {
        let defaults = ClientConfig::default();
        Self {
            client: ClientConfig {
                base_url: raw.api.base_url.clone().unwrap_or(defaults.base_url),
                with_credentials: raw.api.with_credentials.unwrap_or(defaults.with_credentials),
                allowed_origin: raw.api.allowed_origin.clone().or(defaults.allowed_origin),
                timeout: raw.api.timeout_secs.map(Duration::from_secs),
            },
            page_size: raw.page_size.filter(|size| *size > 0).unwrap_or(DEFAULT_PAGE_SIZE),
            toast_duration: raw
                .toast_duration_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_TOAST_DURATION),
            demo_mode: raw.demo_mode,
        }
    }

    /// Enable demo mode
    pub fn enable_demo_mode(&mut self) {
        self.demo_mode = true;
    }

    /// Disable demo mode
    pub fn disable_demo_mode(&mut self) {
        self.demo_mode = false;
    }

    /// Save config to the agenda directory
    /// Preserves other settings this crate doesn't manage
    pub fn save(&self, agenda_dir: &Path) -> Result<()> {
        let settings_path = agenda_dir.join(SETTINGS_FILE);

        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        settings.api.base_url = Some(self.client.base_url.clone());
        settings.api.with_credentials = Some(self.client.with_credentials);
        settings.api.allowed_origin = self.client.allowed_origin.clone();
        settings.api.timeout_secs = self.client.timeout.map(|t| t.as_secs());
        settings.page_size = Some(self.page_size);
        settings.toast_duration_ms = Some(self.toast_duration.as_millis() as u64);
        settings.demo_mode = self.demo_mode;

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }
}
