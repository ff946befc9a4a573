//! Configuration module
//!
//! Settings are read from `<config dir>/rlm-booking/config.json` (or the
//! file named by `RLM_BOOKING_CONFIG`), then overridden from the
//! environment. Every field has a default, so a missing file is fine.

use crate::error::{AppError, AppResult};
use crate::models::search::{normalize_country_code, SearchParams};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

pub const CONFIG_PATH_ENV: &str = "RLM_BOOKING_CONFIG";
pub const BACKEND_URL_ENV: &str = "RLM_BOOKING_BACKEND_URL";
pub const GEOCODER_URL_ENV: &str = "RLM_BOOKING_GEOCODER_URL";

/// Backend paths. Deployments mount the API under different prefixes, so
/// every path is configurable; each must be absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub search_artist: String,
    pub get_events: String,
    pub save_event: String,
    /// Must contain `{id}`.
    pub delete_event: String,
    pub saved_events: String,
    pub search_availability: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            search_artist: "/api/artist-recommendation/search-artist/".to_string(),
            get_events: "/api/artist-recommendation/get-events/".to_string(),
            save_event: "/api/event_management/save-event/".to_string(),
            delete_event: "/api/event_management/delete-event/{id}/".to_string(),
            saved_events: "/api/event_management/get-events/".to_string(),
            search_availability: "/api/event_management/search-events/".to_string(),
        }
    }
}

impl EndpointConfig {
    fn validate(&self) -> AppResult<()> {
        let paths = [
            ("search_artist", &self.search_artist),
            ("get_events", &self.get_events),
            ("save_event", &self.save_event),
            ("delete_event", &self.delete_event),
            ("saved_events", &self.saved_events),
            ("search_availability", &self.search_availability),
        ];
        for (name, path) in paths {
            if !path.starts_with('/') {
                return Err(AppError::config(format!(
                    "Endpoint '{}' must be an absolute path starting with '/', got '{}'",
                    name, path
                )));
            }
        }
        if !self.delete_event.contains("{id}") {
            return Err(AppError::config("Endpoint 'delete_event' must contain an {id} placeholder"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    pub connect_secs: u64,
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 10,
            request_secs: 60,
        }
    }
}

impl TimeoutConfig {
    /// Nominatim lookups run in a batch; a slow venue should not hold it up.
    pub fn geocoder() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 15,
        }
    }

    fn validate(&self, name: &str) -> AppResult<()> {
        if self.connect_secs == 0 || self.request_secs == 0 {
            return Err(AppError::config(format!("{} must be at least one second", name)));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend_url: String,
    pub geocoder_url: String,
    /// Sent on every request; Nominatim rejects anonymous clients.
    pub user_agent: String,
    pub default_country: String,
    pub default_city: String,
    pub endpoints: EndpointConfig,
    /// Backend client timeouts.
    pub timeouts: TimeoutConfig,
    pub geocoder_timeouts: TimeoutConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".to_string(),
            geocoder_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: format!("RLMBooking/{}", env!("CARGO_PKG_VERSION")),
            default_country: crate::models::search::DEFAULT_COUNTRY.to_string(),
            default_city: crate::models::search::DEFAULT_CITY.to_string(),
            endpoints: EndpointConfig::default(),
            timeouts: TimeoutConfig::default(),
            geocoder_timeouts: TimeoutConfig::geocoder(),
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rlm-booking").join("config.json"))
}

/// Checks that a base URL is absolute http(s) with a host.
pub fn validate_base_url(name: &str, raw: &str) -> AppResult<Url> {
    if raw.trim().is_empty() {
        return Err(AppError::config(format!("{} cannot be empty", name)));
    }

    let parsed = Url::parse(raw.trim())
        .map_err(|e| AppError::config(format!("{} '{}' is not a valid URL: {}", name, raw, e)))?;

    if parsed.scheme() != "https" && parsed.scheme() != "http" {
        return Err(AppError::config(format!(
            "{} must use http or https, got '{}://'",
            name,
            parsed.scheme()
        )));
    }

    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(AppError::config(format!("{} '{}' has no host", name, raw)));
    }

    if parsed.scheme() == "http" && parsed.host_str() != Some("localhost") && parsed.host_str() != Some("127.0.0.1") {
        warn!("{} uses plain HTTP: {}", name, raw);
    }

    Ok(parsed)
}

impl AppConfig {
    /// Loads the file (if any), applies env overrides and validates.
    pub fn load() -> AppResult<Self> {
        let mut config = match env::var_os(CONFIG_PATH_ENV) {
            Some(explicit) => {
                let path = PathBuf::from(explicit);
                if !path.exists() {
                    return Err(AppError::config(format!(
                        "{} points to a missing file: {}",
                        CONFIG_PATH_ENV,
                        path.display()
                    )));
                }
                Self::from_file(&path)?
            }
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    info!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> AppResult<Self> {
        info!("Loading configuration from {}", path.display());
        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|e| AppError::config(format!("Invalid config file {}: {}", path.display(), e)))
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var(BACKEND_URL_ENV) {
            info!("Backend URL overridden from environment");
            self.backend_url = url;
        }
        if let Ok(url) = env::var(GEOCODER_URL_ENV) {
            info!("Geocoder URL overridden from environment");
            self.geocoder_url = url;
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        validate_base_url("backend_url", &self.backend_url)?;
        validate_base_url("geocoder_url", &self.geocoder_url)?;
        normalize_country_code(&self.default_country)
            .map_err(|e| AppError::config(format!("default_country: {}", e)))?;
        if self.user_agent.trim().is_empty() {
            return Err(AppError::config("user_agent cannot be empty"));
        }
        self.timeouts.validate("timeouts")?;
        self.geocoder_timeouts.validate("geocoder_timeouts")?;
        self.endpoints.validate()
    }

    /// Initial search form values.
    pub fn default_search_params(&self) -> SearchParams {
        SearchParams {
            artist_name: String::new(),
            country_code: self.default_country.clone(),
            city: self.default_city.clone(),
        }
    }
}
