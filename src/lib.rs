// RLM Booking Library
// Artist search, event lookup and calendar booking against the RLM backend

pub mod api;
pub mod calendar;
pub mod command_handlers;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod geocoding;
pub mod http_config;
pub mod messages;
pub mod models;
pub mod ui;
pub mod ui_state;
pub mod utils;

// Re-export commonly used types
pub use api::{BookingApi, EventQuery, HttpBookingApi};
pub use calendar::CalendarBook;
pub use config::AppConfig;
pub use coordinator::{Outcome, Phase, SelectionCoordinator, SelectionState};
pub use error::{AppError, AppResult};
pub use geocoding::{Geocoder, NominatimGeocoder};
pub use models::*;

use std::sync::Arc;

/// Services shared across the application
#[derive(Clone)]
pub struct AppContext {
    pub api: Arc<dyn BookingApi>,
    pub geocoder: Arc<dyn Geocoder>,
    pub config: Arc<AppConfig>,
}

impl AppContext {
    pub fn new(api: Arc<dyn BookingApi>, geocoder: Arc<dyn Geocoder>, config: AppConfig) -> Self {
        Self {
            api,
            geocoder,
            config: Arc::new(config),
        }
    }

    /// Wires the HTTP backend client and the Nominatim geocoder from config.
    pub fn from_config(config: AppConfig) -> AppResult<Self> {
        let api = HttpBookingApi::from_config(&config)?;
        let geocoder = NominatimGeocoder::from_config(&config)?;
        Ok(Self::new(Arc::new(api), Arc::new(geocoder), config))
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("backend_url", &self.config.backend_url)
            .field("geocoder_url", &self.config.geocoder_url)
            .finish()
    }
}
