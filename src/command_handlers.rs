//! Command handlers module
//!
//! Async work issued by the UI. Each handler runs one request and folds
//! the outcome into something a `Message` can carry.

use crate::api::BookingApi;
use crate::calendar::ics;
use crate::coordinator::{self, EventTicket, SearchTicket, SelectionCoordinator};
use crate::geocoding::{self, Geocoder};
use crate::models::{
    Artist, AvailabilityQuery, AvailableEvent, CalendarEntry, EventCandidate, MarkerBatch, Notification, SavedEvent,
};
use crate::AppContext;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

/// Default file name for calendar exports.
pub const EXPORT_FILE_NAME: &str = "rlm-booking-calendar.ics";

/// Backend operation handlers
#[derive(Clone)]
pub struct BookingHandlers {
    pub api: Arc<dyn BookingApi>,
}

impl BookingHandlers {
    pub fn new(api: Arc<dyn BookingApi>) -> Self {
        Self { api }
    }

    pub async fn search(&self, ticket: SearchTicket) -> (u64, Result<Vec<Artist>, String>) {
        let generation = ticket.generation;
        let result = coordinator::run_search(self.api.clone(), ticket).await;
        (generation, result.map_err(|e| e.to_safe_string()))
    }

    pub async fn find_events(&self, ticket: EventTicket) -> (u64, Result<Vec<EventCandidate>, String>) {
        let generation = ticket.generation;
        let result = coordinator::run_event_lookup(self.api.clone(), ticket).await;
        (generation, result.map_err(|e| e.to_safe_string()))
    }

    pub async fn save(&self, entry: CalendarEntry) -> Notification {
        SelectionCoordinator::add_to_calendar(self.api.clone(), entry).await
    }

    pub async fn load_saved(&self) -> Result<Vec<SavedEvent>, String> {
        self.api.list_saved_events().await.map_err(|e| e.to_safe_string())
    }

    pub async fn delete_saved(&self, id: String) -> (String, Result<(), String>) {
        let result = self.api.delete_event(id.clone()).await.map_err(|e| e.to_safe_string());
        (id, result)
    }

    pub async fn search_availability(
        &self,
        generation: u64,
        query: AvailabilityQuery,
    ) -> (u64, Result<Vec<AvailableEvent>, String>) {
        let result = self.api.search_availability(query).await;
        if let Ok(rows) = &result {
            info!("Availability search #{} returned {} rows", generation, rows.len());
        }
        (generation, result.map_err(|e| e.to_safe_string()))
    }
}

/// Map operation handlers
#[derive(Clone)]
pub struct MapHandlers {
    pub geocoder: Arc<dyn Geocoder>,
}

impl MapHandlers {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self { geocoder }
    }

    pub async fn resolve(&self, generation: u64, events: Vec<EventCandidate>) -> (u64, MarkerBatch) {
        (generation, geocoding::resolve_markers(self.geocoder.clone(), &events).await)
    }
}

/// Where calendar exports are written: the download directory, falling
/// back to the working directory.
pub fn export_path() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(EXPORT_FILE_NAME)
}

/// Writes saved events to `path` off the UI thread.
pub async fn export_calendar(events: Vec<SavedEvent>, path: PathBuf) -> Result<String, String> {
    let display = path.display().to_string();
    tokio::task::spawn_blocking(move || ics::export_to(&events, &path))
        .await
        .map_err(|e| format!("Export task failed: {}", e))?
        .map_err(|e| e.to_safe_string())?;
    info!("Calendar exported to {}", display);
    Ok(display)
}

/// Command handler factory
#[derive(Clone)]
pub struct CommandHandlers {
    pub booking: BookingHandlers,
    pub map: MapHandlers,
}

impl CommandHandlers {
    pub fn new(context: &AppContext) -> Self {
        Self {
            booking: BookingHandlers::new(context.api.clone()),
            map: MapHandlers::new(context.geocoder.clone()),
        }
    }
}
