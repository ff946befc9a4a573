//! iCalendar export of saved events.

use crate::error::AppResult;
use crate::models::SavedEvent;
use icalendar::{Calendar, Component, Event, EventLike};
use log::info;
use std::fs;
use std::path::Path;

const CALENDAR_NAME: &str = "RLM Booking";
const UID_DOMAIN: &str = "rlm-booking";

/// Renders saved events as all-day VEVENTs.
pub fn to_ics(events: &[SavedEvent]) -> String {
    let mut calendar = Calendar::new();
    calendar.name(CALENDAR_NAME);

    for saved in events {
        let mut event = Event::new();
        event
            .uid(&format!("{}@{}", saved.id, UID_DOMAIN))
            .summary(&saved.name)
            .all_day(saved.date);
        if !saved.location.trim().is_empty() {
            event.location(&saved.location);
        }
        calendar.push(event.done());
    }

    calendar.done().to_string()
}

pub fn export_to(events: &[SavedEvent], path: &Path) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, to_ics(events))?;
    info!("Exported {} events to {}", events.len(), path.display());
    Ok(())
}
