//! Personal calendar book
//!
//! Holds the saved events shown on the calendar page. Deletion is
//! confirm-then-mutate: an entry is only dropped after the backend
//! acknowledges the DELETE.

use crate::api::BookingApi;
use crate::models::{Notification, SavedEvent};
use chrono::NaiveDate;
use log::{info, warn};
use std::collections::BTreeSet;
use std::fmt::Display;
use std::path::Path;

pub mod ics;

/// Saved events sharing a calendar month, oldest month first.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGroup<'a> {
    pub label: String,
    pub events: Vec<&'a SavedEvent>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalendarBook {
    events: Vec<SavedEvent>,
    loaded: bool,
}

impl CalendarBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SavedEvent] {
        &self.events
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&SavedEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Applies a fetch of the saved list. On failure the previous list is
    /// kept and a failure notification is returned.
    pub fn apply_loaded<E: Display>(&mut self, result: Result<Vec<SavedEvent>, E>) -> Option<Notification> {
        match result {
            Ok(events) => {
                info!("Loaded {} saved events", events.len());
                self.events = events;
                self.loaded = true;
                None
            }
            Err(e) => {
                warn!("Failed to load saved events: {}", e);
                Some(Notification::failure(format!("Could not load your calendar: {}", e)))
            }
        }
    }

    /// Applies the backend's answer to a delete request for `id`.
    pub fn confirm_delete<E: Display>(&mut self, id: &str, result: Result<(), E>) -> Notification {
        match result {
            Ok(()) => {
                let before = self.events.len();
                let name = self.get(id).map(|e| e.name.clone());
                self.events.retain(|e| e.id != id);
                if self.events.len() == before {
                    warn!("Deleted event {} was not in the calendar book", id);
                }
                info!("Event {} deleted", id);
                Notification::success(format!("'{}' removed from calendar", name.unwrap_or_else(|| id.to_string())))
            }
            Err(e) => {
                warn!("Failed to delete event {}: {}", id, e);
                Notification::failure(format!("Failed to delete event: {}", e))
            }
        }
    }

    pub async fn load(&mut self, api: &dyn BookingApi) -> Option<Notification> {
        let result = api.list_saved_events().await.map_err(|e| e.to_safe_string());
        self.apply_loaded(result)
    }

    pub async fn delete(&mut self, api: &dyn BookingApi, id: &str) -> Notification {
        let result = api.delete_event(id.to_string()).await.map_err(|e| e.to_safe_string());
        self.confirm_delete(id, result)
    }

    /// Events on or after `today`, soonest first.
    pub fn upcoming(&self, today: NaiveDate) -> Vec<&SavedEvent> {
        let mut upcoming: Vec<&SavedEvent> = self.events.iter().filter(|e| e.date >= today).collect();
        upcoming.sort_by_key(|e| e.date);
        upcoming
    }

    /// Booked venues, sorted and without duplicates.
    pub fn distinct_locations(&self) -> Vec<String> {
        self.events
            .iter()
            .map(|e| e.location.trim())
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn group_by_month(&self) -> Vec<MonthGroup<'_>> {
        let mut sorted: Vec<&SavedEvent> = self.events.iter().collect();
        sorted.sort_by_key(|e| e.date);

        let mut groups: Vec<MonthGroup<'_>> = Vec::new();
        for event in sorted {
            let label = event.date.format("%B %Y").to_string();
            match groups.last_mut() {
                Some(group) if group.label == label => group.events.push(event),
                _ => groups.push(MonthGroup {
                    label,
                    events: vec![event],
                }),
            }
        }
        groups
    }

    pub fn to_ics(&self) -> String {
        ics::to_ics(&self.events)
    }

    pub fn export_to(&self, path: &Path) -> crate::error::AppResult<()> {
        ics::export_to(&self.events, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockBookingApi;
    use crate::error::AppError;

    fn saved(id: &str, name: &str, location: &str, date: &str) -> SavedEvent {
        SavedEvent {
            id: id.to_string(),
            name: name.to_string(),
            location: location.to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        }
    }

    fn book() -> CalendarBook {
        let mut book = CalendarBook::new();
        book.apply_loaded::<AppError>(Ok(vec![
            saved("1", "Show X", "TD Garden, Boston", "2025-06-01"),
            saved("2", "Show Y", "Fenway Park, Boston", "2025-05-20"),
            saved("3", "Show Z", "TD Garden, Boston", "2025-07-04"),
        ]));
        book
    }

    #[test]
    fn test_failed_load_keeps_previous() {
        let mut book = book();
        let notification = book.apply_loaded(Err("HTTP 502"));
        assert!(!notification.unwrap().is_success());
        assert_eq!(book.len(), 3);
        assert!(book.is_loaded());
    }

    #[test]
    fn test_confirm_delete_removes_only_on_success() {
        let mut book = book();

        let failed = book.confirm_delete("2", Err("HTTP 500"));
        assert!(!failed.is_success());
        assert_eq!(book.len(), 3);

        let ok = book.confirm_delete::<AppError>("2", Ok(()));
        assert!(ok.is_success());
        assert!(ok.message.contains("Show Y"));
        let ids: Vec<_> = book.events().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_upcoming_and_locations() {
        let book = book();
        let today = NaiveDate::from_ymd_opt(2025, 5, 25).unwrap();
        let names: Vec<_> = book.upcoming(today).iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Show X", "Show Z"]);
        assert_eq!(
            book.distinct_locations(),
            vec!["Fenway Park, Boston".to_string(), "TD Garden, Boston".to_string()]
        );
    }

    #[test]
    fn test_group_by_month() {
        let book = book();
        let groups = book.group_by_month();
        let labels: Vec<_> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["May 2025", "June 2025", "July 2025"]);
        assert_eq!(groups[1].events[0].name, "Show X");
    }

    #[tokio::test]
    async fn test_delete_failure_leaves_book_unchanged() {
        let mut mock = MockBookingApi::new();
        mock.expect_delete_event()
            .withf(|id| id == "1")
            .times(1)
            .returning(|_| Box::pin(async { Err(AppError::backend("delete-event failed with HTTP 500")) }));

        let mut book = book();
        let before = book.clone();
        let notification = book.delete(&mock, "1").await;

        assert!(!notification.is_success());
        assert_eq!(book, before);
    }

    #[tokio::test]
    async fn test_load_replaces_book() {
        let mut mock = MockBookingApi::new();
        mock.expect_list_saved_events()
            .times(1)
            .returning(|| Box::pin(async { Ok(vec![saved("9", "Only", "Somewhere", "2025-01-01")]) }));

        let mut book = book();
        assert!(book.load(&mock).await.is_none());
        assert_eq!(book.len(), 1);
        assert_eq!(book.get("9").map(|e| e.name.as_str()), Some("Only"));
    }
}
