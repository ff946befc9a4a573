//! UI state management module
//!
//! Form inputs, the calendar draft, the notification banner and loading
//! flags. Search results and selection live in the coordinator, not here.

use crate::error::AppResult;
use crate::models::{
    AvailabilityQuery, AvailableEvent, CalendarEntry, EventCandidate, MarkerBatch, Notification, SearchParams,
};
use crate::utils::logging;

/// UI view states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    ArtistRecommendation,
    EventManagement,
    CalendarPage,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::ArtistRecommendation => "Artist Recommendation",
            View::EventManagement => "Event Management",
            View::CalendarPage => "Calendar",
        }
    }
}

/// Editable copy of an event about to be added to the calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDraft {
    pub name: String,
    pub location: String,
    /// ISO date text as typed, e.g. "2025-06-01"
    pub date: String,
    pub error: Option<String>,
}

impl CalendarDraft {
    pub fn from_event(event: &EventCandidate) -> Self {
        Self {
            name: event.name.clone(),
            location: event.location(),
            date: event.date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            error: None,
        }
    }

    pub fn to_entry(&self) -> AppResult<CalendarEntry> {
        CalendarEntry::new(&self.name, &self.location, &self.date)
    }
}

/// Availability search on the Event Management page. Only the newest
/// request's answer is applied.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityPanel {
    pub artist: String,
    pub zip_code: String,
    pub radius: String,
    pub start_date: String,
    pub end_date: String,

    /// `None` until the first search answers
    pub results: Option<Vec<AvailableEvent>>,
    pub error: Option<String>,
    in_flight: Option<u64>,
    next_generation: u64,
}

impl AvailabilityPanel {
    pub fn is_searching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Validates the form and tags a new request. Invalid input leaves the
    /// panel as it was apart from the error line.
    pub fn begin(&mut self) -> AppResult<(u64, AvailabilityQuery)> {
        let query = AvailabilityQuery::new(&self.artist, &self.zip_code, &self.radius, &self.start_date, &self.end_date)
            .map_err(|e| {
                self.error = Some(e.to_safe_string());
                e
            })?;
        self.next_generation += 1;
        self.in_flight = Some(self.next_generation);
        self.error = None;
        Ok((self.next_generation, query))
    }

    /// Applies a response. Returns false when it belongs to a superseded request.
    pub fn complete(&mut self, generation: u64, result: Result<Vec<AvailableEvent>, String>) -> bool {
        if self.in_flight != Some(generation) {
            logging::log_stale_response("availability", generation, self.in_flight);
            return false;
        }
        self.in_flight = None;
        match result {
            Ok(rows) => {
                self.results = Some(rows);
                self.error = None;
            }
            Err(e) => self.error = Some(e),
        }
        true
    }
}

/// Application UI state
#[derive(Debug, Clone)]
pub struct UiState {
    pub current_view: View,

    // Search form inputs
    pub artist_input: String,
    pub country_input: String,
    pub city_input: String,

    /// Open "Add to Calendar" draft, if any
    pub draft: Option<CalendarDraft>,
    pub saving_draft: bool,

    /// Markers for the events on display, tagged with their lookup generation
    pub markers: Option<(u64, MarkerBatch)>,

    pub notification: Option<Notification>,
    pub calendar_loading: bool,

    pub availability: AvailabilityPanel,
}

impl UiState {
    pub fn new(defaults: &SearchParams) -> Self {
        Self {
            current_view: View::Home,
            artist_input: defaults.artist_name.clone(),
            country_input: defaults.country_code.clone(),
            city_input: defaults.city.clone(),
            draft: None,
            saving_draft: false,
            markers: None,
            notification: None,
            calendar_loading: false,
            availability: AvailabilityPanel::default(),
        }
    }

    /// Current form contents, not yet validated.
    pub fn search_form(&self) -> SearchParams {
        SearchParams {
            artist_name: self.artist_input.clone(),
            country_code: self.country_input.clone(),
            city: self.city_input.clone(),
        }
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notification = Some(notification);
    }

    /// Markers for `generation`, or `None` if they belong to an older lookup.
    pub fn markers_for(&self, generation: Option<u64>) -> Option<&MarkerBatch> {
        match (&self.markers, generation) {
            (Some((tagged, batch)), Some(current)) if *tagged == current => Some(batch),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use chrono::NaiveDate;

    fn event() -> EventCandidate {
        EventCandidate {
            id: "1".to_string(),
            name: "Show X".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 1),
            venue_name: "TD Garden".to_string(),
            city_name: "Boston".to_string(),
            ticket_url: None,
            suggested_price: None,
            predicted_sales: None,
        }
    }

    #[test]
    fn test_draft_prefill_and_validation() {
        let mut draft = CalendarDraft::from_event(&event());
        assert_eq!(draft.location, "TD Garden, Boston");
        assert_eq!(draft.date, "2025-06-01");
        assert_eq!(draft.to_entry().unwrap().name, "Show X");

        draft.date = "06/01/2025".to_string();
        assert!(matches!(draft.to_entry(), Err(AppError::Validation(_))));

        draft.date = "2025-06-01".to_string();
        draft.location = " ".to_string();
        assert!(draft.to_entry().is_err());
    }

    #[test]
    fn test_search_form_defaults() {
        let state = UiState::new(&SearchParams::default());
        let form = state.search_form();
        assert_eq!(form.country_code, "US");
        assert_eq!(form.city, "Boston");
        assert!(form.artist_name.is_empty());
    }

    fn row(name: &str) -> AvailableEvent {
        AvailableEvent {
            artist: "Adele".to_string(),
            name: name.to_string(),
            venue: "TD Garden".to_string(),
            date: "2025-06-01".to_string(),
            location: "Boston, MA".to_string(),
        }
    }

    #[test]
    fn test_availability_invalid_form_keeps_results() {
        let mut panel = AvailabilityPanel::default();
        panel.artist = "Adele".to_string();
        let (generation, _) = panel.begin().unwrap();
        assert!(panel.complete(generation, Ok(vec![row("Adele Live")])));

        panel.artist.clear();
        panel.radius = "five".to_string();
        assert!(panel.begin().is_err());
        assert!(!panel.is_searching());
        assert_eq!(panel.results.as_ref().map(Vec::len), Some(1));
        assert!(panel.error.as_deref().unwrap_or_default().contains("numeric"));
    }

    #[test]
    fn test_availability_latest_request_wins() {
        let mut panel = AvailabilityPanel::default();
        panel.zip_code = "02114".to_string();
        let (first, _) = panel.begin().unwrap();
        let (second, query) = panel.begin().unwrap();
        assert_eq!(query.zip_code, "02114");

        assert!(panel.complete(second, Ok(vec![])));
        assert!(!panel.complete(first, Ok(vec![row("Late")])));
        assert_eq!(panel.results, Some(vec![]));
        assert!(!panel.is_searching());
    }

    #[test]
    fn test_availability_failure_keeps_previous_rows() {
        let mut panel = AvailabilityPanel::default();
        panel.artist = "Adele".to_string();
        let (generation, _) = panel.begin().unwrap();
        panel.complete(generation, Ok(vec![row("Adele Live")]));

        let (generation, _) = panel.begin().unwrap();
        assert!(panel.complete(generation, Err("Backend error: search-events failed with HTTP 500".to_string())));
        assert_eq!(panel.results.as_ref().map(Vec::len), Some(1));
        assert!(panel.error.is_some());
    }

    #[test]
    fn test_markers_for_generation() {
        let mut state = UiState::new(&SearchParams::default());
        state.markers = Some((3, MarkerBatch::default()));
        assert!(state.markers_for(Some(3)).is_some());
        assert!(state.markers_for(Some(4)).is_none());
        assert!(state.markers_for(None).is_none());
    }
}
