//! Selection coordinator
//!
//! Owns the search parameters, the artist result set and the event result
//! set, and is the only thing allowed to change them. Every network-backed
//! transition is split in two: a synchronous `submit_*`/`select_*` call
//! that validates, updates state and hands back a ticket, and a
//! `complete_*` call that applies the response. The caller performs the
//! request in between, typically as a UI command.
//!
//! Each ticket carries a generation number and a cancellation token.
//! Starting a new request of the same kind cancels the previous token and
//! bumps the generation, so a response that arrives late is recognised as
//! stale and dropped instead of overwriting newer state.

use crate::api::{BookingApi, EventQuery};
use crate::error::{AppError, AppResult};
use crate::models::{Artist, CalendarEntry, EventCandidate, Notification, SearchParams};
use crate::utils::logging;
use log::{info, warn};
use std::fmt::Display;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Searching,
    ArtistsShown,
    EventsLoading,
    EventsShown,
    NoEventsShown,
}

impl Phase {
    /// Phases in which an artist can be selected.
    fn has_artists(self) -> bool {
        matches!(
            self,
            Phase::ArtistsShown | Phase::EventsLoading | Phase::EventsShown | Phase::NoEventsShown
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    pub search_params: SearchParams,
    pub artists: Vec<Artist>,
    pub selected_artist: Option<String>,
    pub events: Vec<EventCandidate>,
    pub no_events_found: bool,
}

/// Whether a completion changed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Stale,
}

#[derive(Debug, Clone)]
pub struct SearchTicket {
    pub generation: u64,
    pub params: SearchParams,
    pub cancel: CancellationToken,
}

#[derive(Debug, Clone)]
pub struct EventTicket {
    pub generation: u64,
    pub query: EventQuery,
    pub cancel: CancellationToken,
}

#[derive(Debug)]
pub struct SelectionCoordinator {
    state: SelectionState,
    phase: Phase,
    next_generation: u64,
    pending_search: Option<(u64, CancellationToken)>,
    pending_events: Option<(u64, CancellationToken)>,
    shown_events_generation: Option<u64>,
}

impl Default for SelectionCoordinator {
    fn default() -> Self {
        Self::new(SearchParams::default())
    }
}

impl SelectionCoordinator {
    pub fn new(initial_params: SearchParams) -> Self {
        Self {
            state: SelectionState {
                search_params: initial_params,
                ..SelectionState::default()
            },
            phase: Phase::Idle,
            next_generation: 1,
            pending_search: None,
            pending_events: None,
            shown_events_generation: None,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn search_in_flight(&self) -> bool {
        self.pending_search.is_some()
    }

    pub fn events_in_flight(&self) -> bool {
        self.pending_events.is_some()
    }

    /// Generation of the event lookup whose results are on display (or
    /// about to be). Used to tag follow-up work such as map markers.
    pub fn current_event_generation(&self) -> Option<u64> {
        self.pending_events.as_ref().map(|(generation, _)| *generation).or(self.shown_events_generation)
    }

    fn issue(&mut self) -> (u64, CancellationToken) {
        let generation = self.next_generation;
        self.next_generation += 1;
        (generation, CancellationToken::new())
    }

    fn cancel_pending_events(&mut self) {
        if let Some((generation, token)) = self.pending_events.take() {
            info!("Cancelling event lookup #{}", generation);
            token.cancel();
        }
    }

    /// Validates `params` and starts a search. On validation failure
    /// nothing changes and no request should be issued.
    pub fn submit_search(&mut self, params: SearchParams) -> AppResult<SearchTicket> {
        let params = params.validate()?;

        if let Some((generation, token)) = self.pending_search.take() {
            info!("Cancelling search #{}", generation);
            token.cancel();
        }
        self.cancel_pending_events();

        let (generation, cancel) = self.issue();
        self.state.search_params = params.clone();
        self.state.artists.clear();
        self.state.selected_artist = None;
        self.state.events.clear();
        self.state.no_events_found = false;
        self.shown_events_generation = None;
        self.phase = Phase::Searching;
        self.pending_search = Some((generation, cancel.clone()));

        Ok(SearchTicket {
            generation,
            params,
            cancel,
        })
    }

    /// Applies a search response. Failures become an empty result list;
    /// an empty list is a normal terminal state.
    pub fn complete_search<E: Display>(
        &mut self,
        generation: u64,
        result: Result<Vec<Artist>, E>,
    ) -> Outcome {
        match &self.pending_search {
            Some((current, _)) if *current == generation => {}
            other => {
                logging::log_stale_response("search", generation, other.as_ref().map(|(g, _)| *g));
                return Outcome::Stale;
            }
        }
        self.pending_search = None;

        self.state.artists = match result {
            Ok(artists) => artists,
            Err(e) => {
                warn!("Artist search #{} failed: {}", generation, e);
                Vec::new()
            }
        };
        logging::log_search(&self.state.search_params.artist_name, self.state.artists.len(), generation);
        self.phase = Phase::ArtistsShown;
        Outcome::Applied
    }

    /// Starts an event lookup for one of the shown artists, scoped to the
    /// current country and city.
    pub fn select_artist(&mut self, name: &str, popularity: u8) -> AppResult<EventTicket> {
        if !self.phase.has_artists() {
            return Err(AppError::invalid_state(format!(
                "cannot select an artist while {:?}",
                self.phase
            )));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Artist name is missing"));
        }

        self.cancel_pending_events();
        let (generation, cancel) = self.issue();

        self.state.selected_artist = Some(name.to_string());
        self.state.events.clear();
        self.state.no_events_found = false;
        self.shown_events_generation = None;
        self.phase = Phase::EventsLoading;
        self.pending_events = Some((generation, cancel.clone()));

        Ok(EventTicket {
            generation,
            query: EventQuery {
                artist_name: name.to_string(),
                popularity: popularity.min(100),
                country_code: self.state.search_params.country_code.clone(),
                city: self.state.search_params.city.clone(),
            },
            cancel,
        })
    }

    /// Applies an event lookup response. Empty, malformed and failed
    /// lookups all end in the "no events" display.
    pub fn complete_event_lookup<E: Display>(
        &mut self,
        generation: u64,
        result: Result<Vec<EventCandidate>, E>,
    ) -> Outcome {
        match &self.pending_events {
            Some((current, _)) if *current == generation => {}
            other => {
                logging::log_stale_response("event", generation, other.as_ref().map(|(g, _)| *g));
                return Outcome::Stale;
            }
        }
        self.pending_events = None;
        self.shown_events_generation = Some(generation);

        let artist = self.state.selected_artist.clone().unwrap_or_default();
        match result {
            Ok(events) if !events.is_empty() => {
                logging::log_event_lookup(&artist, events.len(), generation);
                self.state.events = events;
                self.state.no_events_found = false;
                self.phase = Phase::EventsShown;
            }
            Ok(_) => {
                logging::log_event_lookup(&artist, 0, generation);
                self.state.events.clear();
                self.state.no_events_found = true;
                self.phase = Phase::NoEventsShown;
            }
            Err(e) => {
                warn!("Event lookup #{} for '{}' failed: {}", generation, artist, e);
                self.state.events.clear();
                self.state.no_events_found = true;
                self.phase = Phase::NoEventsShown;
            }
        }
        Outcome::Applied
    }

    /// Saves an entry to the personal calendar. Never touches selection
    /// state; the event stays browsable afterwards.
    pub async fn add_to_calendar(api: Arc<dyn BookingApi>, entry: CalendarEntry) -> Notification {
        let name = entry.name.clone();
        match api.save_event(entry).await {
            Ok(()) => {
                info!("Event successfully saved: {}", name);
                Notification::success(format!("'{}' added to calendar!", name))
            }
            Err(e) if e.is_remote() => {
                warn!("Failed to save '{}': {}", name, e);
                Notification::failure(format!(
                    "Failed to add '{}' to calendar: {}. Please try again.",
                    name,
                    e.to_safe_string()
                ))
            }
            Err(e) => {
                info!("Save of '{}' rejected: {}", name, e);
                Notification::failure(format!("Could not add '{}' to calendar: {}", name, e.to_safe_string()))
            }
        }
    }

    /// Builds the calendar entry for a shown event and saves it.
    pub async fn add_event_to_calendar(api: Arc<dyn BookingApi>, event: &EventCandidate) -> Notification {
        match CalendarEntry::from_event(event) {
            Ok(entry) => Self::add_to_calendar(api, entry).await,
            Err(e) => Notification::failure(e.to_safe_string()),
        }
    }

    /// Submit, fetch and apply in one go. The UI uses the split calls so
    /// that it can keep handling input while the request is in flight.
    pub async fn search(&mut self, api: Arc<dyn BookingApi>, params: SearchParams) -> AppResult<Outcome> {
        let ticket = self.submit_search(params)?;
        let generation = ticket.generation;
        let result = run_search(api, ticket).await;
        Ok(self.complete_search(generation, result))
    }

    pub async fn choose_artist(
        &mut self,
        api: Arc<dyn BookingApi>,
        name: &str,
        popularity: u8,
    ) -> AppResult<Outcome> {
        let ticket = self.select_artist(name, popularity)?;
        let generation = ticket.generation;
        let result = run_event_lookup(api, ticket).await;
        Ok(self.complete_event_lookup(generation, result))
    }
}

/// Performs the artist search for `ticket`, giving up if it is cancelled.
pub async fn run_search(api: Arc<dyn BookingApi>, ticket: SearchTicket) -> AppResult<Vec<Artist>> {
    tokio::select! {
        biased;
        _ = ticket.cancel.cancelled() => Err(AppError::Cancelled),
        result = api.search_artists(ticket.params) => result,
    }
}

/// Performs the event lookup for `ticket`, giving up if it is cancelled.
pub async fn run_event_lookup(api: Arc<dyn BookingApi>, ticket: EventTicket) -> AppResult<Vec<EventCandidate>> {
    tokio::select! {
        biased;
        _ = ticket.cancel.cancelled() => Err(AppError::Cancelled),
        result = api.find_events(ticket.query) => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockBookingApi;
    use chrono::NaiveDate;

    fn artist(name: &str, popularity: u8) -> Artist {
        Artist {
            id: format!("id-{}", name),
            name: name.to_string(),
            popularity,
            followers: 1000,
            image_url: None,
            profile_url: String::new(),
            genres: vec![],
        }
    }

    fn event(name: &str) -> EventCandidate {
        EventCandidate {
            id: format!("ev-{}", name),
            name: name.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 1),
            venue_name: "TD Garden".to_string(),
            city_name: "Boston".to_string(),
            ticket_url: None,
            suggested_price: Some(50.0),
            predicted_sales: Some(10000),
        }
    }

    fn params(name: &str) -> SearchParams {
        SearchParams {
            artist_name: name.to_string(),
            ..SearchParams::default()
        }
    }

    fn with_artists(names: &[&str]) -> SelectionCoordinator {
        let mut coordinator = SelectionCoordinator::default();
        let ticket = coordinator.submit_search(params("seed")).unwrap();
        let artists = names.iter().map(|n| artist(n, 50)).collect();
        coordinator.complete_search::<AppError>(ticket.generation, Ok(artists));
        coordinator
    }

    #[test]
    fn test_starts_idle() {
        let coordinator = SelectionCoordinator::default();
        assert_eq!(coordinator.phase(), Phase::Idle);
        assert_eq!(coordinator.state().search_params.country_code, "US");
        assert!(!coordinator.search_in_flight());
    }

    #[test]
    fn test_blank_search_is_noop() {
        let mut coordinator = with_artists(&["Adele"]);
        let before = coordinator.state().clone();
        let phase = coordinator.phase();

        let result = coordinator.submit_search(params("   "));

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(coordinator.state(), &before);
        assert_eq!(coordinator.phase(), phase);
    }

    #[test]
    fn test_search_replaces_artists_in_order() {
        let mut coordinator = with_artists(&["Old"]);
        let ticket = coordinator.submit_search(params("Adele")).unwrap();
        assert!(coordinator.state().artists.is_empty());
        assert_eq!(coordinator.phase(), Phase::Searching);

        let outcome = coordinator.complete_search::<AppError>(
            ticket.generation,
            Ok(vec![artist("Zed", 1), artist("Adele", 90), artist("Adele", 90)]),
        );

        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(coordinator.phase(), Phase::ArtistsShown);
        let names: Vec<_> = coordinator.state().artists.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Zed", "Adele", "Adele"]);
    }

    #[test]
    fn test_failed_search_shows_empty_list() {
        let mut coordinator = SelectionCoordinator::default();
        let ticket = coordinator.submit_search(params("Adele")).unwrap();
        coordinator.complete_search(ticket.generation, Err(AppError::backend("HTTP 502")));
        assert_eq!(coordinator.phase(), Phase::ArtistsShown);
        assert!(coordinator.state().artists.is_empty());
    }

    #[test]
    fn test_new_search_cancels_and_drops_old_search() {
        let mut coordinator = SelectionCoordinator::default();
        let first = coordinator.submit_search(params("First")).unwrap();
        let second = coordinator.submit_search(params("Second")).unwrap();

        assert!(first.cancel.is_cancelled());
        assert!(!second.cancel.is_cancelled());
        assert_eq!(
            coordinator.complete_search::<AppError>(first.generation, Ok(vec![artist("First", 1)])),
            Outcome::Stale
        );
        assert_eq!(coordinator.phase(), Phase::Searching);

        coordinator.complete_search::<AppError>(second.generation, Ok(vec![artist("Second", 1)]));
        assert_eq!(coordinator.state().artists[0].name, "Second");
    }

    #[test]
    fn test_select_requires_artists() {
        let mut coordinator = SelectionCoordinator::default();
        assert!(matches!(
            coordinator.select_artist("Adele", 90),
            Err(AppError::InvalidState(_))
        ));

        coordinator.submit_search(params("Adele")).unwrap();
        assert!(matches!(
            coordinator.select_artist("Adele", 90),
            Err(AppError::InvalidState(_))
        ));
    }

    #[test]
    fn test_select_uses_current_location() {
        let mut coordinator = SelectionCoordinator::default();
        let ticket = coordinator
            .submit_search(SearchParams::new("Adele", "gb", "London").unwrap())
            .unwrap();
        coordinator.complete_search::<AppError>(ticket.generation, Ok(vec![artist("Adele", 90)]));

        let ticket = coordinator.select_artist("Adele", 90).unwrap();
        assert_eq!(
            ticket.query,
            EventQuery {
                artist_name: "Adele".to_string(),
                popularity: 90,
                country_code: "GB".to_string(),
                city: "London".to_string(),
            }
        );
        assert_eq!(coordinator.phase(), Phase::EventsLoading);
        assert_eq!(coordinator.state().selected_artist.as_deref(), Some("Adele"));
    }

    #[test]
    fn test_new_selection_clears_previous_events() {
        let mut coordinator = with_artists(&["A", "B"]);
        let first = coordinator.select_artist("A", 10).unwrap();
        coordinator.complete_event_lookup::<AppError>(first.generation, Ok(vec![event("a1"), event("a2")]));
        assert_eq!(coordinator.state().events.len(), 2);

        let second = coordinator.select_artist("B", 20).unwrap();
        assert!(coordinator.state().events.is_empty());
        assert!(!coordinator.state().no_events_found);

        coordinator.complete_event_lookup::<AppError>(second.generation, Ok(vec![event("b1")]));
        let names: Vec<_> = coordinator.state().events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b1"]);
        assert_eq!(coordinator.phase(), Phase::EventsShown);
    }

    #[test]
    fn test_empty_lookup_sets_no_events() {
        let mut coordinator = with_artists(&["A"]);
        let ticket = coordinator.select_artist("A", 10).unwrap();
        coordinator.complete_event_lookup::<AppError>(ticket.generation, Ok(vec![]));
        assert!(coordinator.state().no_events_found);
        assert!(coordinator.state().events.is_empty());
        assert_eq!(coordinator.phase(), Phase::NoEventsShown);
    }

    #[test]
    fn test_failed_lookup_sets_no_events() {
        let mut coordinator = with_artists(&["A"]);
        let ticket = coordinator.select_artist("A", 10).unwrap();
        coordinator.complete_event_lookup(ticket.generation, Err("connection refused"));
        assert!(coordinator.state().no_events_found);
        assert_eq!(coordinator.phase(), Phase::NoEventsShown);
        assert!(!coordinator.events_in_flight());
    }

    #[test]
    fn test_stale_lookup_cannot_overwrite_newer_selection() {
        let mut coordinator = with_artists(&["A", "B", "C"]);
        let _first = coordinator.select_artist("A", 10).unwrap();
        let second = coordinator.select_artist("B", 20).unwrap();
        let third = coordinator.select_artist("C", 30).unwrap();
        assert!(second.cancel.is_cancelled());

        coordinator.complete_event_lookup::<AppError>(third.generation, Ok(vec![event("c1")]));
        let outcome = coordinator.complete_event_lookup::<AppError>(second.generation, Ok(vec![event("b1"), event("b2")]));

        assert_eq!(outcome, Outcome::Stale);
        assert_eq!(coordinator.state().selected_artist.as_deref(), Some("C"));
        assert_eq!(coordinator.state().events, vec![event("c1")]);
    }

    #[test]
    fn test_new_search_invalidates_event_lookup() {
        let mut coordinator = with_artists(&["A"]);
        let lookup = coordinator.select_artist("A", 10).unwrap();
        let _search = coordinator.submit_search(params("Other")).unwrap();

        assert!(lookup.cancel.is_cancelled());
        assert_eq!(
            coordinator.complete_event_lookup::<AppError>(lookup.generation, Ok(vec![event("a1")])),
            Outcome::Stale
        );
        assert!(coordinator.state().events.is_empty());
        assert!(coordinator.state().selected_artist.is_none());
    }

    #[test]
    fn test_event_generation_tracks_display() {
        let mut coordinator = with_artists(&["A"]);
        assert_eq!(coordinator.current_event_generation(), None);
        let ticket = coordinator.select_artist("A", 10).unwrap();
        assert_eq!(coordinator.current_event_generation(), Some(ticket.generation));
        coordinator.complete_event_lookup::<AppError>(ticket.generation, Ok(vec![event("a1")]));
        assert_eq!(coordinator.current_event_generation(), Some(ticket.generation));
    }

    #[tokio::test]
    async fn test_blank_search_issues_no_request() {
        let mut mock = MockBookingApi::new();
        mock.expect_search_artists().never();
        let api: Arc<dyn BookingApi> = Arc::new(mock);

        let mut coordinator = SelectionCoordinator::default();
        let result = coordinator.search(api, params("\t ")).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(coordinator.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_adele_scenario() {
        let mut mock = MockBookingApi::new();
        mock.expect_search_artists()
            .times(1)
            .withf(|p| p.artist_name == "Adele" && p.country_code == "US" && p.city == "Boston")
            .returning(|_| Box::pin(async { Ok(vec![artist("Adele", 90)]) }));
        mock.expect_find_events()
            .times(1)
            .withf(|q| q.artist_name == "Adele" && q.popularity == 90)
            .returning(|_| Box::pin(async { Ok(vec![event("one"), event("two")]) }));
        let api: Arc<dyn BookingApi> = Arc::new(mock);

        let mut coordinator = SelectionCoordinator::default();
        let search = SearchParams::new("Adele", "US", "Boston").unwrap();
        assert_eq!(coordinator.search(api.clone(), search).await.unwrap(), Outcome::Applied);
        assert_eq!(coordinator.state().artists.len(), 1);

        let chosen = coordinator.state().artists[0].clone();
        coordinator.choose_artist(api, &chosen.name, chosen.popularity).await.unwrap();

        assert_eq!(coordinator.state().events.len(), 2);
        assert!(!coordinator.state().no_events_found);
    }

    #[tokio::test]
    async fn test_add_to_calendar_failure_leaves_events() {
        let mut mock = MockBookingApi::new();
        mock.expect_find_events()
            .returning(|_| Box::pin(async { Ok(vec![event("Show X")]) }));
        mock.expect_save_event()
            .times(1)
            .returning(|_| Box::pin(async { Err(AppError::backend("save-event failed with HTTP 500")) }));
        let api: Arc<dyn BookingApi> = Arc::new(mock);

        let mut coordinator = with_artists(&["A"]);
        coordinator.choose_artist(api.clone(), "A", 10).await.unwrap();
        let before = coordinator.state().clone();

        let entry = CalendarEntry::new("Show X", "Venue, City", "2025-06-01").unwrap();
        let notification = SelectionCoordinator::add_to_calendar(api, entry).await;

        assert!(!notification.is_success());
        assert_eq!(coordinator.state(), &before);
    }

    #[tokio::test]
    async fn test_add_to_calendar_wording_depends_on_error_source() {
        let mut mock = MockBookingApi::new();
        mock.expect_save_event()
            .withf(|entry| entry.name == "Down")
            .returning(|_| Box::pin(async { Err(AppError::backend("save-event failed with HTTP 502")) }));
        mock.expect_save_event()
            .withf(|entry| entry.name == "Rejected")
            .returning(|_| Box::pin(async { Err(AppError::validation("Date already booked")) }));
        let api: Arc<dyn BookingApi> = Arc::new(mock);

        let down = CalendarEntry::new("Down", "Venue, City", "2025-06-01").unwrap();
        let notification = SelectionCoordinator::add_to_calendar(api.clone(), down).await;
        assert!(notification.message.starts_with("Failed to add 'Down'"));
        assert!(notification.message.ends_with("Please try again."));

        let rejected = CalendarEntry::new("Rejected", "Venue, City", "2025-06-01").unwrap();
        let notification = SelectionCoordinator::add_to_calendar(api, rejected).await;
        assert!(!notification.is_success());
        assert!(notification.message.starts_with("Could not add 'Rejected'"));
        assert!(!notification.message.contains("try again"));
    }

    #[tokio::test]
    async fn test_add_undated_event_never_calls_backend() {
        let mut mock = MockBookingApi::new();
        mock.expect_save_event().never();
        let api: Arc<dyn BookingApi> = Arc::new(mock);

        let mut undated = event("TBA");
        undated.date = None;
        let notification = SelectionCoordinator::add_event_to_calendar(api, &undated).await;
        assert!(!notification.is_success());
    }

    #[tokio::test]
    async fn test_cancelled_ticket_short_circuits() {
        let mut mock = MockBookingApi::new();
        mock.expect_find_events()
            .returning(|_| Box::pin(std::future::pending()));
        let api: Arc<dyn BookingApi> = Arc::new(mock);

        let mut coordinator = with_artists(&["A", "B"]);
        let stale = coordinator.select_artist("A", 10).unwrap();
        coordinator.select_artist("B", 20).unwrap();

        let result = run_event_lookup(api, stale).await;
        assert!(matches!(result, Err(AppError::Cancelled)));
    }
}
