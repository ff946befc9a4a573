//! Backend API seam
//!
//! `BookingApi` is the only way the rest of the crate talks to the booking
//! backend. Futures are boxed and `'static` so they can be handed straight
//! to the UI executor or a spawned task.

use crate::error::AppResult;
use crate::models::{
    Artist, AvailabilityQuery, AvailableEvent, CalendarEntry, EventCandidate, SavedEvent, SearchParams,
};
use std::future::Future;
use std::pin::Pin;

pub mod http;
pub mod payload;

pub use http::HttpBookingApi;

pub type ApiFuture<T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send>>;

/// Parameters of one event lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    pub artist_name: String,
    pub popularity: u8,
    pub country_code: String,
    pub city: String,
}

#[cfg_attr(test, mockall::automock)]
pub trait BookingApi: Send + Sync {
    fn search_artists(&self, params: SearchParams) -> ApiFuture<Vec<Artist>>;

    fn find_events(&self, query: EventQuery) -> ApiFuture<Vec<EventCandidate>>;

    fn save_event(&self, entry: CalendarEntry) -> ApiFuture<()>;

    fn delete_event(&self, id: String) -> ApiFuture<()>;

    fn list_saved_events(&self) -> ApiFuture<Vec<SavedEvent>>;

    /// Ticketmaster availability search behind the Event Management page.
    fn search_availability(&self, query: AvailabilityQuery) -> ApiFuture<Vec<AvailableEvent>>;
}
