use crate::models::{Artist, AvailableEvent, EventCandidate, MarkerBatch, Notification, SavedEvent};
use crate::ui_state::View;

/// Unified application message type
///
/// Results of async work carry `String` errors so that messages stay
/// `Clone`. Responses to generation-tracked requests carry the generation
/// of the ticket that produced them.
#[derive(Debug, Clone)]
pub enum Message {
    // ===== UI Navigation Messages =====
    Navigate(View),

    // ===== UI Action Messages =====
    /// Open a URL in the default browser
    OpenUrl(String),
    DismissNotification,

    // ===== Search Form Messages =====
    ArtistNameChanged(String),
    CountryChanged(String),
    CityChanged(String),
    SubmitSearch,

    // ===== Selection Messages =====
    /// View events for an artist (name, popularity)
    SelectArtist(String, u8),
    /// Open the calendar draft for a shown event
    OpenDraft(String),

    // ===== Calendar Draft Messages =====
    DraftNameChanged(String),
    DraftLocationChanged(String),
    DraftDateChanged(String),
    SaveDraft,
    CancelDraft,

    // ===== Calendar Page Messages =====
    LoadCalendar,
    DeleteSavedEvent(String),
    ExportCalendar,

    // ===== Availability Search Messages =====
    AvailabilityArtistChanged(String),
    AvailabilityZipChanged(String),
    AvailabilityRadiusChanged(String),
    AvailabilityStartChanged(String),
    AvailabilityEndChanged(String),
    SubmitAvailability,

    // ===== Async Operation Results =====
    /// Artist search completed (generation, result)
    SearchCompleted(u64, Result<Vec<Artist>, String>),
    /// Event lookup completed (generation, result)
    EventsLoaded(u64, Result<Vec<EventCandidate>, String>),
    /// Venue markers resolved for an event lookup generation
    MarkersResolved(u64, MarkerBatch),
    EventSaved(Notification),
    CalendarLoaded(Result<Vec<SavedEvent>, String>),
    /// Saved event deletion completed (id, result)
    SavedEventDeleted(String, Result<(), String>),
    CalendarExported(Result<String, String>),
    /// Availability search completed (generation, result)
    AvailabilityLoaded(u64, Result<Vec<AvailableEvent>, String>),
}
