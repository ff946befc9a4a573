// Declare modules
pub mod artist;
pub mod availability;
pub mod calendar;
pub mod event;
pub mod geo;
pub mod notification;
pub mod search;

// Re-export so callers can use `crate::models::Artist` and friends directly.
pub use artist::Artist;
pub use availability::{AvailabilityQuery, AvailableEvent};
pub use calendar::{CalendarEntry, SavedEvent};
pub use event::EventCandidate;
pub use geo::{Bounds, GeoPoint, Marker, MarkerBatch};
pub use notification::{Notification, NotificationKind};
pub use search::SearchParams;
