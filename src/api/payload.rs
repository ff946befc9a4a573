//! Response payload decoding.
//!
//! The backend relays Spotify artist objects and Ticketmaster event objects
//! more or less verbatim, in a few different envelopes depending on the
//! deployment. Envelopes we do not recognise are `Backend` errors;
//! individual records that fail to decode are skipped.

use crate::error::{AppError, AppResult};
use crate::models::artist::clamp_popularity;
use crate::models::{Artist, AvailableEvent, EventCandidate, SavedEvent};
use chrono::NaiveDate;
use log::{debug, warn};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct ArtistRecord {
    #[serde(default)]
    id: Option<String>,
    name: String,
    #[serde(default)]
    popularity: Option<i64>,
    #[serde(default)]
    followers: Option<Followers>,
    #[serde(default)]
    images: Vec<Image>,
    #[serde(default)]
    external_urls: Option<ExternalUrls>,
    #[serde(default)]
    genres: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Followers {
    #[serde(default)]
    total: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct Image {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ExternalUrls {
    #[serde(default)]
    spotify: Option<String>,
}

impl From<ArtistRecord> for Artist {
    fn from(record: ArtistRecord) -> Self {
        Artist {
            id: record.id.unwrap_or_else(|| record.name.clone()),
            name: record.name,
            popularity: clamp_popularity(record.popularity.unwrap_or(0)),
            followers: record.followers.and_then(|f| f.total).unwrap_or(0),
            image_url: record.images.into_iter().next().map(|image| image.url),
            profile_url: record
                .external_urls
                .and_then(|urls| urls.spotify)
                .unwrap_or_default(),
            genres: record.genres,
        }
    }
}

#[derive(Debug, Deserialize)]
struct EventRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    dates: Option<Dates>,
    #[serde(rename = "_embedded", default)]
    embedded: Option<Embedded>,
    #[serde(default, deserialize_with = "lenient_number")]
    suggested_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    predicted_sales: Option<f64>,
}

/// Forecast fields sometimes carry placeholder text such as
/// "No prediction available"; anything that is not a number reads as `None`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

#[derive(Debug, Deserialize)]
struct Dates {
    #[serde(default)]
    start: Option<DateStart>,
}

#[derive(Debug, Deserialize)]
struct DateStart {
    #[serde(rename = "localDate", default)]
    local_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Embedded {
    #[serde(default)]
    venues: Vec<Venue>,
}

#[derive(Debug, Deserialize)]
struct Venue {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    city: Option<City>,
}

#[derive(Debug, Deserialize)]
struct City {
    #[serde(default)]
    name: Option<String>,
}

impl EventRecord {
    fn into_candidate(self, index: usize) -> Option<EventCandidate> {
        let name = self.name.filter(|n| !n.trim().is_empty())?;
        let date = self
            .dates
            .and_then(|d| d.start)
            .and_then(|s| s.local_date)
            .and_then(|raw| NaiveDate::parse_from_str(&raw, "%Y-%m-%d").ok());
        let venue = self.embedded.and_then(|e| e.venues.into_iter().next());
        let (venue_name, city_name) = match venue {
            Some(v) => (
                v.name.unwrap_or_default(),
                v.city.and_then(|c| c.name).unwrap_or_default(),
            ),
            None => (String::new(), String::new()),
        };

        Some(EventCandidate {
            id: self.id.unwrap_or_else(|| format!("event-{}", index)),
            name,
            date,
            venue_name,
            city_name,
            ticket_url: self.url,
            suggested_price: self.suggested_price.filter(|p| p.is_finite() && *p >= 0.0),
            predicted_sales: self
                .predicted_sales
                .filter(|s| s.is_finite() && *s >= 0.0)
                .map(|s| s.round() as u64),
        })
    }
}

fn decode_records<T, R>(items: &[Value], kind: &str, mut convert: impl FnMut(usize, R) -> Option<T>) -> Vec<T>
where
    R: for<'de> Deserialize<'de>,
{
    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match serde_json::from_value::<R>(item.clone()) {
            Ok(record) => match convert(index, record) {
                Some(value) => out.push(value),
                None => debug!("Skipping {} #{}: missing required fields", kind, index),
            },
            Err(e) => warn!("Skipping malformed {} #{}: {}", kind, index, e),
        }
    }
    out
}

/// Accepts `[...]`, `{"items": [...]}` or `{"artists": {"items": [...]}}`.
pub fn parse_artists(payload: &Value) -> AppResult<Vec<Artist>> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(map) => match (map.get("items"), map.get("artists")) {
            (Some(Value::Array(items)), _) => items,
            (_, Some(Value::Object(artists))) => match artists.get("items") {
                Some(Value::Array(items)) => items,
                _ => return Err(AppError::backend("artist payload has no items array")),
            },
            _ => return Err(AppError::backend("artist payload has no items array")),
        },
        _ => return Err(AppError::backend("artist payload is neither an array nor an object")),
    };

    Ok(decode_records::<Artist, ArtistRecord>(items, "artist", |_, record| {
        Some(record.into())
    }))
}

/// Accepts `{"events": [...]}`, falling back to `local_events` followed by
/// `global_events` when `events` is absent.
pub fn parse_events(payload: &Value) -> AppResult<Vec<EventCandidate>> {
    let map = payload
        .as_object()
        .ok_or_else(|| AppError::backend("event payload is not an object"))?;

    let items: Vec<Value> = match map.get("events") {
        Some(Value::Array(items)) => items.clone(),
        Some(_) => return Err(AppError::backend("'events' is not an array")),
        None => {
            let local = map.get("local_events").and_then(Value::as_array);
            let global = map.get("global_events").and_then(Value::as_array);
            if local.is_none() && global.is_none() {
                return Err(AppError::backend("event payload has no events array"));
            }
            local
                .into_iter()
                .chain(global)
                .flat_map(|items| items.iter().cloned())
                .collect()
        }
    };

    Ok(decode_records::<EventCandidate, EventRecord>(&items, "event", |index, record| {
        record.into_candidate(index)
    }))
}

pub fn parse_saved_events(payload: &Value) -> AppResult<Vec<SavedEvent>> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("events") {
            Some(Value::Array(items)) => items,
            _ => return Err(AppError::backend("saved event payload has no events array")),
        },
        _ => return Err(AppError::backend("saved event payload is neither an array nor an object")),
    };

    Ok(decode_records::<SavedEvent, SavedEvent>(items, "saved event", |_, saved| Some(saved)))
}

#[derive(Debug, Deserialize)]
struct AvailabilityRecord {
    #[serde(default)]
    artist: Option<Value>,
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    venue: Option<Value>,
    #[serde(default)]
    date: Option<Value>,
    #[serde(default)]
    location: Option<Value>,
}

fn text_or_unknown(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => "Unknown".to_string(),
    }
}

impl From<AvailabilityRecord> for AvailableEvent {
    fn from(record: AvailabilityRecord) -> Self {
        AvailableEvent {
            artist: text_or_unknown(record.artist),
            name: text_or_unknown(record.name),
            venue: text_or_unknown(record.venue),
            date: text_or_unknown(record.date),
            location: text_or_unknown(record.location),
        }
    }
}

/// Accepts a bare array of rows. An `{"error": ...}` body is surfaced as a
/// `Backend` error carrying the backend's message.
pub fn parse_availability(payload: &Value) -> AppResult<Vec<AvailableEvent>> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("error").and_then(Value::as_str) {
            Some(message) => return Err(AppError::backend(message.to_string())),
            None => return Err(AppError::backend("availability payload is not an array")),
        },
        _ => return Err(AppError::backend("availability payload is not an array")),
    };

    Ok(decode_records::<AvailableEvent, AvailabilityRecord>(items, "availability row", |_, record| {
        Some(record.into())
    }))
}
