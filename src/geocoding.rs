//! Venue geocoding for the map panel.

use crate::api::ApiFuture;
use crate::config::{validate_base_url, AppConfig};
use crate::error::{AppError, AppResult};
use crate::http_config::HttpClientFactory;
use crate::models::{EventCandidate, GeoPoint, Marker, MarkerBatch};
use crate::utils::logging;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use url::Url;

#[cfg_attr(test, mockall::automock)]
pub trait Geocoder: Send + Sync {
    /// Resolves a free-text place to a point. `Ok(None)` means the place
    /// was not found.
    fn geocode(&self, query: String) -> ApiFuture<Option<GeoPoint>>;
}

#[derive(Debug, Deserialize)]
struct NominatimHit {
    lat: String,
    lon: String,
}

/// Geocoder backed by a Nominatim `/search` endpoint.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: Client,
    base_url: Url,
}

impl NominatimGeocoder {
    pub fn new(client: Client, base_url: &str) -> AppResult<Self> {
        Ok(Self {
            client,
            base_url: validate_base_url("geocoder_url", base_url)?,
        })
    }

    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let client = HttpClientFactory::new(config).geocoding_client()?;
        Self::new(client, &config.geocoder_url)
    }

    async fn geocode_inner(&self, query: String) -> AppResult<Option<GeoPoint>> {
        let url = self
            .base_url
            .join("search")
            .map_err(|e| AppError::config(format!("Bad geocoder URL: {}", e)))?;

        let response = self
            .client
            .get(url)
            .query(&[("q", query.as_str()), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| {
                logging::log_network_error("geocode", &e);
                AppError::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::backend(format!("geocode failed with HTTP {}", status)));
        }

        let hits: Vec<NominatimHit> = response
            .json()
            .await
            .map_err(|e| AppError::backend(format!("geocode returned malformed JSON: {}", e)))?;

        let Some(hit) = hits.into_iter().next() else {
            debug!("No geocoding result for '{}'", query);
            return Ok(None);
        };
        parse_hit(&hit).map(Some)
    }
}

fn parse_hit(hit: &NominatimHit) -> AppResult<GeoPoint> {
    let lat = hit
        .lat
        .trim()
        .parse::<f64>()
        .map_err(|_| AppError::backend(format!("bad latitude '{}'", hit.lat)))?;
    let lon = hit
        .lon
        .trim()
        .parse::<f64>()
        .map_err(|_| AppError::backend(format!("bad longitude '{}'", hit.lon)))?;
    Ok(GeoPoint::new(lat, lon))
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, query: String) -> ApiFuture<Option<GeoPoint>> {
        let geocoder = self.clone();
        Box::pin(async move { geocoder.geocode_inner(query).await })
    }
}

/// Geocodes every event's venue concurrently. Lookups that fail, find
/// nothing, or land outside valid coordinates are skipped; bounds cover
/// the resolved markers only. Markers keep the order of `events`.
pub async fn resolve_markers(geocoder: Arc<dyn Geocoder>, events: &[EventCandidate]) -> MarkerBatch {
    let started = Instant::now();
    let mut batch = MarkerBatch::default();
    let mut tasks = JoinSet::new();

    for (index, event) in events.iter().enumerate() {
        if event.venue_name.trim().is_empty() {
            debug!("'{}' has no venue, skipping", event.name);
            batch.skip();
            continue;
        }
        let geocoder = geocoder.clone();
        let query = event.location();
        tasks.spawn(async move { (index, geocoder.geocode(query).await) });
    }

    let mut resolved: Vec<(usize, GeoPoint)> = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, Ok(Some(point)))) if point.is_valid() => resolved.push((index, point)),
            Ok((index, Ok(Some(point)))) => {
                warn!("Ignoring out-of-range point {:?} for '{}'", point, events[index].venue_name);
                batch.skip();
            }
            Ok((index, Ok(None))) => {
                debug!("Venue '{}' not found", events[index].venue_name);
                batch.skip();
            }
            Ok((index, Err(e))) => {
                warn!("Geocoding '{}' failed: {}", events[index].venue_name, e);
                batch.skip();
            }
            Err(e) => {
                warn!("Geocoding task failed: {}", e);
                batch.skip();
            }
        }
    }

    resolved.sort_by_key(|(index, _)| *index);
    for (index, point) in resolved {
        let event = &events[index];
        batch.push(Marker {
            event_name: event.name.clone(),
            venue_name: event.venue_name.clone(),
            point,
        });
    }

    logging::log_geocode_batch(batch.markers.len(), batch.skipped, started.elapsed().as_millis() as u64);
    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(name: &str, venue: &str) -> EventCandidate {
        EventCandidate {
            id: name.to_string(),
            name: name.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 1),
            venue_name: venue.to_string(),
            city_name: "Boston".to_string(),
            ticket_url: None,
            suggested_price: None,
            predicted_sales: None,
        }
    }

    #[test]
    fn test_parse_hit() {
        let hit = NominatimHit {
            lat: "42.3662".to_string(),
            lon: " -71.0621".to_string(),
        };
        assert_eq!(parse_hit(&hit).unwrap(), GeoPoint::new(42.3662, -71.0621));

        let bad = NominatimHit {
            lat: "north".to_string(),
            lon: "0".to_string(),
        };
        assert!(matches!(parse_hit(&bad), Err(AppError::Backend(_))));
    }

    #[tokio::test]
    async fn test_failures_are_skipped() {
        let mut mock = MockGeocoder::new();
        mock.expect_geocode().times(3).returning(|query| {
            Box::pin(async move {
                if query.starts_with("TD Garden") {
                    Ok(Some(GeoPoint::new(42.3662, -71.0621)))
                } else if query.starts_with("Fenway") {
                    Ok(Some(GeoPoint::new(42.3467, -71.0972)))
                } else {
                    Err(AppError::backend("geocode failed with HTTP 503"))
                }
            })
        });
        let geocoder: Arc<dyn Geocoder> = Arc::new(mock);

        let events = vec![
            event("A", "TD Garden"),
            event("B", "Nowhere Hall"),
            event("C", "Fenway Park"),
            event("D", "  "),
        ];
        let batch = resolve_markers(geocoder, &events).await;

        let names: Vec<_> = batch.markers.iter().map(|m| m.event_name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
        assert_eq!(batch.skipped, 2);
        let bounds = batch.bounds.unwrap();
        assert_eq!(bounds.north, 42.3662);
        assert_eq!(bounds.south, 42.3467);
        assert_eq!(bounds.west, -71.0972);
        assert_eq!(bounds.east, -71.0621);
    }

    #[tokio::test]
    async fn test_nothing_resolved_has_no_bounds() {
        let mut mock = MockGeocoder::new();
        mock.expect_geocode().returning(|_| Box::pin(async { Ok(None) }));
        let geocoder: Arc<dyn Geocoder> = Arc::new(mock);

        let batch = resolve_markers(geocoder, &[event("A", "Unknown")]).await;
        assert!(batch.markers.is_empty());
        assert!(batch.bounds.is_none());
        assert_eq!(batch.skipped, 1);
    }

    #[tokio::test]
    async fn test_invalid_points_are_skipped() {
        let mut mock = MockGeocoder::new();
        mock.expect_geocode()
            .returning(|_| Box::pin(async { Ok(Some(GeoPoint::new(123.0, 10.0))) }));
        let geocoder: Arc<dyn Geocoder> = Arc::new(mock);

        let batch = resolve_markers(geocoder, &[event("A", "Somewhere")]).await;
        assert!(batch.bounds.is_none());
        assert_eq!(batch.skipped, 1);
    }

    #[tokio::test]
    async fn test_empty_events() {
        let mut mock = MockGeocoder::new();
        mock.expect_geocode().never();
        let batch = resolve_markers(Arc::new(mock), &[]).await;
        assert_eq!(batch, MarkerBatch::default());
    }
}
