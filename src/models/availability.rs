use crate::error::{AppError, AppResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Filters for the event availability search on the Event Management page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityQuery {
    pub artist: String,
    pub zip_code: String,
    /// Miles around `zip_code`
    pub radius: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

fn parse_date(label: &str, raw: &str) -> AppResult<Option<NaiveDate>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| AppError::validation(format!("{} must look like 2025-06-01, got '{}'", label, raw)))
}

impl AvailabilityQuery {
    /// Validates raw form text. Every field is optional, but radius alone
    /// does not make a search.
    pub fn new(artist: &str, zip_code: &str, radius: &str, start_date: &str, end_date: &str) -> AppResult<Self> {
        let radius = radius.trim();
        let radius = if radius.is_empty() {
            None
        } else if radius.chars().all(|c| c.is_ascii_digit()) {
            let miles = radius
                .parse::<u32>()
                .map_err(|_| AppError::validation(format!("Radius '{}' is too large", radius)))?;
            Some(miles)
        } else {
            return Err(AppError::validation("Radius must be a numeric value."));
        };

        let query = Self {
            artist: artist.trim().to_string(),
            zip_code: zip_code.trim().to_string(),
            radius,
            start_date: parse_date("Start date", start_date)?,
            end_date: parse_date("End date", end_date)?,
        };

        if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
            if end < start {
                return Err(AppError::validation("End date is before start date"));
            }
        }

        let has_filter = !query.artist.is_empty()
            || !query.zip_code.is_empty()
            || query.start_date.is_some()
            || query.end_date.is_some();
        if !has_filter {
            return Err(AppError::validation("At least one search parameter is required."));
        }

        Ok(query)
    }

    /// Query string pairs in the backend's naming; unset filters are sent empty.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let date = |d: Option<NaiveDate>| d.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();
        vec![
            ("artist", self.artist.clone()),
            ("zipCode", self.zip_code.clone()),
            ("radius", self.radius.map(|r| r.to_string()).unwrap_or_default()),
            ("startDate", date(self.start_date)),
            ("endDate", date(self.end_date)),
        ]
    }
}

/// One row of availability results. The backend fills gaps with "Unknown".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableEvent {
    pub artist: String,
    pub name: String,
    pub venue: String,
    /// Kept as text; the backend may send "Unknown" here.
    pub date: String,
    pub location: String,
}
