use crate::error::{AppError, AppResult};
use crate::models::EventCandidate;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Body of a save-event request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEntry {
    pub name: String,
    pub location: String,
    pub date: NaiveDate,
}

impl CalendarEntry {
    pub fn new(name: &str, location: &str, date: &str) -> AppResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Event name cannot be empty"));
        }
        let location = location.trim();
        if location.is_empty() {
            return Err(AppError::validation("Location cannot be empty"));
        }
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
            AppError::validation(format!("Date must look like 2025-06-01, got '{}'", date.trim()))
        })?;

        Ok(Self {
            name: name.to_string(),
            location: location.to_string(),
            date,
        })
    }

    pub fn from_event(event: &EventCandidate) -> AppResult<Self> {
        let date = event
            .date
            .ok_or_else(|| AppError::validation(format!("'{}' has no date yet", event.name)))?;
        Self::new(&event.name, &event.location(), &date.format("%Y-%m-%d").to_string())
    }
}

/// An event already stored in the personal calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedEvent {
    #[serde(deserialize_with = "id_from_number_or_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    pub date: NaiveDate,
}

fn id_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_validation() {
        assert!(CalendarEntry::new("Show X", "Venue, City", "2025-06-01").is_ok());
        assert!(matches!(
            CalendarEntry::new(" ", "Venue, City", "2025-06-01"),
            Err(AppError::Validation(_))
        ));
        assert!(CalendarEntry::new("Show X", "", "2025-06-01").is_err());
        assert!(CalendarEntry::new("Show X", "Venue, City", "06/01/2025").is_err());
    }

    #[test]
    fn test_entry_serializes_iso_date() {
        let entry = CalendarEntry::new("Show X", "Venue, City", "2025-06-01").unwrap();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Show X", "location": "Venue, City", "date": "2025-06-01"})
        );
    }

    #[test]
    fn test_entry_from_event_without_date() {
        let event = EventCandidate {
            id: "1".to_string(),
            name: "Show X".to_string(),
            date: None,
            venue_name: "Venue".to_string(),
            city_name: "City".to_string(),
            ticket_url: None,
            suggested_price: None,
            predicted_sales: None,
        };
        assert!(CalendarEntry::from_event(&event).is_err());

        let dated = EventCandidate {
            date: NaiveDate::from_ymd_opt(2025, 6, 1),
            ..event
        };
        let entry = CalendarEntry::from_event(&dated).unwrap();
        assert_eq!(entry.location, "Venue, City");
    }

    #[test]
    fn test_saved_event_accepts_numeric_id() {
        let saved: SavedEvent = serde_json::from_str(
            r#"{"id": 12, "name": "Show X", "location": "Venue, City", "date": "2025-06-01"}"#,
        )
        .unwrap();
        assert_eq!(saved.id, "12");

        let saved: SavedEvent =
            serde_json::from_str(r#"{"id": "ab-1", "name": "Show Y", "date": "2025-07-04"}"#).unwrap();
        assert_eq!(saved.id, "ab-1");
        assert!(saved.location.is_empty());
    }
}
