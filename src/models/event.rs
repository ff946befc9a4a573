use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A prospective live event for the selected artist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCandidate {
    pub id: String,
    pub name: String,
    pub date: Option<NaiveDate>,
    pub venue_name: String,
    pub city_name: String,
    pub ticket_url: Option<String>,
    pub suggested_price: Option<f64>,
    pub predicted_sales: Option<u64>,
}

impl EventCandidate {
    /// "Venue, City", dropping whichever half is unknown.
    pub fn location(&self) -> String {
        match (self.venue_name.trim(), self.city_name.trim()) {
            ("", "") => String::new(),
            (venue, "") => venue.to_string(),
            ("", city) => city.to_string(),
            (venue, city) => format!("{}, {}", venue, city),
        }
    }

    pub fn has_forecast(&self) -> bool {
        self.suggested_price.is_some() || self.predicted_sales.is_some()
    }

    pub fn date_label(&self) -> String {
        self.date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "Date TBA".to_string())
    }
}
