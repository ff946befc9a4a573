use crate::error::{AppError, AppResult};
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const DEFAULT_COUNTRY: &str = "US";
pub const DEFAULT_CITY: &str = "Boston";

/// Query submitted from the search form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub artist_name: String,
    pub country_code: String,
    pub city: String,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            artist_name: String::new(),
            country_code: DEFAULT_COUNTRY.to_string(),
            city: DEFAULT_CITY.to_string(),
        }
    }
}

fn is_country_code(code: &str) -> bool {
    Regex::new(r"^[A-Z]{2}$")
        .map(|regex| regex.is_match(code))
        .unwrap_or(false)
}

/// Upper-cases and checks an ISO 3166 alpha-2 style code.
pub fn normalize_country_code(code: &str) -> AppResult<String> {
    let normalized = code.trim().to_ascii_uppercase();
    if !is_country_code(&normalized) {
        return Err(AppError::validation(format!(
            "Country code must be two letters (e.g. US), got '{}'",
            code.trim()
        )));
    }
    Ok(normalized)
}

impl SearchParams {
    /// Builds validated params. Blank country/city fall back to the defaults.
    pub fn new(artist_name: &str, country_code: &str, city: &str) -> AppResult<Self> {
        Self {
            artist_name: artist_name.to_string(),
            country_code: country_code.to_string(),
            city: city.to_string(),
        }
        .validate()
    }

    pub fn validate(self) -> AppResult<Self> {
        let artist_name = self.artist_name.trim();
        if artist_name.is_empty() {
            return Err(AppError::validation("Artist name cannot be empty"));
        }

        let country_code = if self.country_code.trim().is_empty() {
            DEFAULT_COUNTRY.to_string()
        } else {
            normalize_country_code(&self.country_code)?
        };

        let city = match self.city.trim() {
            "" => DEFAULT_CITY.to_string(),
            city => city.to_string(),
        };

        Ok(Self {
            artist_name: artist_name.to_string(),
            country_code,
            city,
        })
    }
}
