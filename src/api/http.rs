use crate::api::{payload, ApiFuture, BookingApi, EventQuery};
use crate::config::{validate_base_url, AppConfig, EndpointConfig};
use crate::error::{AppError, AppResult};
use crate::http_config::HttpClientFactory;
use crate::models::{
    Artist, AvailabilityQuery, AvailableEvent, CalendarEntry, EventCandidate, SavedEvent, SearchParams,
};
use crate::utils::logging;
use log::{debug, info};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::time::Instant;
use url::Url;

/// `BookingApi` over the backend's REST endpoints.
#[derive(Debug, Clone)]
pub struct HttpBookingApi {
    client: Client,
    base_url: Url,
    endpoints: EndpointConfig,
}

impl HttpBookingApi {
    pub fn new(client: Client, base_url: &str, endpoints: EndpointConfig) -> AppResult<Self> {
        Ok(Self {
            client,
            base_url: validate_base_url("backend_url", base_url)?,
            endpoints,
        })
    }

    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let client = HttpClientFactory::new(config).backend_client()?;
        Self::new(client, &config.backend_url, config.endpoints.clone())
    }

    fn endpoint(&self, path: &str) -> AppResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| AppError::config(format!("Bad endpoint path '{}': {}", path, e)))
    }

    fn delete_endpoint(&self, id: &str) -> AppResult<Url> {
        let is_plain = !id.is_empty()
            && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !is_plain {
            return Err(AppError::validation(format!("Invalid saved event id '{}'", id)));
        }
        self.endpoint(&self.endpoints.delete_event.replace("{id}", id))
    }

    /// Sends the request and checks the status; the body is left unread.
    async fn send(operation: &str, request: RequestBuilder) -> AppResult<reqwest::Response> {
        let started = Instant::now();
        let response = request.send().await.map_err(|e| {
            logging::log_network_error(operation, &e);
            AppError::Transport(e)
        })?;

        let status = response.status();
        debug!("[Backend] {} -> {} in {}ms", operation, status, started.elapsed().as_millis());
        if !status.is_success() {
            return Err(AppError::backend(format!("{} failed with HTTP {}", operation, status)));
        }
        Ok(response)
    }

    async fn fetch_json(operation: &str, request: RequestBuilder) -> AppResult<Value> {
        let response = Self::send(operation, request).await?;
        response
            .json::<Value>()
            .await
            .map_err(|e| AppError::backend(format!("{} returned malformed JSON: {}", operation, e)))
    }

    async fn search_artists_inner(&self, params: SearchParams) -> AppResult<Vec<Artist>> {
        let url = self.endpoint(&self.endpoints.search_artist)?;
        info!("Searching artists for '{}' ({}/{})", params.artist_name, params.country_code, params.city);

        let request = self.client.get(url).query(&[
            ("name", params.artist_name.as_str()),
            ("country", params.country_code.as_str()),
            ("city", params.city.as_str()),
        ]);
        let payload = Self::fetch_json("search-artist", request).await?;
        payload::parse_artists(&payload)
    }

    async fn find_events_inner(&self, query: EventQuery) -> AppResult<Vec<EventCandidate>> {
        let url = self.endpoint(&self.endpoints.get_events)?;
        info!("Looking up events for '{}' (popularity {})", query.artist_name, query.popularity);

        let popularity = query.popularity.to_string();
        let request = self.client.get(url).query(&[
            ("name", query.artist_name.as_str()),
            ("popularity", popularity.as_str()),
            ("country", query.country_code.as_str()),
            ("city", query.city.as_str()),
        ]);
        let payload = Self::fetch_json("get-events", request).await?;
        payload::parse_events(&payload)
    }

    async fn save_event_inner(&self, entry: CalendarEntry) -> AppResult<()> {
        let url = self.endpoint(&self.endpoints.save_event)?;
        info!("Saving '{}' on {} to calendar", entry.name, entry.date);
        Self::send("save-event", self.client.post(url).json(&entry)).await?;
        Ok(())
    }

    async fn delete_event_inner(&self, id: String) -> AppResult<()> {
        let url = self.delete_endpoint(&id)?;
        info!("Deleting saved event {}", id);
        Self::send("delete-event", self.client.delete(url)).await?;
        Ok(())
    }

    async fn list_saved_events_inner(&self) -> AppResult<Vec<SavedEvent>> {
        let url = self.endpoint(&self.endpoints.saved_events)?;
        let payload = Self::fetch_json("saved-events", self.client.get(url)).await?;
        payload::parse_saved_events(&payload)
    }

    async fn search_availability_inner(&self, query: AvailabilityQuery) -> AppResult<Vec<AvailableEvent>> {
        let url = self.endpoint(&self.endpoints.search_availability)?;
        info!(
            "Searching availability (artist '{}', zip '{}', {:?} to {:?})",
            query.artist, query.zip_code, query.start_date, query.end_date
        );
        let request = self.client.get(url).query(&query.query_pairs());
        let payload = Self::fetch_json("search-events", request).await?;
        payload::parse_availability(&payload)
    }
}

impl BookingApi for HttpBookingApi {
    fn search_artists(&self, params: SearchParams) -> ApiFuture<Vec<Artist>> {
        let api = self.clone();
        Box::pin(async move { api.search_artists_inner(params).await })
    }

    fn find_events(&self, query: EventQuery) -> ApiFuture<Vec<EventCandidate>> {
        let api = self.clone();
        Box::pin(async move { api.find_events_inner(query).await })
    }

    fn save_event(&self, entry: CalendarEntry) -> ApiFuture<()> {
        let api = self.clone();
        Box::pin(async move { api.save_event_inner(entry).await })
    }

    fn delete_event(&self, id: String) -> ApiFuture<()> {
        let api = self.clone();
        Box::pin(async move { api.delete_event_inner(id).await })
    }

    fn list_saved_events(&self) -> ApiFuture<Vec<SavedEvent>> {
        let api = self.clone();
        Box::pin(async move { api.list_saved_events_inner().await })
    }

    fn search_availability(&self, query: AvailabilityQuery) -> ApiFuture<Vec<AvailableEvent>> {
        let api = self.clone();
        Box::pin(async move { api.search_availability_inner(query).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpBookingApi {
        HttpBookingApi::new(Client::new(), base, EndpointConfig::default()).unwrap()
    }

    #[test]
    fn test_endpoint_join() {
        let url = api("https://booking.example.com").endpoint("/api/event_management/save-event/").unwrap();
        assert_eq!(url.as_str(), "https://booking.example.com/api/event_management/save-event/");
    }

    #[test]
    fn test_delete_endpoint() {
        let api = api("http://localhost:8000");
        let url = api.delete_endpoint("42").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/event_management/delete-event/42/");
        assert!(matches!(api.delete_endpoint("../admin"), Err(AppError::Validation(_))));
        assert!(api.delete_endpoint("").is_err());
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(HttpBookingApi::new(Client::new(), "localhost", EndpointConfig::default()).is_err());
    }
}
