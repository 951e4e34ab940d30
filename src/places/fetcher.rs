use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::places::models::{SearchTextResponse, VenueCandidate};

pub const DEFAULT_BASE_URL: &str = "https://places.googleapis.com";
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_PHOTO_MAX_PX: u32 = 800;

/// Response fields requested from the text search endpoint. Billing tier
/// depends on this list, so keep it to what the transformer reads.
pub const FIELD_MASK: &str = "places.id,places.displayName,places.formattedAddress,\
places.nationalPhoneNumber,places.websiteUri,places.photos,places.types,\
places.editorialSummary,places.priceLevel,places.rating,places.userRatingCount";

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode search response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SearchError {
    fn is_retryable(&self) -> bool {
        match self {
            SearchError::Transport(_) => true,
            SearchError::Api { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS.as_u16() || *status >= 500
            }
            SearchError::Decode(_) => false,
        }
    }
}

/// Bounded exponential backoff around a single search call.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub multiplier: f64,
    pub max_backoff: Duration,
}

impl RetryPolicy {
    /// One attempt, no retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    fn next_backoff(&self, current: Duration) -> Duration {
        let next = Duration::from_secs_f64(current.as_secs_f64() * self.multiplier);
        next.min(self.max_backoff)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            initial_backoff: Duration::from_millis(500),
            multiplier: 2.0,
            max_backoff: Duration::from_secs(10),
        }
    }
}

/// Builds directly fetchable photo URLs from photo resource names.
#[derive(Debug, Clone)]
pub struct PhotoUrlBuilder {
    base_url: String,
    api_key: String,
    max_width: u32,
    max_height: u32,
}

impl PhotoUrlBuilder {
    pub fn new(base_url: &str, api_key: &str, max_width: u32, max_height: u32) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            max_width,
            max_height,
        }
    }

    pub fn url(&self, photo_name: &str) -> String {
        format!(
            "{}/v1/{}/media?maxHeightPx={}&maxWidthPx={}&key={}",
            self.base_url,
            photo_name.trim_start_matches('/'),
            self.max_height,
            self.max_width,
            self.api_key
        )
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchTextRequest<'a> {
    text_query: &'a str,
    max_result_count: u32,
}

pub struct PlacesClient {
    client: Client,
    base_url: String,
    api_key: String,
    page_size: u32,
    retry: RetryPolicy,
}

impl PlacesClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, SearchError> {
        let client = Client::builder()
            .user_agent(concat!("scene-ingest/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            retry: RetryPolicy::none(),
        })
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn photo_urls(&self, max_width: u32, max_height: u32) -> PhotoUrlBuilder {
        PhotoUrlBuilder::new(&self.base_url, &self.api_key, max_width, max_height)
    }

    /// Runs the query, retrying per the configured policy.
    pub async fn search_text(
        &self,
        query: &str,
    ) -> Result<Vec<Option<VenueCandidate>>, SearchError> {
        let mut attempt = 0u32;
        let mut backoff = self.retry.initial_backoff;

        loop {
            match self.search_once(query).await {
                Ok(places) => return Ok(places),
                Err(e) if attempt < self.retry.max_retries && e.is_retryable() => {
                    attempt += 1;
                    warn!(
                        query,
                        attempt,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %e,
                        "Places search failed, retrying"
                    );
                    sleep(backoff).await;
                    backoff = self.retry.next_backoff(backoff);
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn search_once(&self, query: &str) -> Result<Vec<Option<VenueCandidate>>, SearchError> {
        let url = format!("{}/v1/places:searchText", self.base_url);
        let body = SearchTextRequest {
            text_query: query,
            max_result_count: self.page_size,
        };

        debug!(query, page_size = self.page_size, "Sending places text search");

        let res = self
            .client
            .post(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;

        if !status.is_success() {
            return Err(SearchError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let parsed: SearchTextResponse = serde_json::from_str(&text)?;
        Ok(parsed.places)
    }
}
