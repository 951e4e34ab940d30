use async_trait::async_trait;

pub mod fetcher;
pub mod models;
pub mod queries;
pub mod tagging;
pub mod transform;

pub use fetcher::{PhotoUrlBuilder, PlacesClient, RetryPolicy, SearchError};
pub use models::{Venue, VenueCandidate};
pub use queries::{QueryGenerator, SearchQuery};
pub use tagging::{FacetPolicy, Facets, RandomFacets};
pub use transform::{transform, Rejection, TransformContext};

/// Text search against a places backend. `None` entries are results the
/// backend returned as null.
#[async_trait]
pub trait PlacesSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Option<VenueCandidate>>, SearchError>;
}

#[async_trait]
impl PlacesSearch for PlacesClient {
    async fn search(&self, query: &str) -> Result<Vec<Option<VenueCandidate>>, SearchError> {
        self.search_text(query).await
    }
}
