use serde::{Deserialize, Serialize};

/// `{ "text": ..., "languageCode": ... }` wrapper the places API uses for
/// display names and summaries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedText {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRef {
    /// Resource name, e.g. `places/<id>/photos/<ref>`.
    pub name: String,
    #[serde(default)]
    pub width_px: Option<u32>,
    #[serde(default)]
    pub height_px: Option<u32>,
}

/// Raw place record as returned by the text search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueCandidate {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<LocalizedText>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub national_phone_number: Option<String>,
    #[serde(default)]
    pub website_uri: Option<String>,
    #[serde(default)]
    pub photos: Option<Vec<PhotoRef>>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub editorial_summary: Option<LocalizedText>,
    #[serde(default)]
    pub price_level: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_rating_count: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchTextResponse {
    #[serde(default)]
    pub places: Vec<Option<VenueCandidate>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
    pub author: String,
    pub text: String,
    pub rating: f64,
}

/// Normalized venue as stored in the generated artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub city: String,
    pub category: String,
    pub neighborhood: String,
    pub price: String,
    pub crowd: Vec<String>,
    pub vibe: Vec<String>,
    pub age: String,
    pub season: Vec<String>,
    pub time_of_day: Vec<String>,
    pub intent: String,
    pub description: String,
    pub image: String,
    pub address: String,
    pub phone: String,
    pub website: String,
    pub rating: f64,
    pub reviews: Vec<Review>,
}
