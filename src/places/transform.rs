use thiserror::Error;

use crate::places::fetcher::PhotoUrlBuilder;
use crate::places::models::{Venue, VenueCandidate};
use crate::places::tagging::{schedule_for, FacetPolicy};

pub const FALLBACK_DESCRIPTION: &str =
    "A local favorite with a great atmosphere, worth checking out.";

pub const DEFAULT_RATING: f64 = 4.0;

const DEFAULT_PRICE: &str = "$$";

/// Why a candidate did not become a venue. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Rejection {
    #[error("candidate missing")]
    MissingCandidate,

    #[error("no phone number")]
    MissingPhone,

    #[error("no website")]
    MissingWebsite,

    #[error("no photos")]
    MissingPhotos,
}

/// Batch-wide values stamped on every venue.
#[derive(Debug, Clone)]
pub struct TransformContext {
    pub city: String,
    pub category: String,
    pub photos: PhotoUrlBuilder,
}

pub fn price_symbol(price_level: Option<&str>) -> &'static str {
    match price_level {
        Some("PRICE_LEVEL_INEXPENSIVE") => "$",
        Some("PRICE_LEVEL_MODERATE") => "$$",
        Some("PRICE_LEVEL_EXPENSIVE") => "$$$",
        Some("PRICE_LEVEL_VERY_EXPENSIVE") => "$$$$",
        _ => DEFAULT_PRICE,
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Validates a raw candidate and maps it into a [`Venue`] attributed to
/// `neighborhood`.
pub fn transform(
    candidate: Option<&VenueCandidate>,
    neighborhood: &str,
    ctx: &TransformContext,
    facets: &mut dyn FacetPolicy,
) -> Result<Venue, Rejection> {
    let candidate = candidate.ok_or(Rejection::MissingCandidate)?;
    let phone = non_empty(candidate.national_phone_number.as_ref()).ok_or(Rejection::MissingPhone)?;
    let website = non_empty(candidate.website_uri.as_ref()).ok_or(Rejection::MissingWebsite)?;
    let photo = candidate
        .photos
        .as_deref()
        .and_then(|p| p.first())
        .filter(|p| !p.name.trim().is_empty())
        .ok_or(Rejection::MissingPhotos)?;

    let assigned = facets.assign(candidate);
    let schedule = schedule_for(&candidate.types);

    let name = candidate
        .display_name
        .as_ref()
        .map(|n| n.text.trim())
        .filter(|n| !n.is_empty())
        .unwrap_or(candidate.id.as_str())
        .to_string();

    let description = candidate
        .editorial_summary
        .as_ref()
        .map(|s| s.text.trim())
        .filter(|s| !s.is_empty())
        .unwrap_or(FALLBACK_DESCRIPTION)
        .to_string();

    Ok(Venue {
        id: candidate.id.clone(),
        name,
        city: ctx.city.clone(),
        category: ctx.category.clone(),
        neighborhood: neighborhood.to_string(),
        price: price_symbol(candidate.price_level.as_deref()).to_string(),
        crowd: assigned.crowd,
        vibe: assigned.vibe,
        age: assigned.age,
        season: schedule.season,
        time_of_day: schedule.time_of_day,
        intent: assigned.intent,
        description,
        image: ctx.photos.url(&photo.name),
        address: candidate.formatted_address.clone().unwrap_or_default(),
        phone: phone.to_string(),
        website: website.to_string(),
        rating: candidate.rating.unwrap_or(DEFAULT_RATING),
        reviews: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::places::models::{LocalizedText, PhotoRef};
    use crate::places::tagging::RandomFacets;

    fn ctx() -> TransformContext {
        TransformContext {
            city: "New York City".to_string(),
            category: "Bar & Restaurant".to_string(),
            photos: PhotoUrlBuilder::new("https://places.example", "KEY", 800, 800),
        }
    }

    fn candidate() -> VenueCandidate {
        VenueCandidate {
            id: "place-1".to_string(),
            display_name: Some(LocalizedText {
                text: "Attaboy".to_string(),
                language_code: Some("en".to_string()),
            }),
            formatted_address: Some("134 Eldridge St, New York, NY".to_string()),
            national_phone_number: Some("(212) 555-0100".to_string()),
            website_uri: Some("https://attaboy.us".to_string()),
            photos: Some(vec![PhotoRef {
                name: "places/place-1/photos/a".to_string(),
                width_px: None,
                height_px: None,
            }]),
            types: vec!["bar".to_string()],
            editorial_summary: None,
            price_level: Some("PRICE_LEVEL_EXPENSIVE".to_string()),
            rating: Some(4.7),
            user_rating_count: Some(900),
        }
    }

    fn run(c: Option<&VenueCandidate>) -> Result<Venue, Rejection> {
        transform(c, "Lower East Side", &ctx(), &mut RandomFacets::seeded(1))
    }

    #[test]
    fn test_valid_candidate_maps_fields() {
        let venue = run(Some(&candidate())).unwrap();
        assert_eq!(venue.id, "place-1");
        assert_eq!(venue.name, "Attaboy");
        assert_eq!(venue.neighborhood, "Lower East Side");
        assert_eq!(venue.city, "New York City");
        assert_eq!(venue.price, "$$$");
        assert_eq!(venue.rating, 4.7);
        assert_eq!(venue.description, FALLBACK_DESCRIPTION);
        assert_eq!(
            venue.image,
            "https://places.example/v1/places/place-1/photos/a/media?maxHeightPx=800&maxWidthPx=800&key=KEY"
        );
        assert!(venue.reviews.is_empty());
        assert_eq!(venue.time_of_day, vec!["Evening", "Late Night"]);
    }

    #[test]
    fn test_missing_phone_is_rejected() {
        let mut c = candidate();
        c.national_phone_number = None;
        assert_eq!(run(Some(&c)), Err(Rejection::MissingPhone));

        c.national_phone_number = Some("   ".to_string());
        assert_eq!(run(Some(&c)), Err(Rejection::MissingPhone));
    }

    #[test]
    fn test_rejections_checked_in_order() {
        assert_eq!(run(None), Err(Rejection::MissingCandidate));

        let mut c = candidate();
        c.website_uri = None;
        c.photos = None;
        assert_eq!(run(Some(&c)), Err(Rejection::MissingWebsite));

        let mut c = candidate();
        c.photos = Some(vec![]);
        assert_eq!(run(Some(&c)), Err(Rejection::MissingPhotos));
    }

    #[test]
    fn test_price_symbols() {
        assert_eq!(price_symbol(Some("PRICE_LEVEL_INEXPENSIVE")), "$");
        assert_eq!(price_symbol(Some("PRICE_LEVEL_MODERATE")), "$$");
        assert_eq!(price_symbol(Some("PRICE_LEVEL_VERY_EXPENSIVE")), "$$$$");
        assert_eq!(price_symbol(Some("PRICE_LEVEL_FREE")), "$$");
        assert_eq!(price_symbol(None), "$$");
    }

    #[test]
    fn test_fallbacks() {
        let mut c = candidate();
        c.rating = None;
        c.display_name = None;
        c.price_level = None;
        c.editorial_summary = Some(LocalizedText {
            text: "Tiny cocktail den.".to_string(),
            language_code: None,
        });

        let venue = run(Some(&c)).unwrap();
        assert_eq!(venue.rating, DEFAULT_RATING);
        assert_eq!(venue.name, "place-1");
        assert_eq!(venue.price, "$$");
        assert_eq!(venue.description, "Tiny cocktail den.");
    }

    #[test]
    fn test_cafe_candidate_is_daytime() {
        let mut c = candidate();
        c.types = vec!["cafe".to_string(), "bar".to_string(), "night_club".to_string()];
        let venue = run(Some(&c)).unwrap();
        assert_eq!(venue.time_of_day, vec!["Morning", "Afternoon"]);
    }
}
