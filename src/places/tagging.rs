//! Facet assignment for venues.
//!
//! Crowd, vibe, age and intent are placeholder labels: the places API
//! carries no signal for them, so [`RandomFacets`] draws them uniformly.
//! Runs are therefore not reproducible unless the RNG is seeded. Season
//! and time of day come from category keywords instead, see
//! [`schedule_for`].

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::places::models::VenueCandidate;

pub const CROWD_LABELS: &[&str] = &[
    "Young Professionals",
    "College Students",
    "Locals",
    "Tourists",
    "Creatives",
];

pub const VIBE_LABELS: &[&str] = &["Chill", "Lively", "Romantic", "Trendy", "Cozy", "Upscale"];

pub const AGE_BRACKETS: &[&str] = &["21-25", "25-35", "35+"];

pub const INTENT_LABELS: &[&str] = &["Date Night", "Hang with Friends", "Meet New People"];

pub const SEASONS: &[&str] = &["Spring", "Summer", "Fall", "Winter"];

pub const MORNING: &str = "Morning";
pub const AFTERNOON: &str = "Afternoon";
pub const EVENING: &str = "Evening";
pub const LATE_NIGHT: &str = "Late Night";

const DAYTIME_KEYWORDS: &[&str] = &["cafe", "coffee", "bakery", "breakfast", "brunch"];
const OUTDOOR_KEYWORDS: &[&str] = &["park", "garden"];
const ROOFTOP_KEYWORDS: &[&str] = &["rooftop"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facets {
    pub crowd: Vec<String>,
    pub vibe: Vec<String>,
    pub age: String,
    pub intent: String,
}

/// Maps a candidate to its descriptive facets.
pub trait FacetPolicy {
    fn assign(&mut self, candidate: &VenueCandidate) -> Facets;
}

/// Uniform random placeholder facets. Crowd and vibe are drawn with
/// replacement, so the two labels may repeat.
pub struct RandomFacets<R: Rng = StdRng> {
    rng: R,
}

impl RandomFacets<StdRng> {
    pub fn from_os_rng() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomFacets<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    fn pick(&mut self, labels: &[&str]) -> String {
        labels
            .choose(&mut self.rng)
            .map(|s| s.to_string())
            .unwrap_or_default()
    }
}

impl<R: Rng> FacetPolicy for RandomFacets<R> {
    fn assign(&mut self, _candidate: &VenueCandidate) -> Facets {
        Facets {
            crowd: vec![self.pick(CROWD_LABELS), self.pick(CROWD_LABELS)],
            vibe: vec![self.pick(VIBE_LABELS), self.pick(VIBE_LABELS)],
            age: self.pick(AGE_BRACKETS),
            intent: self.pick(INTENT_LABELS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub season: Vec<String>,
    pub time_of_day: Vec<String>,
}

fn labels(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

fn matches_any(types: &[String], keywords: &[&str]) -> bool {
    types.iter().any(|t| {
        let t = t.to_lowercase();
        keywords.iter().any(|k| t.contains(k))
    })
}

/// Season and time-of-day applicability from category types.
///
/// Rules run in order and each overwrites only the fields it sets:
/// daytime places (cafes, bakeries) get morning/afternoon, parks and
/// gardens get morning/afternoon outside winter, rooftops narrow the
/// season to spring/summer. A cafe on a rooftop keeps the cafe hours and
/// the rooftop season.
pub fn schedule_for(types: &[String]) -> Schedule {
    let mut schedule = Schedule {
        season: labels(SEASONS),
        time_of_day: labels(&[EVENING, LATE_NIGHT]),
    };

    if matches_any(types, DAYTIME_KEYWORDS) {
        schedule.time_of_day = labels(&[MORNING, AFTERNOON]);
    }

    if matches_any(types, OUTDOOR_KEYWORDS) {
        schedule.time_of_day = labels(&[MORNING, AFTERNOON]);
        schedule.season = labels(&["Spring", "Summer", "Fall"]);
    }

    if matches_any(types, ROOFTOP_KEYWORDS) {
        schedule.season = labels(&["Spring", "Summer"]);
    }

    schedule
}
