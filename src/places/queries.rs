/// Neighborhoods swept by a default run.
pub const DEFAULT_NEIGHBORHOODS: &[&str] = &[
    "East Village",
    "West Village",
    "Lower East Side",
    "SoHo",
    "Chelsea",
    "Hell's Kitchen",
    "Upper West Side",
    "Harlem",
    "Williamsburg",
    "Bushwick",
    "Greenpoint",
    "Park Slope",
    "DUMBO",
    "Astoria",
    "Long Island City",
];

/// Search phrases combined with every neighborhood.
pub const DEFAULT_SEARCH_TERMS: &[&str] = &[
    "cocktail bars",
    "rooftop bars",
    "wine bars",
    "speakeasy",
    "dive bars",
    "live music venues",
    "nightclubs",
    "trendy restaurants",
    "brunch spots",
    "coffee shops",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub neighborhood: String,
    pub term: String,
    pub text: String,
}

/// Cross product of neighborhoods and search terms.
#[derive(Debug, Clone)]
pub struct QueryGenerator {
    neighborhoods: Vec<String>,
    terms: Vec<String>,
    city: String,
}

impl QueryGenerator {
    pub fn new(neighborhoods: Vec<String>, terms: Vec<String>, city: impl Into<String>) -> Self {
        Self {
            neighborhoods,
            terms,
            city: city.into(),
        }
    }

    pub fn with_defaults(city: impl Into<String>) -> Self {
        Self::new(
            DEFAULT_NEIGHBORHOODS.iter().map(|s| s.to_string()).collect(),
            DEFAULT_SEARCH_TERMS.iter().map(|s| s.to_string()).collect(),
            city,
        )
    }

    pub fn len(&self) -> usize {
        self.neighborhoods.len() * self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Neighborhood-major: all terms for the first neighborhood, then the next.
    /// Each call starts a fresh pass.
    pub fn iter(&self) -> impl Iterator<Item = SearchQuery> + '_ {
        self.neighborhoods.iter().flat_map(move |neighborhood| {
            self.terms.iter().map(move |term| SearchQuery {
                neighborhood: neighborhood.clone(),
                term: term.clone(),
                text: format!("{} in {}, {}", term, neighborhood, self.city),
            })
        })
    }
}
