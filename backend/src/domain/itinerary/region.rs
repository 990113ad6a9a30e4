//! Mapping from the requested city to the set of spots to plan around.

/// Label used when the whole mountain range is requested.
pub const WHOLE_REGION_LABEL: &str = "Serra da Ibiapaba";

/// Inputs, compared in lowercase, that ask for every spot in the range.
const WHOLE_REGION_KEYWORDS: [&str; 4] = ["serra", "todas", "tudo", "all"];

/// Geographic scope of an itinerary.
///
/// # Examples
/// ```
/// use roteiro_backend::domain::Region;
///
/// assert_eq!(Region::resolve(Some("TODAS")), Region::Whole);
/// assert_eq!(Region::resolve(Some("Ubajara")).label(), "Ubajara");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Region {
    /// Every spot in the catalogue.
    Whole,
    /// Spots in one city, matched without regard to case.
    City(String),
}

impl Region {
    /// Decide the scope from the requested city.
    ///
    /// Blank input and the whole-range keywords select [`Region::Whole`].
    /// Anything else is kept, trimmed, as a city filter.
    #[must_use]
    pub fn resolve(city: Option<&str>) -> Self {
        let trimmed = city.map(str::trim).unwrap_or_default();
        let normalized = trimmed.to_lowercase();
        if normalized.is_empty() || WHOLE_REGION_KEYWORDS.contains(&normalized.as_str()) {
            Self::Whole
        } else {
            Self::City(trimmed.to_owned())
        }
    }

    /// Name used in the prompt and in not-found messages.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Whole => WHOLE_REGION_LABEL,
            Self::City(city) => city.as_str(),
        }
    }
}
