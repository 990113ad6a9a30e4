//! Tourist points of interest.
//!
//! Coordinates are fixed precision: six decimal places, nine significant
//! digits. They are held as integer micro-degrees so rendering never goes
//! through floating point.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

const MICRO_DEGREES_PER_DEGREE: i32 = 1_000_000;
const MAX_LATITUDE_MICRO: i32 = 90 * MICRO_DEGREES_PER_DEGREE;
const MAX_LONGITUDE_MICRO: i32 = 180 * MICRO_DEGREES_PER_DEGREE;

/// Identifier of a tourist spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TouristSpotId(Uuid);

impl TouristSpotId {
    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TouristSpotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Closed set of spot categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Natural,
    Historical,
    Cultural,
    Adventure,
    Religious,
    Gastronomic,
    Other,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Self; 7] = [
        Self::Natural,
        Self::Historical,
        Self::Cultural,
        Self::Adventure,
        Self::Religious,
        Self::Gastronomic,
        Self::Other,
    ];

    /// Storage key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Natural => "natural",
            Self::Historical => "historical",
            Self::Cultural => "cultural",
            Self::Adventure => "adventure",
            Self::Religious => "religious",
            Self::Gastronomic => "gastronomic",
            Self::Other => "other",
        }
    }

    /// Human-readable label in Brazilian Portuguese.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Natural => "Atração Natural",
            Self::Historical => "Ponto Histórico",
            Self::Cultural => "Atração Cultural",
            Self::Adventure => "Aventura",
            Self::Religious => "Religioso",
            Self::Gastronomic => "Gastronômico",
            Self::Other => "Outro",
        }
    }
}

/// Raised when a stored category key is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tourist spot category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

/// Validation errors for coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CoordinateError {
    #[error("latitude must be within [-90, 90] degrees")]
    LatitudeOutOfRange,
    #[error("longitude must be within [-180, 180] degrees")]
    LongitudeOutOfRange,
}

/// One fixed-precision coordinate in micro-degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate(i32);

impl Coordinate {
    /// Raw micro-degree value.
    #[must_use]
    pub const fn micro_degrees(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let per_degree = MICRO_DEGREES_PER_DEGREE.unsigned_abs();
        write!(
            f,
            "{sign}{}.{:06}",
            magnitude / per_degree,
            magnitude % per_degree
        )
    }
}

/// Latitude/longitude pair.
///
/// # Examples
/// ```
/// use roteiro_backend::domain::GeoPoint;
///
/// let point = GeoPoint::from_micro_degrees(-3_916_400, -40_990_500).unwrap();
/// assert_eq!(point.to_string(), "-3.916400,-40.990500");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeoPoint {
    latitude: Coordinate,
    longitude: Coordinate,
}

impl GeoPoint {
    /// Build a point from micro-degree values, checking WGS84 ranges.
    pub const fn from_micro_degrees(latitude: i32, longitude: i32) -> Result<Self, CoordinateError> {
        if latitude < -MAX_LATITUDE_MICRO || latitude > MAX_LATITUDE_MICRO {
            return Err(CoordinateError::LatitudeOutOfRange);
        }
        if longitude < -MAX_LONGITUDE_MICRO || longitude > MAX_LONGITUDE_MICRO {
            return Err(CoordinateError::LongitudeOutOfRange);
        }
        Ok(Self {
            latitude: Coordinate(latitude),
            longitude: Coordinate(longitude),
        })
    }

    /// Latitude component.
    #[must_use]
    pub const fn latitude(&self) -> Coordinate {
        self.latitude
    }

    /// Longitude component.
    #[must_use]
    pub const fn longitude(&self) -> Coordinate {
        self.longitude
    }
}

/// Rendered as `"lat,lng"`.
impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Read model of a tourist spot as consumed by itinerary generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TouristSpot {
    pub id: TouristSpotId,
    pub name: String,
    pub description: String,
    pub city: String,
    pub location: GeoPoint,
    pub category: Category,
    /// Number of images attached to the spot.
    pub image_count: u32,
    pub created_at: DateTime<Utc>,
}
