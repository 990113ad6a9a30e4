//! Validated trip parameters for itinerary generation.
//!
//! Free-text fields end up inside a model prompt, so they are flattened to a
//! single line and bounded before the domain stores them.

use serde_json::Value;

/// Smallest accepted trip length.
pub const MIN_TRIP_DAYS: u8 = 1;
/// Largest accepted trip length.
pub const MAX_TRIP_DAYS: u8 = 30;

/// Character budget for the city field.
pub const CITY_MAX_CHARS: usize = 100;
/// Character budget for the interests field.
pub const INTERESTS_MAX_CHARS: usize = 500;
/// Character budget for the lodging field.
pub const LODGING_MAX_CHARS: usize = 200;

/// Reasons a trip request is rejected before any lookup happens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItineraryRequestError {
    /// `dias` was absent or falsy (`null`, `0`, `""`, `false`).
    #[error("O campo 'dias' é obrigatório.")]
    MissingDays,
    /// `dias` was present but not an integer.
    #[error("O campo 'dias' deve ser um número inteiro.")]
    InvalidDays,
    /// `dias` was an integer outside the accepted range.
    #[error("O campo 'dias' deve estar entre {min} e {max}.")]
    DaysOutOfRange { min: u8, max: u8 },
}

const fn out_of_range() -> ItineraryRequestError {
    ItineraryRequestError::DaysOutOfRange {
        min: MIN_TRIP_DAYS,
        max: MAX_TRIP_DAYS,
    }
}

/// Trip length in days.
///
/// # Examples
/// ```
/// use roteiro_backend::domain::TripDays;
/// use serde_json::json;
///
/// assert_eq!(TripDays::from_json(Some(&json!("3"))).unwrap().get(), 3);
/// assert!(TripDays::from_json(Some(&json!(0))).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripDays(u8);

impl TripDays {
    /// Validate a day count against the accepted range.
    pub fn new(days: u64) -> Result<Self, ItineraryRequestError> {
        u8::try_from(days)
            .ok()
            .filter(|days| (MIN_TRIP_DAYS..=MAX_TRIP_DAYS).contains(days))
            .map(Self)
            .ok_or_else(out_of_range)
    }

    /// Interpret an untyped JSON value.
    ///
    /// Absent and falsy values are reported as missing. Integers and strings
    /// of digits are accepted when they fall inside the range.
    pub fn from_json(value: Option<&Value>) -> Result<Self, ItineraryRequestError> {
        match value {
            None | Some(Value::Null | Value::Bool(false)) => {
                Err(ItineraryRequestError::MissingDays)
            }
            Some(Value::String(raw)) if raw.is_empty() => Err(ItineraryRequestError::MissingDays),
            Some(Value::Array(items)) if items.is_empty() => {
                Err(ItineraryRequestError::MissingDays)
            }
            Some(Value::Object(fields)) if fields.is_empty() => {
                Err(ItineraryRequestError::MissingDays)
            }
            Some(Value::Number(number)) => Self::from_number(number),
            Some(Value::String(raw)) => Self::from_text(raw),
            Some(_) => Err(ItineraryRequestError::InvalidDays),
        }
    }

    fn from_number(number: &serde_json::Number) -> Result<Self, ItineraryRequestError> {
        if let Some(days) = number.as_u64() {
            return if days == 0 {
                Err(ItineraryRequestError::MissingDays)
            } else {
                Self::new(days)
            };
        }
        if number.as_i64().is_some() {
            return Err(out_of_range());
        }
        match number.as_f64() {
            Some(days) if days == 0.0 => Err(ItineraryRequestError::MissingDays),
            _ => Err(ItineraryRequestError::InvalidDays),
        }
    }

    fn from_text(raw: &str) -> Result<Self, ItineraryRequestError> {
        match raw.trim().parse::<i64>() {
            Ok(days) => u64::try_from(days)
                .map_err(|_| out_of_range())
                .and_then(Self::new),
            Err(_) => Err(ItineraryRequestError::InvalidDays),
        }
    }

    /// Number of days.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Validated trip parameters.
///
/// # Examples
/// ```
/// use roteiro_backend::domain::{TripDays, TripRequest};
///
/// let request = TripRequest::new(TripDays::new(2).unwrap())
///     .with_city(Some("  Tianguá \n"))
///     .with_children(true);
/// assert_eq!(request.city(), Some("Tianguá"));
/// assert!(request.with_children_flag());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRequest {
    days: TripDays,
    city: Option<String>,
    interests: Option<String>,
    with_children: bool,
    lodging: Option<String>,
}

impl TripRequest {
    /// Start a request with only the trip length set.
    #[must_use]
    pub const fn new(days: TripDays) -> Self {
        Self {
            days,
            city: None,
            interests: None,
            with_children: false,
            lodging: None,
        }
    }

    /// Set the city, sanitised and bounded.
    #[must_use]
    pub fn with_city(mut self, city: Option<&str>) -> Self {
        self.city = city.and_then(|raw| sanitize_free_text(raw, CITY_MAX_CHARS));
        self
    }

    /// Set the interests, sanitised and bounded.
    #[must_use]
    pub fn with_interests(mut self, interests: Option<&str>) -> Self {
        self.interests = interests.and_then(|raw| sanitize_free_text(raw, INTERESTS_MAX_CHARS));
        self
    }

    /// Record whether children travel along.
    #[must_use]
    pub const fn with_children(mut self, with_children: bool) -> Self {
        self.with_children = with_children;
        self
    }

    /// Set the lodging, sanitised and bounded.
    #[must_use]
    pub fn with_lodging(mut self, lodging: Option<&str>) -> Self {
        self.lodging = lodging.and_then(|raw| sanitize_free_text(raw, LODGING_MAX_CHARS));
        self
    }

    /// Trip length.
    #[must_use]
    pub const fn days(&self) -> TripDays {
        self.days
    }

    /// City as typed, after sanitising. `None` when blank.
    #[must_use]
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    /// Traveller interests. `None` when blank.
    #[must_use]
    pub fn interests(&self) -> Option<&str> {
        self.interests.as_deref()
    }

    /// Whether children travel along.
    #[must_use]
    pub const fn with_children_flag(&self) -> bool {
        self.with_children
    }

    /// Lodging description. `None` when blank.
    #[must_use]
    pub fn lodging(&self) -> Option<&str> {
        self.lodging.as_deref()
    }
}

/// Flatten `raw` to one line and cap it at `max_chars` characters.
///
/// Control characters become spaces and whitespace runs collapse. Returns
/// `None` when nothing printable is left.
pub(crate) fn sanitize_free_text(raw: &str, max_chars: usize) -> Option<String> {
    let flattened: String = raw
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let collapsed = flattened.split_whitespace().collect::<Vec<_>>().join(" ");
    let bounded: String = collapsed.chars().take(max_chars).collect();
    let bounded = bounded.trim_end();
    (!bounded.is_empty()).then(|| bounded.to_owned())
}
