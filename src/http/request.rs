//! Request parsing and validation.
//!
//! # Responsibilities
//! - Decode raw query parameters into typed integers
//! - Apply defaults (`min=0`, `max=100`, `num=1`)
//! - Enforce `min <= max` and `1 <= num <= 100`
//!
//! # Design Decisions
//! - Pure function of the query string, no side effects
//! - Unknown parameter names are rejected rather than ignored
//! - Last occurrence of a repeated parameter wins
//! - An empty value counts as absent, so the default applies

use url::form_urlencoded;

/// Smallest accepted `num`.
pub const MIN_COUNT: u32 = 1;
/// Largest accepted `num`.
pub const MAX_COUNT: u32 = 100;

/// Validated parameters for one randomness request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomRequest {
    pub min: i64,
    pub max: i64,
    pub count: u32,
}

impl Default for RandomRequest {
    fn default() -> Self {
        Self {
            min: 0,
            max: 100,
            count: 1,
        }
    }
}

/// Why a request was rejected. Both variants map to HTTP 400.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A parameter could not be decoded.
    #[error("{0}")]
    Parse(String),

    /// Decoded values violate a bound.
    #[error("{0}")]
    Range(String),
}

impl RandomRequest {
    /// Parse and validate a raw query string (without the leading `?`).
    pub fn from_query(query: Option<&str>) -> Result<Self, ValidationError> {
        let pairs = form_urlencoded::parse(query.unwrap_or_default().as_bytes());
        Self::from_pairs(pairs)
    }

    /// Parse and validate already-decoded key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut min: Option<(String, String)> = None;
        let mut max: Option<(String, String)> = None;
        let mut count: Option<(String, String)> = None;

        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            let slot = match key {
                "min" => &mut min,
                "max" => &mut max,
                "num" | "count" => &mut count,
                other => {
                    return Err(ValidationError::Parse(format!(
                        "unknown parameter \"{}\"",
                        other
                    )))
                }
            };
            *slot = Some((key.to_string(), value.to_string()));
        }

        let defaults = RandomRequest::default();
        let min = parse_slot(min)?.unwrap_or(defaults.min);
        let max = parse_slot(max)?.unwrap_or(defaults.max);
        let count = parse_slot(count)?.unwrap_or(i64::from(defaults.count));

        if min > max {
            return Err(ValidationError::Range(
                "min cannot be greater than max".to_string(),
            ));
        }

        let count = u32::try_from(count)
            .ok()
            .filter(|c| (MIN_COUNT..=MAX_COUNT).contains(c))
            .ok_or_else(|| {
                ValidationError::Range(format!(
                    "num must be between {} and {}",
                    MIN_COUNT, MAX_COUNT
                ))
            })?;

        Ok(Self { min, max, count })
    }
}

/// Decode the last raw value seen for a parameter; empty means absent.
fn parse_slot(slot: Option<(String, String)>) -> Result<Option<i64>, ValidationError> {
    match slot {
        Some((key, value)) if !value.trim().is_empty() => parse_int(&key, &value).map(Some),
        _ => Ok(None),
    }
}

fn parse_int(key: &str, value: &str) -> Result<i64, ValidationError> {
    value.trim().parse::<i64>().map_err(|e| {
        ValidationError::Parse(format!(
            "invalid value \"{}\" for parameter \"{}\": {}",
            value, key, e
        ))
    })
}
