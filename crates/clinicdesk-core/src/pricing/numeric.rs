//! Lenient numeric parsing for editable price and percentage fields.
//!
//! Pricing inputs come from two places: text fields the user types into, and
//! loosely typed JSON from the backend where an amount may be a number, a
//! numeric string, `null`, or missing entirely. Neither source is allowed to
//! break the preview, so every path here degrades to `0.0` instead of failing.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Parse a user-entered amount, coercing anything unusable to `0.0`.
///
/// Leading/trailing whitespace, a leading `$` and `,` thousands separators
/// are ignored. Non-numeric or non-finite input yields `0.0`.
///
/// # Example
///
/// ```ignore
/// assert_eq!(parse_amount("$1,250.50"), 1250.5);
/// assert_eq!(parse_amount("abc"), 0.0);
/// ```
pub fn parse_amount(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let unsigned = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let cleaned: String = unsigned.chars().filter(|c| *c != ',').collect();

    match cleaned.trim().parse::<f64>() {
        Ok(value) => sanitize(value),
        Err(_) => {
            if !trimmed.is_empty() {
                tracing::warn!(input = raw, "non-numeric amount coerced to 0");
            }
            0.0
        }
    }
}

/// Replace NaN and infinities with `0.0`.
#[inline]
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Amount as it may appear on the wire.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
    Flag(bool),
    /// Objects, arrays and anything else that cannot be an amount.
    Other(IgnoredAny),
}

impl RawAmount {
    fn into_amount(self) -> f64 {
        match self {
            RawAmount::Number(n) => sanitize(n),
            RawAmount::Text(s) => parse_amount(&s),
            RawAmount::Flag(_) => 0.0,
            RawAmount::Other(_) => {
                tracing::warn!("non-numeric amount on the wire coerced to 0");
                0.0
            }
        }
    }
}

/// Deserialize an amount that defaults to `0.0` when null or malformed.
///
/// Use with `#[serde(default, deserialize_with = "deserialize_amount")]`.
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawAmount> = Option::deserialize(deserializer)?;
    Ok(raw.map(RawAmount::into_amount).unwrap_or(0.0))
}

/// Deserialize an optional amount. `null` stays `None`; anything else present
/// is coerced, so an explicit `0` is kept as `Some(0.0)`.
pub fn deserialize_optional_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawAmount> = Option::deserialize(deserializer)?;
    Ok(raw.map(RawAmount::into_amount))
}
