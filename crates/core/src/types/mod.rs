//! Shared type definitions and newtypes

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// XP multiplier factor (1.0 = no bonus)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Multiplier(pub f64);

impl Multiplier {
    pub const NEUTRAL: Multiplier = Multiplier(1.0);

    pub fn new(factor: f64) -> Self {
        Multiplier(factor)
    }

    pub fn as_f64(&self) -> f64 {
        self.0
    }

    /// Apply the factor to an XP amount, rounding down
    pub fn apply(&self, xp: u32) -> u32 {
        (f64::from(xp) * self.0).floor() as u32
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.0)
    }
}

/// Format a calendar day as the `YYYY-MM-DD` key used for bucketing and on the wire
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Normalize a backend date string to the calendar day it names.
///
/// ISO date-times keep their literal date component; the offset is never applied,
/// so `2025-01-15T23:59:59-08:00` is still the 15th. Bare dates parse directly.
/// Anything else that parses as a timestamp falls back to its own calendar date.
pub fn parse_calendar_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let date_part = raw.split(['T', ' ']).next().unwrap_or(raw);
    if let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y/%m/%d %H:%M:%S") {
        return Some(dt.date());
    }
    ["%Y/%m/%d", "%m/%d/%Y", "%d %b %Y", "%b %d, %Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Serde adapter for `NaiveDate` fields that may arrive as a bare date or an ISO date-time
pub mod calendar_day {
    use super::{date_key, parse_calendar_day};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date_key(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_calendar_day(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognized date: {raw}")))
    }

    /// Same as the parent adapter, for `Option<NaiveDate>` fields
    pub mod option {
        use super::{date_key, parse_calendar_day};
        use chrono::NaiveDate;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            date: &Option<NaiveDate>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(d) => serializer.serialize_some(&date_key(*d)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDate>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(raw) if raw.trim().is_empty() => Ok(None),
                Some(raw) => parse_calendar_day(&raw)
                    .map(Some)
                    .ok_or_else(|| serde::de::Error::custom(format!("unrecognized date: {raw}"))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan15() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_iso_forms_keep_literal_date() {
        assert_eq!(parse_calendar_day("2025-01-15"), Some(jan15()));
        assert_eq!(parse_calendar_day("2025-01-15T00:00:00Z"), Some(jan15()));
        assert_eq!(parse_calendar_day("2025-01-15T23:59:59-08:00"), Some(jan15()));
        assert_eq!(parse_calendar_day("2025-01-15T00:30:00+14:00"), Some(jan15()));
        assert_eq!(parse_calendar_day("2025-01-15 08:00:00"), Some(jan15()));
    }

    #[test]
    fn test_fallback_formats() {
        assert_eq!(parse_calendar_day("01/15/2025"), Some(jan15()));
        assert_eq!(parse_calendar_day("Wed, 15 Jan 2025 10:00:00 +0000"), Some(jan15()));
        assert_eq!(parse_calendar_day(""), None);
        assert_eq!(parse_calendar_day("soon"), None);
    }

    #[test]
    fn test_multiplier_apply() {
        assert_eq!(Multiplier::new(1.5).apply(101), 151);
        assert_eq!(Multiplier::NEUTRAL.apply(40), 40);
        assert_eq!(Multiplier::new(2.0).to_string(), "2x");
    }
}
