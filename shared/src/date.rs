//! Time helpers.
//!
//! - `Timestamp`: the ISO 8601 string the backend sends, kept verbatim so an
//!   odd format never fails a whole payload
//! - free functions for the few date calculations the client performs

use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =========================================================
// Timestamp
// =========================================================

/// Backend timestamp as transmitted (RFC 3339, usually with milliseconds).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Formats `dt` the way the backend expects, e.g. `2025-01-31T23:59:00.000Z`.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the raw string; `None` if it is not RFC 3339.
    pub fn parse(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.0)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// `Jan 5, 2025`. Falls back to the raw string.
    pub fn format_date(&self) -> String {
        self.format_with("%b %-d, %Y")
    }

    /// `Jan 5, 2025, 14:03`. Falls back to the raw string.
    pub fn format_date_time(&self) -> String {
        self.format_with("%b %-d, %Y, %H:%M")
    }

    /// `14:03`, used by the chat. Falls back to the raw string.
    pub fn format_clock(&self) -> String {
        self.format_with("%H:%M")
    }

    /// `Just now`, `5 minutes ago`, `2 hours ago`, then the plain date.
    pub fn format_relative(&self, now: DateTime<Utc>) -> String {
        let Some(dt) = self.parse() else {
            return self.0.clone();
        };
        let minutes = (now - dt).num_minutes();
        let hours = minutes / 60;
        let plural = |n: i64| if n > 1 { "s" } else { "" };
        match minutes {
            ..=0 => "Just now".to_string(),
            1..60 => format!("{minutes} minute{} ago", plural(minutes)),
            _ if hours < 24 => format!("{hours} hour{} ago", plural(hours)),
            _ => self.format_date(),
        }
    }

    /// Whether the timestamp lies strictly before `now`. Unparseable values
    /// are never considered past.
    pub fn is_before(&self, now: DateTime<Utc>) -> bool {
        self.parse().is_some_and(|dt| dt < now)
    }

    fn format_with(&self, pattern: &str) -> String {
        match self.parse() {
            Some(dt) => dt.format(pattern).to_string(),
            None => self.0.clone(),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::from_datetime(dt)
    }
}

// =========================================================
// Calculations
// =========================================================

/// Current wall-clock time (uses `Date.now()` on wasm).
#[inline]
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// `from` plus whole calendar months, clamped to the month's last day.
pub fn add_months(from: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    from.checked_add_months(Months::new(months))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Combines the admin panel's date (`YYYY-MM-DD`) and time (`HH:MM`) inputs
/// into a UTC expiry timestamp.
pub fn expiry_from_picker(date: &str, time: &str) -> Option<Timestamp> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M").ok()?;
    Some(Timestamp::from_datetime(
        NaiveDateTime::new(date, time).and_utc(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_picker_values_become_backend_timestamps() {
        let ts = expiry_from_picker("2025-01-31", "23:59").unwrap();
        assert_eq!(ts.as_str(), "2025-01-31T23:59:00.000Z");
    }

    #[test]
    fn test_picker_rejects_garbage() {
        assert!(expiry_from_picker("", "23:59").is_none());
        assert!(expiry_from_picker("2025-13-01", "10:00").is_none());
        assert!(expiry_from_picker("2025-01-01", "25:00").is_none());
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        let start = Utc.with_ymd_and_hms(2025, 12, 31, 8, 0, 0).unwrap();
        let end = add_months(start, 2);
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 2, 28, 8, 0, 0).unwrap());
    }

    #[test]
    fn test_formats_and_falls_back() {
        let ts = Timestamp::new("2024-03-05T14:03:09.000Z");
        assert_eq!(ts.format_date(), "Mar 5, 2024");
        assert_eq!(ts.format_clock(), "14:03");
        assert_eq!(ts.format_date_time(), "Mar 5, 2024, 14:03");

        let raw = Timestamp::new("yesterday");
        assert_eq!(raw.format_date(), "yesterday");
        assert!(!raw.is_before(now()));
    }

    #[test]
    fn test_relative_time_buckets() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let at = |raw: &str| Timestamp::new(raw).format_relative(now);
        assert_eq!(at("2025-06-01T11:59:30Z"), "Just now");
        assert_eq!(at("2025-06-01T11:59:00Z"), "1 minute ago");
        assert_eq!(at("2025-06-01T11:15:00Z"), "45 minutes ago");
        assert_eq!(at("2025-06-01T09:00:00Z"), "3 hours ago");
        assert_eq!(at("2025-05-30T12:00:00Z"), "May 30, 2025");
        assert_eq!(at("soon"), "soon");
    }

    #[test]
    fn test_is_before_compares_against_now() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        assert!(Timestamp::new("2025-05-31T23:59:59Z").is_before(now));
        assert!(!Timestamp::new("2025-06-01T00:00:01Z").is_before(now));
    }
}
