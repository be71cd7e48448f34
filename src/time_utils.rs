// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Full month name and day of month without a leading zero ("March 7").
pub fn format_month_day(date: DateTime<Utc>) -> String {
    date.format("%B %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_month_day_no_leading_zero() {
        let date: DateTime<Utc> = "2024-03-07T23:59:00Z".parse().unwrap();
        assert_eq!(format_month_day(date), "March 7");

        let date: DateTime<Utc> = "2024-12-25T00:00:00Z".parse().unwrap();
        assert_eq!(format_month_day(date), "December 25");
    }

    #[test]
    fn test_format_utc_rfc3339() {
        let date: DateTime<Utc> = "2024-01-15T10:30:00.123Z".parse().unwrap();
        assert_eq!(format_utc_rfc3339(date), "2024-01-15T10:30:00Z");
    }
}
