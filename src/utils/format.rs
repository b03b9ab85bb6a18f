//! Timestamp formatting.

/// Format a Unix timestamp in milliseconds as ISO-8601 UTC
/// (e.g., "2024-01-01T12:34:56.789Z").
///
/// Matches the output of JavaScript's `Date.prototype.toISOString` for
/// dates from 1970 through 9999.
pub fn format_timestamp_iso(unix_ms: u64) -> String {
    let millis = unix_ms % 1000;
    let secs = unix_ms / 1000;
    let (year, month, day) = civil_date(secs / 86400);
    let hour = (secs % 86400) / 3600;
    let min = (secs % 3600) / 60;
    let sec = secs % 60;

    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
        year, month, day, hour, min, sec, millis
    )
}

/// Convert days since the Unix epoch to (year, month, day).
fn civil_date(days: u64) -> (u64, u64, u64) {
    let mut year = 1970;
    let mut remaining_days = days;

    loop {
        let days_in_year = if is_leap_year(year) { 366 } else { 365 };
        if remaining_days < days_in_year {
            break;
        }
        remaining_days -= days_in_year;
        year += 1;
    }

    let days_in_months: [u64; 12] = if is_leap_year(year) {
        [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    } else {
        [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    };

    let mut month = 1;
    for days_in_month in days_in_months {
        if remaining_days < days_in_month {
            break;
        }
        remaining_days -= days_in_month;
        month += 1;
    }

    (year, month, remaining_days + 1)
}

fn is_leap_year(year: u64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch() {
        assert_eq!(format_timestamp_iso(0), "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_known_instants() {
        // 2024-01-01 00:00:00 UTC
        assert_eq!(format_timestamp_iso(1_704_067_200_000), "2024-01-01T00:00:00.000Z");
        // 2024-02-29 12:34:56.789 UTC (leap day)
        assert_eq!(format_timestamp_iso(1_709_210_096_789), "2024-02-29T12:34:56.789Z");
        // 2000-12-31 23:59:59.999 UTC
        assert_eq!(format_timestamp_iso(978_307_199_999), "2000-12-31T23:59:59.999Z");
    }
}
