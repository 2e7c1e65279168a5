use std::time::{SystemTime, UNIX_EPOCH};

use chrono::DateTime;

/// Return the current unix timestamp in seconds.
pub fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs())
}

/// Render a unix timestamp as a UTC datetime (e.g. `2026-08-07 09:30:00 UTC`).
///
/// Falls back to the raw second count for timestamps chrono cannot represent.
pub fn format_unix_datetime(secs: u64) -> String {
    match DateTime::from_timestamp(secs as i64, 0) {
        Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => secs.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::format_unix_datetime;

    #[test]
    fn formats_epoch_datetimes() {
        assert_eq!(format_unix_datetime(0), "1970-01-01 00:00:00 UTC");
        assert_eq!(format_unix_datetime(1_700_000_000), "2023-11-14 22:13:20 UTC");
    }
}
