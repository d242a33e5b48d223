//! Local Time Display
//!
//! Forecast documents carry UTC epoch seconds plus the location's offset
//! from UTC. Everything shown on the dashboard is in the *location's* local
//! time, not the viewer's:
//!
//! ```text
//! 1700000000 (UTC) + timezone_offset 28800 ──► Wed 15 Nov 2023 06:13 +08:00
//!                                             ├── clock   "6:13 AM"
//!                                             ├── weekday "Wednesday"
//!                                             └── short   "Wed"
//! ```
//!
//! An offset chrono cannot represent (beyond ±18h) falls back to UTC.

use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::model::EpochSeconds;

/// Offset for a document, UTC when absent or out of range
pub fn location_offset(timezone_offset: Option<i32>) -> FixedOffset {
    let utc = Utc.fix();
    match timezone_offset {
        Some(seconds) => FixedOffset::east_opt(seconds).unwrap_or_else(|| {
            log::warn!("Ignoring out-of-range timezone offset {}s", seconds);
            utc
        }),
        None => utc,
    }
}

/// Epoch seconds as a local date-time. `None` when out of chrono's range.
pub fn local_datetime(epoch: EpochSeconds, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    DateTime::from_timestamp(epoch, 0).map(|utc| utc.with_timezone(&offset))
}

/// 12-hour clock, e.g. "6:05 AM"
pub fn format_clock(epoch: EpochSeconds, offset: FixedOffset) -> Option<String> {
    local_datetime(epoch, offset).map(|dt| dt.format("%-I:%M %p").to_string())
}

/// Full weekday name, e.g. "Tuesday"
pub fn format_weekday(epoch: EpochSeconds, offset: FixedOffset) -> Option<String> {
    local_datetime(epoch, offset).map(|dt| dt.format("%A").to_string())
}

/// Abbreviated weekday name, e.g. "Tue"
pub fn format_short_weekday(epoch: EpochSeconds, offset: FixedOffset) -> Option<String> {
    local_datetime(epoch, offset).map(|dt| dt.format("%a").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2023-11-14T22:13:20Z
    const EPOCH: EpochSeconds = 1_700_000_000;

    #[test]
    fn formats_in_location_time() {
        let manila = location_offset(Some(8 * 3600));
        assert_eq!(format_clock(EPOCH, manila).unwrap(), "6:13 AM");
        assert_eq!(format_weekday(EPOCH, manila).unwrap(), "Wednesday");
        assert_eq!(format_short_weekday(EPOCH, manila).unwrap(), "Wed");
    }

    #[test]
    fn missing_offset_is_utc() {
        let utc = location_offset(None);
        assert_eq!(format_clock(EPOCH, utc).unwrap(), "10:13 PM");
        assert_eq!(format_weekday(EPOCH, utc).unwrap(), "Tuesday");
    }

    #[test]
    fn out_of_range_offset_is_utc() {
        assert_eq!(location_offset(Some(100_000)).local_minus_utc(), 0);
    }

    #[test]
    fn noon_and_midnight() {
        let utc = location_offset(None);
        assert_eq!(format_clock(43_200, utc).unwrap(), "12:00 PM");
        assert_eq!(format_clock(0, utc).unwrap(), "12:00 AM");
    }
}
