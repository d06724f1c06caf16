//! Calendar helpers for the "today" listing.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};

/// Today's calendar date as seen from `offset`.
pub fn local_date(now: DateTime<Utc>, offset: &FixedOffset) -> NaiveDate {
    now.with_timezone(offset).date_naive()
}

/// UTC half-open range `[start, end)` covering today's date in `offset`.
pub fn today_bounds(now: DateTime<Utc>, offset: &FixedOffset) -> (DateTime<Utc>, DateTime<Utc>) {
    let midnight = local_date(now, offset).and_time(chrono::NaiveTime::MIN);
    // A fixed offset has no gaps or folds, so local midnight maps to one instant.
    let start = (midnight - Duration::seconds(offset.local_minus_utc() as i64)).and_utc();
    (start, start + Duration::days(1))
}
