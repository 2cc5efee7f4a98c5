use crate::timespan::TimeSpan;
use chrono::prelude::*;
use chrono_tz::Tz;

pub const DAY_MILLIS: i64 = 1000 * 60 * 60 * 24;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn is_valid_month(month: u32) -> bool {
    (1..=12).contains(&month)
}

pub fn is_valid_year(year: i32) -> bool {
    (1970..=2100).contains(&year)
}

// month: January -> 1
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[((month.max(1) - 1) % 12) as usize]
}

/// Millis of local midnight of the given day in `tz`.
/// When midnight is skipped by a DST transition the first valid instant after it is used.
fn local_midnight_millis(tz: &Tz, date: NaiveDate) -> i64 {
    let midnight = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    match tz.from_local_datetime(&midnight).earliest() {
        Some(dt) => dt.timestamp_millis(),
        None => {
            let shifted = midnight + chrono::Duration::hours(1);
            tz.from_local_datetime(&shifted)
                .earliest()
                .map(|dt| dt.timestamp_millis())
                .unwrap_or_else(|| Utc.from_utc_datetime(&midnight).timestamp_millis())
        }
    }
}

/// The calendar day containing `ts` in `tz`, as a half-open span `[00:00, next 00:00)`
pub fn day_span(ts: i64, tz: &Tz) -> TimeSpan {
    let date = to_datetime(ts, tz).date_naive();
    let next = date.succ_opt().unwrap_or(date);
    TimeSpan::new(
        local_midnight_millis(tz, date),
        local_midnight_millis(tz, next),
    )
}

/// The given calendar month in `tz` as a half-open span
pub fn month_span(year: i32, month: u32, tz: &Tz) -> TimeSpan {
    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default();
    let (next_year, next_month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    let next = NaiveDate::from_ymd_opt(next_year, next_month, 1).unwrap_or(first);
    TimeSpan::new(
        local_midnight_millis(tz, first),
        local_midnight_millis(tz, next),
    )
}

/// The calendar month containing `ts` in `tz`
pub fn current_month_span(ts: i64, tz: &Tz) -> TimeSpan {
    let date = to_datetime(ts, tz);
    month_span(date.year(), date.month(), tz)
}

pub fn to_datetime(ts: i64, tz: &Tz) -> DateTime<Tz> {
    match Utc.timestamp_millis_opt(ts).single() {
        Some(dt) => dt.with_timezone(tz),
        None => tz.from_utc_datetime(&NaiveDateTime::MIN),
    }
}

/// `Jan 15, 2024 2:30 PM`
pub fn format_datetime(ts: i64, tz: &Tz) -> String {
    to_datetime(ts, tz).format("%b %-d, %Y %-I:%M %p").to_string()
}

/// `Monday, January 15, 2024`
pub fn format_long_date(ts: i64, tz: &Tz) -> String {
    to_datetime(ts, tz).format("%A, %B %-d, %Y").to_string()
}

/// `2:30 PM`
pub fn format_time(ts: i64, tz: &Tz) -> String {
    to_datetime(ts, tz).format("%-I:%M %p").to_string()
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono_tz::{America::New_York, Europe::Oslo, UTC};

    #[test]
    fn month_names() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
    }

    #[test]
    fn day_span_is_local_to_timezone() {
        let ts = Oslo
            .with_ymd_and_hms(2024, 1, 15, 12, 0, 0)
            .unwrap()
            .timestamp_millis();
        let span = day_span(ts, &Oslo);
        assert_eq!(
            span.start(),
            Oslo.with_ymd_and_hms(2024, 1, 15, 0, 0, 0)
                .unwrap()
                .timestamp_millis()
        );
        assert_eq!(span.end() - span.start(), DAY_MILLIS);

        let late = Oslo
            .with_ymd_and_hms(2024, 1, 15, 23, 59, 0)
            .unwrap()
            .timestamp_millis();
        let next_day = Oslo
            .with_ymd_and_hms(2024, 1, 16, 0, 1, 0)
            .unwrap()
            .timestamp_millis();
        assert!(span.contains(late));
        assert!(!span.contains(next_day));
    }

    #[test]
    fn day_span_handles_dst_change() {
        let ts = New_York
            .with_ymd_and_hms(2024, 3, 10, 12, 0, 0)
            .unwrap()
            .timestamp_millis();
        let span = day_span(ts, &New_York);
        assert_eq!(span.end() - span.start(), DAY_MILLIS - 1000 * 60 * 60);
    }

    #[test]
    fn month_span_rolls_over_year() {
        let span = month_span(2023, 12, &UTC);
        assert_eq!(
            span.start(),
            Utc.with_ymd_and_hms(2023, 12, 1, 0, 0, 0)
                .unwrap()
                .timestamp_millis()
        );
        assert_eq!(
            span.end(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
                .unwrap()
                .timestamp_millis()
        );
    }

    #[test]
    fn formats_dates() {
        let ts = Utc
            .with_ymd_and_hms(2024, 1, 15, 14, 30, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(format_datetime(ts, &UTC), "Jan 15, 2024 2:30 PM");
        assert_eq!(format_long_date(ts, &UTC), "Monday, January 15, 2024");
        assert_eq!(format_time(ts, &UTC), "2:30 PM");
        assert_eq!(format_time(ts, &Oslo), "3:30 PM");
    }
}
