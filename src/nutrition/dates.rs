//! Calendar-day keys.
//!
//! Meal notes and weight entries are grouped by exact match on a `YYYY-MM-DD`
//! key taken from the *local* calendar date. Converting through UTC would shift
//! late-evening meals onto the next day, so nothing here touches UTC.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, TimeZone};

use crate::errors::ValidationError;

pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Formats a calendar date as `YYYY-MM-DD`.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Key for the local calendar day of a timestamp in any zone.
pub fn date_key_for<Tz: TimeZone>(moment: &DateTime<Tz>) -> String {
    date_key(moment.naive_local().date())
}

pub fn parse_date_key(key: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(key.to_string()))
}

/// Today's local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn is_same_day<Tz: TimeZone>(a: &DateTime<Tz>, b: &DateTime<Tz>) -> bool {
    date_key_for(a) == date_key_for(b)
}

/// Monday of the week containing `today`, shifted `weeks_back` whole weeks into the past.
pub fn week_start(today: NaiveDate, weeks_back: u32) -> NaiveDate {
    let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
    monday - Duration::weeks(i64::from(weeks_back))
}

/// `count` consecutive days starting at `from`.
pub fn days_from(from: NaiveDate, count: u32) -> Vec<NaiveDate> {
    (0..count)
        .map(|offset| from + Duration::days(i64::from(offset)))
        .collect()
}
