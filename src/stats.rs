use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::BTreeMap;

/// How far back [`compute_streak`] looks. Longer runs are reported as this value.
pub const STREAK_LOOKBACK_DAYS: u32 = 30;

pub const WINDOW_DAYS: usize = 7;

/// Counts consecutive completed days ending at (and including) `today`.
///
/// An incomplete `today` yields 0 no matter what came before it.
pub fn compute_streak(dates: &BTreeMap<String, bool>, today: NaiveDate) -> u32 {
    let mut streak = 0;
    for offset in 0..STREAK_LOOKBACK_DAYS {
        let day = today - Duration::days(i64::from(offset));
        if dates.get(&date_key(day)).copied().unwrap_or(false) {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

/// The last seven day keys, oldest first, ending with `today`.
pub fn last_7_days(today: NaiveDate) -> Vec<String> {
    window_dates(today).into_iter().map(date_key).collect()
}

fn window_dates(today: NaiveDate) -> Vec<NaiveDate> {
    (0..WINDOW_DAYS as i64)
        .rev()
        .map(|offset| today - Duration::days(offset))
        .collect()
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date_key(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    // chrono accepts unpadded fields, keys must be exactly YYYY-MM-DD
    if trimmed.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

/// Short weekday for a day key, empty when the key is not a calendar date.
pub fn key_weekday_label(day_key: &str) -> &'static str {
    parse_date_key(day_key).map(weekday_label).unwrap_or("")
}

pub fn weekday_label(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}
