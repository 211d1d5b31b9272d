use chrono::{DateTime, Datelike, Duration, NaiveDateTime, Utc, Weekday};

/// Offset of the broadcast schedule zone from UTC, in minutes (+05:30).
pub const SCHEDULE_UTC_OFFSET_MINUTES: i64 = 5 * 60 + 30;

/// All weekdays indexed Sunday=0 .. Saturday=6.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Shifts a UTC instant into the schedule zone.
///
/// This is plain arithmetic on the instant and never consults a timezone
/// database, so the result is the same on every host.
pub fn to_schedule_local(instant: DateTime<Utc>) -> NaiveDateTime {
    instant.naive_utc() + Duration::minutes(SCHEDULE_UTC_OFFSET_MINUTES)
}

/// Parses an upstream episode timestamp (RFC 3339) into UTC.
pub fn parse_episode_timestamp(input: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(input.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Formats a schedule-local time on a 12-hour clock, e.g. `9:30 PM`.
pub fn format_local_time(local: &NaiveDateTime) -> String {
    local.format("%-I:%M %p").to_string()
}

/// Lowercase English name used in commands, e.g. `monday`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "sunday",
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
    }
}

/// Capitalized name used in message headers, e.g. `Monday`.
pub fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

/// Parses a full weekday name, ignoring case and surrounding whitespace.
///
/// Abbreviations are rejected.
pub fn parse_weekday(input: &str) -> Option<Weekday> {
    let input = input.trim().to_lowercase();
    WEEKDAYS
        .iter()
        .copied()
        .find(|day| weekday_name(*day) == input)
}

/// The current weekday in the schedule zone.
pub fn schedule_today(now: DateTime<Utc>) -> Weekday {
    to_schedule_local(now).weekday()
}

/// The weekday after [`schedule_today`].
pub fn schedule_tomorrow(now: DateTime<Utc>) -> Weekday {
    schedule_today(now).succ()
}
