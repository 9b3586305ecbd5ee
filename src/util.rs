use std::fmt::Display;

use chrono::{DateTime, NaiveDate, TimeZone};

fn in_zone<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> Option<DateTime<Tz>> {
    DateTime::from_timestamp(timestamp, 0).map(|dt| dt.with_timezone(tz))
}

/// `2024-05-01T13:45:10` style, second precision
pub fn format_timestamp<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    in_zone(timestamp, tz)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub fn calendar_date<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> Option<NaiveDate> {
    in_zone(timestamp, tz).map(|dt| dt.date_naive())
}

/// Upper-case weekday name, e.g. `WEDNESDAY`
pub fn weekday_label<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> Option<String>
where
    Tz::Offset: Display,
{
    in_zone(timestamp, tz).map(|dt| dt.format("%A").to_string().to_uppercase())
}
