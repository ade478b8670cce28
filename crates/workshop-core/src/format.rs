//! Display Formatters
//!
//! Pure conversions from raw field values to display strings, plus the
//! parse helpers the form controller uses to turn raw input into typed values.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use rust_decimal::{Decimal, RoundingStrategy};

pub const DATE_INPUT: &str = "%Y-%m-%d";
pub const TIME_INPUT: &str = "%H:%M";

/// Placeholder shown for missing values
pub const EMPTY: &str = "—";

/// `2024-03-05` -> `Mar 5, 2024`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `2024-03-05T14:30` -> `Mar 5, 2024 2:30 PM`
pub fn format_datetime(dt: NaiveDateTime) -> String {
    dt.format("%b %-d, %Y %-I:%M %p").to_string()
}

/// `14:30` -> `2:30 PM`
pub fn format_time(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// Format an optional date, falling back to [`EMPTY`]
pub fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_else(|| EMPTY.to_string())
}

/// Format a raw API date string (`YYYY-MM-DD` or an ISO date-time).
/// Unparseable input is returned unchanged.
pub fn format_date_str(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return EMPTY.to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_INPUT) {
        return format_date(date);
    }
    if let Ok(dt) = raw.parse::<NaiveDateTime>() {
        return format_datetime(dt);
    }
    raw.to_string()
}

/// `1234.5` -> `$1,234.50`; negatives render as `-$3.00`
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .abs();
    let text = format!("{:.2}", rounded);
    let (whole, frac) = text.split_once('.').unwrap_or((&text, "00"));
    let sign = if amount.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{}${}.{}", sign, group_thousands(whole), frac)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `IN_PROGRESS` / `in-progress` -> `In Progress`
pub fn humanize_key(raw: &str) -> String {
    raw.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|w| {
            let lower = w.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Shorten text to `max` characters, appending `…` when cut
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

/// Join non-empty name parts with a single space
pub fn full_name(first: &str, last: &str) -> String {
    [first.trim(), last.trim()]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_optional(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => EMPTY.to_string(),
    }
}

// ========================
// Parse helpers
// ========================

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_INPUT).ok()
}

pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, TIME_INPUT)
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S%.f"))
        .ok()
}

/// Combine separate date and time inputs into one timestamp
pub fn combine_date_time(date: &str, time: &str) -> Option<NaiveDateTime> {
    Some(parse_date(date)?.and_time(parse_time(time)?))
}

/// Accepts `12`, `12.5`, `$1,200.00`
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '$')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<Decimal>().ok()
}

pub fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// Date input value (`YYYY-MM-DD`)
pub fn date_input_value(date: NaiveDate) -> String {
    date.format(DATE_INPUT).to_string()
}

/// Time input value (`HH:MM`)
/// Seconds and fractions are kept only when present, so a seeded time
/// parses back to the same value
pub fn time_input_value(time: NaiveTime) -> String {
    if time.nanosecond() != 0 {
        time.format("%H:%M:%S%.f").to_string()
    } else if time.second() != 0 {
        time.format("%H:%M:%S").to_string()
    } else {
        time.format(TIME_INPUT).to_string()
    }
}
