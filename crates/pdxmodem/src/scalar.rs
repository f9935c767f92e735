//! Implicit typing of scalar identifiers.
//!
//! Mapping values are typed one at a time with [`identify`]. List items stay
//! raw until the list closes, then [`normalize`] picks the most specific type
//! every item satisfies (date, then number, then string).
use chrono::NaiveDate;

use crate::value::Value;

/// Parses `year.month.day`: exactly three dot-separated unsigned integers
/// that form a valid calendar date.
pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    fn component<T: core::str::FromStr>(part: &str) -> Option<T> {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        part.parse().ok()
    }

    let mut parts = s.split('.');
    let year = component::<i32>(parts.next()?)?;
    let month = component::<u32>(parts.next()?)?;
    let day = component::<u32>(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parses anything Rust accepts as a finite `f64`.
pub(crate) fn parse_number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Types a single scalar: date, then number, then the raw string.
pub(crate) fn identify(raw: String) -> Value {
    if let Some(date) = parse_date(&raw) {
        Value::Date(date)
    } else if let Some(n) = parse_number(&raw) {
        Value::Number(n)
    } else {
        Value::String(raw)
    }
}

/// Least-common-denominator typing of a closed list of scalars.
///
/// All items become dates if every item is a date, otherwise all become
/// numbers if every item is a number, otherwise all stay strings.
pub(crate) fn normalize(raw: Vec<String>) -> Vec<Value> {
    if let Some(dates) = raw
        .iter()
        .map(|s| parse_date(s))
        .collect::<Option<Vec<_>>>()
    {
        return dates.into_iter().map(Value::Date).collect();
    }
    if let Some(numbers) = raw
        .iter()
        .map(|s| parse_number(s))
        .collect::<Option<Vec<_>>>()
    {
        return numbers.into_iter().map(Value::Number).collect();
    }
    raw.into_iter().map(Value::String).collect()
}
