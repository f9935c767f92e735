//! Parsed value types.
//!
//! This module defines the [`Value`] enum produced by the parser, and renders
//! it as compact JSON through [`Display`](core::fmt::Display).
use core::fmt::{self, Write as _};

use chrono::NaiveDate;
use indexmap::IndexMap;

/// Insertion-ordered mapping from keys to values.
pub type Map = IndexMap<String, Value>;
pub type List = Vec<Value>;

/// A node of the parsed tree.
///
/// Scalars are typed as they are parsed:
///
/// - `2024.03.15` becomes a [`Date`](Value::Date)
/// - `12`, `-0.5` or `1e3` become a [`Number`](Value::Number)
/// - anything else, quoted or not, stays a [`String`](Value::String)
///
/// Blocks become a [`Map`](Value::Map) or a [`List`](Value::List).
///
/// # Examples
///
/// ```
/// use pdxmodem::Value;
///
/// let root = pdxmodem::parse("start=1444.11.11 tags={a b}").unwrap();
/// assert_eq!(
///     root.to_string(),
///     r#"{"start":"1444-11-11T00:00:00.000Z","tags":["a","b"]}"#
/// );
/// assert_eq!(root.get("tags"), Some(&Value::from(vec![Value::from("a"), Value::from("b")])));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    String(String),
    Number(f64),
    /// A calendar date, rendered as the ISO-8601 instant of midnight UTC.
    Date(NaiveDate),
    List(List),
    Map(Map),
}

impl Default for Value {
    fn default() -> Self {
        Self::Map(Map::new())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::List(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Map(v)
    }
}

impl Value {
    /// Returns `true` if the value is [`String`].
    ///
    /// [`String`]: Value::String
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is [`Number`].
    ///
    /// [`Number`]: Value::Number
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(..))
    }

    /// Returns `true` if the value is [`Date`].
    ///
    /// [`Date`]: Value::Date
    #[must_use]
    pub fn is_date(&self) -> bool {
        matches!(self, Self::Date(..))
    }

    /// Returns `true` if the value is [`List`].
    ///
    /// # Examples
    ///
    /// ```
    /// use pdxmodem::Value;
    ///
    /// assert!(Value::List(vec![]).is_list());
    /// assert!(!Value::from(1.0).is_list());
    /// ```
    ///
    /// [`List`]: Value::List
    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(..))
    }

    /// Returns `true` if the value is [`Map`].
    ///
    /// [`Map`]: Value::Map
    #[must_use]
    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map(..))
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up `key` if the value is a [`Map`](Value::Map).
    ///
    /// ```
    /// let root = pdxmodem::parse("a={b=1}").unwrap();
    /// assert_eq!(
    ///     root.get("a").and_then(|a| a.get("b")),
    ///     Some(&pdxmodem::Value::Number(1.0))
    /// );
    /// assert_eq!(root.get("missing"), None);
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|map| map.get(key))
    }
}

/// Formats `date` as the ISO-8601 instant of midnight UTC on that day.
pub(crate) fn iso_date(date: NaiveDate) -> impl fmt::Display {
    date.format("%Y-%m-%dT00:00:00.000Z")
}

/// Writes `src` as a JSON string literal, quotes included.
///
/// Quotes, backslashes, control characters and the U+2028/U+2029 line
/// separators are escaped as `\uXXXX` or their two-character forms.
pub(crate) fn write_json_str<W: fmt::Write>(src: &str, out: &mut W) -> fmt::Result {
    out.write_char('"')?;
    for c in src.chars() {
        match c {
            '"' | '\\' => {
                out.write_char('\\')?;
                out.write_char(c)?;
            }
            '\u{2028}' | '\u{2029}' => write!(out, "\\u{:04X}", u32::from(c))?,
            c if c.is_control() => write!(out, "\\u{:04X}", u32::from(c))?,
            c => out.write_char(c)?,
        }
    }
    out.write_char('"')
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write_json_str(s, f),
            Value::Number(n) => write!(f, "{n}"),
            Value::Date(d) => write!(f, "\"{}\"", iso_date(*d)),
            Value::List(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(']')
            }
            Value::Map(map) => {
                f.write_char('{')?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write_json_str(key, f)?;
                    f.write_char(':')?;
                    write!(f, "{value}")?;
                }
                f.write_char('}')
            }
        }
    }
}

#[cfg(any(test, feature = "serde"))]
mod ser {
    use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

    use super::{Value, iso_date};

    /// Integers below this magnitude are exact in an `f64`.
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

    impl Serialize for Value {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Value::String(s) => serializer.serialize_str(s),
                #[allow(clippy::cast_possible_truncation)]
                Value::Number(n) if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER => {
                    serializer.serialize_i64(*n as i64)
                }
                Value::Number(n) => serializer.serialize_f64(*n),
                Value::Date(d) => serializer.collect_str(&iso_date(*d)),
                Value::List(items) => {
                    let mut seq = serializer.serialize_seq(Some(items.len()))?;
                    for item in items {
                        seq.serialize_element(item)?;
                    }
                    seq.end()
                }
                Value::Map(map) => {
                    let mut m = serializer.serialize_map(Some(map.len()))?;
                    for (k, v) in map {
                        m.serialize_entry(k, v)?;
                    }
                    m.end()
                }
            }
        }
    }
}
