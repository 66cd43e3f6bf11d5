//! Lenient wire decoding
//!
//! Lattice payloads are decoded field by field: every struct field in this
//! crate names one of the helpers below as its `deserialize_with` target, and
//! each helper accepts any JSON value, falling back to the field's default
//! when the value is missing, `null`, or of the wrong shape. Decoding a wire
//! object therefore never fails.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Decode a wire value into `T`, returning `T::default()` when the value is
/// not an object. Arrays are never mapped onto struct fields by position.
pub fn decode<T: DeserializeOwned + Default>(value: &Value) -> T {
    match value {
        Value::Object(_) => T::deserialize(value).unwrap_or_default(),
        _ => T::default(),
    }
}

/// Decode a single entity payload; anything other than an object is absent.
pub fn decode_object<T: DeserializeOwned + Default>(value: &Value) -> Option<T> {
    value.is_object().then(|| decode(value))
}

/// Decode a wire array element by element. Anything other than an array
/// decodes to an empty list.
pub fn decode_list<T: DeserializeOwned + Default>(value: &Value) -> Vec<T> {
    match value {
        Value::Array(items) => items.iter().map(decode).collect(),
        _ => Vec::new(),
    }
}

/// Whether a payload carries anything. `null`, `false`, zero and empty
/// strings, arrays or objects count as "no data".
pub fn has_data(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

// ---------------------------------------------------------------------------
// Timestamps
// ---------------------------------------------------------------------------

/// Parse a wire timestamp.
///
/// Accepts RFC 3339 strings, naive ISO-8601 strings (taken as UTC) and
/// objects carrying a `utc` sub-field, as returned by the search endpoint.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp_str(s),
        Value::Object(map) => map
            .get("utc")
            .or_else(|| map.get("Utc"))
            .and_then(parse_timestamp),
        _ => None,
    }
}

fn parse_timestamp_str(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    let naive = raw.trim_end_matches(['Z', 'z']);
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(naive, format).ok())
        .map(|dt| dt.and_utc())
}

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// A closed set of string values exchanged with the server.
pub trait WireEnum: Copy + Sized + 'static {
    /// Human-readable name of the enumeration, used in parse errors.
    const KIND: &'static str;
    /// Every variant, in declaration order.
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;
}

/// Error returned when a string names no variant of a [`WireEnum`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Case-insensitive lookup of a wire enum value.
pub fn parse_wire_enum<T: WireEnum>(raw: &str) -> Result<T, ParseEnumError> {
    let trimmed = raw.trim();
    T::ALL
        .iter()
        .copied()
        .find(|variant| variant.as_str().eq_ignore_ascii_case(trimmed))
        .ok_or_else(|| ParseEnumError {
            kind: T::KIND,
            value: raw.to_string(),
        })
}

/// Display adapter shared by the wire enums.
pub(crate) fn fmt_wire_enum<T: WireEnum>(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(value.as_str())
}

// ---------------------------------------------------------------------------
// Serialization predicates
// ---------------------------------------------------------------------------

pub fn is_false(value: &bool) -> bool {
    !*value
}

pub fn is_true(value: &bool) -> bool {
    *value
}

pub fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

// ---------------------------------------------------------------------------
// Field decoders (`deserialize_with` targets)
// ---------------------------------------------------------------------------

pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

pub fn opt_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

pub fn boolean<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_bool().unwrap_or(false))
}

pub fn boolean_or_true<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_bool().unwrap_or(true))
}

fn as_unsigned(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && *f >= 0.0)
            .map(|f| f as u64)
    })
}

pub fn uint<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64> + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_unsigned(&value)
        .and_then(|n| T::try_from(n).ok())
        .unwrap_or_default())
}

pub fn opt_uint<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_unsigned(&value).and_then(|n| T::try_from(n).ok()))
}

pub fn float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_f64().unwrap_or(0.0))
}

pub fn opt_float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_f64())
}

fn string_items(value: Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    }
}

pub fn strings<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(string_items(Value::deserialize(deserializer)?).unwrap_or_default())
}

pub fn opt_strings<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    Ok(string_items(Value::deserialize(deserializer)?))
}

fn string_entries(value: Value) -> Option<HashMap<String, String>> {
    match value {
        Value::Object(map) => Some(
            map.into_iter()
                .filter_map(|(key, value)| match value {
                    Value::String(s) => Some((key, s)),
                    Value::Number(n) => Some((key, n.to_string())),
                    Value::Bool(b) => Some((key, b.to_string())),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    }
}

pub fn string_map<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<HashMap<String, String>, D::Error> {
    Ok(string_entries(Value::deserialize(deserializer)?).unwrap_or_default())
}

pub fn opt_string_map<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<HashMap<String, String>>, D::Error> {
    Ok(string_entries(Value::deserialize(deserializer)?))
}

pub fn timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    Ok(parse_timestamp(&Value::deserialize(deserializer)?))
}

pub fn enumeration<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s.parse().unwrap_or_default(),
        _ => T::default(),
    })
}

pub fn opt_enumeration<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s.parse().ok(),
        _ => None,
    })
}

pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(decode_list(&Value::deserialize(deserializer)?))
}

pub fn opt_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.is_array().then(|| decode_list(&value)))
}

pub fn json<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        other => Some(other),
    })
}
