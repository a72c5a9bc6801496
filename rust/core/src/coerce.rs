// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lenient readers for loosely-typed JSON fields
//!
//! Generated documents mix numbers and numeric strings, use arrays where
//! objects were asked for, and sometimes send `null`. These helpers read a
//! value if it can be understood and return `None` otherwise; callers pick
//! the default.

use archplan_geometry::Point3D;
use serde_json::{Map, Value};

/// Finite number from a JSON number or numeric string
pub fn number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Whole number, truncating fractional values
pub fn integer(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| number(value).map(|f| f.trunc() as i64)),
        _ => number(value).map(|f| f.trunc() as i64),
    }
}

/// Non-empty trimmed string; numbers and booleans are rendered as text
pub fn text(value: Option<&Value>) -> Option<String> {
    let s = match value? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!s.is_empty()).then_some(s)
}

/// List of strings. A lone string becomes a one-element list.
pub fn text_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::Null => None,
                Value::String(_) | Value::Number(_) | Value::Bool(_) => text(Some(item)),
                other => Some(other.to_string()),
            })
            .collect(),
        Some(single @ Value::String(_)) => text(Some(single)).into_iter().collect(),
        _ => Vec::new(),
    }
}

/// Point from `{"x":..,"y":..,"z":..}` or `[x, y, z]`; missing coordinates
/// are 0. Returns `None` when the value is neither shape.
pub fn point3(value: Option<&Value>) -> Option<Point3D> {
    match value? {
        Value::Object(map) => Some(Point3D::new(
            number(map.get("x")).unwrap_or(0.0),
            number(map.get("y")).unwrap_or(0.0),
            number(map.get("z")).unwrap_or(0.0),
        )),
        Value::Array(items) => Some(Point3D::new(
            number(items.first()).unwrap_or(0.0),
            number(items.get(1)).unwrap_or(0.0),
            number(items.get(2)).unwrap_or(0.0),
        )),
        _ => None,
    }
}

/// Object view of a value
pub fn object(value: Option<&Value>) -> Option<&Map<String, Value>> {
    value?.as_object()
}

/// Non-empty array view of a value
pub fn non_empty_array(value: Option<&Value>) -> Option<&Vec<Value>> {
    value?.as_array().filter(|items| !items.is_empty())
}

/// Copy every entry of `map` whose key is not in `known`
pub fn extra_fields(map: &Map<String, Value>, known: &[&str]) -> Map<String, Value> {
    map.iter()
        .filter(|(key, _)| !known.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
