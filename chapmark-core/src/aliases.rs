//! Key alias table for the editor's project document
//!
//! The document format has renamed several fields over time. Every concept
//! is described by an ordered list of candidate keys; lookups take the
//! first candidate that is present. New aliases only need to be appended
//! here.

use serde_json::Value;

/// Keys under which a material carries its marker list
pub const MARKER_LISTS: &[&str] = &["mark_items", "markItems", "time_marks"];

/// Keys holding a marker's color
pub const MARKER_COLOR: &[&str] = &["color"];

/// Keys holding a marker's label
pub const MARKER_LABEL: &[&str] = &["title", "name"];

/// Keys holding a marker's time range object (its `start` is the position)
pub const MARKER_TIME_RANGE: &[&str] = &["time_range", "timeRange"];

/// Keys holding a bare marker position
pub const MARKER_TIME: &[&str] = &["time"];

/// Keys holding the material a segment directly references
pub const SEGMENT_MATERIAL: &[&str] = &["material_id", "materialId"];

/// Keys holding additional material ids referenced by a segment
pub const SEGMENT_EXTRA_REFS: &[&str] = &["extra_material_refs"];

/// Keys holding a segment's source range
pub const SEGMENT_SOURCE: &[&str] = &["source_timerange", "material_timerange"];

/// Keys holding a segment's target range
pub const SEGMENT_TARGET: &[&str] = &["target_timerange"];

/// Label used when a marker carries none
pub const FALLBACK_LABEL: &str = "unknown";

/// Returns the value of the first candidate key that is present on `record`.
///
/// `null`, `false`, empty strings and empty containers count as absent so
/// that an empty legacy field does not shadow a populated newer one.
pub fn lookup<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let object = record.as_object()?;
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| is_present(value))
}

/// Like [`lookup`], but only accepts string values
pub fn lookup_str<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a str> {
    lookup(record, keys).and_then(Value::as_str)
}

/// Like [`lookup`], but only accepts arrays
pub fn lookup_array<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Vec<Value>> {
    lookup(record, keys).and_then(Value::as_array)
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Number(_) => true,
    }
}

/// Reads a microsecond quantity leniently.
///
/// Integers are taken as is, floats are truncated toward zero and numeric
/// strings are parsed. Anything else yields `None`.
pub fn as_micros(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|u| i64::try_from(u).unwrap_or(i64::MAX)))
            .or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_takes_first_present_alias() {
        let record = json!({ "markItems": [1], "time_marks": [2] });
        assert_eq!(lookup(&record, MARKER_LISTS), Some(&json!([1])));
    }

    #[test]
    fn test_lookup_skips_empty_values() {
        let record = json!({ "mark_items": [], "markItems": null, "time_marks": [3] });
        assert_eq!(lookup(&record, MARKER_LISTS), Some(&json!([3])));

        let record = json!({ "title": "", "name": "Second" });
        assert_eq!(lookup_str(&record, MARKER_LABEL), Some("Second"));
    }

    #[test]
    fn test_lookup_on_non_object() {
        assert_eq!(lookup(&json!([1, 2]), MARKER_LISTS), None);
        assert_eq!(lookup(&json!("id"), MARKER_LISTS), None);
    }

    #[test]
    fn test_lookup_array_rejects_scalars() {
        let record = json!({ "mark_items": "not a list" });
        assert!(lookup_array(&record, MARKER_LISTS).is_none());
    }

    #[test]
    fn test_as_micros_accepts_numeric_forms() {
        assert_eq!(as_micros(&json!(5_000_000)), Some(5_000_000));
        assert_eq!(as_micros(&json!(2.9)), Some(2));
        assert_eq!(as_micros(&json!(" 1200 ")), Some(1200));
        assert_eq!(as_micros(&json!("7.5")), Some(7));
        assert_eq!(as_micros(&json!("soon")), None);
        assert_eq!(as_micros(&json!(null)), None);
    }
}
