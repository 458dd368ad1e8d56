//! Marker annotations placed on materials

use crate::aliases::{
    as_micros, lookup, lookup_array, lookup_str, FALLBACK_LABEL, MARKER_COLOR, MARKER_LABEL,
    MARKER_LISTS, MARKER_TIME, MARKER_TIME_RANGE,
};
use serde_json::Value;

/// A colored, labelled point on a material's own timeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// Color as written by the editor, e.g. `#00C1CD`
    pub color: String,
    /// Chapter label
    pub label: String,
    /// Source-local position in microseconds
    pub position: Option<i64>,
}

impl Marker {
    /// Reads a marker object using the alias table.
    ///
    /// Returns `None` for values that are not objects.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }

        Some(Self {
            color: lookup_str(value, MARKER_COLOR).unwrap_or_default().to_string(),
            label: read_label(value),
            position: read_position(value),
        })
    }

    /// Checks the marker color against `target`, ignoring ASCII case
    pub fn has_color(&self, target: &str) -> bool {
        self.color.eq_ignore_ascii_case(target)
    }
}

/// Strings are used as is and numbers are rendered in their JSON form
fn read_label(value: &Value) -> String {
    match lookup(value, MARKER_LABEL) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => FALLBACK_LABEL.to_string(),
    }
}

/// `time_range.start` wins; a bare `time` is used when no range start is readable
fn read_position(value: &Value) -> Option<i64> {
    lookup(value, MARKER_TIME_RANGE)
        .and_then(|range| range.get("start"))
        .and_then(as_micros)
        .or_else(|| lookup(value, MARKER_TIME).and_then(as_micros))
}

/// Reads every marker listed on a material
pub fn markers_of(material: &Value) -> Vec<Marker> {
    lookup_array(material, MARKER_LISTS)
        .map(|items| items.iter().filter_map(Marker::from_value).collect())
        .unwrap_or_default()
}
