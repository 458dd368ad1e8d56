//! Timeline segment data structures

use crate::aliases::{
    as_micros, lookup, lookup_array, lookup_str, SEGMENT_EXTRA_REFS, SEGMENT_MATERIAL,
    SEGMENT_SOURCE, SEGMENT_TARGET,
};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A span of time in microseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct TimeRange {
    /// Start of the span
    #[serde(default, deserialize_with = "lenient_micros")]
    pub start: i64,
    /// Length of the span
    #[serde(default, deserialize_with = "lenient_micros")]
    pub duration: i64,
}

impl TimeRange {
    /// Creates a new time range
    pub fn new(start: i64, duration: i64) -> Self {
        Self { start, duration }
    }

    /// Reads a range object; missing or malformed input yields an empty
    /// range starting at zero
    pub fn from_value(value: &Value) -> Self {
        Self::deserialize(value).unwrap_or_default()
    }

    /// End of the span (inclusive)
    pub fn end(&self) -> i64 {
        self.start.saturating_add(self.duration)
    }

    /// Checks if `position` lies within `[start, start + duration]`
    pub fn contains(&self, position: i64) -> bool {
        position >= self.start && position <= self.end()
    }
}

fn lenient_micros<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_micros(&value).unwrap_or(0))
}

/// A placement of (part of) a material on a timeline track
#[derive(Debug, Clone)]
pub struct Segment<'a> {
    /// Position of this segment in the flattened segment list
    pub index: usize,
    /// Material the segment directly references
    pub material_id: Option<&'a str>,
    /// Further material ids referenced by the segment
    pub extra_refs: Vec<&'a str>,
    /// Portion of the material's own timeline that is used
    pub source: TimeRange,
    /// Where that portion lands on the project timeline
    pub target: TimeRange,
}

impl<'a> Segment<'a> {
    /// Reads a segment object using the alias table
    pub fn from_value(index: usize, value: &'a Value) -> Self {
        let extra_refs = lookup_array(value, SEGMENT_EXTRA_REFS)
            .map(|refs| refs.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        Self {
            index,
            material_id: lookup_str(value, SEGMENT_MATERIAL),
            extra_refs,
            source: lookup(value, SEGMENT_SOURCE)
                .map(TimeRange::from_value)
                .unwrap_or_default(),
            target: lookup(value, SEGMENT_TARGET)
                .map(TimeRange::from_value)
                .unwrap_or_default(),
        }
    }

    /// Checks if the segment lists `material_id` among its extra references
    pub fn refers_to(&self, material_id: &str) -> bool {
        self.extra_refs.iter().any(|r| *r == material_id)
    }

    /// Maps a source-local position to the project timeline.
    ///
    /// Returns `None` when the position is outside the source range, i.e.
    /// the moment was trimmed away in this segment, or when the result does
    /// not fit in an `i64`.
    pub fn timeline_offset(&self, position: i64) -> Option<i64> {
        if !self.source.contains(position) {
            return None;
        }
        position
            .checked_sub(self.source.start)
            .and_then(|delta| self.target.start.checked_add(delta))
    }
}
