//! Project document loading

use crate::aliases::as_micros;
use crate::segment::Segment;
use crate::{Error, Result};
use serde_json::Value;
use std::path::Path;

/// A parsed project document.
///
/// The document is kept as a generic JSON tree since its schema is only
/// loosely followed by the editor; accessors do best-effort key lookups.
#[derive(Debug, Clone)]
pub struct Document {
    root: Value,
}

impl Document {
    /// Wraps an already parsed tree
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Reads and parses a project content file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::NotFound(path.to_path_buf()));
        }

        let text = std::fs::read_to_string(path)?;
        let root = serde_json::from_str(&text).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!("loaded project document from {}", path.display());
        Ok(Self { root })
    }

    /// Returns the material pool subtree, if any
    pub fn materials(&self) -> Option<&Value> {
        self.root.get("materials")
    }

    /// Declared project duration in microseconds.
    ///
    /// Zero or unreadable durations are treated as undeclared. A negative
    /// duration is still a bound and leaves no valid offset.
    pub fn duration(&self) -> Option<i64> {
        self.root
            .get("duration")
            .and_then(as_micros)
            .filter(|&d| d != 0)
    }

    /// Flattens the segments of every track, in track order
    pub fn segments(&self) -> Vec<Segment<'_>> {
        let Some(tracks) = self.root.get("tracks").and_then(Value::as_array) else {
            return Vec::new();
        };

        tracks
            .iter()
            .filter_map(|track| track.get("segments").and_then(Value::as_array))
            .flatten()
            .filter(|segment| segment.is_object())
            .enumerate()
            .map(|(index, segment)| Segment::from_value(index, segment))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft_content.json");

        match Document::load(&path) {
            Err(Error::NotFound(p)) => assert_eq!(p, path),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft_content.json");
        std::fs::write(&path, r#"{"duration": 42, "tracks": []}"#).unwrap();

        let document = Document::load(&path).unwrap();
        assert_eq!(document.duration(), Some(42));
        assert!(document.segments().is_empty());
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft_content.json");
        std::fs::write(&path, "[1, 2").unwrap();

        assert!(matches!(Document::load(&path), Err(Error::Parse { .. })));
    }

    #[test]
    fn test_duration_zero_is_undeclared() {
        assert_eq!(Document::from_value(json!({ "duration": 0 })).duration(), None);
        assert_eq!(Document::from_value(json!({})).duration(), None);
        assert_eq!(Document::from_value(json!({ "duration": "n/a" })).duration(), None);
    }

    #[test]
    fn test_negative_duration_is_declared() {
        assert_eq!(Document::from_value(json!({ "duration": -5 })).duration(), Some(-5));
    }

    #[test]
    fn test_segments_flattened_across_tracks() {
        let document = Document::from_value(json!({
            "tracks": [
                { "segments": [{ "material_id": "a" }, { "material_id": "b" }] },
                { "type": "audio" },
                { "segments": [{ "material_id": "c" }, "garbage"] }
            ]
        }));

        let ids: Vec<_> = document
            .segments()
            .iter()
            .map(|s| (s.index, s.material_id))
            .collect();
        assert_eq!(ids, vec![(0, Some("a")), (1, Some("b")), (2, Some("c"))]);
    }
}
