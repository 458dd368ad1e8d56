//! Chapter list building, formatting and writing

use crate::{Error, Result};
use std::collections::HashMap;
use std::path::Path;

const MICROS_PER_SECOND: u64 = 1_000_000;

/// Header line of the rendered chapter list
pub const HEADER: &str = "Timecodes:";

/// Earliest timeline offset per label, in first-recorded order
#[derive(Debug, Default, Clone)]
pub struct ChapterMap {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl ChapterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `offset` for `label`, keeping the smaller of the old and new value
    pub fn record(&mut self, label: &str, offset: u64) {
        match self.index.get(label) {
            Some(&slot) => {
                let current = &mut self.entries[slot].1;
                *current = (*current).min(offset);
            }
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push((label.to_string(), offset));
            }
        }
    }

    /// Gets the recorded offset of a label
    pub fn get(&self, label: &str) -> Option<u64> {
        self.index.get(label).map(|&slot| self.entries[slot].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A single chapter on the project timeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterEntry {
    /// Timeline offset in microseconds
    pub offset: u64,
    /// Chapter title
    pub label: String,
}

impl ChapterEntry {
    pub fn new(offset: u64, label: impl Into<String>) -> Self {
        Self {
            offset,
            label: label.into(),
        }
    }

    /// Renders the entry as `HH:MM:SS - Label`
    pub fn render(&self) -> String {
        format!("{} - {}", format_timecode(self.offset), self.label)
    }
}

/// Ordered chapter list, always starting with the intro entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterList {
    entries: Vec<ChapterEntry>,
}

impl ChapterList {
    /// Builds the list from mapped labels.
    ///
    /// The intro entry sits at offset zero ahead of everything else, even
    /// when a mapped chapter also starts at zero. Remaining ties keep the
    /// order in which labels were first recorded.
    pub fn from_map(map: ChapterMap, intro_label: &str) -> Self {
        let mut entries = Vec::with_capacity(map.len() + 1);
        entries.push(ChapterEntry::new(0, intro_label));
        entries.extend(
            map.entries
                .into_iter()
                .map(|(label, offset)| ChapterEntry::new(offset, label)),
        );

        // Stable sort keeps the intro first among zero offsets.
        entries.sort_by_key(|e| e.offset);
        Self { entries }
    }

    pub fn entries(&self) -> &[ChapterEntry] {
        &self.entries
    }

    /// Renders the header followed by one line per chapter, newline-joined
    pub fn render(&self) -> String {
        std::iter::once(HEADER.to_string())
            .chain(self.entries.iter().map(ChapterEntry::render))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Writes the rendered list to `path`, replacing any existing file
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.render()).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("wrote {} chapters to {}", self.entries.len(), path.display());
        Ok(())
    }
}

/// Formats microseconds as `HH:MM:SS`.
///
/// Hours are not wrapped at 24 and may take more than two digits.
pub fn format_timecode(micros: u64) -> String {
    let total_secs = micros / MICROS_PER_SECOND;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
