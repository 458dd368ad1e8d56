//! chapmark Core Library
//!
//! This library turns colored markers placed on clips inside a video editor
//! project into a chapter list laid out on the final edited timeline.
//!
//! The pipeline is strictly linear: [`Document`] loading, material
//! collection, timeline mapping and chapter rendering.

pub mod aliases;
pub mod chapters;
pub mod collector;
pub mod document;
pub mod mapper;
pub mod marker;
pub mod probe;
pub mod project;
pub mod segment;

pub use chapters::{format_timecode, ChapterEntry, ChapterList, ChapterMap};
pub use collector::{collect_materials, MaterialPool};
pub use document::Document;
pub use mapper::map_markers;
pub use marker::Marker;
pub use probe::{probe_editor, ProbeStatus};
pub use project::ProjectsRoot;
pub use segment::{Segment, TimeRange};

use std::path::{Path, PathBuf};

/// Default marker color that designates a chapter
pub const DEFAULT_TARGET_COLOR: &str = "#00c1cd";

/// Label of the synthetic chapter placed at offset zero
pub const DEFAULT_INTRO_LABEL: &str = "Einleitung";

/// Result type for chapmark-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for chapmark-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable {var} is not set, cannot locate the projects folder")]
    MissingConfiguration { var: &'static str },

    #[error("No project name provided")]
    NoProjectSelected,

    #[error("Project file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Extraction configuration
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Marker color to export, compared case-insensitively
    pub target_color: String,
    /// Label of the entry always emitted at 00:00:00
    pub intro_label: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            target_color: DEFAULT_TARGET_COLOR.to_string(),
            intro_label: DEFAULT_INTRO_LABEL.to_string(),
        }
    }
}

/// Runs the whole pipeline on a project content file.
///
/// Nothing is written; call [`ChapterList::write_to`] on the result once
/// the caller is ready to persist it.
pub fn extract_chapters(path: &Path, config: &ExtractorConfig) -> Result<ChapterList> {
    let document = Document::load(path)?;
    Ok(extract_from_document(&document, config))
}

/// Runs collection, mapping and list building on an already loaded document
pub fn extract_from_document(document: &Document, config: &ExtractorConfig) -> ChapterList {
    let pool = match document.materials() {
        Some(materials) => collect_materials(materials),
        None => MaterialPool::default(),
    };
    tracing::debug!("collected {} marker-bearing materials", pool.len());

    let map = map_markers(document, &pool, config);
    tracing::info!("mapped {} chapter labels", map.len());

    ChapterList::from_map(map, &config.intro_label)
}
