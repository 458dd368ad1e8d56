//! Locating editor projects on disk

use crate::{Error, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable holding the user's profile directory
pub const PROFILE_VAR: &str = "USERPROFILE";

/// Name of the project content file inside a project folder
pub const CONTENT_FILE: &str = "draft_content.json";

/// Path of the projects folder relative to the profile directory
const PROJECTS_SUBPATH: [&str; 6] = [
    "AppData",
    "Local",
    "CapCut",
    "User Data",
    "Projects",
    "com.lveditor.draft",
];

/// Folder that holds one subfolder per editor project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectsRoot {
    dir: PathBuf,
}

impl ProjectsRoot {
    /// Uses `dir` as the projects folder
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Derives the default projects folder from [`PROFILE_VAR`]
    pub fn from_env() -> Result<Self> {
        Self::from_profile(std::env::var_os(PROFILE_VAR))
    }

    /// Derives the default projects folder from a profile directory
    pub fn from_profile(profile: Option<OsString>) -> Result<Self> {
        let profile = profile
            .filter(|p| !p.is_empty())
            .ok_or(Error::MissingConfiguration { var: PROFILE_VAR })?;

        let mut dir = PathBuf::from(profile);
        dir.extend(PROJECTS_SUBPATH);
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Returns the content file path for a project, without checking it exists
    pub fn content_path(&self, project: &str) -> PathBuf {
        self.dir.join(project).join(CONTENT_FILE)
    }

    /// Resolves a project name to its existing content file
    pub fn locate(&self, project: &str) -> Result<PathBuf> {
        let project = project.trim();
        if project.is_empty() {
            return Err(Error::NoProjectSelected);
        }

        let path = self.content_path(project);
        if !path.is_file() {
            return Err(Error::NotFound(path));
        }
        Ok(path)
    }

    /// Name of the most recently modified project folder.
    ///
    /// Any I/O failure is treated as "no suggestion".
    pub fn latest_project(&self) -> Option<String> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!("cannot list {}: {}", self.dir.display(), e);
                return None;
            }
        };

        entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
            .filter_map(|entry| {
                let modified = entry.metadata().and_then(|m| m.modified()).ok()?;
                Some((modified, entry.file_name()))
            })
            .max_by_key(|(modified, _)| *modified)
            .map(|(_, name)| name.to_string_lossy().into_owned())
    }
}
