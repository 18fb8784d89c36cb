mod entry;

pub use entry::{CardArena, CatalogEntry};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A configured, launchable instance of the managed software
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Installation {
    /// Filled in by `CatalogFile::load` when the record carries none
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl Installation {
    /// Label shown on cards. Absent names render as an empty label.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionKind {
    #[default]
    Release,
    Snapshot,
    OldBeta,
    OldAlpha,
}

/// A releasable build identifier, installable or already installed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub id: String,
    #[serde(default)]
    pub is_installed: bool,
    #[serde(default)]
    pub kind: VersionKind,
}

impl Version {
    #[cfg(test)]
    pub fn new(id: impl Into<String>, is_installed: bool) -> Self {
        Self {
            id: id.into(),
            is_installed,
            kind: VersionKind::Release,
        }
    }
}

/// Human readable name for a version record
pub fn parse_display_name(version: &Version) -> String {
    match version.kind {
        VersionKind::Release => version.id.clone(),
        VersionKind::Snapshot => format!("Snapshot {}", version.id),
        VersionKind::OldBeta => {
            format!("Beta {}", version.id.strip_prefix('b').unwrap_or(&version.id))
        }
        VersionKind::OldAlpha => {
            format!("Alpha {}", version.id.strip_prefix('a').unwrap_or(&version.id))
        }
    }
}

/// Read-only view of the launcher state the page renders.
///
/// `revision` must change whenever either list changes so that derived
/// state (filter results, card arenas) can skip recomputation otherwise.
pub trait LauncherViewModel {
    fn installations(&self) -> &[Installation];
    fn versions(&self) -> &[Version];
    fn revision(&self) -> u64;
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog file not found: {0}")]
    NotFound(PathBuf),
    #[error("could not read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// JSON-backed launcher state, used when no live launcher is attached
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub installations: Vec<Installation>,
    #[serde(default)]
    pub versions: Vec<Version>,
    #[serde(skip)]
    revision: u64,
}

impl CatalogFile {
    #[cfg(test)]
    pub fn new(installations: Vec<Installation>, versions: Vec<Version>) -> Self {
        Self {
            installations,
            versions,
            revision: 1,
        }
    }

    /// Default location: `<data dir>/catview/catalog.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("catview").join("catalog.json"))
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            return Err(CatalogError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut catalog: CatalogFile =
            serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        catalog.revision = 1;
        catalog.fill_missing_ids();

        tracing::info!(
            path = %path.display(),
            installations = catalog.installations.len(),
            versions = catalog.versions.len(),
            "Catalog loaded"
        );

        Ok(catalog)
    }

    /// Records without an id are keyed by their name, else by position
    fn fill_missing_ids(&mut self) {
        for (index, installation) in self.installations.iter_mut().enumerate() {
            if !installation.id.is_empty() {
                continue;
            }
            installation.id = match installation.display_name.as_deref() {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => format!("installation-{index}"),
            };
            tracing::debug!(index, id = %installation.id, "Installation without id");
        }
    }
}

impl LauncherViewModel for CatalogFile {
    fn installations(&self) -> &[Installation] {
        &self.installations
    }

    fn versions(&self) -> &[Version] {
        &self.versions
    }

    fn revision(&self) -> u64 {
        self.revision
    }
}
