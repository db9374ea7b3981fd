//! # Local Dashboard Store
//!
//! The on-disk side of grafctl. A repository root holds:
//!
//! ```text
//! <root>/
//! ├── <slug>.json        # dashboards written by `get`
//! └── db/
//!     └── <slug>.json    # dashboards read by `push`
//! ```
//!
//! Only database-backed dashboards can be saved through the API, which is why
//! `push` reads from the `db/` sub-directory only.
//!
//! Files hold the bare dashboard model, tab-indented.

use crate::dashboard::{to_indented_json, Model};
use crate::error::{GrafctlError, Result};
use std::fs;
use std::path::{Path, PathBuf};

const DB_DIR: &str = "db";
const FILE_EXT: &str = "json";

/// Strips the `db/` prefix the search endpoint puts in front of slugs.
pub fn normalize_slug(slug: &str) -> &str {
    slug.strip_prefix("db/").unwrap_or(slug)
}

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn db_dir(&self) -> PathBuf {
        self.root.join(DB_DIR)
    }

    pub fn dashboard_file(&self, slug: &str) -> PathBuf {
        self.root.join(format!("{}.{}", normalize_slug(slug), FILE_EXT))
    }

    /// Files `push` should send: the named slugs, or every `*.json` in `db/`
    /// sorted by name. The `db/` directory must exist either way.
    pub fn push_targets<S: AsRef<str>>(&self, slugs: &[S]) -> Result<Vec<PathBuf>> {
        let dir = self.db_dir();
        if !dir.is_dir() {
            return Err(GrafctlError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "dashboard directory does not exist",
            ))
            .for_file(dir));
        }

        if !slugs.is_empty() {
            return Ok(slugs
                .iter()
                .map(|s| dir.join(format!("{}.{}", normalize_slug(s.as_ref()), FILE_EXT)))
                .collect());
        }

        let mut files = Vec::new();
        let entries = fs::read_dir(&dir).map_err(|e| GrafctlError::Io(e).for_file(&dir))?;
        for entry in entries {
            let path = entry.map_err(|e| GrafctlError::Io(e).for_file(&dir))?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == FILE_EXT) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Writes `model` to `<root>/<slug>.json`, creating the root if needed.
    pub fn write_model(&self, slug: &str, model: &Model) -> Result<PathBuf> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)
                .map_err(|e| GrafctlError::Io(e).for_file(&self.root))?;
        }
        let path = self.dashboard_file(slug);
        let mut content = to_indented_json(model).map_err(|e| e.for_file(&path))?;
        content.push(b'\n');
        fs::write(&path, content).map_err(|e| GrafctlError::Io(e).for_file(&path))?;
        Ok(path)
    }
}

/// Reads a dashboard file into its model.
pub fn read_model(path: &Path) -> Result<Model> {
    let content = fs::read(path).map_err(|e| GrafctlError::Io(e).for_file(path))?;
    let model: Model =
        serde_json::from_slice(&content).map_err(|e| GrafctlError::Decode(e).for_file(path))?;
    Ok(model)
}
