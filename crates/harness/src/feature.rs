//! Feature sources and placeholder templating

use std::path::{Path, PathBuf};

use crate::error::{HarnessError, HarnessResult};

/// A scenario-definition file on disk.
#[derive(Debug, Clone)]
pub struct FeatureSource {
    name: String,
    path: PathBuf,
}

impl FeatureSource {
    /// Open a feature file. Fails unless the path is an existing regular file.
    pub fn open(path: impl AsRef<Path>) -> HarnessResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(HarnessError::InvalidFeatureSource(path.to_path_buf()));
        }
        Ok(Self {
            name: stem_of(path),
            path: path.to_path_buf(),
        })
    }

    /// Logical name: file basename without extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full text. Sources are immutable inputs, so each call
    /// re-reads the file.
    pub fn contents(&self) -> HarnessResult<String> {
        Ok(std::fs::read_to_string(&self.path)?)
    }
}

fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Owns a mutable working copy of one source's text and substitutes
/// `<name>` placeholders into it. The underlying source is never mutated.
#[derive(Debug, Clone)]
pub struct FeatureTemplate {
    name: String,
    text: String,
}

impl FeatureTemplate {
    /// Snapshot a source's contents into a working copy.
    pub fn from_source(source: &FeatureSource) -> HarnessResult<Self> {
        Ok(Self {
            name: source.name().to_string(),
            text: source.contents()?,
        })
    }

    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contents(&self) -> &str {
        &self.text
    }

    /// Replace every occurrence of the placeholder `<name>` with `value`.
    ///
    /// Values are inserted verbatim; no re-substitution is performed on
    /// them. Placeholders that are never applied stay as literal text.
    pub fn apply(&mut self, name: &str, value: &str) {
        let token = format!("<{name}>");
        self.text = self.text.replace(&token, value);
    }
}
