//! Feature file discovery for presentation

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use walkdir::WalkDir;

use crate::error::HarnessResult;

/// One discovered feature file.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureEntry {
    pub path: PathBuf,
    /// File basename without extension.
    pub name: String,
    /// Text of the leading `Feature:` line, when present.
    pub title: Option<String>,
}

fn title_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?m)^[ \t]*Feature:[ \t]*(.+)$").expect("title pattern compiles")
    })
}

/// Scan a directory for `*.feature` files, pulling each one's `Feature:`
/// line for display. Results are sorted by file name.
pub fn list_features(dir: &Path) -> HarnessResult<Vec<FeatureEntry>> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .extension()
                .map(|ext| ext == "feature")
                .unwrap_or(false)
        })
    {
        let text = std::fs::read_to_string(entry.path())?;
        let title = title_pattern()
            .captures(&text)
            .map(|caps| caps[1].trim().to_string());
        let name = entry
            .path()
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        entries.push(FeatureEntry {
            path: entry.path().to_path_buf(),
            name,
            title,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_finds_feature_files_and_titles() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("checkout.feature"),
            "Feature: Checkout discount\n\nScenario: x\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("untitled.feature"), "Scenario: bare\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "Feature: not a feature file\n").unwrap();

        let entries = list_features(dir.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "checkout");
        assert_eq!(entries[0].title.as_deref(), Some("Checkout discount"));
        assert_eq!(entries[1].name, "untitled");
        assert_eq!(entries[1].title, None);
    }

    #[test]
    fn empty_directory_yields_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_features(dir.path()).unwrap().is_empty());
    }
}
