//! Error types for the harness

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Invalid feature source: {0} is not an existing file")]
    InvalidFeatureSource(PathBuf),

    #[error("Workspace missing or not a directory: {0}")]
    MissingWorkspace(PathBuf),

    #[error("Runner produced no output: {0}")]
    EmptyOutput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type HarnessResult<T> = Result<T, HarnessError>;
