//! Record providers and load errors.

use crate::model::record::CatalogDocument;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Fetch or parse failure for a catalog document.
#[derive(Debug)]
pub enum LoadError {
    /// The provider could not produce the document body.
    Fetch {
        source: String,
        error: std::io::Error,
    },
    /// The body is not a valid `{ "characters": [...] }` document.
    Parse {
        source: String,
        error: serde_json::Error,
    },
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetch { source, error } => write!(f, "failed to fetch `{source}`: {error}"),
            Self::Parse { source, error } => write!(f, "failed to parse `{source}`: {error}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Fetch { error, .. } => Some(error),
            Self::Parse { error, .. } => Some(error),
        }
    }
}

/// Read-only provider of the raw catalog document.
pub trait RecordSource {
    /// Short human-readable origin used in logs and errors.
    fn describe(&self) -> String;

    /// Returns the document body.
    fn fetch(&self) -> std::io::Result<String>;

    /// Fetches and parses the document.
    fn load_document(&self) -> Result<CatalogDocument, LoadError> {
        let body = self.fetch().map_err(|error| LoadError::Fetch {
            source: self.describe(),
            error,
        })?;
        serde_json::from_str(&body).map_err(|error| LoadError::Parse {
            source: self.describe(),
            error,
        })
    }
}

/// Reads the catalog from a file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecordSource {
    path: PathBuf,
}

impl FileRecordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for FileRecordSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> std::io::Result<String> {
        std::fs::read_to_string(&self.path)
    }
}

/// Serves a catalog document held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineRecordSource {
    body: String,
}

impl InlineRecordSource {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

impl RecordSource for InlineRecordSource {
    fn describe(&self) -> String {
        "inline".to_string()
    }

    fn fetch(&self) -> std::io::Result<String> {
        Ok(self.body.clone())
    }
}
