//! File-based counter source.
//!
//! Reads the four totals from a JSON file, e.g.
//! `{"files": 5, "clones": 2, "chunks": 10, "candidates": 1}`.
//! Stands in for the live store in demos and tests.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::CounterSource;
use crate::data::Totals;
use crate::error::SourceError;

/// A counter source that reads totals from a local JSON file.
///
/// The file is re-read on every tick, so an external process can update
/// it while the dashboard runs.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// The path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CounterSource for FileSource {
    async fn totals(&self) -> Result<Totals, SourceError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SourceError::Connection(format!("{}: {}", self.path.display(), e)))?;

        serde_json::from_str(&content).map_err(|e| SourceError::Parse(e.to_string()))
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn new_records_path_and_description() {
        let source = FileSource::new("/tmp/totals.json");
        assert_eq!(source.path(), Path::new("/tmp/totals.json"));
        assert_eq!(source.description(), "file: /tmp/totals.json");
    }

    #[tokio::test]
    async fn reads_totals_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"files": 5, "clones": 2, "chunks": 10, "candidates": 1}}"#
        )
        .unwrap();

        let source = FileSource::new(file.path());
        let totals = source.totals().await.unwrap();
        assert_eq!(totals, Totals::new(5, 2, 10, 1));
    }

    #[tokio::test]
    async fn missing_file_is_a_connection_error() {
        let source = FileSource::new("/nonexistent/path/totals.json");
        let err = source.totals().await.unwrap_err();
        assert!(matches!(err, SourceError::Connection(_)));
    }

    #[tokio::test]
    async fn invalid_json_is_a_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let source = FileSource::new(file.path());
        let err = source.totals().await.unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }
}
