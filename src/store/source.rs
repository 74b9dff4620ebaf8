//! Dataset sources.
//!
//! A source is a local JSON file, a directory of JSON files, a `file://` URI
//! or an `http(s)://` URL. Each one must hold a JSON array of employee
//! records.

use crate::models::EmployeeRecord;
use futures::future::BoxFuture;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

/// Why a single source could not contribute records.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("directory {path} contains no .json files")]
    EmptyDirectory { path: String },

    #[error("{uri} is not a JSON array of employee records: {source}")]
    Malformed {
        uri: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Where a source URI points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Remote(String),
    Local(PathBuf),
}

impl SourceLocation {
    /// Classifies a source URI.
    pub fn parse(uri: &str) -> Self {
        if uri.starts_with("http://") || uri.starts_with("https://") {
            SourceLocation::Remote(uri.to_string())
        } else if let Some(path) = uri.strip_prefix("file://") {
            SourceLocation::Local(PathBuf::from(path))
        } else {
            SourceLocation::Local(PathBuf::from(uri))
        }
    }
}

/// One entry of the expanded source list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingSource {
    Read(String),
    /// A directory holding no `.json` files.
    EmptyDirectory(String),
}

impl PendingSource {
    pub fn uri(&self) -> &str {
        match self {
            PendingSource::Read(uri) | PendingSource::EmptyDirectory(uri) => uri,
        }
    }
}

/// Fetches the raw text of a source.
///
/// The store only talks to this trait, so tests can serve canned payloads.
pub trait SourceReader: Send + Sync {
    fn read<'a>(&'a self, uri: &'a str) -> BoxFuture<'a, Result<String, SourceError>>;
}

/// Reads local files with `tokio::fs` and remote sources with `reqwest`.
pub struct DatasetReader {
    http_client: reqwest::Client,
}

impl DatasetReader {
    /// Create a reader. `timeout` bounds each HTTP request; `None` waits
    /// indefinitely.
    pub fn new(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
        })
    }

    async fn read_remote(&self, url: &str) -> Result<String, SourceError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|source| SourceError::Http {
                url: url.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }

        response.text().await.map_err(|source| SourceError::Http {
            url: url.to_string(),
            source,
        })
    }
}

impl SourceReader for DatasetReader {
    fn read<'a>(&'a self, uri: &'a str) -> BoxFuture<'a, Result<String, SourceError>> {
        Box::pin(async move {
            match SourceLocation::parse(uri) {
                SourceLocation::Remote(url) => self.read_remote(&url).await,
                SourceLocation::Local(path) => {
                    tokio::fs::read_to_string(&path)
                        .await
                        .map_err(|source| SourceError::Io {
                            path: path.display().to_string(),
                            source,
                        })
                }
            }
        })
    }
}

/// Parse one source's payload.
pub fn parse_records(uri: &str, content: &str) -> Result<Vec<EmployeeRecord>, SourceError> {
    serde_json::from_str(content).map_err(|source| SourceError::Malformed {
        uri: uri.to_string(),
        source,
    })
}

/// Replace every local directory in `sources` with the `.json` files below
/// it, sorted by path. Other sources pass through untouched and keep their
/// position. A directory without `.json` files stays in place as
/// [`PendingSource::EmptyDirectory`].
pub fn expand_sources(sources: &[String]) -> Vec<PendingSource> {
    let mut expanded = Vec::with_capacity(sources.len());

    for uri in sources {
        match SourceLocation::parse(uri) {
            SourceLocation::Local(path) if path.is_dir() => {
                let files = json_files_in(&path);
                debug!("Expanded {} into {} dataset files", uri, files.len());
                if files.is_empty() {
                    expanded.push(PendingSource::EmptyDirectory(uri.clone()));
                } else {
                    expanded.extend(files.into_iter().map(PendingSource::Read));
                }
            }
            _ => expanded.push(PendingSource::Read(uri.clone())),
        }
    }

    expanded
}

fn json_files_in(dir: &Path) -> Vec<String> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("json"))
        .collect();

    files.sort();
    files
        .into_iter()
        .map(|path| path.to_string_lossy().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_location_parse() {
        assert_eq!(
            SourceLocation::parse("https://cdn.example.com/users.json"),
            SourceLocation::Remote("https://cdn.example.com/users.json".to_string())
        );
        assert_eq!(
            SourceLocation::parse("file:///srv/data/users.json"),
            SourceLocation::Local(PathBuf::from("/srv/data/users.json"))
        );
        assert_eq!(
            SourceLocation::parse("data/users.json"),
            SourceLocation::Local(PathBuf::from("data/users.json"))
        );
    }

    #[test]
    fn test_parse_records_rejects_non_array() {
        let result = parse_records("bad.json", r#"{"userId": 1}"#);
        assert!(matches!(result, Err(SourceError::Malformed { .. })));
    }

    #[test]
    fn test_parse_records_reads_array() {
        let records = parse_records(
            "ok.json",
            r#"[{"userId": 1, "employeeName": "Ali Al-Kaabi", "department": "HR"}]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].employee_name, "Ali Al-Kaabi");
    }

    #[test]
    fn test_expand_sources_walks_directories_in_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.json"), "[]").unwrap();
        std::fs::write(dir.path().join("a.json"), "[]").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "skip").unwrap();

        let sources = vec![
            "https://example.com/first.json".to_string(),
            dir.path().to_string_lossy().to_string(),
            "missing.json".to_string(),
        ];
        let expanded = expand_sources(&sources);

        assert_eq!(expanded.len(), 4);
        assert_eq!(
            expanded[0],
            PendingSource::Read("https://example.com/first.json".to_string())
        );
        assert!(expanded[1].uri().ends_with("a.json"));
        assert!(expanded[2].uri().ends_with("b.json"));
        assert_eq!(expanded[3], PendingSource::Read("missing.json".to_string()));
    }

    #[test]
    fn test_expand_sources_flags_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("readme.txt"), "no data").unwrap();
        let uri = dir.path().to_string_lossy().to_string();

        let expanded = expand_sources(&[uri.clone()]);
        assert_eq!(expanded, vec![PendingSource::EmptyDirectory(uri)]);
    }

    #[tokio::test]
    async fn test_dataset_reader_reports_missing_file() {
        let reader = DatasetReader::new(None).unwrap();
        let result = reader.read("/definitely/not/here.json").await;
        assert!(matches!(result, Err(SourceError::Io { .. })));
    }
}
