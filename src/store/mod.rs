//! In-memory record store.
//!
//! The store is filled once from an ordered list of dataset sources and is
//! read-only afterwards. Failing sources are skipped, never fatal.

pub mod source;

pub use source::{DatasetReader, SourceReader};

use crate::models::EmployeeRecord;
use source::{PendingSource, SourceError};
use chrono::NaiveDate;
use indicatif::ProgressBar;
use tracing::{debug, info, warn};

/// A source that contributed nothing, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFailure {
    pub source: String,
    pub reason: String,
}

/// Outcome of a [`RecordStore::load`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadSummary {
    /// Records added by this call (the fallback record is not counted).
    pub records_loaded: usize,
    /// Sources that parsed successfully.
    pub sources_loaded: usize,
    /// Records dropped because they failed validation.
    pub records_rejected: usize,
    pub failures: Vec<SourceFailure>,
    /// No source produced a record and the synthetic record was used.
    pub fallback_used: bool,
    /// The store had already been loaded; nothing was read.
    pub already_initialized: bool,
}

/// Ordered collection of employee records plus the current-user selection.
#[derive(Debug)]
pub struct RecordStore {
    records: Vec<EmployeeRecord>,
    fallback: EmployeeRecord,
    initialized: bool,
}

impl RecordStore {
    /// Create an empty store. `today` stamps the fallback record.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            records: Vec::new(),
            fallback: EmployeeRecord::fallback(today),
            initialized: false,
        }
    }

    /// Build a store directly from records, marking it loaded.
    #[cfg(test)]
    pub fn from_records(today: NaiveDate, records: Vec<EmployeeRecord>) -> Self {
        Self {
            records,
            fallback: EmployeeRecord::fallback(today),
            initialized: true,
        }
    }

    /// Load every source in order.
    pub async fn load<R>(&mut self, reader: &R, sources: &[String]) -> LoadSummary
    where
        R: SourceReader + ?Sized,
    {
        self.load_with_progress(reader, sources, None).await
    }

    /// Load every source in order, ticking `progress` once per source.
    ///
    /// Sources are awaited one after another. Only the first call reads
    /// anything; later calls return a summary flagged `already_initialized`.
    pub async fn load_with_progress<R>(
        &mut self,
        reader: &R,
        sources: &[String],
        progress: Option<&ProgressBar>,
    ) -> LoadSummary
    where
        R: SourceReader + ?Sized,
    {
        if self.initialized {
            debug!("Record store already initialized, skipping load");
            return LoadSummary {
                already_initialized: true,
                ..LoadSummary::default()
            };
        }

        let sources = source::expand_sources(sources);
        let mut summary = LoadSummary::default();

        if let Some(pb) = progress {
            pb.set_length(sources.len() as u64);
        }

        for pending in &sources {
            let uri = pending.uri();
            if let Some(pb) = progress {
                pb.set_message(uri.to_string());
            }

            let parsed = match pending {
                PendingSource::Read(uri) => match reader.read(uri).await {
                    Ok(content) => source::parse_records(uri, &content),
                    Err(e) => Err(e),
                },
                PendingSource::EmptyDirectory(path) => {
                    Err(SourceError::EmptyDirectory { path: path.clone() })
                }
            };

            match parsed {
                Ok(records) => {
                    let total = records.len();
                    let mut accepted = 0usize;

                    for record in records {
                        match record.validate() {
                            Ok(()) => {
                                self.records.push(record);
                                accepted += 1;
                            }
                            Err(e) => {
                                warn!("Skipping record from {}: {}", uri, e);
                                summary.records_rejected += 1;
                            }
                        }
                    }

                    info!("Loaded {} of {} users from {}", accepted, total, uri);
                    summary.records_loaded += accepted;
                    summary.sources_loaded += 1;
                }
                Err(e) => {
                    warn!("Could not load {}: {}", uri, e);
                    summary.failures.push(SourceFailure {
                        source: uri.to_string(),
                        reason: e.to_string(),
                    });
                }
            }

            if let Some(pb) = progress {
                pb.inc(1);
            }
        }

        if self.records.is_empty() {
            warn!(
                "No records loaded, using fallback user {} (ID: {})",
                self.fallback.employee_name, self.fallback.user_id
            );
            self.records.push(self.fallback.clone());
            summary.fallback_used = true;
        }

        let user = self.current_user();
        info!(
            "Current user: {} (ID: {})",
            user.employee_name, user.user_id
        );
        info!("Record store initialized with {} users", self.records.len());

        self.initialized = true;
        summary
    }

    /// All records in load order.
    pub fn all(&self) -> &[EmployeeRecord] {
        &self.records
    }

    /// The first loaded record, or the synthetic fallback.
    pub fn current_user(&self) -> &EmployeeRecord {
        self.records.first().unwrap_or(&self.fallback)
    }

    /// Find a record by user id.
    pub fn find(&self, user_id: u32) -> Option<&EmployeeRecord> {
        self.records.iter().find(|r| r.user_id == user_id)
    }
}
