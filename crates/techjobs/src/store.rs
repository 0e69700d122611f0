//! The job dataset store.
//!
//! [`JobStore`] owns its data source and loads it lazily, at most once. Every
//! query calls [`JobStore::load_once`] first, so the first query of a fresh
//! store pays for parsing and later queries read the cached dataset.
//!
//! # Load lifecycle
//!
//! ```text
//! UNLOADED --load ok--> LOADED      (terminal)
//! UNLOADED --load err--> UNLOADED   (nothing published; a later call retries)
//! ```
//!
//! # Thread Safety
//!
//! The check-parse-publish sequence runs under a `Mutex`, so concurrent first
//! callers parse the source once. The parsed dataset is published into a
//! `OnceLock`; reads after that never take the lock.
//!
//! # Matching
//!
//! Field names are matched exactly (case-sensitive) against the header.
//! Values are matched by case-insensitive substring containment: a value
//! matches a term if `lowercase(value)` contains `lowercase(term)`. The empty
//! term matches every record.

use std::collections::HashSet;
use std::sync::{Mutex, OnceLock, PoisonError};

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::record::{Header, Record};
use crate::source::{DataSource, Dataset, TableSource};

/// Read-only, lazily loaded job dataset.
#[derive(Debug)]
pub struct JobStore {
    source: Box<dyn TableSource>,
    /// Published exactly once, on the first successful load.
    dataset: OnceLock<Dataset>,
    /// Serializes first loads so the source is parsed at most once.
    load_guard: Mutex<()>,
}

impl JobStore {
    /// Create an unloaded store reading from `source`.
    #[must_use]
    pub fn new(source: impl TableSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            dataset: OnceLock::new(),
            load_guard: Mutex::new(()),
        }
    }

    /// Create an unloaded store reading the configured data file.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(DataSource::file(&config.data_file))
    }

    /// The source this store reads from.
    #[must_use]
    pub fn source(&self) -> &dyn TableSource {
        self.source.as_ref()
    }

    /// Returns `true` once a load has succeeded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.dataset.get().is_some()
    }

    /// Load the dataset if it has not been loaded yet.
    ///
    /// Calling this on a loaded store is a no-op; the source is not re-read.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Load`](crate::Error::Load) if the source cannot be
    /// opened, read, or parsed. The store stays unloaded in that case.
    pub fn load_once(&self) -> Result<()> {
        if self.is_loaded() {
            debug!(source = %self.source, "dataset already loaded");
            return Ok(());
        }
        self.dataset().map(|_| ())
    }

    /// Header of the loaded dataset.
    ///
    /// # Errors
    ///
    /// Returns a load error if the dataset is not loaded and loading fails.
    pub fn header(&self) -> Result<&Header> {
        Ok(self.dataset()?.header())
    }

    /// Distinct values of `field`, in first-occurrence order.
    ///
    /// Deduplication uses exact string equality; values differing only in
    /// case are kept as separate entries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldNotFound`](crate::Error::FieldNotFound) if
    /// `field` is not a column, or a load error.
    pub fn find_all_values(&self, field: &str) -> Result<Vec<String>> {
        let dataset = self.dataset()?;
        let idx = dataset.header().require(field)?;

        let mut seen = HashSet::new();
        let values: Vec<String> = dataset
            .records()
            .iter()
            .map(|r| r.values()[idx].as_str())
            .filter(|v| seen.insert(*v))
            .map(str::to_string)
            .collect();

        debug!(field, distinct = values.len(), "find_all_values");
        Ok(values)
    }

    /// Every record, in source order.
    ///
    /// # Errors
    ///
    /// Returns a load error if the dataset cannot be loaded.
    pub fn find_all(&self) -> Result<&[Record]> {
        Ok(self.dataset()?.records())
    }

    /// Records whose `column` value contains `value`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldNotFound`](crate::Error::FieldNotFound) if
    /// `column` is not a column, or a load error.
    pub fn find_by_column_and_value(&self, column: &str, value: &str) -> Result<Vec<&Record>> {
        let dataset = self.dataset()?;
        let idx = dataset.header().require(column)?;
        let term = value.to_lowercase();

        let matches: Vec<&Record> = dataset
            .records()
            .iter()
            .filter(|r| r.value_contains_at(idx, &term))
            .collect();

        debug!(column, value, matches = matches.len(), "find_by_column_and_value");
        Ok(matches)
    }

    /// Records with any value containing `term`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns a load error if the dataset cannot be loaded.
    pub fn find_by_value(&self, term: &str) -> Result<Vec<&Record>> {
        let dataset = self.dataset()?;
        let folded = term.to_lowercase();

        let matches: Vec<&Record> = dataset
            .records()
            .iter()
            .filter(|r| r.any_value_contains(&folded))
            .collect();

        debug!(term, matches = matches.len(), "find_by_value");
        Ok(matches)
    }

    /// The loaded dataset, loading it first if needed.
    fn dataset(&self) -> Result<&Dataset> {
        if let Some(dataset) = self.dataset.get() {
            return Ok(dataset);
        }

        // Guards no data, so poisoning is ignored.
        let _guard = self
            .load_guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(dataset) = self.dataset.get() {
            debug!(source = %self.source, "dataset already loaded");
            return Ok(dataset);
        }

        let dataset = match self.source.read() {
            Ok(dataset) => dataset,
            Err(e) => {
                warn!(source = %self.source, error = %e, "failed to load job data");
                return Err(e.into());
            }
        };

        info!(
            source = %self.source,
            rows = dataset.records().len(),
            columns = dataset.header().len(),
            "loaded job data"
        );

        Ok(self.dataset.get_or_init(|| dataset))
    }
}
