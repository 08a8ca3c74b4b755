//! In-memory record store with species, date-range and location predicates.

use std::path::Path;

use chrono::NaiveDate;
use fingerlings_core::{DistributionRecord, LocationFilter, Species};
use tracing::info;

use crate::StoreError;
use crate::io::{read_distributions, read_distributions_json};

/// Predicates applied by a [`RecordStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordQuery {
    pub species: Species,
    /// Inclusive.
    pub date_from: NaiveDate,
    /// Inclusive.
    pub date_to: NaiveDate,
    pub location: LocationFilter,
}

impl RecordQuery {
    pub fn matches(&self, record: &DistributionRecord) -> bool {
        record.species == self.species
            && record.date >= self.date_from
            && record.date <= self.date_to
            && self.location.matches(&record.location)
    }
}

/// Source of distribution records for the forecast engine.
pub trait RecordStore {
    /// Records matching `query`, ordered by distribution date.
    fn distributions(&self, query: &RecordQuery) -> Result<Vec<DistributionRecord>, StoreError>;
}

/// Holds every record in memory and filters on each query.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<DistributionRecord>,
}

impl MemoryStore {
    pub fn new(records: Vec<DistributionRecord>) -> Self {
        Self { records }
    }

    pub fn open_parquet(path: &Path) -> Result<Self, StoreError> {
        Ok(Self::new(read_distributions(path)?))
    }

    pub fn open_json(path: &Path) -> Result<Self, StoreError> {
        Ok(Self::new(read_distributions_json(path)?))
    }

    /// Open a data file, choosing the format from its extension
    /// (`.json` → JSON, anything else → Parquet).
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::open_json(path)
        } else {
            Self::open_parquet(path)
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[DistributionRecord] {
        &self.records
    }
}

impl RecordStore for MemoryStore {
    fn distributions(&self, query: &RecordQuery) -> Result<Vec<DistributionRecord>, StoreError> {
        let mut matched: Vec<DistributionRecord> = self
            .records
            .iter()
            .filter(|r| query.matches(r))
            .cloned()
            .collect();
        matched.sort_by_key(|r| r.date);
        info!(
            species = %query.species,
            from = %query.date_from,
            to = %query.date_to,
            matched = matched.len(),
            total = self.records.len(),
            "queried distributions"
        );
        Ok(matched)
    }
}
