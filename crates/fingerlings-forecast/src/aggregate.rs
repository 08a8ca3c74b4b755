//! Single-pass fold of distribution records into per-month accumulators.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use fingerlings_core::DistributionRecord;

use crate::month::month_key;

/// Accumulated totals for one calendar month.
///
/// Fingerling totals saturate at `u64::MAX` rather than wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonthBucket {
    pub total_fingerlings: u64,
    pub distribution_count: u64,
    pub actual_harvest_total_kg: f64,
    pub actual_harvest_record_count: u64,
}

impl MonthBucket {
    fn add(&mut self, record: &DistributionRecord) {
        self.total_fingerlings = self.total_fingerlings.saturating_add(record.fingerlings_count);
        self.distribution_count += 1;
        if let Some(weight) = record.actual_harvest_weight_kg {
            self.actual_harvest_total_kg += weight;
            self.actual_harvest_record_count += 1;
        }
    }

    pub fn has_actual_data(&self) -> bool {
        self.actual_harvest_record_count > 0
    }
}

/// Fold records into a sparse map keyed by first-of-month.
///
/// Zero-fingerling records still count as distributions.
pub fn aggregate<'a, I>(records: I) -> BTreeMap<NaiveDate, MonthBucket>
where
    I: IntoIterator<Item = &'a DistributionRecord>,
{
    let mut buckets: BTreeMap<NaiveDate, MonthBucket> = BTreeMap::new();
    for record in records {
        buckets.entry(month_key(record.date)).or_default().add(record);
    }
    buckets
}
