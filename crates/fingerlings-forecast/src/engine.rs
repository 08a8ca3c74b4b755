//! Request entry point: resolve species, aggregate, assemble.

use chrono::NaiveDate;
use fingerlings_core::{DistributionRecord, LocationFilter, Species};
use tracing::debug;

use crate::ForecastError;
use crate::aggregate::aggregate;
use crate::projection::{ForecastResult, Projection};

/// Parameters for one forecast.
///
/// `location` is echoed back in the result; the records passed alongside are
/// expected to be filtered by it already.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRequest {
    pub species: String,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub location: LocationFilter,
}

impl ForecastRequest {
    pub fn new(species: impl Into<String>, date_from: NaiveDate, date_to: NaiveDate) -> Self {
        Self {
            species: species.into(),
            date_from,
            date_to,
            location: LocationFilter::default(),
        }
    }

    pub fn with_location(mut self, location: LocationFilter) -> Self {
        self.location = location;
        self
    }
}

/// Produce the monthly harvest projection for `request` over `records`.
///
/// The only failure is an unsupported species, reported before any record is
/// read. An inverted date range yields an empty series with zeroed totals.
pub fn forecast<'a, I>(request: &ForecastRequest, records: I) -> Result<ForecastResult, ForecastError>
where
    I: IntoIterator<Item = &'a DistributionRecord>,
{
    let species = Species::resolve(&request.species)?;

    let buckets = aggregate(records);
    let result = Projection {
        species,
        date_from: request.date_from,
        date_to: request.date_to,
        location: &request.location,
    }
    .assemble(&buckets);

    debug!(
        species = %species,
        populated_months = buckets.len(),
        predictions = result.predictions.len(),
        "assembled forecast"
    );
    Ok(result)
}
