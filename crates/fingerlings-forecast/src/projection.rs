//! Gap-filled projection series and its serialized contract.
//!
//! Every month in the requested range gets exactly one [`PredictionPoint`],
//! whether or not any record fell in it. Weight figures are rounded to one
//! decimal, half away from zero. Totals are summed from the raw per-month
//! figures and rounded once.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use fingerlings_core::{GrowthCoefficients, LocationFilter, Species};
use serde::{Deserialize, Serialize};

use crate::aggregate::MonthBucket;
use crate::month::month_range;

pub const CONFIDENCE_LOWER_FACTOR: f64 = 0.90;
pub const CONFIDENCE_UPPER_FACTOR: f64 = 1.10;

/// Round to one decimal place, half away from zero.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Inputs that produced a single point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputFeatures {
    pub total_fingerlings: u64,
    pub distribution_count: u64,
    pub actual_harvest_count: u64,
    pub survival_rate: f64,
    pub avg_body_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionPoint {
    /// First day of the month this point covers.
    pub date: NaiveDate,
    pub predicted_harvest: f64,
    pub actual_harvest: f64,
    pub has_actual_data: bool,
    pub confidence_lower: f64,
    pub confidence_upper: f64,
    pub input_features: InputFeatures,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastTotals {
    pub total_fingerlings: u64,
    pub total_predicted_harvest: f64,
    pub total_actual_harvest: f64,
}

/// Request echo for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastMetadata {
    pub species_display_name: String,
    pub province: String,
    pub city: String,
    pub barangay: String,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub prediction_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub predictions: Vec<PredictionPoint>,
    pub totals: ForecastTotals,
    pub metadata: ForecastMetadata,
}

/// Parameters the assembler echoes back alongside the series.
#[derive(Debug, Clone, Copy)]
pub struct Projection<'a> {
    pub species: Species,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub location: &'a LocationFilter,
}

impl Projection<'_> {
    /// Walk the full month range, filling gaps with zero buckets.
    pub fn assemble(&self, buckets: &BTreeMap<NaiveDate, MonthBucket>) -> ForecastResult {
        let coefficients = self.species.coefficients();
        let empty = MonthBucket::default();

        let mut total_fingerlings = 0u64;
        let mut raw_predicted_sum = 0.0;
        let mut raw_actual_sum = 0.0;
        let mut predictions = Vec::new();

        for month in month_range(self.date_from, self.date_to) {
            let bucket = buckets.get(&month).unwrap_or(&empty);
            let raw_predicted = predicted_kg(bucket, &coefficients);

            total_fingerlings = total_fingerlings.saturating_add(bucket.total_fingerlings);
            raw_predicted_sum += raw_predicted;
            raw_actual_sum += bucket.actual_harvest_total_kg;

            predictions.push(point(month, bucket, raw_predicted, &coefficients));
        }

        ForecastResult {
            totals: ForecastTotals {
                total_fingerlings,
                total_predicted_harvest: round1(raw_predicted_sum),
                total_actual_harvest: round1(raw_actual_sum),
            },
            metadata: ForecastMetadata {
                species_display_name: self.species.display_name().to_string(),
                province: self.location.province_display(),
                city: self.location.city_display(),
                barangay: self.location.barangay_display(),
                date_from: self.date_from,
                date_to: self.date_to,
                prediction_count: predictions.len(),
            },
            predictions,
        }
    }
}

fn predicted_kg(bucket: &MonthBucket, coefficients: &GrowthCoefficients) -> f64 {
    bucket.total_fingerlings as f64 * coefficients.yield_per_fingerling()
}

fn point(
    month: NaiveDate,
    bucket: &MonthBucket,
    raw_predicted: f64,
    coefficients: &GrowthCoefficients,
) -> PredictionPoint {
    PredictionPoint {
        date: month,
        predicted_harvest: round1(raw_predicted),
        actual_harvest: round1(bucket.actual_harvest_total_kg),
        has_actual_data: bucket.has_actual_data(),
        confidence_lower: round1(raw_predicted * CONFIDENCE_LOWER_FACTOR),
        confidence_upper: round1(raw_predicted * CONFIDENCE_UPPER_FACTOR),
        input_features: InputFeatures {
            total_fingerlings: bucket.total_fingerlings,
            distribution_count: bucket.distribution_count,
            actual_harvest_count: bucket.actual_harvest_record_count,
            survival_rate: coefficients.survival_rate,
            avg_body_weight: coefficients.avg_body_weight_kg,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bucket(fingerlings: u64) -> MonthBucket {
        MonthBucket {
            total_fingerlings: fingerlings,
            distribution_count: 1,
            ..MonthBucket::default()
        }
    }

    #[test]
    fn round1_is_half_away_from_zero() {
        assert_eq!(round1(0.25), 0.3);
        assert_eq!(round1(-0.25), -0.3);
        assert_eq!(round1(233.96), 234.0);
        assert_eq!(round1(0.04), 0.0);
    }

    #[test]
    fn missing_months_are_zero_filled() {
        let filter = LocationFilter::default();
        let projection = Projection {
            species: Species::Tilapia,
            date_from: date(2024, 1, 1),
            date_to: date(2024, 4, 30),
            location: &filter,
        };
        let mut buckets = BTreeMap::new();
        buckets.insert(date(2024, 3, 1), bucket(100));

        let result = projection.assemble(&buckets);
        assert_eq!(result.predictions.len(), 4);
        assert_eq!(result.metadata.prediction_count, 4);

        let feb = &result.predictions[1];
        assert_eq!(feb.date, date(2024, 2, 1));
        assert_eq!(feb.predicted_harvest, 0.0);
        assert_eq!(feb.confidence_lower, 0.0);
        assert_eq!(feb.confidence_upper, 0.0);
        assert_eq!(feb.input_features.distribution_count, 0);
        assert!(!feb.has_actual_data);

        // 100 x 0.78 x 0.3 = 23.4
        assert_eq!(result.predictions[2].predicted_harvest, 23.4);
        assert_eq!(result.predictions[2].confidence_lower, 21.1);
        assert_eq!(result.predictions[2].confidence_upper, 25.7);
    }

    #[test]
    fn buckets_outside_range_are_ignored() {
        let filter = LocationFilter::default();
        let projection = Projection {
            species: Species::Bangus,
            date_from: date(2024, 2, 1),
            date_to: date(2024, 2, 29),
            location: &filter,
        };
        let mut buckets = BTreeMap::new();
        buckets.insert(date(2024, 1, 1), bucket(999));
        buckets.insert(date(2024, 2, 1), bucket(10));

        let result = projection.assemble(&buckets);
        assert_eq!(result.predictions.len(), 1);
        assert_eq!(result.totals.total_fingerlings, 10);
        // 10 x 0.85 x 0.4 = 3.4
        assert_eq!(result.totals.total_predicted_harvest, 3.4);
    }

    #[test]
    fn totals_round_the_raw_sum_once() {
        let coefficients = Species::Tilapia.coefficients();
        let filter = LocationFilter::default();
        let projection = Projection {
            species: Species::Tilapia,
            date_from: date(2024, 1, 1),
            date_to: date(2024, 3, 1),
            location: &filter,
        };
        let mut buckets = BTreeMap::new();
        for m in 1..=3 {
            buckets.insert(date(2024, m, 1), bucket(1));
        }
        let result = projection.assemble(&buckets);

        let raw_each = predicted_kg(&bucket(1), &coefficients);
        assert_eq!(result.totals.total_predicted_harvest, round1(raw_each * 3.0));
        // 0.234 per month: each point rounds to 0.2, the total to 0.7 rather than 0.6.
        assert!(result.predictions.iter().all(|p| p.predicted_harvest == 0.2));
        assert_eq!(result.totals.total_predicted_harvest, 0.7);
    }

    #[test]
    fn total_fingerlings_saturate_across_months() {
        let filter = LocationFilter::default();
        let projection = Projection {
            species: Species::Tilapia,
            date_from: date(2024, 1, 1),
            date_to: date(2024, 2, 29),
            location: &filter,
        };
        let half = u64::MAX / 2 + 1;
        let mut buckets = BTreeMap::new();
        buckets.insert(date(2024, 1, 1), bucket(half));
        buckets.insert(date(2024, 2, 1), bucket(half));

        let result = projection.assemble(&buckets);
        assert_eq!(result.totals.total_fingerlings, u64::MAX);
        assert!(result.totals.total_predicted_harvest > 0.0);
    }

    #[test]
    fn metadata_echoes_display_forms() {
        let filter = LocationFilter::from_raw(Some("Pangasinan"), Some("All Cities"), None);
        let projection = Projection {
            species: Species::Bangus,
            date_from: date(2024, 1, 1),
            date_to: date(2024, 1, 31),
            location: &filter,
        };
        let meta = projection.assemble(&BTreeMap::new()).metadata;
        assert_eq!(meta.species_display_name, "Bangus (Milkfish)");
        assert_eq!(meta.province, "Pangasinan");
        assert_eq!(meta.city, "All Cities");
        assert_eq!(meta.barangay, "All Barangays");
    }
}
