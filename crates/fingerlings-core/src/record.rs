//! Distribution records as produced by the record store.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::location::Location;
use crate::species::Species;

/// One release of fingerlings to a beneficiary.
///
/// Read-only to the forecast engine. `actual_harvest_weight_kg` is present
/// only once a harvest has been recorded against this distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionRecord {
    pub date: NaiveDate,
    pub species: Species,
    pub fingerlings_count: u64,
    #[serde(flatten)]
    pub location: Location,
    #[serde(default, deserialize_with = "non_negative_weight")]
    pub actual_harvest_weight_kg: Option<f64>,
    #[serde(default)]
    pub actual_harvest_date: Option<NaiveDate>,
}

impl DistributionRecord {
    pub fn new(date: NaiveDate, species: Species, fingerlings_count: u64) -> Self {
        Self {
            date,
            species,
            fingerlings_count,
            location: Location::default(),
            actual_harvest_weight_kg: None,
            actual_harvest_date: None,
        }
    }

    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Attach a recorded harvest. Negative weights are clamped to zero.
    pub fn harvested(mut self, weight_kg: f64, on: Option<NaiveDate>) -> Self {
        self.actual_harvest_weight_kg = Some(weight_kg.max(0.0));
        self.actual_harvest_date = on;
        self
    }

    pub fn has_actual_harvest(&self) -> bool {
        self.actual_harvest_weight_kg.is_some()
    }
}

/// Negative weights are clamped to zero, matching [`DistributionRecord::harvested`].
fn non_negative_weight<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let weight = Option::<f64>::deserialize(deserializer)?;
    Ok(weight.map(|w| w.max(0.0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn json_shape_is_flat() {
        let rec = DistributionRecord::new(date(2024, 3, 2), Species::Tilapia, 1500)
            .at(Location::new("Pangasinan", "Dagupan", "Pantal"))
            .harvested(480.5, Some(date(2024, 9, 1)));
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["date"], "2024-03-02");
        assert_eq!(json["species"], "tilapia");
        assert_eq!(json["province"], "Pangasinan");
        assert_eq!(json["actual_harvest_date"], "2024-09-01");
    }

    #[test]
    fn harvest_fields_default_to_none() {
        let json = r#"{
            "date": "2024-01-05", "species": "Bangus", "fingerlings_count": 10,
            "province": "Iloilo", "city": "Oton", "barangay": "Poblacion"
        }"#;
        let rec: DistributionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.species, Species::Bangus);
        assert!(!rec.has_actual_harvest());
        assert_eq!(rec.actual_harvest_date, None);
    }

    #[test]
    fn negative_json_weight_clamped() {
        let json = r#"{
            "date": "2024-03-01", "species": "tilapia", "fingerlings_count": 10,
            "province": "Iloilo", "city": "Oton", "barangay": "Poblacion",
            "actual_harvest_weight_kg": -40.0
        }"#;
        let rec: DistributionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.actual_harvest_weight_kg, Some(0.0));
    }

    #[test]
    fn location_fields_are_optional() {
        let json = r#"{ "date": "2024-03-01", "species": "bangus", "fingerlings_count": 5 }"#;
        let rec: DistributionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.location, Location::default());

        let json = r#"{ "date": "2024-03-01", "species": "bangus", "fingerlings_count": 5,
                        "province": "Iloilo" }"#;
        let rec: DistributionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.location.province, "Iloilo");
        assert_eq!(rec.location.city, "");
    }

    #[test]
    fn negative_harvest_clamped() {
        let rec = DistributionRecord::new(date(2024, 1, 1), Species::Bangus, 1).harvested(-3.0, None);
        assert_eq!(rec.actual_harvest_weight_kg, Some(0.0));
    }
}
