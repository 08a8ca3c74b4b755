/// Arrow schema definitions for fingerling distribution data.
pub mod distribution {
    use arrow::datatypes::{DataType, Field, Schema};

    pub const DATE: &str = "date";
    pub const SPECIES: &str = "species";
    pub const FINGERLINGS_COUNT: &str = "fingerlings_count";
    pub const PROVINCE: &str = "province";
    pub const CITY: &str = "city";
    pub const BARANGAY: &str = "barangay";
    pub const ACTUAL_HARVEST_WEIGHT_KG: &str = "actual_harvest_weight_kg";
    pub const ACTUAL_HARVEST_DATE: &str = "actual_harvest_date";

    /// Schema for distribution records, one row per release.
    pub fn distribution_schema() -> Schema {
        Schema::new(vec![
            Field::new(DATE, DataType::Date32, false),
            Field::new(SPECIES, DataType::Utf8, false),
            Field::new(FINGERLINGS_COUNT, DataType::UInt64, false),
            Field::new(PROVINCE, DataType::Utf8, true),
            Field::new(CITY, DataType::Utf8, true),
            Field::new(BARANGAY, DataType::Utf8, true),
            Field::new(ACTUAL_HARVEST_WEIGHT_KG, DataType::Float64, true),
            Field::new(ACTUAL_HARVEST_DATE, DataType::Date32, true),
        ])
    }
}
