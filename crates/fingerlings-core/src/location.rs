//! Province / city / barangay hierarchy and the filters applied over it.
//!
//! Request filters arrive as free-form strings from a form: a blank value or a
//! sentinel such as `"all"`, `"All Cities"` or `"All Barangays"` means no
//! filter at that level. Filters are normalised once, on construction.

use serde::{Deserialize, Serialize};

/// Where a distribution took place. Missing levels deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub province: String,
    pub city: String,
    pub barangay: String,
}

impl Location {
    pub fn new(province: &str, city: &str, barangay: &str) -> Self {
        Self {
            province: province.to_string(),
            city: city.to_string(),
            barangay: barangay.to_string(),
        }
    }
}

const SENTINELS: &[&str] = &[
    "all",
    "any",
    "all provinces",
    "all cities",
    "all municipalities",
    "all barangays",
];

/// Optional predicate at each level of the hierarchy. `None` matches anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationFilter {
    pub province: Option<String>,
    pub city: Option<String>,
    pub barangay: Option<String>,
}

impl LocationFilter {
    /// Build a filter from raw request values, dropping blanks and sentinels.
    pub fn from_raw(province: Option<&str>, city: Option<&str>, barangay: Option<&str>) -> Self {
        Self {
            province: normalize_level(province),
            city: normalize_level(city),
            barangay: normalize_level(barangay),
        }
    }

    /// Case-insensitive (Unicode), whitespace-trimmed match at every constrained level.
    pub fn matches(&self, location: &Location) -> bool {
        level_matches(self.province.as_deref(), &location.province)
            && level_matches(self.city.as_deref(), &location.city)
            && level_matches(self.barangay.as_deref(), &location.barangay)
    }

    pub fn province_display(&self) -> String {
        display_level(self.province.as_deref(), "All Provinces")
    }

    pub fn city_display(&self) -> String {
        display_level(self.city.as_deref(), "All Cities")
    }

    pub fn barangay_display(&self) -> String {
        display_level(self.barangay.as_deref(), "All Barangays")
    }
}

fn normalize_level(raw: Option<&str>) -> Option<String> {
    let value = raw?.trim();
    if value.is_empty() || SENTINELS.contains(&value.to_lowercase().as_str()) {
        return None;
    }
    Some(value.to_string())
}

fn level_matches(filter: Option<&str>, value: &str) -> bool {
    filter.is_none_or(|f| f.to_lowercase() == value.trim().to_lowercase())
}

fn display_level(value: Option<&str>, all: &str) -> String {
    value.unwrap_or(all).to_string()
}
