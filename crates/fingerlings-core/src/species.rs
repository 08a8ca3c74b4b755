//! Species enumeration and fixed growth coefficients.
//!
//! The coefficient table is closed: every supported species maps to exactly
//! one `{survival_rate, avg_body_weight_kg}` pair. Species names arriving from
//! requests or stored records are normalised before lookup so that spelling
//! variants ("Tilapia", " nile-tilapia ", "MILKFISH") resolve identically.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeciesError {
    #[error("unsupported species: {0:?}")]
    Unsupported(String),
}

/// Biological coefficients applied per stocked fingerling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthCoefficients {
    /// Fraction of stocked fingerlings expected to reach harvest, in (0, 1].
    pub survival_rate: f64,
    /// Expected individual weight at harvest, in kilograms.
    pub avg_body_weight_kg: f64,
}

impl GrowthCoefficients {
    /// Expected harvest weight contributed by a single stocked fingerling.
    pub fn yield_per_fingerling(&self) -> f64 {
        self.survival_rate * self.avg_body_weight_kg
    }
}

const TILAPIA: GrowthCoefficients = GrowthCoefficients {
    survival_rate: 0.78,
    avg_body_weight_kg: 0.3,
};

const BANGUS: GrowthCoefficients = GrowthCoefficients {
    survival_rate: 0.85,
    avg_body_weight_kg: 0.4,
};

/// Species tracked by the distribution programme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Species {
    Tilapia,
    /// Milkfish.
    Bangus,
}

impl Species {
    pub const ALL: [Species; 2] = [Species::Tilapia, Species::Bangus];

    /// Resolve a free-form species name. Fails fast on anything outside the
    /// fixed enumeration.
    pub fn resolve(name: &str) -> Result<Self, SpeciesError> {
        let key = normalize_species(name);
        let species = Self::ALL
            .into_iter()
            .find(|s| s.aliases().contains(&key.as_str()))
            .ok_or_else(|| SpeciesError::Unsupported(name.to_string()))?;
        tracing::debug!(input = name, species = %species, "resolved species");
        Ok(species)
    }

    pub fn coefficients(&self) -> GrowthCoefficients {
        match self {
            Species::Tilapia => TILAPIA,
            Species::Bangus => BANGUS,
        }
    }

    /// Stable lowercase key used in storage.
    pub fn key(&self) -> &'static str {
        match self {
            Species::Tilapia => "tilapia",
            Species::Bangus => "bangus",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Species::Tilapia => "Tilapia",
            Species::Bangus => "Bangus (Milkfish)",
        }
    }

    /// Normalised spellings accepted by [`Species::resolve`].
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Species::Tilapia => &["tilapia", "nile tilapia", "oreochromis niloticus"],
            Species::Bangus => &["bangus", "milkfish", "chanos chanos"],
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Species {
    type Err = SpeciesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}

impl TryFrom<String> for Species {
    type Error = SpeciesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::resolve(&value)
    }
}

impl From<Species> for String {
    fn from(species: Species) -> Self {
        species.key().to_string()
    }
}

/// Normalise a species name for alias lookup.
///
/// Lowercases, treats `-` and `_` as spaces, and collapses runs of whitespace:
/// `"  Nile_Tilapia "` → `"nile tilapia"`.
pub fn normalize_species(s: &str) -> String {
    s.to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilapia_coefficients() {
        let c = Species::Tilapia.coefficients();
        assert_eq!(c.survival_rate, 0.78);
        assert_eq!(c.avg_body_weight_kg, 0.3);
    }

    #[test]
    fn coefficients_are_in_range() {
        for species in Species::ALL {
            let c = species.coefficients();
            assert!(c.survival_rate > 0.0 && c.survival_rate <= 1.0);
            assert!(c.avg_body_weight_kg > 0.0);
        }
    }

    #[test]
    fn aliases_resolve_to_same_species() {
        assert_eq!(Species::resolve("Tilapia").unwrap(), Species::Tilapia);
        assert_eq!(Species::resolve("  nile-tilapia ").unwrap(), Species::Tilapia);
        assert_eq!(Species::resolve("BANGUS").unwrap(), Species::Bangus);
        assert_eq!(Species::resolve("Milkfish").unwrap(), Species::Bangus);
        assert_eq!(
            Species::resolve("bangus").unwrap().coefficients(),
            Species::resolve("milkfish").unwrap().coefficients(),
        );
    }

    #[test]
    fn unknown_species_rejected() {
        let err = Species::resolve("catfish").unwrap_err();
        assert_eq!(err, SpeciesError::Unsupported("catfish".into()));
        assert!(Species::resolve("").is_err());
    }

    #[test]
    fn every_key_is_an_alias() {
        for species in Species::ALL {
            assert_eq!(Species::resolve(species.key()).unwrap(), species);
        }
    }

    #[test]
    fn normalisation() {
        assert_eq!(normalize_species("  Nile_Tilapia "), "nile tilapia");
        assert_eq!(normalize_species("chanos   chanos"), "chanos chanos");
    }

    #[test]
    fn serde_uses_key_and_accepts_aliases() {
        assert_eq!(serde_json::to_string(&Species::Bangus).unwrap(), "\"bangus\"");
        let parsed: Species = serde_json::from_str("\"Milkfish\"").unwrap();
        assert_eq!(parsed, Species::Bangus);
        assert!(serde_json::from_str::<Species>("\"carp\"").is_err());
    }
}
