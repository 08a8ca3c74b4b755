//! Core types shared across the workspace: species and growth coefficients,
//! the location hierarchy, distribution records, and their Arrow schema.

pub mod location;
pub mod record;
pub mod schema;
pub mod species;

pub use location::{Location, LocationFilter};
pub use record::DistributionRecord;
pub use schema::distribution;
pub use species::{GrowthCoefficients, Species, SpeciesError, normalize_species};
