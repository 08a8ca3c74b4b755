use fingerlings_core::SpeciesError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ForecastError {
    #[error("unsupported species: {0:?}")]
    UnsupportedSpecies(String),
}

impl From<SpeciesError> for ForecastError {
    fn from(err: SpeciesError) -> Self {
        match err {
            SpeciesError::Unsupported(name) => ForecastError::UnsupportedSpecies(name),
        }
    }
}
