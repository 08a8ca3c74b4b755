//! Harvest forecast engine.
//!
//! Turns distribution records into a month-by-month projection of expected
//! harvest weight: records are bucketed by calendar month, every month in the
//! requested range is emitted (zero-filled where nothing was distributed), and
//! each point carries a fixed ±10% confidence band and any recorded actual
//! harvest for comparison.
//!
//! The engine is a pure function of its inputs. It performs no I/O and holds
//! no state between calls.

mod error;

pub mod aggregate;
pub mod engine;
pub mod month;
pub mod projection;

pub use aggregate::{MonthBucket, aggregate};
pub use engine::{ForecastRequest, forecast};
pub use error::ForecastError;
pub use month::{month_key, month_range, months_spanned};
pub use projection::{
    ForecastMetadata, ForecastResult, ForecastTotals, InputFeatures, PredictionPoint, round1,
};
