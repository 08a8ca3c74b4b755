//! Record store: the upstream source of distribution records for the forecast
//! engine. Records are loaded from Parquet or JSON and filtered in memory.

mod error;
pub use error::StoreError;

mod io;
mod memory;

pub use io::{read_distributions, read_distributions_json, write_distributions};
pub use memory::{MemoryStore, RecordQuery, RecordStore};
