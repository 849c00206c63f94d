//! On-disk output for scan runs: the aggregate profile file with resume
//! bookkeeping, and the flat hotels CSV export.

pub mod aggregate;
pub mod error;
pub mod export;

pub use aggregate::{read_profiles, AggregateFormat, AggregateStore};
pub use error::StoreError;
pub use export::{export_hotels_csv, write_hotels_csv, HOTELS_CSV_HEADER};
