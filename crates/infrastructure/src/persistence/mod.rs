//! Persistence module
//!
//! Read-only CSV storage for the historical observation table.

mod csv_record_store;
mod error;

pub use csv_record_store::CsvRecordStore;
pub use error::RecordStoreError;
