//! Registration Data
//!
//! - **types**: `UserRecord` and the immutable `Table`
//! - **loader**: Excel workbook and CSV loading with lenient timestamp parsing
//! - **error**: Load error types
//!
//! # Example
//!
//! ```rust,no_run
//! use regboard::data::TableLoader;
//! use std::path::Path;
//!
//! let (table, report) = TableLoader::new()
//!     .load(Path::new("users_with_location.xlsx"))
//!     .expect("data file");
//!
//! println!("{} rows kept, {} dropped", table.len(), report.rows_dropped());
//! ```

pub mod error;
pub mod loader;
pub mod types;

pub use error::{LoadError, LoadResult};
pub use loader::{
    LoadReport, TableLoader, DEFAULT_CITY_COLUMN, DEFAULT_DATE_COLUMN, DEFAULT_TIMESTAMP_FORMATS,
};
pub use types::{Table, UserRecord};
