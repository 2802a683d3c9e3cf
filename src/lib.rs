//! # Regboard
//!
//! Registration Dashboard - loads a spreadsheet of user registrations and
//! serves an interactive page with two charts: registrations per day
//! stacked by city, and the share of registrations per city. The page can
//! be filtered by city, date range and colour theme.
//!
//! ## Modules
//!
//! - [`data`]: Workbook and CSV loading into an immutable `Table`
//! - [`dashboard`]: Colour assignment, filter selection and aggregation
//! - [`charts`]: Plotly figure construction and themes
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML/environment configuration
//! - [`logging`]: Tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use regboard::dashboard::{Dataset, FilterSelection};
//! use regboard::data::TableLoader;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = Dataset::load(&TableLoader::new(), Path::new("users.xlsx"))?;
//!
//!     let selection = FilterSelection::full_range(dataset.table()).cities(["NY"]);
//!     let (aggregates, charts) = dataset.render(&selection);
//!
//!     println!("{} registrations in NY", aggregates.filtered_rows);
//!     println!("{}", serde_json::to_string(&charts.trend)?);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod logging;

// Re-export top-level types for convenience
pub use data::{LoadError, LoadReport, LoadResult, Table, TableLoader, UserRecord};

pub use dashboard::{
    aggregate, Aggregates, ColorAssignment, Dataset, DistributionSlice, FilterSelection,
    TrendPoint, PALETTE,
};

pub use charts::{ChartSet, Figure, Theme};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{Config, ConfigError, DataConfig, LoggingConfig, ServerConfig};
