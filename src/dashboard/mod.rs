//! Dashboard Core
//!
//! - **colors**: Deterministic city → colour mapping
//! - **filter**: The per-render `FilterSelection`
//! - **aggregate**: Filtering and group/count into chart inputs
//!
//! `Dataset` bundles the loaded table with its colour assignment. It is
//! built once at startup and only ever read afterwards, so it can be
//! shared between any number of concurrent requests without locking.
//!
//! ```text
//! control change → FilterSelection → aggregate() → ChartSet (bar + pie)
//! ```

pub mod aggregate;
pub mod colors;
pub mod filter;

pub use aggregate::{aggregate, Aggregates, DistributionSlice, TrendPoint};
pub use colors::{ColorAssignment, PALETTE};
pub use filter::FilterSelection;

use crate::charts::ChartSet;
use crate::data::{LoadReport, LoadResult, Table, TableLoader};
use std::path::Path;

/// Immutable data context for the dashboard
#[derive(Debug, Clone)]
pub struct Dataset {
    table: Table,
    colors: ColorAssignment,
    report: LoadReport,
}

impl Dataset {
    /// Wrap a loaded table, assigning colours in first-seen city order
    pub fn new(table: Table, report: LoadReport) -> Self {
        let colors = ColorAssignment::assign(table.cities());
        Self {
            table,
            colors,
            report,
        }
    }

    /// Load the table from a file and build the context
    pub fn load(loader: &TableLoader, path: &Path) -> LoadResult<Self> {
        let (table, report) = loader.load(path)?;
        Ok(Self::new(table, report))
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn colors(&self) -> &ColorAssignment {
        &self.colors
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Aggregate for a selection without building figures
    pub fn aggregate(&self, selection: &FilterSelection) -> Aggregates {
        aggregate(&self.table, selection)
    }

    /// Aggregate and build both chart figures for a selection
    pub fn render(&self, selection: &FilterSelection) -> (Aggregates, ChartSet) {
        let aggregates = self.aggregate(selection);
        let charts = ChartSet::build(&aggregates, &self.colors, selection.theme);
        (aggregates, charts)
    }
}

impl From<Table> for Dataset {
    fn from(table: Table) -> Self {
        let report = LoadReport {
            rows_read: table.len(),
            rows_kept: table.len(),
            ..LoadReport::default()
        };
        Self::new(table, report)
    }
}
