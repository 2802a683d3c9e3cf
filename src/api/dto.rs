//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use crate::charts::{Figure, Theme};
use crate::dashboard::FilterSelection;
use crate::data::{LoadReport, Table};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================
// CHART DTOs
// ============================================

/// Current control values sent by the dashboard page
///
/// Every field is optional; missing or unusable values fall back to
/// the defaults (all cities, observed date range, light theme).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartsRequest {
    /// Selected cities (empty = all)
    #[serde(default)]
    pub cities: Vec<String>,
    /// First day included (YYYY-MM-DD)
    #[serde(default)]
    pub start: Option<String>,
    /// Last day included (YYYY-MM-DD)
    #[serde(default)]
    pub end: Option<String>,
    /// "light" or "dark"
    #[serde(default)]
    pub theme: Option<String>,
}

impl ChartsRequest {
    /// Resolve the raw control values against the table
    pub fn to_selection(&self, table: &Table) -> FilterSelection {
        FilterSelection::from_controls(
            table,
            &self.cities,
            self.start.as_deref(),
            self.end.as_deref(),
            self.theme.as_deref(),
        )
    }
}

/// Both chart figures plus render metadata
#[derive(Debug, Serialize)]
pub struct ChartsResponse {
    /// Stacked bar chart of registrations per day
    pub trend: Figure,
    /// Donut chart of registrations per city
    pub distribution: Figure,
    pub meta: ChartsMeta,
}

/// What the charts were rendered from
#[derive(Debug, Serialize)]
pub struct ChartsMeta {
    /// Rows that passed the filters
    pub filtered_rows: usize,
    /// Effective range after defaults were applied (absent when the
    /// table is empty and there is no observed range to default to)
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// Effective city filter (empty = all)
    pub cities: Vec<String>,
    pub theme: Theme,
    /// Render time in milliseconds
    pub execution_time_ms: u64,
}

// ============================================
// OPTIONS DTOs
// ============================================

/// Values for populating the dashboard controls
#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    /// Cities in first-seen order
    pub cities: Vec<CityOption>,
    /// Earliest registration date (absent for an empty table)
    pub min_date: Option<NaiveDate>,
    /// Latest registration date (absent for an empty table)
    pub max_date: Option<NaiveDate>,
    pub themes: Vec<Theme>,
    pub default_theme: Theme,
    /// Rows in the loaded table
    pub total_records: usize,
    /// Row accounting from the load
    pub load: LoadReport,
}

/// One entry of the city dropdown
#[derive(Debug, Serialize)]
pub struct CityOption {
    pub label: String,
    pub value: String,
    /// Colour the city is drawn with in both charts
    pub color: String,
}

// ============================================
// EXPORT DTOs
// ============================================

/// Export request: the chart selection plus an output format
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportRequest {
    #[serde(flatten)]
    pub selection: ChartsRequest,
    /// Format: csv, json
    #[serde(default = "default_export_format")]
    pub format: String,
}

fn default_export_format() -> String {
    "csv".to_string()
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded
    pub status: String,
    /// Rows in the loaded table
    pub records: usize,
    /// Distinct cities
    pub cities: usize,
    /// Rows dropped during load
    pub rows_dropped: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charts_request_all_optional() {
        let req: ChartsRequest = serde_json::from_str("{}").unwrap();
        assert!(req.cities.is_empty());
        assert!(req.start.is_none());
        assert!(req.theme.is_none());
    }

    #[test]
    fn test_export_request_flattens_selection() {
        let req: ExportRequest =
            serde_json::from_str(r#"{"cities": ["NY"], "theme": "dark"}"#).unwrap();

        assert_eq!(req.selection.cities, vec!["NY"]);
        assert_eq!(req.format, "csv");
    }
}
