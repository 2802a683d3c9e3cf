//! Chart Routes
//!
//! Endpoint the dashboard page calls on every control change.
//!
//! - POST /api/v1/charts - Filter, aggregate and build both figures

use axum::{extract::State, Json};
use std::sync::Arc;
use std::time::Instant;

use crate::api::dto::{ChartsMeta, ChartsRequest, ChartsResponse};
use crate::api::state::AppState;

/// POST /api/v1/charts
///
/// A missing or unreadable body is treated as the default selection, so
/// the page always gets figures back.
pub async fn render_charts(
    State(state): State<Arc<AppState>>,
    body: Option<Json<ChartsRequest>>,
) -> Json<ChartsResponse> {
    let started = Instant::now();

    let req = body.map(|Json(req)| req).unwrap_or_default();
    let table = state.dataset.table();
    let selection = req.to_selection(table);
    let has_dates = table.date_bounds().is_some();
    let (aggregates, charts) = state.dataset.render(&selection);

    let execution_time_ms = started.elapsed().as_millis() as u64;

    tracing::debug!(
        filtered_rows = aggregates.filtered_rows,
        cities = selection.cities.len(),
        start = %selection.start,
        end = %selection.end,
        theme = %selection.theme,
        execution_time_ms,
        "Rendered charts"
    );

    Json(ChartsResponse {
        trend: charts.trend,
        distribution: charts.distribution,
        meta: ChartsMeta {
            filtered_rows: aggregates.filtered_rows,
            start: has_dates.then_some(selection.start),
            end: has_dates.then_some(selection.end),
            cities: selection.cities.into_iter().collect(),
            theme: selection.theme,
            execution_time_ms,
        },
    })
}
