//! Export Routes
//!
//! Download of the aggregated trend behind the bar chart.
//!
//! - POST /api/v1/export - Trend points for a selection as CSV or JSON

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::ExportRequest;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::dashboard::TrendPoint;

/// POST /api/v1/export
///
/// Export the (date, city, count) rows for the given selection.
pub async fn export_trend(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ExportRequest>,
) -> ApiResult<Response> {
    let format = req.format.to_lowercase();
    let (content_type, extension) = match format.as_str() {
        "csv" => ("text/csv", "csv"),
        "json" => ("application/json", "json"),
        other => {
            return Err(ApiError::Validation(format!(
                "Unsupported export format: {} (expected csv or json)",
                other
            )))
        }
    };

    let selection = req.selection.to_selection(state.dataset.table());
    let aggregates = state.dataset.aggregate(&selection);

    let body = match extension {
        "csv" => format_csv(&aggregates.trend)?,
        _ => serde_json::to_vec(&aggregates.trend)
            .map_err(|e| ApiError::Internal(format!("JSON encoding failed: {}", e)))?,
    };

    tracing::info!(
        rows = aggregates.trend.len(),
        format = %extension,
        "Exported registration trend"
    );

    let filename = format!(
        "regboard_trend_{}.{}",
        Utc::now().format("%Y%m%d_%H%M%S"),
        extension
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        Body::from(body),
    )
        .into_response())
}

/// Format trend points as CSV with a `date,city,count` header
fn format_csv(points: &[TrendPoint]) -> ApiResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if points.is_empty() {
        writer.write_record(["date", "city", "count"])?;
    }
    for point in points {
        writer.serialize(point)?;
    }
    writer
        .into_inner()
        .map_err(|e| ApiError::Internal(format!("CSV flush failed: {}", e)))
}
