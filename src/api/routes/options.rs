//! Options Route
//!
//! - GET /api/v1/options - Values for the dashboard controls

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{CityOption, OptionsResponse};
use crate::api::state::AppState;
use crate::charts::Theme;

/// GET /api/v1/options
///
/// Cities with their colours, observed date bounds and available themes.
pub async fn get_options(State(state): State<Arc<AppState>>) -> Json<OptionsResponse> {
    let dataset = &state.dataset;
    let table = dataset.table();

    let cities = table
        .cities()
        .iter()
        .map(|city| CityOption {
            label: city.clone(),
            value: city.clone(),
            color: dataset.colors().color_or_default(city).to_string(),
        })
        .collect();

    let bounds = table.date_bounds();

    Json(OptionsResponse {
        cities,
        min_date: bounds.map(|(min, _)| min),
        max_date: bounds.map(|(_, max)| max),
        themes: Theme::all().to_vec(),
        default_theme: Theme::default(),
        total_records: table.len(),
        load: dataset.report().clone(),
    })
}
