//! Registration trend chart
//!
//! Stacked bars: one trace per city, x = day, y = registrations. The x-axis
//! is categorical so every represented day gets one evenly spaced tick,
//! regardless of gaps between days.

use super::figure::{Axis, BarTrace, Figure, Layout, Marker, Trace};
use crate::dashboard::{Aggregates, ColorAssignment};
use std::collections::HashMap;

pub const TREND_TITLE: &str = "User Creation Trends by City";

const DATE_FORMAT: &str = "%Y-%m-%d";

const HOVER: &str = "Date: %{x}<br>City: %{fullData.name}<br>Number of Users: %{y}<extra></extra>";

/// Build the stacked bar chart of registrations over time
pub fn trend_figure(aggregates: &Aggregates, colors: &ColorAssignment) -> Figure {
    let categories: Vec<String> = aggregates
        .dates()
        .iter()
        .map(|d| d.format(DATE_FORMAT).to_string())
        .collect();

    let mut layout = Layout::titled(TREND_TITLE);
    layout.barmode = Some("stack".to_string());
    layout.xaxis = Some(Axis {
        axis_type: Some("category".to_string()),
        tickangle: Some(-45),
        categoryorder: Some("array".to_string()),
        categoryarray: Some(categories),
        ..Axis::titled("Date")
    });
    layout.yaxis = Some(Axis::titled("Number of Users"));

    if aggregates.is_empty() {
        layout.note(super::EMPTY_NOTE);
        return Figure::new(layout);
    }

    // One trace per city, in first-seen order
    let mut traces: Vec<BarTrace> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for city in aggregates.cities() {
        positions.insert(city, traces.len());
        traces.push(BarTrace {
            name: city.to_string(),
            x: Vec::new(),
            y: Vec::new(),
            marker: Marker {
                color: Some(colors.color_or_default(city).to_string()),
                colors: None,
            },
            hovertemplate: HOVER.to_string(),
        });
    }

    for point in &aggregates.trend {
        if let Some(&idx) = positions.get(point.city.as_str()) {
            traces[idx].x.push(point.date.format(DATE_FORMAT).to_string());
            traces[idx].y.push(point.count);
        }
    }

    Figure {
        data: traces.into_iter().map(Trace::Bar).collect(),
        layout,
    }
}
