//! City distribution chart
//!
//! Donut chart with one slice per city. Slice labels are suppressed; city,
//! share and raw count appear on hover only.

use super::figure::{Figure, Layout, Marker, PieTrace, Trace};
use crate::dashboard::{Aggregates, ColorAssignment};

pub const DISTRIBUTION_TITLE: &str = "User Distribution by City";

const HOLE: f64 = 0.4;

const HOVER: &str = "%{label}<br>%{percent}<br>%{value} users<extra></extra>";

/// Build the donut chart of registrations per city
pub fn distribution_figure(aggregates: &Aggregates, colors: &ColorAssignment) -> Figure {
    let mut layout = Layout::titled(DISTRIBUTION_TITLE);
    if aggregates.is_empty() {
        layout.note(super::EMPTY_NOTE);
    }

    let labels: Vec<String> = aggregates.cities().map(str::to_string).collect();
    let slice_colors: Vec<String> = labels
        .iter()
        .map(|city| colors.color_or_default(city).to_string())
        .collect();
    let values: Vec<usize> = aggregates.distribution.iter().map(|s| s.count).collect();

    let pie = PieTrace {
        labels,
        values,
        marker: Marker {
            color: None,
            colors: Some(slice_colors),
        },
        hole: HOLE,
        textinfo: "none".to_string(),
        hovertemplate: HOVER.to_string(),
        sort: false,
        direction: "clockwise".to_string(),
    };

    Figure {
        data: vec![Trace::Pie(pie)],
        layout,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{aggregate, FilterSelection, PALETTE};
    use crate::data::{Table, UserRecord};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_slices_follow_distribution() {
        let table = Table::new(vec![
            UserRecord::new(date(2024, 1, 1), "NY"),
            UserRecord::new(date(2024, 1, 1), "LA"),
            UserRecord::new(date(2024, 1, 2), "NY"),
        ]);
        let colors = ColorAssignment::assign(table.cities());
        let aggregates = aggregate(&table, &FilterSelection::full_range(&table));

        let figure = distribution_figure(&aggregates, &colors);

        let Trace::Pie(pie) = &figure.data[0] else {
            panic!("expected pie trace");
        };
        assert_eq!(pie.labels, vec!["NY", "LA"]);
        assert_eq!(pie.values, vec![2, 1]);
        assert_eq!(pie.textinfo, "none");
        assert!(pie.hole > 0.0);
        assert!(!pie.sort);
        assert_eq!(figure.trace_color("NY"), Some(PALETTE[0]));
        assert!(figure.layout.annotations.is_empty());
    }

    #[test]
    fn test_hover_shows_city_share_and_count() {
        let figure = distribution_figure(&Aggregates::default(), &ColorAssignment::default());
        let Trace::Pie(pie) = &figure.data[0] else {
            panic!("expected pie trace");
        };

        assert!(pie.hovertemplate.contains("%{label}"));
        assert!(pie.hovertemplate.contains("%{percent}"));
        assert!(pie.hovertemplate.contains("%{value}"));
    }

    #[test]
    fn test_empty_renders_blank() {
        let figure = distribution_figure(&Aggregates::default(), &ColorAssignment::default());
        let Trace::Pie(pie) = &figure.data[0] else {
            panic!("expected pie trace");
        };

        assert!(pie.labels.is_empty());
        assert!(pie.values.is_empty());
        assert_eq!(figure.layout.annotations.len(), 1);
    }
}
