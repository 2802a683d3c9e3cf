//! Chart Construction
//!
//! Turns aggregates into Plotly.js figures:
//!
//! - **figure**: Typed Plotly figure model
//! - **bar**: Stacked bar chart of registrations per day and city
//! - **pie**: Donut chart of registrations per city
//! - **theme**: Light/dark visual templates
//!
//! `ChartSet` always holds both figures and re-themes them together, so the
//! two charts can never disagree on theme.

pub mod bar;
pub mod figure;
pub mod pie;
pub mod theme;

pub use bar::trend_figure;
pub use figure::{Figure, Trace};
pub use pie::distribution_figure;
pub use theme::{Theme, ThemeStyle};

use crate::dashboard::{Aggregates, ColorAssignment};
use serde::Serialize;

/// Shown over a chart when the filters leave no rows
pub const EMPTY_NOTE: &str = "No registrations match the current filters";

/// Both dashboard charts for one render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSet {
    pub trend: Figure,
    pub distribution: Figure,
    theme: Theme,
}

impl ChartSet {
    /// Build both figures and apply the theme to them together
    pub fn build(aggregates: &Aggregates, colors: &ColorAssignment, theme: Theme) -> Self {
        let mut charts = Self {
            trend: trend_figure(aggregates, colors),
            distribution: distribution_figure(aggregates, colors),
            theme: Theme::Light,
        };
        charts.apply_theme(theme);
        charts
    }

    /// Re-theme both figures
    pub fn apply_theme(&mut self, theme: Theme) {
        let style = theme.style();
        self.trend.apply_style(&style);
        self.distribution.apply_style(&style);
        self.theme = theme;
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{aggregate, FilterSelection};
    use crate::data::{Table, UserRecord};
    use chrono::NaiveDate;

    fn charts(theme: Theme) -> ChartSet {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let table = Table::new(vec![UserRecord::new(d, "NY"), UserRecord::new(d, "LA")]);
        let colors = ColorAssignment::assign(table.cities());
        let aggregates = aggregate(&table, &FilterSelection::full_range(&table));
        ChartSet::build(&aggregates, &colors, theme)
    }

    #[test]
    fn test_theme_applies_to_both() {
        let set = charts(Theme::Dark);
        let style = Theme::Dark.style();

        assert_eq!(set.trend.layout.plot_bgcolor, style.plot_bgcolor);
        assert_eq!(set.distribution.layout.plot_bgcolor, style.plot_bgcolor);
        assert_eq!(set.trend.layout.font, set.distribution.layout.font);
    }

    #[test]
    fn test_retheme_keeps_palette() {
        let mut set = charts(Theme::Light);
        let before = set.trend.trace_color("LA").map(str::to_string);

        set.apply_theme(Theme::Dark);

        assert_eq!(set.theme(), Theme::Dark);
        assert_eq!(set.trend.trace_color("LA").map(str::to_string), before);
        assert_eq!(
            set.distribution.layout.paper_bgcolor,
            Theme::Dark.style().paper_bgcolor
        );
    }
}
