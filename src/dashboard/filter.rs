//! Filter selection
//!
//! The control values active for one render: selected cities, an
//! inclusive date range and the chart theme. A fresh selection is built
//! for every request and never stored.

use crate::charts::Theme;
use crate::data::Table;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Control values for one render cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    /// Cities to keep; empty means every city
    pub cities: BTreeSet<String>,
    /// First date included
    pub start: NaiveDate,
    /// Last date included
    pub end: NaiveDate,
    /// Visual template for both charts
    pub theme: Theme,
}

impl FilterSelection {
    /// Selection over an explicit date range, all cities, light theme
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            cities: BTreeSet::new(),
            start,
            end,
            theme: Theme::default(),
        }
    }

    /// Selection covering the table's observed dates and every city
    ///
    /// An empty table has no observed dates; the widest possible range is
    /// used instead.
    pub fn full_range(table: &Table) -> Self {
        let (start, end) = table
            .date_bounds()
            .unwrap_or((NaiveDate::MIN, NaiveDate::MAX));
        Self::new(start, end)
    }

    /// Builder method: restrict to these cities
    pub fn cities<I, S>(mut self, cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cities = cities.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method: set the theme
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Build a selection from raw control values
    ///
    /// Controls are expected to emit values inside the observed range, but
    /// input is handled defensively: unparseable dates fall back to the
    /// observed bounds, an inverted range is swapped, an unknown theme
    /// falls back to light and blank city names are ignored.
    pub fn from_controls(
        table: &Table,
        cities: &[String],
        start: Option<&str>,
        end: Option<&str>,
        theme: Option<&str>,
    ) -> Self {
        let defaults = Self::full_range(table);

        let mut start = parse_control_date(start).unwrap_or(defaults.start);
        let mut end = parse_control_date(end).unwrap_or(defaults.end);
        if start > end {
            tracing::debug!(%start, %end, "Swapping inverted date range");
            std::mem::swap(&mut start, &mut end);
        }

        let theme = theme.and_then(Theme::parse).unwrap_or_default();

        Self::new(start, end).theme(theme).cities(
            cities
                .iter()
                .map(|c| c.trim())
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        )
    }

    /// Whether a date falls inside the inclusive range
    pub fn includes_date(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Whether a city passes the city filter
    pub fn includes_city(&self, city: &str) -> bool {
        self.cities.is_empty() || self.cities.contains(city)
    }
}

/// Parse a date control value (`YYYY-MM-DD`, optionally with a time part)
fn parse_control_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    let date_part = raw.get(..10).unwrap_or(raw);
    date_part.parse::<NaiveDate>().ok()
}
