//! Filter/aggregate engine
//!
//! Pure function from the table and a selection to the two chart inputs:
//!
//! ```text
//! Table ─► date range ─► city filter ─┬─► group by (date, city) ─► TrendPoint
//!                                     └─► group by city         ─► DistributionSlice
//! ```
//!
//! Trend points come out ordered by date, then by first-seen city order.
//! Distribution slices follow first-seen city order.

use super::filter::FilterSelection;
use crate::data::Table;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Registrations for one city on one day
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub city: String,
    pub count: usize,
}

/// Registrations for one city over the whole selection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DistributionSlice {
    pub city: String,
    pub count: usize,
}

/// Output of one aggregation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Aggregates {
    /// Per-day per-city counts for the bar chart
    pub trend: Vec<TrendPoint>,
    /// Per-city totals for the pie chart
    pub distribution: Vec<DistributionSlice>,
    /// Rows that survived both filters
    pub filtered_rows: usize,
}

impl Aggregates {
    pub fn is_empty(&self) -> bool {
        self.filtered_rows == 0
    }

    /// Distinct dates present in the trend, ascending
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.trend.iter().map(|p| p.date).collect();
        dates.dedup();
        dates
    }

    /// Cities present in the result, in first-seen order
    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.distribution.iter().map(|s| s.city.as_str())
    }
}

/// Filter the table by the selection and count rows per group
///
/// An empty result is not an error: both lists come back empty.
pub fn aggregate(table: &Table, selection: &FilterSelection) -> Aggregates {
    // Keyed by city position so output follows first-seen order
    let mut by_day: BTreeMap<(NaiveDate, usize), usize> = BTreeMap::new();
    let mut by_city: BTreeMap<usize, usize> = BTreeMap::new();
    let mut filtered_rows = 0;

    for record in table.records() {
        if !selection.includes_date(record.created_at) {
            continue;
        }
        if !selection.includes_city(&record.city) {
            continue;
        }
        let Some(position) = table.city_position(&record.city) else {
            continue;
        };

        *by_day.entry((record.created_at, position)).or_insert(0) += 1;
        *by_city.entry(position).or_insert(0) += 1;
        filtered_rows += 1;
    }

    let cities = table.cities();

    let trend = by_day
        .into_iter()
        .map(|((date, position), count)| TrendPoint {
            date,
            city: cities[position].clone(),
            count,
        })
        .collect();

    let distribution = by_city
        .into_iter()
        .map(|(position, count)| DistributionSlice {
            city: cities[position].clone(),
            count,
        })
        .collect();

    Aggregates {
        trend,
        distribution,
        filtered_rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::UserRecord;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn point(d: NaiveDate, city: &str, count: usize) -> TrendPoint {
        TrendPoint {
            date: d,
            city: city.to_string(),
            count,
        }
    }

    fn slice(city: &str, count: usize) -> DistributionSlice {
        DistributionSlice {
            city: city.to_string(),
            count,
        }
    }

    fn scenario_table() -> Table {
        Table::new(vec![
            UserRecord::new(date(2024, 1, 1), "NY"),
            UserRecord::new(date(2024, 1, 1), "LA"),
            UserRecord::new(date(2024, 1, 2), "NY"),
        ])
    }

    #[test]
    fn test_all_cities_full_range() {
        let table = scenario_table();
        let result = aggregate(&table, &FilterSelection::full_range(&table));

        assert_eq!(
            result.trend,
            vec![
                point(date(2024, 1, 1), "NY", 1),
                point(date(2024, 1, 1), "LA", 1),
                point(date(2024, 1, 2), "NY", 1),
            ]
        );
        assert_eq!(result.distribution, vec![slice("NY", 2), slice("LA", 1)]);
        assert_eq!(result.filtered_rows, 3);
    }

    #[test]
    fn test_single_city() {
        let table = scenario_table();
        let selection = FilterSelection::full_range(&table).cities(["LA"]);
        let result = aggregate(&table, &selection);

        assert_eq!(result.trend, vec![point(date(2024, 1, 1), "LA", 1)]);
        assert_eq!(result.distribution, vec![slice("LA", 1)]);
    }

    #[test]
    fn test_empty_selection_equals_all_cities() {
        let table = scenario_table();
        let all = FilterSelection::full_range(&table);
        let explicit = all.clone().cities(table.cities().to_vec());

        assert_eq!(aggregate(&table, &all), aggregate(&table, &explicit));
    }

    #[test]
    fn test_range_excluding_everything_is_empty() {
        let table = scenario_table();
        let selection = FilterSelection::new(date(2030, 1, 1), date(2030, 12, 31));
        let result = aggregate(&table, &selection);

        assert!(result.trend.is_empty());
        assert!(result.distribution.is_empty());
        assert!(result.is_empty());
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let table = scenario_table();
        let selection = FilterSelection::new(date(2024, 1, 2), date(2024, 1, 1));

        assert!(aggregate(&table, &selection).is_empty());
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let table = scenario_table();
        let selection = FilterSelection::new(date(2024, 1, 2), date(2024, 1, 2));
        let result = aggregate(&table, &selection);

        assert_eq!(result.trend, vec![point(date(2024, 1, 2), "NY", 1)]);
        assert_eq!(result.distribution, vec![slice("NY", 1)]);
    }

    #[test]
    fn test_unknown_city_is_absent() {
        let table = scenario_table();
        let selection = FilterSelection::full_range(&table).cities(["Boston", "NY"]);
        let result = aggregate(&table, &selection);

        assert_eq!(result.distribution, vec![slice("NY", 2)]);
        assert!(result.cities().all(|c| c != "Boston"));
    }

    #[test]
    fn test_counts_add_up() {
        let table = Table::new(vec![
            UserRecord::new(date(2024, 2, 1), "Oslo"),
            UserRecord::new(date(2024, 2, 1), "Oslo"),
            UserRecord::new(date(2024, 2, 3), "Lima"),
            UserRecord::new(date(2024, 2, 2), "Oslo"),
            UserRecord::new(date(2024, 2, 3), "Oslo"),
        ]);
        let result = aggregate(&table, &FilterSelection::full_range(&table));

        let trend_total: usize = result.trend.iter().map(|p| p.count).sum();
        let dist_total: usize = result.distribution.iter().map(|s| s.count).sum();
        assert_eq!(trend_total, 5);
        assert_eq!(dist_total, 5);
        assert_eq!(
            result.dates(),
            vec![date(2024, 2, 1), date(2024, 2, 2), date(2024, 2, 3)]
        );
    }
}
