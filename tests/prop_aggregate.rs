use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use regboard::dashboard::{aggregate, ColorAssignment, FilterSelection, PALETTE};
use regboard::data::{Table, TableLoader, UserRecord};

const CITIES: [&str; 6] = ["NY", "LA", "Chicago", "Oslo", "Lima", "Pune"];

fn origin() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn arb_rows() -> impl Strategy<Value = Vec<(i64, usize)>> {
    prop::collection::vec((0i64..60, 0usize..CITIES.len()), 1..200)
}

fn table_from(rows: &[(i64, usize)]) -> Table {
    rows.iter()
        .map(|&(day, city)| UserRecord::new(origin() + Duration::days(day), CITIES[city]))
        .collect()
}

fn arb_selection() -> impl Strategy<Value = (i64, i64, Vec<usize>)> {
    (
        0i64..60,
        0i64..60,
        prop::collection::vec(0usize..CITIES.len(), 0..4),
    )
}

fn selection_from(start: i64, end: i64, cities: &[usize]) -> FilterSelection {
    let (start, end) = (start.min(end), start.max(end));
    FilterSelection::new(origin() + Duration::days(start), origin() + Duration::days(end))
        .cities(cities.iter().map(|&c| CITIES[c]))
}

proptest! {
    // Both aggregates account for exactly the filtered rows
    #[test]
    fn counts_match_filtered_rows(
        rows in arb_rows(),
        (start, end, cities) in arb_selection(),
    ) {
        let table = table_from(&rows);
        let selection = selection_from(start, end, &cities);
        let result = aggregate(&table, &selection);

        let expected = table
            .records()
            .iter()
            .filter(|r| selection.includes_date(r.created_at) && selection.includes_city(&r.city))
            .count();
        let trend_total: usize = result.trend.iter().map(|p| p.count).sum();
        let dist_total: usize = result.distribution.iter().map(|s| s.count).sum();

        prop_assert_eq!(result.filtered_rows, expected);
        prop_assert_eq!(trend_total, expected);
        prop_assert_eq!(dist_total, expected);
    }

    // Permuting the input rows yields the same multisets
    #[test]
    fn aggregation_is_order_independent(
        (rows, shuffled) in arb_rows().prop_flat_map(|rows| {
            let shuffled = Just(rows.clone()).prop_shuffle();
            (Just(rows), shuffled)
        }),
        (start, end, cities) in arb_selection(),
    ) {
        let selection = selection_from(start, end, &cities);
        let a = aggregate(&table_from(&rows), &selection);
        let b = aggregate(&table_from(&shuffled), &selection);

        let mut trend_a = a.trend.clone();
        let mut trend_b = b.trend.clone();
        trend_a.sort_by(|x, y| (x.date, &x.city).cmp(&(y.date, &y.city)));
        trend_b.sort_by(|x, y| (x.date, &x.city).cmp(&(y.date, &y.city)));
        prop_assert_eq!(trend_a, trend_b);

        let mut dist_a = a.distribution.clone();
        let mut dist_b = b.distribution.clone();
        dist_a.sort_by(|x, y| x.city.cmp(&y.city));
        dist_b.sort_by(|x, y| x.city.cmp(&y.city));
        prop_assert_eq!(dist_a, dist_b);
    }

    // No city filter is the same as selecting every known city
    #[test]
    fn empty_city_filter_selects_all(rows in arb_rows()) {
        let table = table_from(&rows);
        let all = FilterSelection::full_range(&table);
        let explicit = all.clone().cities(table.cities().to_vec());

        prop_assert_eq!(aggregate(&table, &all), aggregate(&table, &explicit));
    }

    // A range after every row yields empty aggregates
    #[test]
    fn range_outside_data_is_empty(rows in arb_rows(), offset in 61i64..400) {
        let table = table_from(&rows);
        let day = origin() + Duration::days(offset);
        let result = aggregate(&table, &FilterSelection::new(day, day + Duration::days(30)));

        prop_assert!(result.trend.is_empty());
        prop_assert!(result.distribution.is_empty());
    }

    // Trend output is sorted by date
    #[test]
    fn trend_is_date_ascending(rows in arb_rows()) {
        let table = table_from(&rows);
        let result = aggregate(&table, &FilterSelection::full_range(&table));

        prop_assert!(result.trend.windows(2).all(|w| w[0].date <= w[1].date));
    }

    // One unparseable timestamp among N valid rows leaves exactly N rows
    #[test]
    fn bad_timestamp_row_is_dropped(rows in arb_rows(), bad_at in 0usize..200) {
        let mut csv = String::from("Created_At,City\n");
        let bad_at = bad_at % (rows.len() + 1);
        for (i, &(day, city)) in rows.iter().enumerate() {
            if i == bad_at {
                csv.push_str("32/32/2024 25:61,NY\n");
            }
            let date = origin() + Duration::days(day);
            csv.push_str(&format!("{} 10:00:00,{}\n", date.format("%Y-%m-%d"), CITIES[city]));
        }
        if bad_at == rows.len() {
            csv.push_str("not a timestamp,NY\n");
        }

        let (table, report) = TableLoader::new().load_reader(csv.as_bytes()).unwrap();

        prop_assert_eq!(table.len(), rows.len());
        prop_assert_eq!(report.bad_dates, 1);
    }

    // Colour assignment is repeatable and collision-free within the palette
    #[test]
    fn colors_stable_and_injective(count in 1usize..=PALETTE.len()) {
        let names: Vec<String> = (0..count).map(|i| format!("city-{i}")).collect();
        let a = ColorAssignment::assign(&names);
        let b = ColorAssignment::assign(&names);

        let mut seen = Vec::new();
        for name in &names {
            prop_assert_eq!(a.color_for(name), b.color_for(name));
            seen.push(a.color_for(name));
        }
        seen.sort_unstable();
        seen.dedup();
        prop_assert_eq!(seen.len(), count);
    }
}
