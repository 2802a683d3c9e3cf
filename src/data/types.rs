//! Core data types for the registration table
//!
//! - `UserRecord`: one loaded spreadsheet row
//! - `Table`: the immutable set of records plus the first-seen city order

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// A single user registration
///
/// Only the columns the dashboard reads are kept; every other
/// spreadsheet column is discarded at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    /// Calendar date the account was created
    pub created_at: NaiveDate,
    /// City the user registered from
    pub city: String,
}

impl UserRecord {
    pub fn new(created_at: NaiveDate, city: impl Into<String>) -> Self {
        Self {
            created_at,
            city: city.into(),
        }
    }
}

/// The loaded registration table
///
/// Built once and never mutated. Cities are enumerated in the order they
/// first appear in the records, which is what colour assignment and chart
/// ordering key off.
#[derive(Debug, Clone, Default)]
pub struct Table {
    records: Vec<UserRecord>,
    cities: Vec<String>,
    city_positions: HashMap<String, usize>,
}

impl Table {
    /// Build a table, recording cities in first-seen order
    pub fn new(records: Vec<UserRecord>) -> Self {
        let mut cities = Vec::new();
        let mut city_positions = HashMap::new();

        for record in &records {
            if !city_positions.contains_key(&record.city) {
                city_positions.insert(record.city.clone(), cities.len());
                cities.push(record.city.clone());
            }
        }

        Self {
            records,
            cities,
            city_positions,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    /// Unique cities in first-seen order
    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// Position of a city in first-seen order
    pub fn city_position(&self, city: &str) -> Option<usize> {
        self.city_positions.get(city).copied()
    }

    /// Earliest and latest registration dates, `None` for an empty table
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.records.iter().map(|r| r.created_at);
        let first = dates.next()?;

        Some(dates.fold((first, first), |(min, max), d| (min.min(d), max.max(d))))
    }
}

impl FromIterator<UserRecord> for Table {
    fn from_iter<I: IntoIterator<Item = UserRecord>>(iter: I) -> Self {
        Table::new(iter.into_iter().collect())
    }
}
