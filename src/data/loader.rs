//! Registration table loader
//!
//! Reads the user spreadsheet, either as an Excel workbook (first sheet)
//! or as a CSV export. Only the creation timestamp and city columns are
//! used. Native spreadsheet dates are taken as-is; text timestamps are
//! accepted in any of a configurable list of formats and reduced to their
//! calendar date. Rows whose date cannot be parsed, or whose city is
//! blank, are dropped before the table is handed out.

use super::error::{LoadError, LoadResult};
use super::types::{Table, UserRecord};
use calamine::{open_workbook_auto, Data, Reader};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Timestamp formats tried, in order, when none are configured
pub const DEFAULT_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S %Z",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%d.%m.%Y",
];

/// File extensions read as workbooks rather than CSV
const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Default header of the creation timestamp column
pub const DEFAULT_DATE_COLUMN: &str = "Created_At";

/// Default header of the city column
pub const DEFAULT_CITY_COLUMN: &str = "City";

/// Loader for the registration spreadsheet
#[derive(Debug, Clone)]
pub struct TableLoader {
    date_column: String,
    city_column: String,
    timestamp_formats: Vec<String>,
}

/// What happened to the rows of the source file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Data rows seen (header excluded)
    pub rows_read: usize,
    /// Rows that made it into the table
    pub rows_kept: usize,
    /// Rows dropped because the timestamp was empty or unparseable
    pub bad_dates: usize,
    /// Rows dropped because the city was blank
    pub missing_city: usize,
    /// Rows the CSV reader could not decode
    pub malformed_rows: usize,
}

impl LoadReport {
    pub fn rows_dropped(&self) -> usize {
        self.bad_dates + self.missing_city + self.malformed_rows
    }
}

impl Default for TableLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TableLoader {
    /// Create a loader with the default column names and formats
    pub fn new() -> Self {
        Self {
            date_column: DEFAULT_DATE_COLUMN.to_string(),
            city_column: DEFAULT_CITY_COLUMN.to_string(),
            timestamp_formats: DEFAULT_TIMESTAMP_FORMATS
                .iter()
                .map(|f| f.to_string())
                .collect(),
        }
    }

    /// Set the header of the timestamp column
    pub fn with_date_column(mut self, column: &str) -> Self {
        self.date_column = column.to_string();
        self
    }

    /// Set the header of the city column
    pub fn with_city_column(mut self, column: &str) -> Self {
        self.city_column = column.to_string();
        self
    }

    /// Replace the accepted timestamp formats
    ///
    /// An empty list keeps the current formats.
    pub fn with_timestamp_formats(mut self, formats: &[String]) -> Self {
        if !formats.is_empty() {
            self.timestamp_formats = formats.to_vec();
        }
        self
    }

    /// Parse a creation timestamp into its calendar date
    ///
    /// Timestamps carrying a numeric UTC offset keep the date as written.
    pub fn parse_created_at(&self, raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        for fmt in &self.timestamp_formats {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
                return Some(dt.date());
            }
            if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
                return Some(date);
            }
        }

        DateTime::parse_from_rfc3339(raw)
            .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%:z"))
            .ok()
            .map(|dt| dt.date_naive())
    }

    /// Load the table from a file
    ///
    /// Workbooks are recognised by extension; anything else is read as CSV.
    pub fn load(&self, path: &Path) -> LoadResult<(Table, LoadReport)> {
        if is_workbook(path) {
            return self.load_workbook(path);
        }

        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!("Loading registrations from {:?}", path);
        self.load_reader(file)
    }

    /// Load the table from the first sheet of a workbook
    pub fn load_workbook(&self, path: &Path) -> LoadResult<(Table, LoadReport)> {
        // calamine wraps io errors per format; surface them as plain Io
        File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let workbook_error = |source: calamine::Error| LoadError::Workbook {
            path: path.to_path_buf(),
            source,
        };

        let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
        tracing::info!("Loading registrations from workbook {:?}", path);

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| LoadError::NoWorksheet(path.to_path_buf()))?
            .map_err(workbook_error)?;

        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .unwrap_or_default();
        let (date_idx, city_idx) = self.locate_columns(&headers)?;

        let mut assembler = TableAssembler::default();
        for (row_num, row) in rows.enumerate() {
            let date_cell = row.get(date_idx).unwrap_or(&Data::Empty);
            let city = row.get(city_idx).map(|cell| cell.to_string()).unwrap_or_default();

            assembler.push(
                row_num + 2,
                self.cell_date(date_cell),
                &date_cell.to_string(),
                &city,
            );
        }

        Ok(assembler.finish())
    }

    /// Load the table from any reader producing CSV
    ///
    /// Fields that are not valid UTF-8 are decoded as Latin-1.
    pub fn load_reader<R: Read>(&self, reader: R) -> LoadResult<(Table, LoadReport)> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .byte_headers()?
            .iter()
            .map(|h| decode_field(h).into_owned())
            .collect();
        let (date_idx, city_idx) = self.locate_columns(&headers)?;

        let mut assembler = TableAssembler::default();

        for (line_num, result) in reader.byte_records().enumerate() {
            // +2: one for the header row, one for 1-based numbering
            let line = line_num + 2;

            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    tracing::debug!(line, error = %e, "Dropping malformed row");
                    assembler.malformed();
                    continue;
                }
            };

            let raw_date = decode_field(record.get(date_idx).unwrap_or_default());
            let city = decode_field(record.get(city_idx).unwrap_or_default());

            assembler.push(line, self.parse_created_at(&raw_date), &raw_date, &city);
        }

        Ok(assembler.finish())
    }

    fn locate_columns(&self, headers: &[String]) -> LoadResult<(usize, usize)> {
        let date_idx = find_column(headers, &self.date_column)
            .ok_or_else(|| LoadError::MissingColumn(self.date_column.clone()))?;
        let city_idx = find_column(headers, &self.city_column)
            .ok_or_else(|| LoadError::MissingColumn(self.city_column.clone()))?;
        Ok((date_idx, city_idx))
    }

    /// Date of a workbook cell: native dates directly, text via the formats
    fn cell_date(&self, cell: &Data) -> Option<NaiveDate> {
        match cell {
            Data::DateTime(dt) => dt.as_datetime().map(|dt| dt.date()),
            Data::DateTimeIso(raw) | Data::String(raw) => self.parse_created_at(raw),
            _ => None,
        }
    }
}

/// Row accounting shared by the CSV and workbook paths
#[derive(Default)]
struct TableAssembler {
    records: Vec<UserRecord>,
    report: LoadReport,
}

impl TableAssembler {
    fn malformed(&mut self) {
        self.report.rows_read += 1;
        self.report.malformed_rows += 1;
    }

    fn push(&mut self, line: usize, created_at: Option<NaiveDate>, raw_date: &str, city: &str) {
        self.report.rows_read += 1;

        let Some(created_at) = created_at else {
            tracing::debug!(line, value = raw_date, "Dropping row with unparseable date");
            self.report.bad_dates += 1;
            return;
        };

        let city = city.trim();
        if city.is_empty() {
            tracing::debug!(line, "Dropping row with blank city");
            self.report.missing_city += 1;
            return;
        }

        self.records.push(UserRecord::new(created_at, city));
    }

    fn finish(mut self) -> (Table, LoadReport) {
        self.report.rows_kept = self.records.len();
        let report = self.report;
        let table = Table::new(self.records);

        tracing::info!(
            rows_read = report.rows_read,
            rows_kept = report.rows_kept,
            bad_dates = report.bad_dates,
            missing_city = report.missing_city,
            malformed_rows = report.malformed_rows,
            cities = table.cities().len(),
            "Registration table loaded"
        );
        if table.is_empty() {
            tracing::warn!("Registration table is empty, charts will render blank");
        }

        (table, report)
    }
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| WORKBOOK_EXTENSIONS.iter().any(|w| ext.eq_ignore_ascii_case(w)))
        .unwrap_or(false)
}

/// UTF-8 when valid, otherwise Latin-1 (one char per byte)
fn decode_field(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
    }
}

/// Locate a header, exact match first, then case-insensitive
fn find_column(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name).or_else(|| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name.trim()))
    })
}
