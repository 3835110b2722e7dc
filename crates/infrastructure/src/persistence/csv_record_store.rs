//! CSV-backed record store
//!
//! Loads the whole observation table once. Rows sharing a date are kept so
//! that a lookup of that date can report the conflict instead of silently
//! picking one.

use std::{collections::BTreeMap, fs::File, io, path::Path};

use application::{
    parse_date,
    ports::{LookupError, RecordStorePort},
};
use chrono::NaiveDate;
use domain::{ObservationField, WeatherRecord};
use tracing::{debug, info, instrument, warn};

use super::error::RecordStoreError;

/// Column holding the date key
pub const DATE_COLUMN: &str = "datetime";

/// Immutable date-indexed table of weather records
#[derive(Debug, Clone, Default)]
pub struct CsvRecordStore {
    records: BTreeMap<NaiveDate, Vec<WeatherRecord>>,
    row_count: usize,
}

impl CsvRecordStore {
    /// Load the table from a CSV file
    #[instrument]
    pub fn open(path: &Path) -> Result<Self, RecordStoreError> {
        let file = File::open(path).map_err(|source| RecordStoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_reader(file)?;
        info!(
            rows = store.row_count,
            dates = store.records.len(),
            "Loaded weather records"
        );
        Ok(store)
    }

    /// Load the table from any CSV source
    ///
    /// The header must contain `datetime` and every observation column;
    /// other columns are ignored. Cell text is stored exactly as read.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, RecordStoreError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::None)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| RecordStoreError::MissingColumn(name.to_string()))
        };

        let date_idx = column(DATE_COLUMN)?;
        let mut field_idx = [0usize; ObservationField::COUNT];
        for field in ObservationField::ALL {
            field_idx[field.index()] = column(field.wire_name())?;
        }

        let mut records: BTreeMap<NaiveDate, Vec<WeatherRecord>> = BTreeMap::new();
        let mut row_count = 0;

        for row in reader.records() {
            let row = row?;
            let line = row.position().map_or(0, csv::Position::line);
            let raw_date = row.get(date_idx).unwrap_or_default();
            let date = parse_date(raw_date).map_err(|_| RecordStoreError::InvalidDate {
                line,
                value: raw_date.to_string(),
            })?;

            let record = WeatherRecord::from_fn(date, |field| {
                row.get(field_idx[field.index()])
                    .unwrap_or_default()
                    .to_string()
            });
            records.entry(date).or_default().push(record);
            row_count += 1;
        }

        if row_count == 0 {
            return Err(RecordStoreError::Empty);
        }

        let store = Self { records, row_count };
        let duplicates = store.duplicate_dates();
        if !duplicates.is_empty() {
            warn!(
                count = duplicates.len(),
                first = %duplicates[0],
                "Record source contains duplicate dates"
            );
        }
        debug!(rows = row_count, "Parsed record source");
        Ok(store)
    }

    /// Build a store from records already in memory
    pub fn from_records(records: impl IntoIterator<Item = WeatherRecord>) -> Self {
        let mut map: BTreeMap<NaiveDate, Vec<WeatherRecord>> = BTreeMap::new();
        let mut row_count = 0;
        for record in records {
            map.entry(record.date()).or_default().push(record);
            row_count += 1;
        }
        Self {
            records: map,
            row_count,
        }
    }

    /// Number of data rows read, duplicates included
    pub const fn row_count(&self) -> usize {
        self.row_count
    }

    /// Dates carried by more than one row
    pub fn duplicate_dates(&self) -> Vec<NaiveDate> {
        self.records
            .iter()
            .filter(|(_, rows)| rows.len() > 1)
            .map(|(date, _)| *date)
            .collect()
    }
}

impl RecordStorePort for CsvRecordStore {
    fn lookup(&self, date: NaiveDate) -> Result<WeatherRecord, LookupError> {
        match self.records.get(&date).map(Vec::as_slice) {
            Some([record]) => Ok(record.clone()),
            Some(rows) if !rows.is_empty() => Err(LookupError::Duplicate {
                date,
                count: rows.len(),
            }),
            _ => Err(LookupError::NotFound(date)),
        }
    }

    fn covered_dates(&self) -> Vec<NaiveDate> {
        self.records.keys().copied().collect()
    }

    fn covered_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.keys().next()?;
        let last = self.records.keys().next_back()?;
        Some((*first, *last))
    }

    fn date_count(&self) -> usize {
        self.records.len()
    }
}
