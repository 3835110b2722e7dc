//! Record store port
//!
//! Read-only access to the date-indexed table of historical observations.

use chrono::NaiveDate;
use domain::WeatherRecord;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

use crate::error::ApplicationError;

/// Why a date lookup failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// No record carries the date
    #[error("no record for {0}")]
    NotFound(NaiveDate),

    /// Several records carry the date
    #[error("{count} records for {date}")]
    Duplicate { date: NaiveDate, count: usize },
}

impl From<LookupError> for ApplicationError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::NotFound(date) => Self::Selection { date },
            LookupError::Duplicate { date, count } => Self::Integrity { date, count },
        }
    }
}

/// Port for the record store
///
/// Implementations are loaded once and never mutated, so they can be shared
/// across sessions without synchronization.
#[cfg_attr(test, automock)]
pub trait RecordStorePort: Send + Sync {
    /// Return the single record for an exact date
    fn lookup(&self, date: NaiveDate) -> Result<WeatherRecord, LookupError>;

    /// All covered dates in ascending order, without duplicates
    fn covered_dates(&self) -> Vec<NaiveDate>;

    /// First and last covered date
    fn covered_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let dates = self.covered_dates();
        Some((*dates.first()?, *dates.last()?))
    }

    /// Number of distinct covered dates
    fn date_count(&self) -> usize {
        self.covered_dates().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn RecordStorePort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn RecordStorePort>();
    }

    #[test]
    fn not_found_maps_to_selection() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let err: ApplicationError = LookupError::NotFound(date).into();
        assert!(matches!(err, ApplicationError::Selection { date: d } if d == date));
    }

    #[test]
    fn duplicate_maps_to_integrity() {
        let date = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap();
        let err: ApplicationError = LookupError::Duplicate { date, count: 3 }.into();
        assert!(matches!(err, ApplicationError::Integrity { count: 3, .. }));
    }

    struct DatesOnly(Vec<NaiveDate>);

    impl RecordStorePort for DatesOnly {
        fn lookup(&self, date: NaiveDate) -> Result<WeatherRecord, LookupError> {
            Err(LookupError::NotFound(date))
        }

        fn covered_dates(&self) -> Vec<NaiveDate> {
            self.0.clone()
        }
    }

    #[test]
    fn covered_range_default_uses_dates() {
        let first = NaiveDate::from_ymd_opt(2023, 2, 5).unwrap();
        let last = NaiveDate::from_ymd_opt(2023, 2, 7).unwrap();
        let store = DatesOnly(vec![first, first.succ_opt().unwrap(), last]);
        assert_eq!(store.covered_range(), Some((first, last)));
        assert_eq!(store.date_count(), 3);
    }

    #[test]
    fn empty_store_has_no_range() {
        assert_eq!(DatesOnly(Vec::new()).covered_range(), None);
    }
}
