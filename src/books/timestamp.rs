//! Core Data timestamp conversion.
//!
//! Every TIMESTAMP column in both stores holds a float of seconds since the
//! Core Data reference date, 2001-01-01T00:00:00Z. Conversion shifts by the
//! fixed [`CORE_DATA_EPOCH_OFFSET`], keeping millisecond precision.

use chrono::{DateTime, Utc};

use crate::books::constants::CORE_DATA_EPOCH_OFFSET;

/// Convert a Core Data timestamp to a UTC datetime.
///
/// `None`, zero, and non-finite inputs all convert to `None`; the stores
/// use NULL and 0.0 interchangeably for "never". Values outside chrono's
/// representable range also come back as `None` rather than panicking.
pub fn core_data_timestamp(seconds: Option<f64>) -> Option<DateTime<Utc>> {
    let s = seconds?;
    if s == 0.0 || !s.is_finite() {
        return None;
    }

    // Millisecond precision is plenty; the cast saturates on the absurd.
    let millis = (s * 1000.0).round() as i64;
    DateTime::from_timestamp_millis(millis.saturating_add(CORE_DATA_EPOCH_OFFSET * 1000))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_date_is_2001() {
        let dt = core_data_timestamp(Some(1.0)).unwrap();
        assert_eq!(dt.to_rfc3339(), "2001-01-01T00:00:01+00:00");
    }

    #[test]
    fn test_known_instant() {
        // 700000000 seconds past the reference date.
        let dt = core_data_timestamp(Some(700_000_000.0)).unwrap();
        assert_eq!(dt.timestamp(), 700_000_000 + CORE_DATA_EPOCH_OFFSET);
    }

    #[test]
    fn test_null_and_zero_are_none() {
        assert!(core_data_timestamp(None).is_none());
        assert!(core_data_timestamp(Some(0.0)).is_none());
        assert!(core_data_timestamp(Some(f64::NAN)).is_none());
    }

    #[test]
    fn test_fractional_seconds_survive() {
        let dt = core_data_timestamp(Some(1.5)).unwrap();
        assert_eq!(dt.timestamp_subsec_millis(), 500);
    }
}
