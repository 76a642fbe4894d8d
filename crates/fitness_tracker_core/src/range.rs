//! crates/fitness_tracker_core/src/range.rs
//!
//! Inclusive date-range selection over a user's workout records.

use chrono::NaiveDate;

use crate::domain::WorkoutRecord;
use crate::error::ProgressResult;

/// Returns the records dated within `[start, end]`, either bound open when `None`.
///
/// Input order is preserved. With both bounds omitted the records are returned
/// as-is without their dates being looked at; otherwise every record's date is
/// parsed and the first malformed one fails the whole call.
pub fn filter_by_date_range<'a>(
    records: &'a [WorkoutRecord],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> ProgressResult<Vec<&'a WorkoutRecord>> {
    if start.is_none() && end.is_none() {
        return Ok(records.iter().collect());
    }

    let mut selected = Vec::new();
    for record in records {
        let date = record.parsed_date()?;
        let after_start = start.map_or(true, |s| date >= s);
        let before_end = end.map_or(true, |e| date <= e);
        if after_start && before_end {
            selected.push(record);
        }
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProgressError;

    fn record(exercise_id: i64, date: &str) -> WorkoutRecord {
        WorkoutRecord {
            user_id: 1,
            exercise_id,
            repetitions: 10,
            weight: 50.0,
            date: date.to_string(),
            comment: String::new(),
        }
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn start_bound_is_inclusive() {
        let records = vec![record(101, "2024-12-07"), record(102, "2024-12-08")];

        let filtered = filter_by_date_range(&records, Some(day("2024-12-08")), None).unwrap();

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].exercise_id, 102);
    }

    #[test]
    fn end_bound_is_inclusive() {
        let records = vec![record(101, "2024-12-07"), record(102, "2024-12-08")];

        let filtered = filter_by_date_range(&records, None, Some(day("2024-12-07"))).unwrap();

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].exercise_id, 101);
    }

    #[test]
    fn both_bounds_keep_input_order() {
        let records = vec![
            record(1, "2024-12-10"),
            record(2, "2024-11-30"),
            record(3, "2024-12-05"),
            record(4, "2024-12-01"),
        ];

        let filtered =
            filter_by_date_range(&records, Some(day("2024-12-01")), Some(day("2024-12-10")))
                .unwrap();

        let ids: Vec<i64> = filtered.iter().map(|r| r.exercise_id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn no_bounds_returns_everything_unparsed() {
        let records = vec![record(1, "not-a-date"), record(2, "2024-12-08")];

        let filtered = filter_by_date_range(&records, None, None).unwrap();

        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn malformed_record_date_fails_the_call() {
        let records = vec![record(1, "2024-12-08"), record(2, "2024/12/09")];

        let err = filter_by_date_range(&records, Some(day("2024-12-01")), None).unwrap_err();

        assert!(matches!(err, ProgressError::MalformedDate { ref date, .. } if date == "2024/12/09"));
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let filtered = filter_by_date_range(&[], Some(day("2024-12-01")), None).unwrap();
        assert!(filtered.is_empty());
    }
}
