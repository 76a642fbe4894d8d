//! crates/fitness_tracker_core/src/progress.rs
//!
//! Weekly progress aggregation.
//!
//! Records are bucketed into Sunday-aligned calendar weeks and one metric is
//! summed per bucket. Only weeks containing at least one record appear in the
//! output; gaps in a user's history are not zero-filled.

use std::ops::AddAssign;

use chrono::{Datelike, Days, NaiveDate};

use crate::domain::{Metric, MetricValue, WeeklyProgress, WorkoutRecord, DATE_FORMAT};
use crate::error::{ProgressError, ProgressResult};

/// The Sunday starting the calendar week that contains `date`.
///
/// chrono numbers Monday as 1 and Sunday as 7, so `% 7` gives Sunday an
/// offset of 0 and Monday..Saturday offsets of 1..6. Fails for the handful of
/// days at the start of chrono's calendar whose Sunday is not representable.
pub fn week_start(date: NaiveDate) -> ProgressResult<NaiveDate> {
    let offset = date.weekday().number_from_monday() % 7;
    date.checked_sub_days(Days::new(u64::from(offset)))
        .ok_or_else(|| ProgressError::DateOutOfRange(date.format(DATE_FORMAT).to_string()))
}

/// Sums `metric` per week over `records`.
///
/// The input is never mutated: dates are parsed into a sorted working copy
/// first, so any malformed date fails the call before a single bucket is
/// built. The sort is stable, which keeps same-day records in their logged
/// order.
pub fn aggregate_weekly(records: &[WorkoutRecord], metric: Metric) -> ProgressResult<WeeklyProgress> {
    let mut dated = records
        .iter()
        .map(|record| record.parsed_date().map(|date| (date, record)))
        .collect::<ProgressResult<Vec<_>>>()?;
    dated.sort_by_key(|(date, _)| *date);

    let (labels, data) = match metric {
        Metric::Weight => split(sum_by_week(&dated, |r| r.weight)?, MetricValue::Weight),
        Metric::Repetitions => split(
            sum_by_week(&dated, |r| u64::from(r.repetitions))?,
            MetricValue::Repetitions,
        ),
    };

    Ok(WeeklyProgress { labels, data })
}

/// Like [`aggregate_weekly`], for callers holding the metric as a field name.
/// Unknown names are rejected before any record is examined.
pub fn aggregate_weekly_by_name(
    records: &[WorkoutRecord],
    metric: &str,
) -> ProgressResult<WeeklyProgress> {
    let metric = metric.parse::<Metric>()?;
    aggregate_weekly(records, metric)
}

// `dated` is sorted, so a new week can only ever follow the last bucket.
fn sum_by_week<T, F>(
    dated: &[(NaiveDate, &WorkoutRecord)],
    value: F,
) -> ProgressResult<Vec<(NaiveDate, T)>>
where
    T: AddAssign,
    F: Fn(&WorkoutRecord) -> T,
{
    let mut buckets: Vec<(NaiveDate, T)> = Vec::new();
    for &(date, record) in dated {
        let start = week_start(date)?;
        if let Some((label, total)) = buckets.last_mut() {
            if *label == start {
                *total += value(record);
                continue;
            }
        }
        buckets.push((start, value(record)));
    }
    Ok(buckets)
}

fn split<T>(buckets: Vec<(NaiveDate, T)>, wrap: fn(T) -> MetricValue) -> (Vec<String>, Vec<MetricValue>) {
    buckets
        .into_iter()
        .map(|(start, total)| (start.format(DATE_FORMAT).to_string(), wrap(total)))
        .unzip()
}
