use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::{Month, Trial};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Why a trial list could not be aggregated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TrialDataError {
    #[error("trial {index} has unrecognized month name {name:?}")]
    UnknownMonth { index: usize, name: String },

    #[error("trial {index} has no representable date (year {year}, {month} day {day})")]
    DateOutOfRange {
        index: usize,
        year: i32,
        month: Month,
        day: i64,
    },

    #[error("too many trials to aggregate: {len}")]
    TooManyTrials { len: usize },
}

/// Error returned when parsing a [`Grain`] from a string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unrecognized grain {provided:?}, expected \"weekly\" or \"monthly\"")]
pub struct ParseGrainError {
    provided: String,
}

//
// ─── GRAIN ─────────────────────────────────────────────────────────────────────
//

/// Bucketing granularity for a progress series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grain {
    #[default]
    Weekly,
    Monthly,
}

impl Grain {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Grain::Weekly => "weekly",
            Grain::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Grain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grain {
    type Err = ParseGrainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekly" => Ok(Grain::Weekly),
            "monthly" => Ok(Grain::Monthly),
            other => Err(ParseGrainError {
                provided: other.to_string(),
            }),
        }
    }
}

//
// ─── SERIES ────────────────────────────────────────────────────────────────────
//

/// One plotted bucket of trials.
///
/// Serialized field names match what the chart surface binds to
/// (`name`, `accuracy`, `totalTrials`, `bestTrial`, `worstTrial`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    #[serde(rename = "name")]
    pub label: String,
    pub accuracy: u32,
    #[serde(rename = "totalTrials")]
    pub trials: u32,
    #[serde(rename = "bestTrial")]
    pub best: u32,
    #[serde(rename = "worstTrial")]
    pub worst: u32,
}

/// Statistics across every trial in the list, independent of grain.
///
/// `improvement` is the last accuracy minus the first accuracy in input
/// order. The list arrives in whatever order the backend returns it, so
/// callers that care about direction must not reorder it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStatistics {
    pub total_trials: u32,
    pub average_accuracy: u32,
    pub improvement: i64,
    pub best_score: u32,
    pub worst_score: u32,
}

/// Result of aggregating one trial list at one grain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregation {
    pub points: Vec<SeriesPoint>,
    pub summary: Option<SummaryStatistics>,
}

impl Aggregation {
    /// The aggregation of an empty trial list: no points, no summary.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            points: Vec::new(),
            summary: None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

//
// ─── AGGREGATION ───────────────────────────────────────────────────────────────
//

struct BucketAcc {
    label: String,
    sum: u64,
    count: u32,
    best: u32,
    worst: u32,
}

impl BucketAcc {
    fn new(label: String, accuracy: u32) -> Self {
        Self {
            label,
            sum: u64::from(accuracy),
            count: 1,
            best: accuracy,
            worst: accuracy,
        }
    }

    fn add(&mut self, accuracy: u32) {
        self.sum += u64::from(accuracy);
        self.count += 1;
        self.best = self.best.max(accuracy);
        self.worst = self.worst.min(accuracy);
    }

    fn into_point(self) -> SeriesPoint {
        SeriesPoint {
            accuracy: rounded_mean(self.sum, self.count),
            label: self.label,
            trials: self.count,
            best: self.best,
            worst: self.worst,
        }
    }
}

/// Aggregate practice trials into a plotted series plus overall statistics.
///
/// Buckets are keyed by calendar week (`"{year}-W{week}"`) or by month
/// (`"{month} {year}"`) and appear in the order they are first seen while
/// scanning `trials`, never re-sorted: the backend returns trials in its own
/// order and the series follows it. Each point carries the rounded mean
/// accuracy plus the best and worst single trial of its bucket.
///
/// Weekly labels spell the key's `-W` marker out as `" Week "`, so the
/// bucket for week 5 of 2024 is labeled `"2024 Week 5"`.
///
/// An empty list yields an empty series and no statistics.
///
/// # Errors
///
/// - [`TrialDataError::UnknownMonth`] if a trial's month is not one of the
///   twelve canonical English names
/// - [`TrialDataError::DateOutOfRange`] if a weekly bucket would need a
///   date that cannot be represented
/// - [`TrialDataError::TooManyTrials`] if the list length does not fit the
///   counters
///
/// # Examples
///
/// ```
/// # use clinic_core::model::Trial;
/// # use clinic_core::progress::{aggregate, Grain};
/// let trials = vec![
///     Trial { year: 2024, month: "January".into(), date: 5, accuracy: 60 },
///     Trial { year: 2024, month: "January".into(), date: 12, accuracy: 80 },
///     Trial { year: 2024, month: "February".into(), date: 2, accuracy: 90 },
/// ];
///
/// let aggregation = aggregate(&trials, Grain::Monthly)?;
/// assert_eq!(aggregation.points[0].label, "January 2024");
/// assert_eq!(aggregation.points[0].accuracy, 70);
/// assert_eq!(aggregation.summary.unwrap().improvement, 30);
/// # Ok::<(), clinic_core::progress::TrialDataError>(())
/// ```
pub fn aggregate(trials: &[Trial], grain: Grain) -> Result<Aggregation, TrialDataError> {
    if trials.is_empty() {
        return Ok(Aggregation::empty());
    }
    let total = u32::try_from(trials.len())
        .map_err(|_| TrialDataError::TooManyTrials { len: trials.len() })?;

    let mut buckets: Vec<BucketAcc> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for (index, trial) in trials.iter().enumerate() {
        let month = Month::from_name(&trial.month).ok_or_else(|| TrialDataError::UnknownMonth {
            index,
            name: trial.month.clone(),
        })?;

        let key = match grain {
            Grain::Weekly => {
                let date = resolve_trial_date(trial.year, month, trial.date).ok_or(
                    TrialDataError::DateOutOfRange {
                        index,
                        year: trial.year,
                        month,
                        day: trial.date,
                    },
                )?;
                format!("{}-W{}", trial.year, week_number(date))
            }
            Grain::Monthly => format!("{} {}", month.name(), trial.year),
        };

        match slots.get(&key) {
            Some(&slot) => buckets[slot].add(trial.accuracy),
            None => {
                let label = match grain {
                    Grain::Weekly => key.replacen("-W", " Week ", 1),
                    Grain::Monthly => key.clone(),
                };
                slots.insert(key, buckets.len());
                buckets.push(BucketAcc::new(label, trial.accuracy));
            }
        }
    }

    Ok(Aggregation {
        points: buckets.into_iter().map(BucketAcc::into_point).collect(),
        summary: Some(summarize(trials, total)),
    })
}

/// Resolve a trial's calendar date, letting out-of-range days roll across
/// month boundaries: day 0 is the last day of the previous month, day 32 of
/// January lands in February.
fn resolve_trial_date(year: i32, month: Month, day: i64) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month.number(), 1)?;
    let offset = Duration::try_days(day.checked_sub(1)?)?;
    first.checked_add_signed(offset)
}

/// Week-of-year with weeks anchored to the calendar week containing
/// January 1, counting weekdays from Sunday.
///
/// Computed as `ceil((days_since_jan1 + weekday_of_jan1 + 1) / 7)`. This is
/// the numbering the progress charts have always shown; it is not ISO-8601
/// week numbering.
///
/// # Examples
///
/// ```
/// # use chrono::NaiveDate;
/// # use clinic_core::progress::week_number;
/// let late_january = NaiveDate::from_ymd_opt(2024, 1, 29).unwrap();
/// assert_eq!(week_number(late_january), 5);
/// ```
#[must_use]
pub fn week_number(date: NaiveDate) -> u32 {
    let jan1 = NaiveDate::from_ymd_opt(date.year(), 1, 1)
        .expect("January 1 exists for every representable year");
    let past_days = date.ordinal0();
    let offset = jan1.weekday().num_days_from_sunday();
    (past_days + offset + 1).div_ceil(7)
}

fn summarize(trials: &[Trial], total: u32) -> SummaryStatistics {
    let mut sum = 0_u64;
    let mut best = 0_u32;
    let mut worst = u32::MAX;
    for trial in trials {
        sum += u64::from(trial.accuracy);
        best = best.max(trial.accuracy);
        worst = worst.min(trial.accuracy);
    }

    let first = trials[0].accuracy;
    let last = trials[trials.len() - 1].accuracy;

    SummaryStatistics {
        total_trials: total,
        average_accuracy: rounded_mean(sum, total),
        improvement: i64::from(last) - i64::from(first),
        best_score: best,
        worst_score: worst,
    }
}

/// Round-half-up mean, matching what the chart surface always displayed.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rounded_mean(sum: u64, count: u32) -> u32 {
    (sum as f64 / f64::from(count)).round() as u32
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
