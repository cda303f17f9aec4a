//! Deadline bucketing
//!
//! Buckets overlap: a deadline of today is also in this week and this month.
//! All comparisons are on calendar dates, never on times of day.

use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Get the current date in local timezone
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeadlineBucket {
    /// Deadline date is before today
    Overdue,
    Today,
    /// Within the Sunday-start week containing today
    ThisWeek,
    ThisMonth,
    /// No deadline set
    NoDeadline,
}

impl DeadlineBucket {
    pub const ALL: [DeadlineBucket; 5] = [
        DeadlineBucket::Overdue,
        DeadlineBucket::Today,
        DeadlineBucket::ThisWeek,
        DeadlineBucket::ThisMonth,
        DeadlineBucket::NoDeadline,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeadlineBucket::Overdue => "overdue",
            DeadlineBucket::Today => "today",
            DeadlineBucket::ThisWeek => "this-week",
            DeadlineBucket::ThisMonth => "this-month",
            DeadlineBucket::NoDeadline => "no-deadline",
        }
    }
}

impl fmt::Display for DeadlineBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeadlineBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeadlineBucket::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Invalid deadline filter '{}'. Valid options are: overdue, today, this-week, this-month, no-deadline",
                    s
                )
            })
    }
}

/// First day (Sunday) of the week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Check whether a deadline falls into a bucket relative to `today`
pub fn matches_deadline_bucket(
    deadline: Option<NaiveDate>,
    bucket: DeadlineBucket,
    today: NaiveDate,
) -> bool {
    let Some(deadline) = deadline else {
        return bucket == DeadlineBucket::NoDeadline;
    };

    match bucket {
        DeadlineBucket::NoDeadline => false,
        DeadlineBucket::Overdue => deadline < today,
        DeadlineBucket::Today => deadline == today,
        DeadlineBucket::ThisWeek => week_start(deadline) == week_start(today),
        DeadlineBucket::ThisMonth => {
            deadline.year() == today.year() && deadline.month() == today.month()
        }
    }
}

/// Check a deadline against a selection of buckets (logical OR)
///
/// An empty selection imposes no constraint.
pub fn matches_any_bucket<'a, I>(deadline: Option<NaiveDate>, buckets: I, today: NaiveDate) -> bool
where
    I: IntoIterator<Item = &'a DeadlineBucket>,
{
    let mut buckets = buckets.into_iter().peekable();
    if buckets.peek().is_none() {
        return true;
    }
    buckets.any(|bucket| matches_deadline_bucket(deadline, *bucket, today))
}
