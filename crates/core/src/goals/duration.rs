//! Relative goal durations and their resolution to absolute target dates.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DurationUnit {
    Day,
    Week,
    Month,
    Year,
    EndOfYear,
    Habit,
}

/// A relative timeframe chosen in the wizard, e.g. `3 month`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GoalDuration {
    pub value: u32,
    pub unit: DurationUnit,
}

impl GoalDuration {
    pub const fn new(value: u32, unit: DurationUnit) -> Self {
        Self { value, unit }
    }

    pub const fn today() -> Self {
        Self::new(0, DurationUnit::Day)
    }
}

impl Default for GoalDuration {
    fn default() -> Self {
        Self::today()
    }
}

/// Outcome of resolving a duration against a reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTimeframe {
    pub target_date: Option<NaiveDateTime>,
    pub is_habit: bool,
}

/// A selectable timeframe with display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeframePreset {
    pub duration: GoalDuration,
    pub label: &'static str,
    pub description: &'static str,
}

const fn preset(
    value: u32,
    unit: DurationUnit,
    label: &'static str,
    description: &'static str,
) -> TimeframePreset {
    TimeframePreset {
        duration: GoalDuration::new(value, unit),
        label,
        description,
    }
}

/// Timeframes offered on the timeline step, shortest first.
pub const TIMEFRAME_PRESETS: [TimeframePreset; 10] = [
    preset(0, DurationUnit::Day, "Today", "Start today"),
    preset(3, DurationUnit::Day, "3 days", "Short-term goal"),
    preset(1, DurationUnit::Week, "1 week", "Weekly challenge"),
    preset(2, DurationUnit::Week, "2 weeks", "Biweekly goal"),
    preset(1, DurationUnit::Month, "1 month", "Monthly objective"),
    preset(3, DurationUnit::Month, "3 months", "Quarterly goal"),
    preset(6, DurationUnit::Month, "6 months", "Half-year plan"),
    preset(0, DurationUnit::EndOfYear, "End of year", "By December 31st"),
    preset(3, DurationUnit::Year, "3 years", "Long-term vision"),
    preset(0, DurationUnit::Habit, "Daily Habit", "Ongoing practice"),
];

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN))
}

fn out_of_range(duration: GoalDuration) -> Error {
    Error::Validation(ValidationError::InvalidInput(format!(
        "Duration of {} {:?} is out of range",
        duration.value, duration.unit
    )))
}

/// Resolves a relative duration to an absolute end-of-day target date.
///
/// Month and year arithmetic clamps to the last valid day of the resulting
/// month, so Jan 31 + 1 month lands on Feb 28/29.
pub fn resolve_target_date(duration: GoalDuration, now: NaiveDateTime) -> Result<ResolvedTimeframe> {
    let today = now.date();
    let date = match duration.unit {
        DurationUnit::Habit => {
            return Ok(ResolvedTimeframe {
                target_date: None,
                is_habit: true,
            })
        }
        DurationUnit::Day => today.checked_add_days(Days::new(duration.value as u64)),
        DurationUnit::Week => today.checked_add_days(Days::new(duration.value as u64 * 7)),
        DurationUnit::Month => today.checked_add_months(Months::new(duration.value)),
        DurationUnit::Year => duration
            .value
            .checked_mul(12)
            .and_then(|months| today.checked_add_months(Months::new(months))),
        DurationUnit::EndOfYear => NaiveDate::from_ymd_opt(today.year(), 12, 31),
    }
    .ok_or_else(|| out_of_range(duration))?;

    Ok(ResolvedTimeframe {
        target_date: Some(end_of_day(date)),
        is_habit: false,
    })
}
