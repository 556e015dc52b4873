//! Time slot model and the half-open overlap predicate.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::SchedulingError;

/// A half-open time interval `[start, end)` a booking occupies.
///
/// The end instant is excluded, so a slot ending exactly when another begins
/// does not overlap it and back-to-back lessons are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: u32,
}

impl TimeSlot {
    pub fn new(date: NaiveDate, start_time: NaiveTime, duration_minutes: u32) -> Self {
        Self {
            date,
            start_time,
            duration_minutes,
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    /// Derived end instant, `start + duration`. May spill past midnight; the
    /// business-hours check rejects such slots before they reach a calendar.
    pub fn end(&self) -> NaiveDateTime {
        self.start() + Duration::minutes(i64::from(self.duration_minutes))
    }

    pub fn validate(&self) -> Result<(), SchedulingError> {
        if self.duration_minutes == 0 {
            return Err(SchedulingError::InvalidInterval {
                duration_minutes: self.duration_minutes,
            });
        }
        Ok(())
    }
}

/// Half-open interval overlap: `a.start < b.end && b.start < a.end`.
///
/// Pure and symmetric. Total over well-formed slots; rejects zero-length
/// intervals with [`SchedulingError::InvalidInterval`].
pub fn overlaps(a: &TimeSlot, b: &TimeSlot) -> Result<bool, SchedulingError> {
    a.validate()?;
    b.validate()?;
    Ok(a.start() < b.end() && b.start() < a.end())
}
