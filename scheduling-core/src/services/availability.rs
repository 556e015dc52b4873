//! Availability checks over a calendar of existing slots.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::config::BusinessHours;
use crate::error::SchedulingError;
use crate::models::{overlaps, TimeSlot};

/// Result of an availability check.
///
/// Carries the full conflict set rather than just a flag so callers can
/// render per-conflict diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct Availability {
    pub available: bool,
    pub conflicts: Vec<TimeSlot>,
}

/// Scan `existing` for every slot on the same date that overlaps
/// `requested`.
pub fn check_availability(
    requested: &TimeSlot,
    existing: &[TimeSlot],
) -> Result<Availability, SchedulingError> {
    requested.validate()?;

    let mut conflicts = Vec::new();
    for slot in existing {
        if slot.date != requested.date {
            continue;
        }
        if overlaps(requested, slot)? {
            conflicts.push(*slot);
        }
    }

    Ok(Availability {
        available: conflicts.is_empty(),
        conflicts,
    })
}

/// Enumerate every free slot of `duration_minutes` on `date`.
///
/// Candidates start at `business_hours.open` and advance by
/// `granularity_minutes`; a candidate is kept when it lies fully inside
/// business hours and overlaps no existing slot. Output is ordered by
/// ascending start time and is deterministic for a given calendar.
pub fn list_available_slots(
    date: NaiveDate,
    existing: &[TimeSlot],
    duration_minutes: u32,
    granularity_minutes: u32,
    business_hours: &BusinessHours,
) -> Result<Vec<TimeSlot>, SchedulingError> {
    if granularity_minutes == 0 {
        return Err(SchedulingError::InvalidGranularity { granularity_minutes });
    }

    let close = date.and_time(business_hours.close);
    let mut free = Vec::new();
    let mut start_time = business_hours.open;

    loop {
        let candidate = TimeSlot::new(date, start_time, duration_minutes);
        if candidate.end() > close {
            break;
        }
        if check_availability(&candidate, existing)?.available {
            free.push(candidate);
        }
        match start_time.overflowing_add_signed(Duration::minutes(i64::from(granularity_minutes))) {
            (next, 0) => start_time = next,
            // wrapped past midnight
            _ => break,
        }
    }

    Ok(free)
}
