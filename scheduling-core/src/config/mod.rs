use std::env;

use anyhow::Result;
use chrono::NaiveTime;
use dotenvy::dotenv;
use serde::Deserialize;

use crate::models::TimeSlot;

/// Opening hours a slot must fall entirely inside, as a half-open
/// `[open, close)` window on the slot's own date.
#[derive(Deserialize, Clone, Copy, Debug)]
pub struct BusinessHours {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl BusinessHours {
    pub fn contains_slot(&self, slot: &TimeSlot) -> bool {
        let open = slot.date.and_time(self.open);
        let close = slot.date.and_time(self.close);
        slot.start() >= open && slot.end() <= close
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct SchedulingConfig {
    pub business_hours: BusinessHours,
    pub min_duration_minutes: u32,
    pub max_duration_minutes: u32,
    pub slot_granularity_minutes: u32,
}

impl SchedulingConfig {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let open = match env::var("SCHEDULING_OPEN_TIME") {
            Ok(s) => NaiveTime::parse_from_str(&s, "%H:%M")?,
            Err(_) => NaiveTime::from_hms_opt(8, 0, 0).expect("valid open time"),
        };
        let close = match env::var("SCHEDULING_CLOSE_TIME") {
            Ok(s) => NaiveTime::parse_from_str(&s, "%H:%M")?,
            Err(_) => NaiveTime::from_hms_opt(18, 0, 0).expect("valid close time"),
        };
        let min_duration_minutes = env::var("SCHEDULING_MIN_DURATION_MINUTES")
            .unwrap_or_else(|_| "30".to_string())
            .parse()?;
        let max_duration_minutes = env::var("SCHEDULING_MAX_DURATION_MINUTES")
            .unwrap_or_else(|_| "240".to_string())
            .parse()?;
        let slot_granularity_minutes = env::var("SCHEDULING_SLOT_GRANULARITY_MINUTES")
            .unwrap_or_else(|_| "30".to_string())
            .parse()?;

        Ok(Self {
            business_hours: BusinessHours { open, close },
            min_duration_minutes,
            max_duration_minutes,
            slot_granularity_minutes,
        })
    }
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            business_hours: BusinessHours {
                open: NaiveTime::from_hms_opt(8, 0, 0).expect("valid open time"),
                close: NaiveTime::from_hms_opt(18, 0, 0).expect("valid close time"),
            },
            min_duration_minutes: 30,
            max_duration_minutes: 240,
            slot_granularity_minutes: 30,
        }
    }
}
