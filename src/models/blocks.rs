//! Calendar exclusion rules.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::time::{weekday_index, MinuteOfDay};

/// Block type string that disqualifies a matching day. Any other value is
/// informational and never excludes.
pub const BLOCK_TYPE_UNAVAILABLE: &str = "unavailable";

/// A calendar exclusion/inclusion rule, either date-specific or recurring
/// weekly.
///
/// The `start_time`/`end_time` range is carried for display but is not
/// intersected against candidate slots: an `"unavailable"` block on a
/// matching day disqualifies the entire day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingBlock {
    /// `"unavailable"` for hard exclusions; anything else is soft.
    pub block_type: String,
    /// Exact date the block applies to.
    #[serde(default)]
    pub specific_date: Option<NaiveDate>,
    /// Recurring weekday the block applies to (0 = Sunday .. 6 = Saturday).
    #[serde(default)]
    pub day_of_week: Option<u8>,
    #[serde(default)]
    pub start_time: Option<MinuteOfDay>,
    #[serde(default)]
    pub end_time: Option<MinuteOfDay>,
}

impl SchedulingBlock {
    /// A hard exclusion for one exact date.
    pub fn unavailable_on(date: NaiveDate) -> Self {
        Self {
            block_type: BLOCK_TYPE_UNAVAILABLE.to_string(),
            specific_date: Some(date),
            day_of_week: None,
            start_time: None,
            end_time: None,
        }
    }

    /// A hard exclusion recurring on one weekday (0 = Sunday .. 6 = Saturday).
    pub fn unavailable_weekly(day_of_week: u8) -> Self {
        Self {
            block_type: BLOCK_TYPE_UNAVAILABLE.to_string(),
            specific_date: None,
            day_of_week: Some(day_of_week),
            start_time: None,
            end_time: None,
        }
    }

    /// Attach a time range. Display-only; does not narrow the exclusion.
    pub fn with_times(mut self, start_time: MinuteOfDay, end_time: MinuteOfDay) -> Self {
        self.start_time = Some(start_time);
        self.end_time = Some(end_time);
        self
    }

    /// Whether this block is a hard exclusion.
    pub fn is_unavailable(&self) -> bool {
        self.block_type == BLOCK_TYPE_UNAVAILABLE
    }

    /// Whether this block applies to `date`, by exact date or by recurring
    /// weekday.
    pub fn matches_date(&self, date: NaiveDate) -> bool {
        if let Some(specific) = self.specific_date {
            if specific == date {
                return true;
            }
        }
        if let Some(dow) = self.day_of_week {
            if dow == weekday_index(date) {
                return true;
            }
        }
        false
    }
}
