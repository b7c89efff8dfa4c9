use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Time-of-day as minutes since midnight.
///
/// All slot arithmetic (peak-window containment, subject-time proximity)
/// happens on this integer representation; the `"HH:MM"` string form only
/// appears at the serialization boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MinuteOfDay(u16);

/// Minutes in a full day; `MinuteOfDay` values are strictly below this.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

impl MinuteOfDay {
    /// Create from raw minutes since midnight. Values are clamped to the
    /// last minute of the day.
    pub const fn new(minutes: u16) -> Self {
        if minutes >= MINUTES_PER_DAY {
            Self(MINUTES_PER_DAY - 1)
        } else {
            Self(minutes)
        }
    }

    /// Create from an (hour, minute) pair.
    pub const fn from_hm(hour: u16, minute: u16) -> Self {
        Self::new(hour * 60 + minute)
    }

    /// Raw minutes since midnight.
    pub const fn minutes(&self) -> u16 {
        self.0
    }

    /// Hour component (0-23).
    pub const fn hour(&self) -> u16 {
        self.0 / 60
    }

    /// Minute component (0-59).
    pub const fn minute(&self) -> u16 {
        self.0 % 60
    }

    /// Absolute distance to another time-of-day, in minutes.
    pub fn distance(&self, other: MinuteOfDay) -> u16 {
        self.0.abs_diff(other.0)
    }

    /// Advance by `step` minutes; `None` once the day would overflow.
    pub fn advance(&self, step: u16) -> Option<MinuteOfDay> {
        let next = self.0.checked_add(step)?;
        if next >= MINUTES_PER_DAY {
            None
        } else {
            Some(Self(next))
        }
    }
}

impl fmt::Display for MinuteOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Parse error for `"HH:MM"` time-of-day strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid time of day '{0}', expected HH:MM")]
pub struct ParseTimeError(pub String);

impl FromStr for MinuteOfDay {
    type Err = ParseTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hh, mm) = s
            .split_once(':')
            .ok_or_else(|| ParseTimeError(s.to_string()))?;
        let hour: u16 = hh.parse().map_err(|_| ParseTimeError(s.to_string()))?;
        let minute: u16 = mm.parse().map_err(|_| ParseTimeError(s.to_string()))?;
        if hour > 23 || minute > 59 {
            return Err(ParseTimeError(s.to_string()));
        }
        Ok(Self::from_hm(hour, minute))
    }
}

impl Serialize for MinuteOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MinuteOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Weekday index with Sunday = 0, matching the recurring-block convention.
pub fn weekday_index(date: chrono::NaiveDate) -> u8 {
    use chrono::Datelike;
    date.weekday().num_days_from_sunday() as u8
}

/// Lowercase weekday name used for persisted placements and
/// day-of-week pattern keys.
pub fn weekday_name(date: chrono::NaiveDate) -> &'static str {
    use chrono::{Datelike, Weekday};
    match date.weekday() {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}
