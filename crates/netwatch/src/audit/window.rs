use chrono::{Duration, Local, NaiveTime, Timelike};

use crate::error::ConfigError;

/// Slack added on both sides of a window, in seconds.
///
/// Twice this value must stay below one minute or windows of consecutive
/// audit runs overlap.
pub const WINDOW_SLACK_SECS: i64 = 15;

/// Tolerance interval around a scheduled notification time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    lower: NaiveTime,
    upper: NaiveTime,
}

impl TimeWindow {
    /// Window around `scheduled` for audits `2 * half_interval_minutes` apart:
    /// `[T - H min - 15 s, T + (H - 1) min + 15 s]`
    pub fn around(scheduled: NaiveTime, half_interval_minutes: i64) -> Self {
        let slack = Duration::seconds(WINDOW_SLACK_SECS);
        let lower = scheduled - Duration::minutes(half_interval_minutes) - slack;
        let upper = scheduled + Duration::minutes(half_interval_minutes - 1) + slack;

        Self { lower, upper }
    }

    /// Parse a `HH:MM:SS` scheduled time and build its window
    pub fn parse(scheduled: &str, half_interval_minutes: i64) -> Result<Self, ConfigError> {
        let time = NaiveTime::parse_from_str(scheduled, "%H:%M:%S")
            .map_err(|_| ConfigError::InvalidScheduledTime(scheduled.to_string()))?;

        Ok(Self::around(time, half_interval_minutes))
    }

    pub fn lower(&self) -> NaiveTime {
        self.lower
    }

    pub fn upper(&self) -> NaiveTime {
        self.upper
    }

    /// Inclusive membership test; windows crossing midnight wrap around
    pub fn contains(&self, time: NaiveTime) -> bool {
        if self.lower <= self.upper {
            self.lower <= time && time <= self.upper
        } else {
            time >= self.lower || time <= self.upper
        }
    }
}

/// Local time of day with seconds cleared, as compared against windows
pub fn truncated_now() -> NaiveTime {
    let now = Local::now().time();
    NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap_or(now)
}
