use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder shown while no best time has been recorded.
pub const NO_RECORD: &str = "--:--:--";

/// Duration of a run in seconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RaceTime(f32);

impl RaceTime {
    pub const ZERO: Self = Self(0.0);

    /// Returns `None` for negative or non-finite values.
    pub fn from_secs(secs: f32) -> Option<Self> {
        (secs.is_finite() && secs >= 0.0).then_some(Self(secs))
    }

    pub fn as_secs(self) -> f32 {
        self.0
    }

    /// Formats the time as `MM:SS.CC`, truncating every component.
    pub fn format(self) -> String {
        let hundredths = (self.0 * 100.0).floor() as u64;
        let minutes = hundredths / 6000;
        let seconds = (hundredths / 100) % 60;
        let centis = hundredths % 100;
        format!("{minutes:02}:{seconds:02}.{centis:02}")
    }
}

impl fmt::Display for RaceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

pub fn format_best(best: Option<RaceTime>) -> String {
    best.map(RaceTime::format)
        .unwrap_or_else(|| NO_RECORD.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(value: f32) -> RaceTime {
        RaceTime::from_secs(value).unwrap()
    }

    #[test]
    fn formats_minutes_seconds_and_hundredths() {
        assert_eq!(secs(12.34).format(), "00:12.34");
        assert_eq!(secs(65.5).format(), "01:05.50");
        assert_eq!(RaceTime::ZERO.format(), "00:00.00");
    }

    #[test]
    fn truncates_instead_of_rounding() {
        assert_eq!(secs(59.999).format(), "00:59.99");
        assert_eq!(secs(1.0 / 3.0).format(), "00:00.33");
    }

    #[test]
    fn minutes_are_not_capped() {
        assert_eq!(secs(3660.0).format(), "61:00.00");
    }

    #[test]
    fn rejects_negative_and_non_finite_values() {
        assert!(RaceTime::from_secs(-0.5).is_none());
        assert!(RaceTime::from_secs(f32::NAN).is_none());
        assert!(RaceTime::from_secs(f32::INFINITY).is_none());
    }

    #[test]
    fn missing_best_uses_placeholder() {
        assert_eq!(format_best(None), NO_RECORD);
        assert_eq!(format_best(Some(secs(10.0))), "00:10.00");
    }
}
