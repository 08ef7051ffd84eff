//! Decimal degree to degrees-minutes-seconds formatting.
//!
//! The output is `D° M' S.SS"`. The sign is dropped: there is no hemisphere
//! letter and no minus marker, so `-8.5` and `8.5` format identically.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Seconds at or above this value print as `60.00` and carry into minutes
const SECONDS_CARRY: f64 = 59.995;

/// A coordinate component split into sexagesimal parts, sign dropped
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DmsParts {
    pub degrees: u32,
    /// 0..=59
    pub minutes: u32,
    /// 0.0..60.0, printed with two decimals
    pub seconds: f64,
}

impl DmsParts {
    /// Unsigned decimal degrees these parts describe
    pub fn to_decimal(&self) -> f64 {
        self.degrees as f64 + self.minutes as f64 / 60.0 + self.seconds / 3600.0
    }
}

impl fmt::Display for DmsParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}° {}' {:.2}\"", self.degrees, self.minutes, self.seconds)
    }
}

/// Split a decimal degree value into degrees, minutes and seconds.
///
/// Degrees come from the signed truncation of `value`; minutes and seconds
/// from the magnitude of the remaining fraction. Non-finite input yields
/// zeroed parts.
pub fn to_dms(value: f64) -> DmsParts {
    let whole = value.trunc();
    let minutes_float = (value - whole).abs() * 60.0;
    let minutes_whole = minutes_float.trunc();
    let mut seconds = (minutes_float - minutes_whole) * 60.0;

    let mut degrees = whole.abs() as u32;
    let mut minutes = minutes_whole as u32;

    if seconds >= SECONDS_CARRY {
        seconds = 0.0;
        minutes += 1;
    }
    if minutes >= 60 {
        minutes -= 60;
        degrees += 1;
    }
    if !seconds.is_finite() {
        seconds = 0.0;
    }

    DmsParts { degrees, minutes, seconds }
}

/// Format a decimal degree value as `D° M' S.SS"`
pub fn format_dms(value: f64) -> String {
    to_dms(value).to_string()
}

/// Parse a `D° M' S.SS"` string back into unsigned decimal degrees
pub fn parse_dms(text: &str) -> Option<f64> {
    let mut tokens = text.split_whitespace();
    let degrees = tokens.next()?.strip_suffix('°')?.parse::<u32>().ok()?;
    let minutes = tokens.next()?.strip_suffix('\'')?.parse::<u32>().ok()?;
    let seconds = tokens.next()?.strip_suffix('"')?.parse::<f64>().ok()?;
    if tokens.next().is_some() || minutes > 59 || !(0.0..60.0).contains(&seconds) {
        return None;
    }
    Some(DmsParts { degrees, minutes, seconds }.to_decimal())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_whole_and_half_degrees() {
        assert_eq!(format_dms(0.0), "0° 0' 0.00\"");
        assert_eq!(format_dms(12.5), "12° 30' 0.00\"");
        assert_eq!(format_dms(180.0), "180° 0' 0.00\"");
    }

    #[test]
    fn test_known_coordinate() {
        // Monas, Jakarta
        assert_eq!(format_dms(106.8271), "106° 49' 37.56\"");
        assert_eq!(format_dms(-6.1754), "6° 10' 31.44\"");
    }

    #[test]
    fn test_sign_is_dropped() {
        assert_eq!(format_dms(-8.5), format_dms(8.5));
        assert_eq!(format_dms(-0.25), "0° 15' 0.00\"");
    }

    #[test]
    fn test_seconds_carry_into_minutes() {
        // 59.9999 minutes worth of fraction would print as 60.00 seconds
        let value = 10.0 + 59.0 / 60.0 + 59.999 / 3600.0;
        let parts = to_dms(value);
        assert_eq!(parts.degrees, 11);
        assert_eq!(parts.minutes, 0);
        assert_eq!(format_dms(value), "11° 0' 0.00\"");
    }

    #[test]
    fn test_non_finite_input() {
        assert_eq!(format_dms(f64::NAN), "0° 0' 0.00\"");
    }

    #[test]
    fn test_parse_dms() {
        assert_eq!(parse_dms("12° 30' 0.00\""), Some(12.5));
        assert!(parse_dms("12 30 0").is_none());
        assert!(parse_dms("12° 75' 0.00\"").is_none());
        assert!(parse_dms("").is_none());
    }

    proptest! {
        #[test]
        fn prop_format_matches_pattern(value in -180.0f64..=180.0) {
            let text = format_dms(value);
            let parts = to_dms(value);

            prop_assert!(parts.minutes <= 59);
            prop_assert!(parts.seconds >= 0.0 && parts.seconds < 60.0);
            prop_assert_eq!(text.matches('°').count(), 1);
            prop_assert!(text.ends_with('"'));

            let (_, seconds_text) = text.rsplit_once(' ').unwrap();
            let decimals = seconds_text.trim_end_matches('"').split('.').nth(1).unwrap();
            prop_assert_eq!(decimals.len(), 2);
        }

        #[test]
        fn prop_reconstructs_magnitude(value in -180.0f64..=180.0) {
            let parsed = parse_dms(&format_dms(value)).unwrap();
            prop_assert!((parsed - value.abs()).abs() <= 0.01 / 3600.0);
        }
    }
}
