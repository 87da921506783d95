//! Textual validation of raw form input.
//!
//! Quantities are accepted only when they are written as plain ASCII digits
//! and are strictly positive. Decimal points, signs and whitespace are all
//! rejected, so `"12.5"`, `"-3"` and `" 5"` fail exactly like `"abc"`.

use std::fmt;

use super::errors::{DomainError, DomainResult};
use super::models::WorkoutKind;

/// The numeric fields of the workout form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Distance,
    Duration,
    Cadence,
    ElevationGain,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputField::Distance => "distance",
            InputField::Duration => "duration",
            InputField::Cadence => "cadence",
            InputField::ElevationGain => "elevation gain",
        };
        f.write_str(name)
    }
}

/// Parses `raw` as a positive whole number.
///
/// Values that match the digit pattern but overflow `u32` are rejected with
/// the same error as any other malformed input.
pub fn parse_positive_integer(field: InputField, raw: &str) -> DomainResult<u32> {
    let invalid = || DomainError::InvalidInput {
        field,
        value: raw.to_string(),
    };

    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    match raw.parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(invalid()),
    }
}

/// Raw text read from the form, before validation.
#[derive(Debug, Clone, Copy)]
pub struct WorkoutInput<'a> {
    pub kind: WorkoutKind,
    pub distance: &'a str,
    pub duration: &'a str,
    pub cadence: &'a str,
    pub elevation_gain: &'a str,
}

/// Validated quantities for a workout of a known kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurements {
    pub kind: WorkoutKind,
    pub distance: u32,
    pub duration: u32,
    /// Cadence for running, elevation gain for cycling.
    pub attribute: u32,
}

impl WorkoutInput<'_> {
    /// Checks distance, duration and the attribute of the selected kind.
    ///
    /// The attribute of the other kind is ignored, whatever it contains.
    pub fn validate(&self) -> DomainResult<Measurements> {
        let distance = parse_positive_integer(InputField::Distance, self.distance)?;
        let duration = parse_positive_integer(InputField::Duration, self.duration)?;
        let attribute = match self.kind {
            WorkoutKind::Running => parse_positive_integer(InputField::Cadence, self.cadence)?,
            WorkoutKind::Cycling => {
                parse_positive_integer(InputField::ElevationGain, self.elevation_gain)?
            }
        };

        Ok(Measurements {
            kind: self.kind,
            distance,
            duration,
            attribute,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_input<'a>(distance: &'a str, duration: &'a str, cadence: &'a str) -> WorkoutInput<'a> {
        WorkoutInput {
            kind: WorkoutKind::Running,
            distance,
            duration,
            cadence,
            elevation_gain: "",
        }
    }

    #[test]
    fn test_accepts_plain_digits() {
        assert_eq!(parse_positive_integer(InputField::Distance, "5"), Ok(5));
        assert_eq!(parse_positive_integer(InputField::Distance, "007"), Ok(7));
        assert_eq!(parse_positive_integer(InputField::Duration, "4294967295"), Ok(u32::MAX));
    }

    #[test]
    fn test_rejects_non_digit_patterns() {
        for raw in ["", "0", "00", "-5", "+5", "3.2", "12.5", "abc", " 5", "5 ", "1e3", "٣"] {
            let result = parse_positive_integer(InputField::Distance, raw);
            assert_eq!(
                result,
                Err(DomainError::InvalidInput {
                    field: InputField::Distance,
                    value: raw.to_string(),
                }),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_overflowing_digits() {
        assert!(parse_positive_integer(InputField::Cadence, "4294967296").is_err());
        assert!(parse_positive_integer(InputField::Cadence, "99999999999999999999").is_err());
    }

    #[test]
    fn test_validate_reports_first_bad_field() {
        let err = running_input("-1", "abc", "0").validate().unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput { field: InputField::Distance, .. }));

        let err = running_input("5", "abc", "0").validate().unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput { field: InputField::Duration, .. }));

        let err = running_input("5", "30", "0").validate().unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput { field: InputField::Cadence, .. }));
    }

    #[test]
    fn test_validate_ignores_other_kind_attribute() {
        let measurements = running_input("5", "30", "160").validate().unwrap();
        assert_eq!(measurements.attribute, 160);

        let cycling = WorkoutInput {
            kind: WorkoutKind::Cycling,
            distance: "10",
            duration: "60",
            cadence: "not a number",
            elevation_gain: "200",
        };
        let measurements = cycling.validate().unwrap();
        assert_eq!(measurements.kind, WorkoutKind::Cycling);
        assert_eq!(measurements.attribute, 200);
    }

    #[test]
    fn test_error_message_names_field() {
        let err = parse_positive_integer(InputField::ElevationGain, "x").unwrap_err();
        assert_eq!(err.to_string(), "elevation gain must be a positive whole number, got \"x\"");
        assert_eq!(err.alert_message(), "Inputs have to be positive numbers.");
    }
}
