use std::fmt;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::DomainResult;
use super::validation::{Measurements, WorkoutInput};

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Lowercase tag used in persisted records and popup class names.
    pub fn as_str(self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Capitalized name used in display messages.
    pub fn label(self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃‍♂️",
            WorkoutKind::Cycling => "🚴‍♀️",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            WorkoutKind::Running => WorkoutKind::Cycling,
            WorkoutKind::Cycling => WorkoutKind::Running,
        }
    }
}

/// Opaque workout identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WorkoutId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind-specific attribute and derived metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkoutDetails {
    Running {
        #[serde(deserialize_with = "deserialize_quantity")]
        cadence: u32,
        /// Minutes per kilometre.
        pace: f64,
    },
    Cycling {
        #[serde(rename = "elevationGain", deserialize_with = "deserialize_quantity")]
        elevation_gain: u32,
        /// Kilometres per hour.
        speed: f64,
    },
}

/// A logged activity.
///
/// Fields are fixed at construction. Records read back from storage are
/// deserialized as-is: their metric and date are never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    id: WorkoutId,
    coords: Coords,
    #[serde(deserialize_with = "deserialize_quantity")]
    distance: u32,
    #[serde(deserialize_with = "deserialize_quantity")]
    duration: u32,
    date: String,
    #[serde(default)]
    icon: String,
    #[serde(flatten)]
    details: WorkoutDetails,
}

impl Workout {
    /// Validates `input` and builds a workout dated today.
    pub fn new(coords: Coords, input: &WorkoutInput<'_>) -> DomainResult<Self> {
        Self::new_on(coords, input, Local::now().date_naive())
    }

    pub fn new_on(coords: Coords, input: &WorkoutInput<'_>, date: NaiveDate) -> DomainResult<Self> {
        let measurements = input.validate()?;
        Ok(Self::from_measurements(coords, measurements, date))
    }

    pub fn running(coords: Coords, distance: &str, duration: &str, cadence: &str) -> DomainResult<Self> {
        Self::new(
            coords,
            &WorkoutInput {
                kind: WorkoutKind::Running,
                distance,
                duration,
                cadence,
                elevation_gain: "",
            },
        )
    }

    pub fn cycling(
        coords: Coords,
        distance: &str,
        duration: &str,
        elevation_gain: &str,
    ) -> DomainResult<Self> {
        Self::new(
            coords,
            &WorkoutInput {
                kind: WorkoutKind::Cycling,
                distance,
                duration,
                cadence: "",
                elevation_gain,
            },
        )
    }

    fn from_measurements(coords: Coords, m: Measurements, date: NaiveDate) -> Self {
        let distance = f64::from(m.distance);
        let duration = f64::from(m.duration);
        let details = match m.kind {
            WorkoutKind::Running => WorkoutDetails::Running {
                cadence: m.attribute,
                pace: duration / distance,
            },
            WorkoutKind::Cycling => WorkoutDetails::Cycling {
                elevation_gain: m.attribute,
                speed: distance / (duration / 60.0),
            },
        };

        Self {
            id: WorkoutId::generate(),
            coords,
            distance: m.distance,
            duration: m.duration,
            date: format_workout_date(date),
            icon: m.kind.icon().to_string(),
            details,
        }
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn distance(&self) -> u32 {
        self.distance
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    /// The stored icon, or the kind's default for records saved without one.
    pub fn icon(&self) -> &str {
        if self.icon.is_empty() {
            self.kind().icon()
        } else {
            &self.icon
        }
    }

    pub fn details(&self) -> &WorkoutDetails {
        &self.details
    }

    pub fn kind(&self) -> WorkoutKind {
        match self.details {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    pub fn cadence(&self) -> Option<u32> {
        match self.details {
            WorkoutDetails::Running { cadence, .. } => Some(cadence),
            WorkoutDetails::Cycling { .. } => None,
        }
    }

    pub fn elevation_gain(&self) -> Option<u32> {
        match self.details {
            WorkoutDetails::Cycling { elevation_gain, .. } => Some(elevation_gain),
            WorkoutDetails::Running { .. } => None,
        }
    }

    pub fn pace(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Running { pace, .. } => Some(pace),
            WorkoutDetails::Cycling { .. } => None,
        }
    }

    pub fn speed(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Cycling { speed, .. } => Some(speed),
            WorkoutDetails::Running { .. } => None,
        }
    }
}

/// Formats a date as month name and day, e.g. `"October 19"`.
pub fn format_workout_date(date: NaiveDate) -> String {
    date.format("%B %-d").to_string()
}

/// Accepts a non-negative quantity written either as a JSON number or as a
/// string of digits. Older snapshots stored the raw form text. Stored records
/// are taken as written, so zero is not rejected here.
fn deserialize_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct QuantityVisitor;

    impl Visitor<'_> for QuantityVisitor {
        type Value = u32;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a whole number or a string of digits")
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<u32, E> {
            u32::try_from(value).map_err(|_| E::custom(format!("quantity out of range: {value}")))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<u32, E> {
            u32::try_from(value).map_err(|_| E::custom(format!("quantity out of range: {value}")))
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<u32, E> {
            if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
                return Err(E::invalid_value(de::Unexpected::Str(value), &self));
            }
            value
                .parse::<u32>()
                .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(QuantityVisitor)
}
