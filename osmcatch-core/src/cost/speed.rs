//! Walking speed models

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Unit a walking speed is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpeedUnit {
    #[serde(rename = "m/s")]
    MetersPerSecond,
    #[default]
    #[serde(rename = "km/h")]
    KilometersPerHour,
}

impl SpeedUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MetersPerSecond => "m/s",
            Self::KilometersPerHour => "km/h",
        }
    }

    pub fn to_meters_per_second(self, speed: f64) -> f64 {
        match self {
            Self::MetersPerSecond => speed,
            Self::KilometersPerHour => speed / 3.6,
        }
    }

    pub fn from_meters_per_second(self, speed: f64) -> f64 {
        match self {
            Self::MetersPerSecond => speed,
            Self::KilometersPerHour => speed * 3.6,
        }
    }
}

impl FromStr for SpeedUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "m/s" => Ok(Self::MetersPerSecond),
            "km/h" => Ok(Self::KilometersPerHour),
            other => Err(Error::InvalidSpeedUnit(other.to_string())),
        }
    }
}

impl fmt::Display for SpeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grade (in percent) at which walkers reach their maximum speed
const FASTEST_GRADE_PCT: f64 = -5.0;
/// Spread of the speed penalty around the fastest grade, in percent
const GRADE_SPREAD_PCT: f64 = 30.0;

/// Empirical walking speed in m/s on a signed percentage grade
///
/// Gaussian penalty centred on a 5% downhill grade after Irmischer & Clarke
/// (2018). The speed tends to `max_speed - 1` on extreme grades.
pub(crate) fn irmischer_clarke_speed(grade_pct: f64, max_speed_mps: f64) -> f64 {
    let offset = grade_pct - FASTEST_GRADE_PCT;
    (max_speed_mps - 1.0) + (-(offset * offset) / (2.0 * GRADE_SPREAD_PCT * GRADE_SPREAD_PCT)).exp()
}

/// The gradient model bottoms out at `max_speed - 1`, so anything at or
/// below 1 m/s could stall walkers on steep streets
pub(crate) fn validate_max_speed(max_speed_mps: f64) -> Result<(), Error> {
    if max_speed_mps.is_finite() && max_speed_mps > 1.0 {
        Ok(())
    } else {
        Err(Error::InvalidSpeed(max_speed_mps))
    }
}

fn validate_finite_speed(max_speed_mps: f64) -> Result<(), Error> {
    if max_speed_mps.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidSpeed(max_speed_mps))
    }
}

/// Walking speed on a single grade
///
/// * `grade_pct` - rise over run times 100, negative is downhill
/// * `max_speed_mps` - speed reached on a 5% downhill grade, in m/s
/// * `unit` - unit of the result, `"m/s"` or `"km/h"`
///
/// # Errors
///
/// Returns [`Error::InvalidSpeedUnit`] for any other unit and
/// [`Error::InvalidSpeed`] if `max_speed_mps` is not finite
pub fn walk_speed_on_grade(grade_pct: f64, max_speed_mps: f64, unit: &str) -> Result<f64, Error> {
    let unit = SpeedUnit::from_str(unit)?;
    validate_finite_speed(max_speed_mps)?;
    Ok(unit.from_meters_per_second(irmischer_clarke_speed(grade_pct, max_speed_mps)))
}

/// Walking speed for each grade of a sequence, in input order
///
/// See [`walk_speed_on_grade`] for the parameters.
pub fn gradient_adjusted_walk_speed(
    grades_pct: &[f64],
    max_speed_mps: f64,
    unit: &str,
) -> Result<Vec<f64>, Error> {
    let unit = SpeedUnit::from_str(unit)?;
    validate_finite_speed(max_speed_mps)?;
    Ok(grades_pct
        .iter()
        .map(|&grade| unit.from_meters_per_second(irmischer_clarke_speed(grade, max_speed_mps)))
        .collect())
}
