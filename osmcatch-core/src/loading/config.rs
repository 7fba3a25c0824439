use serde::{Deserialize, Serialize};

use crate::cost::SpeedProfile;
use crate::{DEFAULT_ISO_BUFFER_M, Error};

/// Edge orientation used for reachability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkDirection {
    /// Walk edges only in the direction they were digitized
    AsDigitized,
    /// Mirror one-way edges so every street can be walked both ways
    #[default]
    Bidirectional,
}

/// Settings for building catchments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatchmentConfig {
    pub speed: SpeedProfile,
    /// Buffer in meters around traversed edges
    pub buffer_meters: f64,
    pub walk_direction: WalkDirection,
}

impl Default for CatchmentConfig {
    fn default() -> Self {
        Self {
            speed: SpeedProfile::default(),
            buffer_meters: DEFAULT_ISO_BUFFER_M,
            walk_direction: WalkDirection::default(),
        }
    }
}

impl CatchmentConfig {
    /// Parses and validates a TOML configuration
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for malformed TOML or unknown fields, and any
    /// validation error of [`CatchmentConfig::validate`]
    pub fn from_toml_str(source: &str) -> Result<Self, Error> {
        let config: Self = toml::from_str(source).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns an error for an invalid speed profile or buffer
    pub fn validate(&self) -> Result<(), Error> {
        self.speed.validate()?;
        if !self.buffer_meters.is_finite() || self.buffer_meters <= 0.0 {
            return Err(Error::InvalidBuffer(self.buffer_meters));
        }
        Ok(())
    }
}
