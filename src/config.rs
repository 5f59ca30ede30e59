//! Animator timings and eye sizes
//!
//! The defaults are the values the critter was tuned with. A host may override
//! any of them from YAML; missing keys keep their defaults.

use serde::{Deserialize, Serialize};

use crate::critter::layout::EYE_DIAMETER;
use crate::error::{CritterError, Result};

pub const START_DURATION: f32 = 0.2;
pub const END_DURATION: f32 = 0.2;
pub const REST_DURATION: f32 = 0.1725;
pub const VALIDATION_DURATION: f32 = 0.125;
pub const DOE_EYE_DIAMETER: f32 = 12.7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorConfig {
    /// Glide into the initial-turn pose (seconds)
    pub start_duration: f32,
    /// Nominal length of the scrubbed turn; never played back by time
    pub end_duration: f32,
    /// Return to rest after the gesture ends (seconds)
    pub rest_duration: f32,
    /// Eye cross-fade and resize (seconds)
    pub validation_duration: f32,
    pub eye_diameter: f32,
    pub doe_eye_diameter: f32,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            start_duration: START_DURATION,
            end_duration: END_DURATION,
            rest_duration: REST_DURATION,
            validation_duration: VALIDATION_DURATION,
            eye_diameter: EYE_DIAMETER,
            doe_eye_diameter: DOE_EYE_DIAMETER,
        }
    }
}

impl AnimatorConfig {
    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: AnimatorConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn validate(&self) -> Result<()> {
        let durations = [
            ("start_duration", self.start_duration),
            ("end_duration", self.end_duration),
            ("rest_duration", self.rest_duration),
            ("validation_duration", self.validation_duration),
        ];
        for (name, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(CritterError::InvalidValue(format!(
                    "{} must be a non-negative number of seconds, got {}",
                    name, value
                )));
            }
        }

        for (name, value) in [
            ("eye_diameter", self.eye_diameter),
            ("doe_eye_diameter", self.doe_eye_diameter),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CritterError::InvalidValue(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnimatorConfig::default();
        assert_eq!(config.start_duration, 0.2);
        assert_eq!(config.rest_duration, 0.1725);
        assert_eq!(config.validation_duration, 0.125);
        assert_eq!(config.eye_diameter, 11.7);
        assert_eq!(config.doe_eye_diameter, 12.7);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = AnimatorConfig::from_yaml("rest_duration: 0.5\n").unwrap();
        assert_eq!(config.rest_duration, 0.5);
        assert_eq!(config.start_duration, START_DURATION);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = AnimatorConfig {
            validation_duration: 0.3,
            ..Default::default()
        };
        let yaml = config.to_yaml().unwrap();
        assert_eq!(AnimatorConfig::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_rejects_negative_duration() {
        let err = AnimatorConfig::from_yaml("start_duration: -1.0\n").unwrap_err();
        assert!(matches!(err, CritterError::InvalidValue(_)));
    }

    #[test]
    fn test_rejects_malformed_yaml() {
        let err = AnimatorConfig::from_yaml("start_duration: [").unwrap_err();
        assert!(matches!(err, CritterError::Config(_)));
    }
}
