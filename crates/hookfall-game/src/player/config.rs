//! Locomotion configuration and constants

use hookfall_core::ConfigError;
use serde::{Deserialize, Serialize};

/// How a dash covers its distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashMode {
    /// Travel at `dashing_speed`, checking for obstacles before every step
    #[default]
    Slide,
    /// Check the whole path once and arrive in a single tick
    Blink,
}

/// Locomotion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Walking speed in meters per second
    pub walking_speed: f32,
    /// Dash speed in meters per second (slide mode)
    pub dashing_speed: f32,
    /// Shortest distance a dash covers
    pub min_dash_distance: f32,
    /// Longest distance a dash covers
    pub max_dash_distance: f32,
    /// Turn rate while walking, in degrees per second
    pub rotation_speed: f32,
    /// Slide or blink
    pub dash_mode: DashMode,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            walking_speed: 6.0,
            dashing_speed: 24.0,
            min_dash_distance: 4.0,
            max_dash_distance: 8.0,
            rotation_speed: 720.0,
            dash_mode: DashMode::Slide,
        }
    }
}

impl LocomotionConfig {
    /// Check the config for unusable values
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_positive("walking_speed", self.walking_speed)?;
        ConfigError::require_positive("dashing_speed", self.dashing_speed)?;
        ConfigError::require_positive("min_dash_distance", self.min_dash_distance)?;
        ConfigError::require_positive("rotation_speed", self.rotation_speed)?;
        ConfigError::require_ordered(
            "min_dash_distance",
            self.min_dash_distance,
            "max_dash_distance",
            self.max_dash_distance,
        )
    }

    /// Clamp a requested dash length into the allowed range. An inverted
    /// range resolves to `max_dash_distance`.
    pub fn clamp_dash_distance(&self, distance: f32) -> f32 {
        distance
            .max(self.min_dash_distance)
            .min(self.max_dash_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(LocomotionConfig::default().validate().is_ok());
    }

    #[test]
    fn inverted_dash_range_is_rejected() {
        let config = LocomotionConfig {
            min_dash_distance: 10.0,
            max_dash_distance: 5.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedRange { .. })
        ));
    }

    #[test]
    fn dash_distance_clamping() {
        let config = LocomotionConfig::default();
        assert_eq!(config.clamp_dash_distance(0.5), 4.0);
        assert_eq!(config.clamp_dash_distance(6.0), 6.0);
        assert_eq!(config.clamp_dash_distance(30.0), 8.0);
    }

    #[test]
    fn inverted_dash_range_clamps_without_panicking() {
        let config = LocomotionConfig {
            min_dash_distance: 10.0,
            max_dash_distance: 5.0,
            ..Default::default()
        };
        assert_eq!(config.clamp_dash_distance(1.0), 5.0);
        assert_eq!(config.clamp_dash_distance(7.0), 5.0);
    }
}
