//! Hook configuration

use hookfall_core::ConfigError;
use serde::{Deserialize, Serialize};

/// Hook projectile configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HookConfig {
    /// Flight speed in meters per second, also the pull speed on a hit
    pub speed: f32,
    /// Seconds before an unattached hook gives up
    pub time_to_live: f32,
    /// Radius of the hook's trigger volume
    pub radius: f32,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            speed: 10.0,
            time_to_live: 1.0,
            radius: 0.5,
        }
    }
}

impl HookConfig {
    /// Check the config for unusable values
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_positive("hook.speed", self.speed)?;
        ConfigError::require_positive("hook.time_to_live", self.time_to_live)?;
        ConfigError::require_positive("hook.radius", self.radius)
    }

    /// Farthest the hook can travel
    pub fn range(&self) -> f32 {
        self.speed * self.time_to_live
    }
}
