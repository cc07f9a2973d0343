//! Camera configuration

use glam::Vec3;
use hookfall_core::ConfigError;
use serde::{Deserialize, Serialize};

/// Follow camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowConfig {
    /// Straight-line distance from the target
    pub distance: f32,
    /// Angle below the horizon the camera looks down at, in degrees
    pub depression_degrees: f32,
    /// Per-axis catch-up rate (multiplied by dt, clamped to 1)
    pub damping: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self {
            distance: 17.0,
            depression_degrees: 65.0,
            damping: Vec3::splat(50.0),
            fov_degrees: 60.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl FollowConfig {
    /// Check the config for unusable values
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_positive("camera.distance", self.distance)?;
        ConfigError::require_positive("camera.fov_degrees", self.fov_degrees)?;
        ConfigError::require_positive("camera.near", self.near)?;
        ConfigError::require_ordered("camera.near", self.near, "camera.far", self.far)
    }

    /// Offset from the target to the camera: behind (+Z) and above
    pub fn offset(&self) -> Vec3 {
        let angle = self.depression_degrees.to_radians();
        Vec3::Z * (angle.cos() * self.distance) + Vec3::Y * (angle.sin() * self.distance)
    }
}
