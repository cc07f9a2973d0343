//! Follow camera with per-axis smoothing

use glam::{Mat4, Quat, Vec2, Vec3};
use hookfall_core::PointerRay;

use super::FollowConfig;

/// Camera that trails a target at a fixed offset
pub struct FollowCamera {
    /// Configuration
    pub config: FollowConfig,
    /// Offset from target, fixed at construction
    offset: Vec3,
    /// Camera world position
    position: Vec3,
    /// Camera orientation: pitched down by the depression angle
    rotation: Quat,
}

impl FollowCamera {
    /// Create a follow camera with default config
    pub fn new() -> Self {
        Self::with_config(FollowConfig::default())
    }

    /// Create a follow camera with custom config
    pub fn with_config(config: FollowConfig) -> Self {
        let offset = config.offset();
        let rotation = Quat::from_rotation_x(-config.depression_degrees.to_radians());
        Self {
            config,
            offset,
            position: offset,
            rotation,
        }
    }

    /// Get the camera's current world position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Get the camera's orientation
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Offset kept from the target
    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    /// Get the camera's forward direction
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Jump straight to the wanted position for `target`
    pub fn snap_to(&mut self, target: Vec3) {
        self.position = target + self.offset;
    }

    /// Ease toward `target + offset`. Holds position when there is no target.
    pub fn update(&mut self, target: Option<Vec3>, dt: f32) {
        let Some(target) = target else {
            return;
        };
        let wanted = target + self.offset;
        let t = (self.config.damping * dt.max(0.0)).clamp(Vec3::ZERO, Vec3::ONE);
        self.position += (wanted - self.position) * t;
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), Vec3::Y)
    }

    /// Get a projection matrix
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(
            self.config.fov_degrees.to_radians(),
            aspect_ratio,
            self.config.near,
            self.config.far,
        )
    }

    /// World-space ray under a cursor given in pixels from the top-left corner
    pub fn screen_ray(&self, cursor: Vec2, viewport: Vec2) -> PointerRay {
        let viewport = viewport.max(Vec2::ONE);
        let ndc = Vec2::new(
            2.0 * cursor.x / viewport.x - 1.0,
            1.0 - 2.0 * cursor.y / viewport.y,
        );
        let inverse = (self.projection_matrix(viewport.x / viewport.y) * self.view_matrix()).inverse();
        let near = inverse.project_point3(ndc.extend(0.0));
        let far = inverse.project_point3(ndc.extend(1.0));
        PointerRay::new(near, far - near)
    }
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_from_polar_pair() {
        let camera = FollowCamera::new();
        let offset = camera.offset();
        assert!((offset.length() - 17.0).abs() < 1e-3);
        assert!((offset.y - 17.0 * 65f32.to_radians().sin()).abs() < 1e-3);
        assert!(offset.x.abs() < 1e-6);
        assert!(offset.z > 0.0);
    }

    #[test]
    fn test_looks_at_target() {
        let mut camera = FollowCamera::new();
        let target = Vec3::new(3.0, 0.0, -2.0);
        camera.snap_to(target);
        let to_target = (target - camera.position()).normalize();
        assert!((camera.forward() - to_target).length() < 1e-4);
    }

    #[test]
    fn test_per_axis_smoothing() {
        let config = FollowConfig {
            damping: Vec3::new(5.0, 50.0, 0.0),
            ..Default::default()
        };
        let mut camera = FollowCamera::with_config(config);
        camera.snap_to(Vec3::ZERO);
        let start = camera.position();

        camera.update(Some(Vec3::new(10.0, 10.0, 10.0)), 0.1);
        let moved = camera.position() - start;
        // x: 5 * 0.1 = half way; y: clamped to all the way; z: frozen
        assert!((moved.x - 5.0).abs() < 1e-4);
        assert!((moved.y - 10.0).abs() < 1e-4);
        assert!(moved.z.abs() < 1e-6);
    }

    #[test]
    fn test_missing_target_holds_position() {
        let mut camera = FollowCamera::new();
        camera.snap_to(Vec3::new(1.0, 0.0, 1.0));
        let before = camera.position();
        camera.update(None, 0.5);
        assert_eq!(camera.position(), before);
    }

    #[test]
    fn test_screen_centre_ray_hits_target() {
        let mut camera = FollowCamera::new();
        let target = Vec3::new(4.0, 0.0, 7.0);
        camera.snap_to(target);

        let ray = camera.screen_ray(Vec2::new(640.0, 360.0), Vec2::new(1280.0, 720.0));
        let hit = ray.intersect_ground_plane(0.0).expect("centre ray should hit ground");
        assert!((hit - target).length() < 1e-2);

        // Right half of the screen picks points to the right of the target
        let right = camera.screen_ray(Vec2::new(1000.0, 360.0), Vec2::new(1280.0, 720.0));
        let hit = right.intersect_ground_plane(0.0).unwrap();
        assert!(hit.x > target.x);
    }
}
