//! Kinematic body abstraction
//!
//! Gameplay controllers never integrate forces. They relocate and turn a body
//! directly, one fixed step at a time, through this trait.

use glam::{Quat, Vec3};

use crate::Transform;

/// Planar directions shorter than this have no usable heading
const MIN_HEADING_LENGTH: f32 = 1e-5;

/// An entity with a position and orientation that a controller can drive.
pub trait KinematicBody {
    /// Current world position
    fn position(&self) -> Vec3;

    /// Current world orientation
    fn rotation(&self) -> Quat;

    /// Relocate the body
    fn move_to(&mut self, position: Vec3);

    /// Replace the orientation outright
    fn set_rotation(&mut self, rotation: Quat);

    /// Turn toward `target`, by at most `max_degrees`
    fn rotate_towards(&mut self, target: Quat, max_degrees: f32) {
        let next = rotate_towards(self.rotation(), target, max_degrees);
        self.set_rotation(next);
    }

    /// Forward direction (negative Z in local space)
    fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }
}

impl KinematicBody for Transform {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn move_to(&mut self, position: Vec3) {
        self.position = position;
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }
}

/// Yaw-only rotation whose forward axis points along `direction` projected
/// onto the ground plane. `None` when the direction is (nearly) vertical or zero.
pub fn facing_rotation(direction: Vec3) -> Option<Quat> {
    let planar = Vec3::new(direction.x, 0.0, direction.z);
    if planar.length() < MIN_HEADING_LENGTH {
        return None;
    }
    let planar = planar.normalize();
    Some(Quat::from_rotation_y((-planar.x).atan2(-planar.z)))
}

/// Rotate `from` toward `to` by at most `max_degrees`
pub fn rotate_towards(from: Quat, to: Quat, max_degrees: f32) -> Quat {
    let angle = from.angle_between(to);
    let max_radians = max_degrees.max(0.0).to_radians();
    if angle <= max_radians || angle < f32::EPSILON {
        to
    } else {
        from.slerp(to, max_radians / angle)
    }
}
