//! Kinematic body backed by a rapier capsule collider

use glam::{Quat, Vec3};
use hookfall_core::KinematicBody;
use rapier3d::prelude::*;

use crate::PhysicsWorld;

/// Height the contact test is lifted by so the floor underfoot never counts
const GROUND_SKIN: f32 = 0.05;

/// Capsule dimensions for a physics body
#[derive(Debug, Clone)]
pub struct PhysicsBodyConfig {
    /// Capsule height, end to end (default: 2.0m)
    pub height: f32,
    /// Capsule radius (default: 0.5m)
    pub radius: f32,
}

impl Default for PhysicsBodyConfig {
    fn default() -> Self {
        Self {
            height: 2.0,
            radius: 0.5,
        }
    }
}

/// A body whose pose is driven by gameplay code and mirrored into the
/// collision world with [`PhysicsBody::sync`].
///
/// `position` is the capsule centre, so a default body standing on the ground
/// plane sits at `y = 1`.
#[derive(Debug, Clone)]
pub struct PhysicsBody {
    /// Configuration
    pub config: PhysicsBodyConfig,
    /// Current position (capsule centre)
    position: Vec3,
    /// Current orientation
    rotation: Quat,
    /// The collider handle for this body
    pub collider_handle: Option<ColliderHandle>,
}

impl PhysicsBody {
    /// Create a body with default dimensions
    pub fn new() -> Self {
        Self::with_config(PhysicsBodyConfig::default())
    }

    /// Create a body with custom dimensions
    pub fn with_config(config: PhysicsBodyConfig) -> Self {
        Self {
            config,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            collider_handle: None,
        }
    }

    /// Spawn the body's collider in the world
    pub fn spawn(&mut self, physics: &mut PhysicsWorld, position: Vec3) -> ColliderHandle {
        if let Some(old) = self.collider_handle.take() {
            physics.remove_collider(old);
        }
        self.position = position;

        let collider = ColliderBuilder::capsule_y(self.half_height(), self.config.radius)
            .translation(vector![position.x, position.y, position.z])
            .friction(0.0)
            .restitution(0.0)
            .build();

        let handle = physics.add_static_collider(collider);
        self.collider_handle = Some(handle);
        handle
    }

    /// Push the current position into the collider
    pub fn sync(&self, physics: &mut PhysicsWorld) {
        if let Some(handle) = self.collider_handle {
            physics.set_collider_translation(handle, self.position);
        }
    }

    /// Remove the collider from the world
    pub fn despawn(&mut self, physics: &mut PhysicsWorld) {
        if let Some(handle) = self.collider_handle.take() {
            physics.remove_collider(handle);
        }
    }

    /// Lowest point of the capsule
    pub fn feet_position(&self) -> Vec3 {
        self.position - Vec3::Y * (self.config.height / 2.0)
    }

    /// Blocking terrain the body currently overlaps. Its own collider and
    /// the ground it stands on are ignored.
    pub fn blocking_contact(&self, physics: &PhysicsWorld) -> Option<ColliderHandle> {
        let filter = match self.collider_handle {
            Some(handle) => QueryFilter::default().exclude_collider(handle),
            None => QueryFilter::default(),
        };
        physics.capsule_overlap(
            self.position + Vec3::Y * GROUND_SKIN,
            self.half_height(),
            self.config.radius,
            filter,
        )
    }

    /// Half the length of the capsule's straight section
    fn half_height(&self) -> f32 {
        ((self.config.height - 2.0 * self.config.radius) / 2.0).max(0.01)
    }
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self::new()
    }
}

impl KinematicBody for PhysicsBody {
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
