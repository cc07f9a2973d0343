//! Grappling hook module
//!
//! The hook is a projectile that flies straight until it either latches onto
//! an enemy or runs out of time. Either way it reports back exactly once.

mod config;
mod enemy;
mod launcher;
mod projectile;

pub use config::HookConfig;
pub use enemy::{Enemy, EnemyRoster, HookTargets};
pub use launcher::HookLauncher;
pub use projectile::{HookOutcome, HookProjectile, ProjectilePhase};

use glam::Vec3;

/// Identifies a projectile fired by a spawner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectileHandle(pub u64);

/// One-shot end-of-hook notification
pub type EndHook = Box<dyn FnOnce(HookOutcome)>;

/// Something that can put a hook projectile into the world
pub trait ProjectileSpawner {
    /// Fire from `origin` along unit `direction`; `on_end` runs when the
    /// projectile hits or expires.
    fn spawn_projectile(&mut self, origin: Vec3, direction: Vec3, on_end: EndHook) -> ProjectileHandle;
}

/// Heading on the ground plane in degrees, counter-clockwise from +X when
/// viewed from above, in `[0, 360)`
pub fn heading_degrees(direction: Vec3) -> f32 {
    let degrees = (-direction.z).atan2(direction.x).to_degrees();
    if degrees < 0.0 {
        degrees + 360.0
    } else {
        degrees
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_quadrants() {
        assert!((heading_degrees(Vec3::X) - 0.0).abs() < 1e-4);
        assert!((heading_degrees(Vec3::NEG_Z) - 90.0).abs() < 1e-4);
        assert!((heading_degrees(Vec3::NEG_X) - 180.0).abs() < 1e-4);
        assert!((heading_degrees(Vec3::Z) - 270.0).abs() < 1e-4);
    }
}
