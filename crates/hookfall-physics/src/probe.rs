//! Rapier-backed implementations of the gameplay query traits

use glam::Vec3;
use hookfall_core::{GroundResolver, ObstructionQuery, PointerRay, RayCaster};
use rapier3d::prelude::*;

use crate::PhysicsWorld;

/// Tuning for world probes
#[derive(Debug, Clone, Copy)]
pub struct ProbeConfig {
    /// Minimum Y component of a surface normal for it to count as ground
    pub min_ground_normal_y: f32,
    /// Longest pointer ray considered when picking ground
    pub max_pick_distance: f32,
    /// Extra distance kept between a moving body and obstacles
    pub clearance: f32,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            min_ground_normal_y: 0.7,
            max_pick_distance: 500.0,
            clearance: 0.5,
        }
    }
}

/// Borrowed view of a [`PhysicsWorld`] that answers gameplay queries,
/// ignoring one collider (normally the querying body's own).
pub struct WorldProbe<'a> {
    world: &'a PhysicsWorld,
    exclude: Option<ColliderHandle>,
    pub config: ProbeConfig,
}

impl<'a> WorldProbe<'a> {
    pub fn new(world: &'a PhysicsWorld, exclude: Option<ColliderHandle>, config: ProbeConfig) -> Self {
        Self {
            world,
            exclude,
            config,
        }
    }

    /// Replace the probe configuration
    pub fn with_config(mut self, config: ProbeConfig) -> Self {
        self.config = config;
        self
    }

    fn filter(&self) -> QueryFilter<'static> {
        match self.exclude {
            Some(handle) => QueryFilter::default().exclude_collider(handle),
            None => QueryFilter::default(),
        }
    }
}

impl GroundResolver for WorldProbe<'_> {
    fn resolve_ground_point(&self, ray: &PointerRay) -> Option<Vec3> {
        if ray.direction == Vec3::ZERO {
            return None;
        }
        let hit = self.world.raycast_detailed(
            ray.origin,
            ray.direction,
            self.config.max_pick_distance,
            self.filter(),
        )?;
        if hit.normal.y < self.config.min_ground_normal_y {
            tracing::trace!(normal = ?hit.normal, "pointer hit a non-walkable surface");
            return None;
        }
        Some(hit.point)
    }
}

impl ObstructionQuery for WorldProbe<'_> {
    fn is_blocked(&self, origin: Vec3, direction: Vec3, distance: f32) -> bool {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO || distance <= 0.0 {
            return false;
        }
        self.world
            .raycast(origin, direction, distance + self.config.clearance, self.filter())
            .is_some()
    }
}

impl RayCaster for WorldProbe<'_> {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }
        self.world
            .raycast(origin, direction, max_distance, self.filter())
            .map(|(_handle, distance)| distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> PhysicsWorld {
        let mut world = PhysicsWorld::new();
        world.create_ground(0.0);
        // Wall spanning x in [5, 6]
        world.create_static_box(Vec3::new(0.5, 2.0, 10.0), Vec3::new(5.5, 2.0, 0.0));
        world.update_queries();
        world
    }

    #[test]
    fn ground_pick_hits_floor() {
        let world = arena();
        let probe = world.probe(None);
        let ray = PointerRay::new(Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, -1.0, 1.0));
        let point = probe.resolve_ground_point(&ray).expect("should hit floor");
        assert!(point.y.abs() < 1e-3);
        assert!((point.z - 10.0).abs() < 1e-3);
    }

    #[test]
    fn ground_pick_rejects_walls_and_sky() {
        let world = arena();
        let probe = world.probe(None);

        let at_wall = PointerRay::new(Vec3::new(0.0, 1.0, 0.0), Vec3::X);
        assert!(probe.resolve_ground_point(&at_wall).is_none());

        let at_sky = PointerRay::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Y);
        assert!(probe.resolve_ground_point(&at_sky).is_none());
    }

    #[test]
    fn obstruction_includes_clearance() {
        let world = arena();
        let probe = world.probe(None);
        let origin = Vec3::new(0.0, 1.0, 0.0);

        assert!(!probe.is_blocked(origin, Vec3::X, 4.0));
        assert!(probe.is_blocked(origin, Vec3::X, 4.75));
        assert!(!probe.is_blocked(origin, Vec3::NEG_X, 100.0));
        assert!(!probe.is_blocked(origin, Vec3::ZERO, 100.0));
    }

    #[test]
    fn excluded_collider_is_ignored() {
        let mut world = arena();
        let own = world.create_static_box(Vec3::splat(0.5), Vec3::new(0.0, 1.0, 0.0));
        world.update_queries();

        let origin = Vec3::new(0.0, 1.0, 0.0);
        assert!(world.probe(None).is_blocked(origin, Vec3::NEG_X, 1.0));
        assert!(!world.probe(Some(own)).is_blocked(origin, Vec3::NEG_X, 1.0));
    }

    #[test]
    fn ray_caster_reports_distance() {
        let world = arena();
        let probe = world.probe(None);
        let distance = probe
            .cast_ray(Vec3::new(0.0, 1.0, 0.0), Vec3::X, 10.0)
            .expect("wall within range");
        assert!((distance - 5.0).abs() < 1e-3);
        assert!(probe.cast_ray(Vec3::new(0.0, 1.0, 0.0), Vec3::X, 3.0).is_none());
    }
}
