//! Hookfall Physics - Collision queries using rapier3d
//!
//! Provides static level geometry, raycasts, ground picking, and the
//! rapier-backed implementations of the gameplay query traits.

mod body;
mod probe;

pub use body::{PhysicsBody, PhysicsBodyConfig};
pub use probe::{ProbeConfig, WorldProbe};

use glam::Vec3;
use nalgebra::Unit;
use rapier3d::prelude::*;

/// The collision world: level geometry plus the colliders of moving bodies
pub struct PhysicsWorld {
    /// Rigid body storage (colliders here are parentless, but queries need the set)
    pub rigid_body_set: RigidBodySet,
    /// Collider storage
    pub collider_set: ColliderSet,

    /// Island manager
    island_manager: IslandManager,
    /// Query pipeline for raycasts
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create an empty world
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            island_manager: IslandManager::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Refresh the acceleration structure after colliders were added or moved
    pub fn update_queries(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add a static collider (ground, walls, etc.)
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        self.collider_set.insert(collider)
    }

    /// Remove a collider
    pub fn remove_collider(&mut self, handle: ColliderHandle) {
        self.collider_set
            .remove(handle, &mut self.island_manager, &mut self.rigid_body_set, true);
    }

    /// Get a collider by handle
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Move a collider without touching its shape
    pub fn set_collider_translation(&mut self, handle: ColliderHandle, position: Vec3) {
        if let Some(collider) = self.collider_set.get_mut(handle) {
            collider.set_translation(vector![position.x, position.y, position.z]);
        }
    }

    /// Cast a ray and return the first hit
    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: QueryFilter,
    ) -> Option<(ColliderHandle, f32)> {
        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );

        self.query_pipeline.cast_ray(
            &self.rigid_body_set,
            &self.collider_set,
            &ray,
            max_distance,
            true,
            filter,
        )
    }

    /// Cast a ray and get detailed hit information
    pub fn raycast_detailed(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: QueryFilter,
    ) -> Option<RaycastHit> {
        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );

        self.query_pipeline
            .cast_ray_and_get_normal(
                &self.rigid_body_set,
                &self.collider_set,
                &ray,
                max_distance,
                true,
                filter,
            )
            .map(|(handle, intersection)| RaycastHit {
                collider: handle,
                distance: intersection.time_of_impact,
                point: origin + direction * intersection.time_of_impact,
                normal: Vec3::new(
                    intersection.normal.x,
                    intersection.normal.y,
                    intersection.normal.z,
                ),
            })
    }

    /// Create a ground plane collider
    pub fn create_ground(&mut self, y: f32) -> ColliderHandle {
        let normal = Unit::new_normalize(vector![0.0, 1.0, 0.0]);
        let ground = ColliderBuilder::halfspace(normal)
            .translation(vector![0.0, y, 0.0])
            .friction(0.7)
            .restitution(0.0)
            .build();
        self.add_static_collider(ground)
    }

    /// Create a static box collider (walls, crates, raised platforms)
    pub fn create_static_box(&mut self, half_extents: Vec3, position: Vec3) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![position.x, position.y, position.z])
            .friction(0.7)
            .build();
        self.add_static_collider(collider)
    }

    /// First collider overlapping an upright capsule centred at `center`
    pub fn capsule_overlap(
        &self,
        center: Vec3,
        half_height: f32,
        radius: f32,
        filter: QueryFilter,
    ) -> Option<ColliderHandle> {
        let shape = Capsule::new_y(half_height, radius);
        let pose = Isometry::translation(center.x, center.y, center.z);
        self.query_pipeline.intersection_with_shape(
            &self.rigid_body_set,
            &self.collider_set,
            &pose,
            &shape,
            filter,
        )
    }

    /// Query helper that implements the gameplay traits, ignoring `exclude`
    pub fn probe(&self, exclude: Option<ColliderHandle>) -> WorldProbe<'_> {
        WorldProbe::new(self, exclude, ProbeConfig::default())
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Detailed raycast hit information
#[derive(Debug, Clone)]
pub struct RaycastHit {
    /// The collider that was hit
    pub collider: ColliderHandle,
    /// Distance along the ray to the hit point
    pub distance: f32,
    /// World-space hit point
    pub point: Vec3,
    /// Surface normal at hit point
    pub normal: Vec3,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_creation() {
        let mut world = PhysicsWorld::new();
        let ground = world.create_ground(0.0);
        assert!(world.get_collider(ground).is_some());

        world.remove_collider(ground);
        assert!(world.get_collider(ground).is_none());
    }

    #[test]
    fn test_raycast() {
        let mut world = PhysicsWorld::new();
        world.create_ground(0.0);
        world.update_queries();

        let hit = world.raycast(
            Vec3::new(0.0, 10.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            100.0,
            QueryFilter::default(),
        );
        let (_, distance) = hit.expect("ray should hit the ground");
        assert!((distance - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_raycast_detailed_reports_normal() {
        let mut world = PhysicsWorld::new();
        world.create_static_box(Vec3::new(1.0, 1.0, 1.0), Vec3::new(5.0, 1.0, 0.0));
        world.update_queries();

        let hit = world
            .raycast_detailed(Vec3::new(0.0, 1.0, 0.0), Vec3::X, 20.0, QueryFilter::default())
            .expect("ray should hit the box");
        assert!((hit.distance - 4.0).abs() < 1e-3);
        assert!((hit.point - Vec3::new(4.0, 1.0, 0.0)).length() < 1e-3);
        assert!((hit.normal - Vec3::NEG_X).length() < 1e-3);
    }

    #[test]
    fn test_capsule_overlap() {
        let mut world = PhysicsWorld::new();
        let wall = world.create_static_box(Vec3::new(0.5, 2.0, 2.0), Vec3::new(3.5, 2.0, 0.0));
        world.update_queries();

        let touching = world.capsule_overlap(Vec3::new(2.7, 1.0, 0.0), 0.5, 0.5, QueryFilter::default());
        assert_eq!(touching, Some(wall));
        let clear = world.capsule_overlap(Vec3::new(2.0, 1.0, 0.0), 0.5, 0.5, QueryFilter::default());
        assert_eq!(clear, None);
    }
}
