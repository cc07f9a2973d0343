//! World queries gameplay code consumes from the host engine

use glam::Vec3;

/// A ray in world space, typically unprojected from the cursor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerRay {
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
}

impl PointerRay {
    /// Create a ray, normalizing the direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Intersect with the horizontal plane `y = height`
    pub fn intersect_ground_plane(&self, height: f32) -> Option<Vec3> {
        if self.direction.y.abs() < f32::EPSILON {
            return None;
        }
        let t = (height - self.origin.y) / self.direction.y;
        (t >= 0.0).then(|| self.at(t))
    }
}

/// Converts a pointer ray into a walkable ground position
pub trait GroundResolver {
    /// `None` when the ray does not hit a valid ground surface
    fn resolve_ground_point(&self, ray: &PointerRay) -> Option<Vec3>;
}

/// Tests whether a straight move would run into world geometry
pub trait ObstructionQuery {
    fn is_blocked(&self, origin: Vec3, direction: Vec3, distance: f32) -> bool;
}

/// Distance to the first surface along a ray
pub trait RayCaster {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32>;
}

/// A flat, infinite ground with nothing on it.
///
/// Useful for hosts without a physics backend and for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenGround {
    pub height: f32,
}

impl GroundResolver for OpenGround {
    fn resolve_ground_point(&self, ray: &PointerRay) -> Option<Vec3> {
        ray.intersect_ground_plane(self.height)
    }
}

impl ObstructionQuery for OpenGround {
    fn is_blocked(&self, _origin: Vec3, _direction: Vec3, _distance: f32) -> bool {
        false
    }
}

impl RayCaster for OpenGround {
    fn cast_ray(&self, _origin: Vec3, _direction: Vec3, _max_distance: f32) -> Option<f32> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_hits_ground_below() {
        let ray = PointerRay::new(Vec3::new(0.0, 10.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let hit = ray.intersect_ground_plane(0.0).unwrap();
        assert!((hit - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn ray_pointing_at_sky_misses() {
        let ray = PointerRay::new(Vec3::new(0.0, 10.0, 0.0), Vec3::Y);
        assert!(OpenGround::default().resolve_ground_point(&ray).is_none());

        let level = PointerRay::new(Vec3::new(0.0, 10.0, 0.0), Vec3::X);
        assert!(level.intersect_ground_plane(0.0).is_none());
    }
}
