//! Visibility fan built from radial raycasts

use glam::{Quat, Vec3};
use hookfall_core::{ConfigError, RayCaster};
use serde::{Deserialize, Serialize};

/// Fan resolution and reach
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FanConfig {
    /// How far the player can see
    pub max_distance: f32,
    /// Degrees between neighbouring rays
    pub angle_step: f32,
}

impl Default for FanConfig {
    fn default() -> Self {
        Self {
            max_distance: 10.0,
            angle_step: 6.0,
        }
    }
}

impl FanConfig {
    /// Check the config for unusable values
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_positive("vision.max_distance", self.max_distance)?;
        ConfigError::require_positive("vision.angle_step", self.angle_step)?;
        ConfigError::require_ordered("vision.angle_step", self.angle_step, "full circle", 360.0)
    }

    /// Number of rays cast around the circle
    pub fn ray_count(&self) -> usize {
        (360.0 / self.angle_step.clamp(0.1, 360.0)).ceil() as usize
    }
}

/// Triangle fan in coordinates local to the viewer
///
/// Vertex 0 is the viewer. Vertices `1..=n` are the ray ends going
/// counter-clockwise, and the last vertex repeats vertex 1 to close the ring.
#[derive(Debug, Clone, Default)]
pub struct FanMesh {
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    /// Index triples `(i - 1, i, 0)`
    pub triangles: Vec<u32>,
}

impl FanMesh {
    /// Whether a local point lies inside the fan, tested on the ground plane
    pub fn contains(&self, local: Vec3) -> bool {
        self.triangles.chunks_exact(3).any(|tri| {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| self.vertices[i as usize]);
            point_in_triangle(local, a, b, c)
        })
    }

    /// Farthest planar reach of any vertex
    pub fn reach(&self) -> f32 {
        self.vertices
            .iter()
            .map(|v| Vec3::new(v.x, 0.0, v.z).length())
            .fold(0.0, f32::max)
    }
}

/// Builds visibility fans
pub struct VisibilityFan;

impl VisibilityFan {
    /// Cast rays around `origin`, starting along `forward`
    pub fn build(
        origin: Vec3,
        forward: Vec3,
        config: &FanConfig,
        caster: &impl RayCaster,
    ) -> FanMesh {
        let rays = config.ray_count();
        let step = config.angle_step.clamp(0.1, 360.0);
        let planar = Vec3::new(forward.x, 0.0, forward.z);
        let forward = if planar.length() > 1e-5 {
            planar.normalize()
        } else {
            Vec3::NEG_Z
        };

        let mut vertices = Vec::with_capacity(rays + 2);
        vertices.push(Vec3::ZERO);
        for k in 0..rays {
            let direction = Quat::from_rotation_y((k as f32 * step).to_radians()) * forward;
            let distance = caster
                .cast_ray(origin, direction, config.max_distance)
                .map_or(config.max_distance, |hit| hit.min(config.max_distance));
            vertices.push(direction * distance);
        }
        vertices.push(vertices[1]);

        let triangles = (2..vertices.len() as u32)
            .flat_map(|i| [i - 1, i, 0])
            .collect();
        let normals = vec![Vec3::Y; vertices.len()];

        FanMesh {
            vertices,
            normals,
            triangles,
        }
    }
}

/// Twice the area below which a triangle covers nothing
const MIN_DOUBLE_AREA: f32 = 1e-6;

/// Planar containment test; degenerate triangles contain no points
fn point_in_triangle(p: Vec3, a: Vec3, b: Vec3, c: Vec3) -> bool {
    let cross = |o: Vec3, u: Vec3, v: Vec3| (u.x - o.x) * (v.z - o.z) - (u.z - o.z) * (v.x - o.x);
    if cross(a, b, c).abs() < MIN_DOUBLE_AREA {
        return false;
    }
    let d1 = cross(a, b, p);
    let d2 = cross(b, c, p);
    let d3 = cross(c, a, p);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookfall_core::OpenGround;

    /// A wall on the +X side at `x = distance`
    struct WallEast {
        distance: f32,
    }

    impl RayCaster for WallEast {
        fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32> {
            if direction.x <= 1e-3 {
                return None;
            }
            let t = (self.distance - origin.x) / direction.x;
            (t <= max_distance).then_some(t)
        }
    }

    /// Viewer pressed against a wall to the north: rays that way hit at once
    struct FlushWall;

    impl RayCaster for FlushWall {
        fn cast_ray(&self, _origin: Vec3, direction: Vec3, _max_distance: f32) -> Option<f32> {
            (direction.z < -0.9).then_some(0.0)
        }
    }

    #[test]
    fn test_collapsed_rays_reveal_nothing_behind_wall() {
        let fan = VisibilityFan::build(Vec3::ZERO, Vec3::NEG_Z, &FanConfig::default(), &FlushWall);

        assert_eq!(fan.vertices[1], Vec3::ZERO);
        assert!(!fan.contains(Vec3::new(0.0, 0.0, -9.0)));
        assert!(!fan.contains(Vec3::new(0.5, 0.0, -5.0)));
        // The open side is still visible
        assert!(fan.contains(Vec3::new(0.0, 0.0, 9.0)));
        assert!(fan.contains(Vec3::new(8.0, 0.0, 0.0)));
    }

    #[test]
    fn test_fan_shape() {
        let config = FanConfig::default();
        let fan = VisibilityFan::build(Vec3::ZERO, Vec3::NEG_Z, &config, &OpenGround::default());

        assert_eq!(fan.vertices.len(), 62);
        assert_eq!(fan.normals.len(), 62);
        assert_eq!(fan.triangles.len(), 60 * 3);
        assert_eq!(fan.vertices[0], Vec3::ZERO);
        assert_eq!(fan.vertices[61], fan.vertices[1]);
        assert!((fan.vertices[1] - Vec3::new(0.0, 0.0, -10.0)).length() < 1e-4);
        assert_eq!(&fan.triangles[..3], &[1, 2, 0]);
        assert!((fan.reach() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_uneven_step_keeps_indices_in_bounds() {
        let config = FanConfig {
            angle_step: 7.0,
            ..Default::default()
        };
        let fan = VisibilityFan::build(Vec3::ZERO, Vec3::X, &config, &OpenGround::default());
        assert_eq!(fan.vertices.len(), 52 + 2);
        assert!(fan.triangles.iter().all(|&i| (i as usize) < fan.vertices.len()));
    }

    #[test]
    fn test_blocked_rays_are_shortened() {
        let config = FanConfig::default();
        let fan = VisibilityFan::build(Vec3::ZERO, Vec3::X, &config, &WallEast { distance: 3.0 });

        // First ray points straight at the wall
        assert!((fan.vertices[1] - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-4);
        assert!(fan.contains(Vec3::new(2.5, 0.0, 0.0)));
        assert!(!fan.contains(Vec3::new(4.0, 0.0, 0.0)));
        assert!(fan.contains(Vec3::new(-8.0, 0.0, 0.0)));
    }
}
