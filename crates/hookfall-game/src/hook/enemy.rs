//! Hookable enemies

use glam::Vec3;
use hookfall_core::EntityId;
use tracing::debug;

use super::heading_degrees;

/// Below this speed a pulled enemy comes to rest
const REST_SPEED: f32 = 0.05;

/// What a hook can latch onto
pub trait HookTargets {
    /// First target whose volume overlaps a sphere at `point`
    fn find_overlap(&self, point: Vec3, radius: f32) -> Option<EntityId>;

    /// Reel `target` in along `direction` at `speed`
    fn pull(&mut self, target: EntityId, direction: Vec3, speed: f32);
}

/// An enemy that can be hooked
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EntityId,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Radius of the enemy's trigger volume
    pub radius: f32,
    /// Being reeled in
    pub hooked: bool,
    /// Facing on the ground plane in degrees
    pub heading: f32,
}

impl Enemy {
    pub fn new(position: Vec3, radius: f32) -> Self {
        Self {
            id: EntityId::new(),
            position,
            velocity: Vec3::ZERO,
            radius,
            hooked: false,
            heading: 0.0,
        }
    }

    /// Start being reeled in
    pub fn hook(&mut self, direction: Vec3, speed: f32) {
        self.hooked = true;
        self.velocity = direction.normalize_or_zero() * speed;
        self.heading = heading_degrees(direction);
    }
}

/// All enemies in the level
#[derive(Debug, Clone)]
pub struct EnemyRoster {
    enemies: Vec<Enemy>,
    /// Linear drag per second applied to pulled enemies
    pub drag: f32,
}

impl Default for EnemyRoster {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl EnemyRoster {
    pub fn new(enemies: Vec<Enemy>) -> Self {
        Self { enemies, drag: 2.0 }
    }

    pub fn spawn(&mut self, enemy: Enemy) -> EntityId {
        let id = enemy.id;
        self.enemies.push(enemy);
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Let pulled enemies coast to a stop
    pub fn tick(&mut self, dt: f32) {
        let decay = (1.0 - self.drag * dt).max(0.0);
        for enemy in self.enemies.iter_mut().filter(|e| e.hooked) {
            enemy.position += enemy.velocity * dt;
            enemy.velocity *= decay;
            if enemy.velocity.length() < REST_SPEED {
                enemy.velocity = Vec3::ZERO;
                enemy.hooked = false;
                debug!(id = ?enemy.id, position = ?enemy.position, "enemy came to rest");
            }
        }
    }
}

impl HookTargets for EnemyRoster {
    fn find_overlap(&self, point: Vec3, radius: f32) -> Option<EntityId> {
        self.enemies
            .iter()
            .map(|e| (e.id, e.position.distance(point) - e.radius))
            .filter(|(_, gap)| *gap <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    fn pull(&mut self, target: EntityId, direction: Vec3, speed: f32) {
        if let Some(enemy) = self.enemies.iter_mut().find(|e| e.id == target) {
            enemy.hook(direction, speed);
        }
    }
}
