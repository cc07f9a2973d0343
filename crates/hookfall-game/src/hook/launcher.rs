//! Owns hook projectiles between spawn and removal

use glam::Vec3;
use tracing::{debug, info};

use super::{
    EndHook, HookConfig, HookOutcome, HookProjectile, HookTargets, ProjectileHandle,
    ProjectileSpawner,
};

/// Spawns hook projectiles and drops them once they end
#[derive(Debug, Default)]
pub struct HookLauncher {
    /// Settings applied to newly fired hooks
    pub config: HookConfig,
    projectiles: Vec<HookProjectile>,
    next_id: u64,
}

impl HookLauncher {
    pub fn new(config: HookConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Hooks currently in flight
    pub fn projectiles(&self) -> &[HookProjectile] {
        &self.projectiles
    }

    pub fn get(&self, handle: ProjectileHandle) -> Option<&HookProjectile> {
        self.projectiles.iter().find(|p| p.handle() == handle)
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    /// Advance every hook, remove the ones that ended, and report how they ended
    pub fn tick(&mut self, dt: f32, targets: &mut impl HookTargets) -> Vec<HookOutcome> {
        let mut outcomes = Vec::new();
        for projectile in &mut self.projectiles {
            if let Some(outcome) = projectile.tick(dt, targets) {
                info!(handle = ?projectile.handle(), ?outcome, "hook ended");
                outcomes.push(outcome);
            }
        }
        self.projectiles.retain(|p| !p.is_terminated());
        outcomes
    }
}

impl ProjectileSpawner for HookLauncher {
    fn spawn_projectile(&mut self, origin: Vec3, direction: Vec3, on_end: EndHook) -> ProjectileHandle {
        self.next_id += 1;
        let handle = ProjectileHandle(self.next_id);
        debug!(?handle, ?origin, ?direction, "spawning hook");
        self.projectiles.push(HookProjectile::new(
            handle,
            origin,
            direction,
            &self.config,
            on_end,
        ));
        handle
    }
}
