//! Hook projectile lifecycle

use std::fmt;

use glam::Vec3;
use hookfall_core::EntityId;

use super::{heading_degrees, EndHook, HookConfig, HookTargets, ProjectileHandle};

/// Lifecycle phase of a hook projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectilePhase {
    Flying,
    /// Latched onto a target (terminal)
    Attached,
    /// Ran out of time (terminal)
    Expired,
}

/// How a hook ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HookOutcome {
    /// Latched onto `target`
    Hit { target: EntityId, position: Vec3 },
    /// Flew its full lifetime without touching anything
    Expired { position: Vec3 },
}

/// A hook in flight
pub struct HookProjectile {
    handle: ProjectileHandle,
    position: Vec3,
    direction: Vec3,
    speed: f32,
    radius: f32,
    /// Seconds of flight left
    remaining_life: f32,
    phase: ProjectilePhase,
    /// Taken on the terminal transition
    on_end: Option<EndHook>,
}

impl HookProjectile {
    /// Launch from `origin` along `direction`
    pub fn new(
        handle: ProjectileHandle,
        origin: Vec3,
        direction: Vec3,
        config: &HookConfig,
        on_end: EndHook,
    ) -> Self {
        Self {
            handle,
            position: origin,
            direction: direction.normalize_or_zero(),
            speed: config.speed,
            radius: config.radius,
            remaining_life: config.time_to_live,
            phase: ProjectilePhase::Flying,
            on_end: Some(on_end),
        }
    }

    pub fn handle(&self) -> ProjectileHandle {
        self.handle
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn phase(&self) -> ProjectilePhase {
        self.phase
    }

    /// Whether the hook has hit or expired
    pub fn is_terminated(&self) -> bool {
        self.phase != ProjectilePhase::Flying
    }

    /// Yaw of the hook sprite, degrees in `[0, 360)`
    pub fn heading(&self) -> f32 {
        heading_degrees(self.direction)
    }

    /// Advance the flight. Returns the outcome on the tick the hook ends.
    pub fn tick(&mut self, dt: f32, targets: &mut impl HookTargets) -> Option<HookOutcome> {
        if self.is_terminated() {
            return None;
        }

        self.position += self.direction * self.speed * dt.max(0.0);

        if let Some(target) = targets.find_overlap(self.position, self.radius) {
            // Recoil back toward the shooter while the target is reeled in
            self.direction = -self.direction;
            targets.pull(target, self.direction, self.speed);
            let outcome = HookOutcome::Hit {
                target,
                position: self.position,
            };
            self.finish(ProjectilePhase::Attached, outcome);
            return Some(outcome);
        }

        self.remaining_life -= dt.max(0.0);
        if self.remaining_life <= 0.0 {
            let outcome = HookOutcome::Expired {
                position: self.position,
            };
            self.finish(ProjectilePhase::Expired, outcome);
            return Some(outcome);
        }

        None
    }

    fn finish(&mut self, phase: ProjectilePhase, outcome: HookOutcome) {
        self.phase = phase;
        if let Some(on_end) = self.on_end.take() {
            on_end(outcome);
        }
    }
}

impl fmt::Debug for HookProjectile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookProjectile")
            .field("handle", &self.handle)
            .field("position", &self.position)
            .field("direction", &self.direction)
            .field("remaining_life", &self.remaining_life)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
