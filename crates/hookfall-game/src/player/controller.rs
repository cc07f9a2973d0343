//! Click-to-move player controller with dash and hook

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec3;
use hookfall_core::{
    facing_rotation, GroundResolver, KinematicBody, ObstructionQuery, Transform,
};
use tracing::{debug, info};

use crate::hook::{HookOutcome, ProjectileHandle, ProjectileSpawner};

use super::{DashMode, IntentKind, LocomotionConfig, MovementIntent};

/// Which locomotion mode is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocomotionState {
    #[default]
    Idle,
    Walking,
    Dashing,
    Hooking,
}

/// Shared slot the hook projectile writes its outcome into
type HookLatch = Rc<Cell<Option<HookOutcome>>>;

/// Per-mode data; one variant at a time keeps the modes exclusive
#[derive(Debug, Default)]
enum Activity {
    #[default]
    Idle,
    Walking {
        target: Vec3,
    },
    Dashing {
        target: Vec3,
    },
    Hooking {
        latch: HookLatch,
        projectile: ProjectileHandle,
    },
}

/// Player controller handling move, dash and hook requests
pub struct PlayerController<B: KinematicBody = Transform> {
    /// Locomotion configuration
    pub config: LocomotionConfig,
    /// The body being driven
    body: B,
    /// Current mode and its data
    activity: Activity,
}

impl<B: KinematicBody> PlayerController<B> {
    /// Create a controller for `body` with default config
    pub fn new(body: B) -> Self {
        Self::with_config(body, LocomotionConfig::default())
    }

    /// Create a controller with custom config
    pub fn with_config(body: B, config: LocomotionConfig) -> Self {
        Self {
            config,
            body,
            activity: Activity::Idle,
        }
    }

    /// The driven body
    pub fn body(&self) -> &B {
        &self.body
    }

    /// Give the body back
    pub fn into_body(self) -> B {
        self.body
    }

    /// Get the player's current position
    pub fn position(&self) -> Vec3 {
        self.body.position()
    }

    /// Current locomotion mode
    pub fn state(&self) -> LocomotionState {
        match self.activity {
            Activity::Idle => LocomotionState::Idle,
            Activity::Walking { .. } => LocomotionState::Walking,
            Activity::Dashing { .. } => LocomotionState::Dashing,
            Activity::Hooking { .. } => LocomotionState::Hooking,
        }
    }

    /// Destination of the current walk or dash
    pub fn destination(&self) -> Option<Vec3> {
        match self.activity {
            Activity::Walking { target } | Activity::Dashing { target } => Some(target),
            _ => None,
        }
    }

    /// Projectile the controller is waiting on, if hooking
    pub fn pending_hook(&self) -> Option<ProjectileHandle> {
        match self.activity {
            Activity::Hooking { projectile, .. } => Some(projectile),
            _ => None,
        }
    }

    /// Whether move/dash/hook requests are currently accepted
    pub fn accepts_input(&self) -> bool {
        !matches!(
            self.activity,
            Activity::Dashing { .. } | Activity::Hooking { .. }
        )
    }

    /// Walk to `target`. Ignored while dashing or hooking.
    pub fn on_click(&mut self, target: Vec3) {
        if !self.accepts_input() {
            debug!(state = ?self.state(), "move request ignored");
            return;
        }
        let target = self.on_body_plane(target);
        debug!(?target, "walking");
        self.activity = Activity::Walking { target };
    }

    /// Dash toward `target`, covering a clamped distance. Ignored while
    /// dashing or hooking.
    pub fn on_dash_request(&mut self, target: Vec3) {
        if !self.accepts_input() {
            debug!(state = ?self.state(), "dash request ignored");
            return;
        }
        let origin = self.body.position();
        let offset = self.on_body_plane(target) - origin;
        let direction = self.heading_or_facing(offset);
        let distance = self.config.clamp_dash_distance(offset.length());
        let destination = origin + direction * distance;

        self.face(direction);
        debug!(?destination, distance, "dashing");
        self.activity = Activity::Dashing {
            target: destination,
        };
    }

    /// Fire the hook toward `target` and freeze locomotion until the
    /// projectile reports back. Ignored while dashing or hooking.
    pub fn on_hook_request(&mut self, target: Vec3, spawner: &mut impl ProjectileSpawner) {
        if !self.accepts_input() {
            debug!(state = ?self.state(), "hook request ignored");
            return;
        }
        let origin = self.body.position();
        let direction = self.heading_or_facing(self.on_body_plane(target) - origin);
        self.face(direction);

        let latch: HookLatch = Rc::new(Cell::new(None));
        let writer = Rc::clone(&latch);
        let projectile = spawner.spawn_projectile(
            origin,
            direction,
            Box::new(move |outcome| writer.set(Some(outcome))),
        );
        debug!(?projectile, ?direction, "hook fired");
        self.activity = Activity::Hooking { latch, projectile };
    }

    /// Resolve an intent against the ground and dispatch it. Intents that
    /// miss the ground are dropped.
    pub fn handle_intent(
        &mut self,
        intent: &MovementIntent,
        resolver: &impl GroundResolver,
        spawner: &mut impl ProjectileSpawner,
    ) {
        let Some(point) = intent.resolve(resolver) else {
            debug!(kind = ?intent.kind, "intent missed the ground");
            return;
        };
        match intent.kind {
            IntentKind::Move => self.on_click(point),
            IntentKind::Dash => self.on_dash_request(point),
            IntentKind::Hook => self.on_hook_request(point, spawner),
        }
    }

    /// Advance the active mode by one simulation step
    pub fn tick(&mut self, obstruction: &impl ObstructionQuery, dt: f32) {
        let dt = dt.max(0.0);
        match &self.activity {
            Activity::Idle => {}
            Activity::Walking { target } => {
                let target = *target;
                self.walk_step(target, dt);
            }
            Activity::Dashing { target } => {
                let target = *target;
                match self.config.dash_mode {
                    DashMode::Slide => self.dash_step(target, obstruction, dt),
                    DashMode::Blink => self.blink(target, obstruction),
                }
            }
            Activity::Hooking { latch, .. } => {
                if let Some(outcome) = latch.take() {
                    info!(?outcome, "hook resolved");
                    self.activity = Activity::Idle;
                }
            }
        }
    }

    /// Cancel walking or dashing. A hook in flight is left to finish.
    pub fn stop_all_movement(&mut self) {
        if matches!(
            self.activity,
            Activity::Walking { .. } | Activity::Dashing { .. }
        ) {
            debug!("movement stopped");
            self.activity = Activity::Idle;
        }
    }

    /// Stop on contact with blocking terrain, putting the body back at
    /// `last_clear`, the last position that was free of it
    pub fn halt_at(&mut self, last_clear: Vec3) {
        self.stop_all_movement();
        self.body.move_to(last_clear);
        debug!(position = ?last_clear, "halted against terrain");
    }

    /// Move the body instantly, cancelling walking or dashing
    pub fn teleport(&mut self, position: Vec3) {
        self.stop_all_movement();
        self.body.move_to(position);
        info!(?position, "player teleported");
    }

    fn walk_step(&mut self, target: Vec3, dt: f32) {
        let position = self.body.position();
        let offset = target - position;
        let remaining = offset.length();
        let step = self.config.walking_speed * dt;

        if remaining <= step {
            self.body.move_to(target);
            self.face(offset);
            self.activity = Activity::Idle;
            return;
        }

        let direction = offset / remaining;
        self.body.move_to(position + direction * step);
        if let Some(facing) = facing_rotation(direction) {
            self.body
                .rotate_towards(facing, self.config.rotation_speed * dt);
        }
    }

    fn dash_step(&mut self, target: Vec3, obstruction: &impl ObstructionQuery, dt: f32) {
        let position = self.body.position();
        let offset = target - position;
        let remaining = offset.length();
        let step = self.config.dashing_speed * dt;
        let travel = step.min(remaining);

        if travel > 0.0 && obstruction.is_blocked(position, offset / remaining, travel) {
            debug!(?position, "dash obstructed");
            self.activity = Activity::Idle;
            return;
        }

        if remaining <= step {
            self.body.move_to(target);
            self.activity = Activity::Idle;
        } else {
            self.body.move_to(position + offset / remaining * step);
        }
    }

    fn blink(&mut self, target: Vec3, obstruction: &impl ObstructionQuery) {
        let position = self.body.position();
        let offset = target - position;
        let distance = offset.length();

        if distance > 0.0 && obstruction.is_blocked(position, offset / distance, distance) {
            debug!(?position, "blink obstructed");
        } else {
            self.body.move_to(target);
        }
        self.activity = Activity::Idle;
    }

    /// Project a point onto the horizontal plane the body stands in
    fn on_body_plane(&self, point: Vec3) -> Vec3 {
        Vec3::new(point.x, self.body.position().y, point.z)
    }

    /// Unit direction of `offset`, or the current facing when it is too short
    fn heading_or_facing(&self, offset: Vec3) -> Vec3 {
        if offset.length() > 1e-4 {
            return offset.normalize();
        }
        let forward = self.body.forward();
        let planar = Vec3::new(forward.x, 0.0, forward.z);
        if planar.length() > 1e-4 {
            planar.normalize()
        } else {
            Vec3::NEG_Z
        }
    }

    /// Snap the body's facing to `direction`, if it has a heading
    fn face(&mut self, direction: Vec3) {
        if let Some(facing) = facing_rotation(direction) {
            self.body.set_rotation(facing);
        }
    }
}
