//! Hookfall - click-to-move arena with a grappling hook
//!
//! Runs a short scripted session headless: a physics arena, the player
//! controller, a few enemies, a teleport pad, and fog of war, all driven from
//! a fixed-step loop.

mod settings;

use anyhow::{Context, Result};
use glam::{Vec2, Vec3};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use hookfall_core::{FpsCounter, GameTime, KinematicBody};
use hookfall_game::{
    Enemy, EnemyRoster, FogGrid, FogOfWar, FollowCamera, HookLauncher, IntentKind, IntentTarget,
    MovementIntent, PadEvent, PlayerController, TeleportPad, VisibilityFan,
};
use hookfall_physics::{PhysicsBody, PhysicsWorld};

use settings::GameSettings;

/// Simulated session length in seconds
const SESSION_SECONDS: f32 = 12.0;
/// Host frame rate the session pretends to run at
const FRAME_RATE: f32 = 60.0;
const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

/// Level contents
struct Arena {
    physics: PhysicsWorld,
    player: PlayerController<PhysicsBody>,
    enemies: EnemyRoster,
    hooks: HookLauncher,
    camera: FollowCamera,
    pad: TeleportPad,
    fog: FogOfWar,
}

impl Arena {
    fn new(settings: &GameSettings, rng: &mut StdRng) -> Self {
        let mut physics = PhysicsWorld::new();
        physics.create_ground(0.0);
        // Wall the scripted dash runs into
        physics.create_static_box(Vec3::new(0.5, 2.0, 6.0), Vec3::new(10.5, 2.0, 0.0));
        physics.update_queries();

        let mut body = PhysicsBody::new();
        body.spawn(&mut physics, Vec3::new(0.0, 1.0, 0.0));
        physics.update_queries();
        let player = PlayerController::with_config(body, settings.locomotion.clone());

        let mut enemies = EnemyRoster::default();
        enemies.spawn(Enemy::new(Vec3::new(0.0, 1.0, -6.0), 0.5));
        for _ in 0..3 {
            let position = Vec3::new(rng.gen_range(-15.0..15.0), 1.0, rng.gen_range(-15.0..15.0));
            enemies.spawn(Enemy::new(position, 0.5));
        }

        let mut camera = FollowCamera::with_config(settings.camera.clone());
        camera.snap_to(player.position());

        let pad = TeleportPad::new(
            Vec3::new(-6.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 15.0),
            settings.teleport.clone(),
        );

        Self {
            physics,
            player,
            enemies,
            hooks: HookLauncher::new(settings.hook.clone()),
            camera,
            pad,
            fog: FogOfWar::new(FogGrid::new(Vec2::splat(-30.0), 1.0, 60, 60)),
        }
    }

    /// One fixed simulation step
    fn step(&mut self, settings: &GameSettings, intents: &mut Vec<MovementIntent>, now: f64, dt: f32) {
        let exclude = self.player.body().collider_handle;
        let last_clear = self.player.position();

        {
            let probe = self.physics.probe(exclude);
            intents.retain(|intent| {
                if intent.issued_at > now {
                    return true;
                }
                self.player.handle_intent(intent, &probe, &mut self.hooks);
                false
            });
            self.player.tick(&probe, dt);
        }
        self.player.body().sync(&mut self.physics);
        self.physics.update_queries();

        if let Some(obstacle) = self.player.body().blocking_contact(&self.physics) {
            debug!(?obstacle, "player ran into terrain");
            self.player.halt_at(last_clear);
            self.player.body().sync(&mut self.physics);
            self.physics.update_queries();
        }

        for outcome in self.hooks.tick(dt, &mut self.enemies) {
            debug!(?outcome, "hook outcome delivered");
        }
        self.enemies.tick(dt);

        if let Some(PadEvent::Teleported { destination }) =
            self.pad.tick(dt, self.player.position())
        {
            self.player.teleport(destination);
            self.player.body().sync(&mut self.physics);
            self.physics.update_queries();
            self.camera.snap_to(self.player.position());
        }

        self.camera.update(Some(self.player.position()), dt);

        let origin = self.player.position();
        let fan = VisibilityFan::build(
            origin,
            self.player.body().forward(),
            &settings.vision,
            &self.physics.probe(exclude),
        );
        if let Some(grid) = self.fog.grid.as_mut() {
            grid.clear();
            grid.reveal(&fan, origin);
        }
    }

    fn visible_enemies(&self) -> usize {
        self.enemies
            .iter()
            .filter(|enemy| self.fog.is_visible(enemy.position))
            .count()
    }
}

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    info!("Starting Hookfall...");

    let settings = GameSettings::load();
    let mut rng = StdRng::seed_from_u64(7);
    let mut arena = Arena::new(&settings, &mut rng);

    let cursor = Vec2::new(
        rng.gen_range(0.0..VIEWPORT.x),
        rng.gen_range(VIEWPORT.y * 0.5..VIEWPORT.y),
    );
    let mut intents = vec![
        MovementIntent::new(
            IntentKind::Move,
            IntentTarget::Pointer(arena.camera.screen_ray(cursor, VIEWPORT)),
            0.0,
        ),
        MovementIntent::new(IntentKind::Dash, IntentTarget::Point(Vec3::new(20.0, 0.0, 0.0)), 1.5),
        MovementIntent::new(IntentKind::Hook, IntentTarget::Point(Vec3::new(0.0, 0.0, -6.0)), 3.0),
        MovementIntent::new(IntentKind::Move, IntentTarget::Point(Vec3::new(-6.0, 0.0, 0.0)), 5.0),
    ];

    let mut time = GameTime::new(settings.time.clone());
    let mut fps = FpsCounter::new(2.0);
    let frame = 1.0 / FRAME_RATE;
    let frames = (SESSION_SECONDS * FRAME_RATE) as u32;

    for _ in 0..frames {
        time.update(frame);
        for _ in 0..time.fixed_steps() {
            let now = time.total_time;
            arena.step(&settings, &mut intents, now, time.config.fixed_timestep);
        }
        if let Some(value) = fps.update(&time) {
            debug!(fps = value, state = ?arena.player.state(), "frame");
        }
    }

    info!(
        position = ?arena.player.position(),
        state = ?arena.player.state(),
        visible_enemies = arena.visible_enemies(),
        total_enemies = arena.enemies.len(),
        elapsed = time.total_time,
        "Session finished"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookfall_game::LocomotionState;

    fn arena() -> (GameSettings, Arena) {
        let settings = GameSettings::default();
        let arena = Arena::new(&settings, &mut StdRng::seed_from_u64(1));
        (settings, arena)
    }

    #[test]
    fn walking_stops_at_the_wall() {
        let (settings, mut arena) = arena();
        let dt = settings.time.fixed_timestep;
        arena.player.on_click(Vec3::new(20.0, 0.0, 0.0));

        let mut intents = Vec::new();
        for step in 0..600 {
            arena.step(&settings, &mut intents, step as f64 * dt as f64, dt);
        }

        // Wall face at x = 10, capsule radius 0.5
        let position = arena.player.position();
        assert!(position.x <= 9.5 + 1e-3, "walked into the wall: {position:?}");
        assert!(position.x > 9.0, "stopped short: {position:?}");
        assert_eq!(arena.player.state(), LocomotionState::Idle);
        assert!(arena.player.body().blocking_contact(&arena.physics).is_none());
    }

    #[test]
    fn can_walk_away_after_hitting_the_wall() {
        let (settings, mut arena) = arena();
        let dt = settings.time.fixed_timestep;
        let mut intents = Vec::new();

        arena.player.on_click(Vec3::new(20.0, 0.0, 0.0));
        for step in 0..300 {
            arena.step(&settings, &mut intents, step as f64 * dt as f64, dt);
        }
        arena.player.on_click(Vec3::new(5.0, 0.0, 0.0));
        for step in 300..600 {
            arena.step(&settings, &mut intents, step as f64 * dt as f64, dt);
        }
        assert!((arena.player.position() - Vec3::new(5.0, 1.0, 0.0)).length() < 1e-3);
    }
}
