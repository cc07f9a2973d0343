//! Hookfall Game - Gameplay logic and systems
//!
//! Provides the click-to-move player controller, the grappling hook, the
//! follow camera, teleport pads, and fog of war. Everything is advanced by
//! explicit `tick` calls from the host's fixed-step loop.

pub mod camera;
pub mod hook;
pub mod player;
pub mod teleport;
pub mod vision;

pub use camera::{FollowCamera, FollowConfig};
pub use hook::{
    Enemy, EndHook, EnemyRoster, HookConfig, HookLauncher, HookOutcome, HookProjectile,
    HookTargets, ProjectileHandle, ProjectilePhase, ProjectileSpawner,
};
pub use player::{
    DashMode, IntentKind, IntentTarget, LocomotionConfig, LocomotionState, MovementIntent,
    PlayerController,
};
pub use teleport::{PadConfig, PadEvent, TeleportPad};
pub use vision::{FanConfig, FanMesh, FogGrid, FogOfWar, VisibilityFan};
