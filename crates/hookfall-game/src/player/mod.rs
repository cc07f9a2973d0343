//! Player controller module
//!
//! Click-to-move locomotion with dash and grappling hook.

mod config;
mod controller;
mod intent;

pub use config::{DashMode, LocomotionConfig};
pub use controller::{LocomotionState, PlayerController};
pub use intent::{IntentKind, IntentTarget, MovementIntent};
