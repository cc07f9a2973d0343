//! Hookfall Core - Core types and utilities shared by every Hookfall crate
//!
//! This crate provides the foundational types used throughout the game:
//! - Mathematical primitives (re-exported from glam)
//! - Transform and kinematic body abstractions
//! - Time system with fixed-step accumulation and an FPS counter
//! - Traits for the engine services gameplay code depends on
//! - Configuration error type

pub mod body;
pub mod error;
pub mod query;
pub mod time;
pub mod types;

pub use body::{facing_rotation, rotate_towards, KinematicBody};
pub use error::ConfigError;
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use query::{GroundResolver, ObstructionQuery, OpenGround, PointerRay, RayCaster};
pub use time::{FpsCounter, GameTime, TimeConfig};
pub use types::{Color, EntityId, Transform};
