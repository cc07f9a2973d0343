//! Camera system module
//!
//! Provides a top-down follow camera with per-axis damping and cursor picking.

mod config;
mod follow;

pub use config::FollowConfig;
pub use follow::FollowCamera;
