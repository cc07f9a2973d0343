//! Field of view and fog of war
//!
//! A fan of raycasts around the player gives the visible area, which is
//! painted into a top-down fog grid. Other entities are shown only where the
//! grid is lit.

mod fan;
mod fog;

pub use fan::{FanConfig, FanMesh, VisibilityFan};
pub use fog::{FogGrid, FogOfWar};
