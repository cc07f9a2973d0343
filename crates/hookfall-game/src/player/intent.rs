//! Movement requests produced by input handling

use hookfall_core::{GroundResolver, PointerRay, Vec3};

/// What the player asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentKind {
    /// Walk to the point
    Move,
    /// Dash toward the point
    Dash,
    /// Fire the hook toward the point
    Hook,
}

/// Where the player pointed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntentTarget {
    /// An already resolved world position
    Point(Vec3),
    /// A cursor ray that still has to be resolved against the ground
    Pointer(PointerRay),
}

/// A single player request, consumed by the controller on the next tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementIntent {
    pub kind: IntentKind,
    pub target: IntentTarget,
    /// Game time at which the request was issued, in seconds
    pub issued_at: f64,
}

impl MovementIntent {
    pub fn new(kind: IntentKind, target: IntentTarget, issued_at: f64) -> Self {
        Self {
            kind,
            target,
            issued_at,
        }
    }

    /// World position this intent points at, if it hits ground
    pub fn resolve(&self, resolver: &impl GroundResolver) -> Option<Vec3> {
        match self.target {
            IntentTarget::Point(point) => Some(point),
            IntentTarget::Pointer(ray) => resolver.resolve_ground_point(&ray),
        }
    }
}
