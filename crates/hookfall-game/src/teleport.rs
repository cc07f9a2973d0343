//! Teleport pads
//!
//! Standing on a pad for long enough sends the player to the pad's
//! destination. The pad keeps its own clock, which restarts whenever someone
//! steps on and wraps around periodically while nobody is there.

use glam::Vec3;
use hookfall_core::ConfigError;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Pad timing and size
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PadConfig {
    /// Trigger sphere radius
    pub radius: f32,
    /// Seconds the player has to stand on the pad
    pub dwell_seconds: f32,
    /// The pad clock wraps to zero after this many seconds
    pub cycle_seconds: f32,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            radius: 1.5,
            dwell_seconds: 2.0,
            cycle_seconds: 10.0,
        }
    }
}

impl PadConfig {
    /// Check the config for unusable values
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_positive("teleport.radius", self.radius)?;
        ConfigError::require_positive("teleport.dwell_seconds", self.dwell_seconds)?;
        ConfigError::require_ordered(
            "teleport.dwell_seconds",
            self.dwell_seconds,
            "teleport.cycle_seconds",
            self.cycle_seconds,
        )
    }
}

/// Something that happened on a pad this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PadEvent {
    /// The player stepped on
    Entered,
    /// The player should be moved to `destination`
    Teleported { destination: Vec3 },
    /// The player stepped off after standing there for `waited` seconds
    Left { waited: f32 },
}

/// A teleport trigger in the level
#[derive(Debug, Clone)]
pub struct TeleportPad {
    pub center: Vec3,
    pub destination: Vec3,
    pub config: PadConfig,
    /// Pad clock
    elapsed: f32,
    /// Seconds the current occupant has been on the pad
    occupied_for: Option<f32>,
}

impl TeleportPad {
    pub fn new(center: Vec3, destination: Vec3, config: PadConfig) -> Self {
        Self {
            center,
            destination,
            config,
            elapsed: 0.0,
            occupied_for: None,
        }
    }

    /// Whether a point is inside the trigger
    pub fn contains(&self, point: Vec3) -> bool {
        self.center.distance(point) <= self.config.radius
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied_for.is_some()
    }

    /// Advance the pad clock and react to where the player is
    pub fn tick(&mut self, dt: f32, player: Vec3) -> Option<PadEvent> {
        let dt = dt.max(0.0);
        self.elapsed += dt;
        if self.elapsed > self.config.cycle_seconds {
            self.elapsed = 0.0;
        }

        let inside = self.contains(player);
        match (self.occupied_for, inside) {
            (None, true) => {
                self.elapsed = 0.0;
                self.occupied_for = Some(0.0);
                debug!(center = ?self.center, "player entered teleport pad");
                Some(PadEvent::Entered)
            }
            (Some(waited), true) => {
                self.occupied_for = Some(waited + dt);
                if self.elapsed > self.config.dwell_seconds {
                    self.elapsed = 0.0;
                    self.occupied_for = None;
                    info!(destination = ?self.destination, "teleport pad fired");
                    Some(PadEvent::Teleported {
                        destination: self.destination,
                    })
                } else {
                    None
                }
            }
            (Some(waited), false) => {
                self.occupied_for = None;
                debug!(waited, "player left teleport pad");
                Some(PadEvent::Left { waited })
            }
            (None, false) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pad() -> TeleportPad {
        TeleportPad::new(Vec3::ZERO, Vec3::new(20.0, 1.0, 20.0), PadConfig::default())
    }

    #[test]
    fn teleports_after_dwell() {
        let mut pad = pad();
        let on_pad = Vec3::new(0.5, 1.0, 0.0);

        assert_eq!(pad.tick(0.25, on_pad), Some(PadEvent::Entered));
        for _ in 0..8 {
            assert_eq!(pad.tick(0.25, on_pad), None);
        }
        assert_eq!(
            pad.tick(0.25, on_pad),
            Some(PadEvent::Teleported {
                destination: Vec3::new(20.0, 1.0, 20.0)
            })
        );
        assert!(!pad.is_occupied());
    }

    #[test]
    fn leaving_early_cancels() {
        let mut pad = pad();
        let on_pad = Vec3::new(0.0, 1.0, 0.0);
        let off_pad = Vec3::new(5.0, 1.0, 0.0);

        pad.tick(0.25, on_pad);
        pad.tick(0.25, on_pad);
        pad.tick(0.25, on_pad);
        assert_eq!(pad.tick(0.25, off_pad), Some(PadEvent::Left { waited: 0.5 }));

        // Nobody on the pad: nothing happens however long we wait
        for _ in 0..100 {
            assert_eq!(pad.tick(0.25, off_pad), None);
        }

        // Coming back restarts the dwell
        assert_eq!(pad.tick(0.25, on_pad), Some(PadEvent::Entered));
        assert_eq!(pad.tick(0.25, on_pad), None);
    }

    #[test]
    fn config_rejects_unreachable_dwell() {
        let config = PadConfig {
            dwell_seconds: 12.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(PadConfig::default().validate().is_ok());
    }
}
