//! Time system for Hookfall
//!
//! Handles game time, delta time, fixed-step accumulation, and the FPS readout.

use serde::{Deserialize, Serialize};

/// Configuration for game time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// How many in-game seconds pass per real second
    pub time_scale: f32,
    /// Fixed timestep for gameplay simulation (in seconds)
    pub fixed_timestep: f32,
    /// Maximum delta time to prevent spiral of death
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            fixed_timestep: 1.0 / 60.0,
            max_delta_time: 0.25,
        }
    }
}

impl TimeConfig {
    /// Check the config for unusable values
    pub fn validate(&self) -> Result<(), crate::ConfigError> {
        crate::ConfigError::require_positive("fixed_timestep", self.fixed_timestep)?;
        crate::ConfigError::require_positive("max_delta_time", self.max_delta_time)
    }
}

/// Game time tracking
#[derive(Debug, Clone)]
pub struct GameTime {
    /// Configuration
    pub config: TimeConfig,
    /// Time since game start in seconds
    pub total_time: f64,
    /// Time since game start in seconds, ignoring `time_scale`
    pub unscaled_total_time: f64,
    /// Delta time for this frame (clamped)
    pub delta_time: f32,
    /// Unscaled delta time
    pub unscaled_delta_time: f32,
    /// Frame counter
    pub frame_count: u64,
    /// Accumulated time for fixed timestep
    fixed_accumulator: f32,
}

impl Default for GameTime {
    fn default() -> Self {
        Self {
            config: TimeConfig::default(),
            total_time: 0.0,
            unscaled_total_time: 0.0,
            delta_time: 0.0,
            unscaled_delta_time: 0.0,
            frame_count: 0,
            fixed_accumulator: 0.0,
        }
    }
}

impl GameTime {
    /// Create a new game time with custom config
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Update the game time with the raw delta from the previous frame
    pub fn update(&mut self, raw_delta: f32) {
        self.unscaled_delta_time = raw_delta.clamp(0.0, self.config.max_delta_time);
        self.unscaled_total_time += self.unscaled_delta_time as f64;
        self.frame_count += 1;

        self.delta_time = self.unscaled_delta_time * self.config.time_scale;
        self.total_time += self.delta_time as f64;
        self.fixed_accumulator += self.delta_time;
    }

    /// Get the number of fixed timesteps to process this frame
    pub fn fixed_steps(&mut self) -> u32 {
        let mut steps = 0;
        while self.fixed_accumulator >= self.config.fixed_timestep {
            self.fixed_accumulator -= self.config.fixed_timestep;
            steps += 1;
        }
        steps
    }
}

/// Frames-per-second readout that refreshes a few times per second
#[derive(Debug, Clone)]
pub struct FpsCounter {
    /// Readout refreshes per second
    pub refresh_rate: f32,
    /// Unscaled time of the next refresh
    next_refresh: f64,
    /// Last displayed value
    value: f32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl FpsCounter {
    pub fn new(refresh_rate: f32) -> Self {
        Self {
            refresh_rate: refresh_rate.max(f32::EPSILON),
            next_refresh: 0.0,
            value: 0.0,
        }
    }

    /// Feed one frame. Returns the new readout when it refreshed this frame.
    pub fn update(&mut self, time: &GameTime) -> Option<f32> {
        if time.unscaled_total_time <= self.next_refresh || time.unscaled_delta_time <= 0.0 {
            return None;
        }
        self.value = 1.0 / time.unscaled_delta_time;
        self.next_refresh = time.unscaled_total_time + 1.0 / self.refresh_rate as f64;
        Some(self.value)
    }

    /// Last displayed value
    pub fn value(&self) -> f32 {
        self.value
    }
}
