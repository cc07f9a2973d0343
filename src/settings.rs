//! Game settings with persistence
//!
//! Settings are saved to `~/.config/hookfall/settings.toml`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use hookfall_core::{ConfigError, TimeConfig};
use hookfall_game::{FanConfig, FollowConfig, HookConfig, LocomotionConfig, PadConfig};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All game settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub time: TimeConfig,
    pub locomotion: LocomotionConfig,
    pub hook: HookConfig,
    pub camera: FollowConfig,
    pub teleport: PadConfig,
    pub vision: FanConfig,
}

impl GameSettings {
    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("hookfall").join("settings.toml"))
    }

    /// Parse and validate settings from TOML text
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let settings: Self = toml::from_str(content).context("malformed settings")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check every section for unusable values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.time.validate()?;
        self.locomotion.validate()?;
        self.hook.validate()?;
        self.camera.validate()?;
        self.teleport.validate()?;
        self.vision.validate()
    }

    /// Load settings from disk, or return defaults if missing or invalid.
    /// A missing file is created with the defaults so they can be edited.
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load settings from `path`, writing defaults there if it doesn't exist
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No settings file found, writing defaults to {:?}", path);
            let settings = Self::default();
            if let Err(e) = settings.save_to(path) {
                warn!("Failed to write default settings: {:#}", e);
            }
            return settings;
        }

        match fs::read_to_string(path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to load settings: {:#}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("creating {}", dir.display()))?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookfall_game::DashMode;

    #[test]
    fn defaults_are_valid() {
        assert!(GameSettings::default().validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let settings = GameSettings::from_toml_str(
            r#"
            [locomotion]
            walking_speed = 8.0
            dash_mode = "blink"

            [hook]
            speed = 12.0
            "#,
        )
        .unwrap();

        assert_eq!(settings.locomotion.walking_speed, 8.0);
        assert_eq!(settings.locomotion.dash_mode, DashMode::Blink);
        assert_eq!(settings.locomotion.dashing_speed, 24.0);
        assert_eq!(settings.hook.speed, 12.0);
        assert_eq!(settings.camera.distance, 17.0);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = GameSettings::from_toml_str(
            r#"
            [locomotion]
            min_dash_distance = 10.0
            max_dash_distance = 2.0
            "#,
        );
        assert!(err.is_err());

        assert!(GameSettings::from_toml_str("locomotion = 3").is_err());
    }

    #[test]
    fn survives_round_trip() {
        let mut settings = GameSettings::default();
        settings.teleport.dwell_seconds = 3.0;
        let text = toml::to_string_pretty(&settings).unwrap();
        let back = GameSettings::from_toml_str(&text).unwrap();
        assert_eq!(back.teleport.dwell_seconds, 3.0);
    }

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("hookfall-settings-{}-{name}", std::process::id()))
            .join("settings.toml")
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let path = scratch_path("missing");
        let _ = fs::remove_dir_all(path.parent().unwrap());

        let settings = GameSettings::load_from(&path);
        assert_eq!(settings.camera.distance, 17.0);
        assert!(path.exists());

        let written = GameSettings::from_toml_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.hook.speed, settings.hook.speed);
        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn saved_changes_are_loaded_back() {
        let path = scratch_path("saved");
        let mut settings = GameSettings::default();
        settings.locomotion.walking_speed = 9.0;
        settings.save_to(&path).unwrap();

        assert_eq!(GameSettings::load_from(&path).locomotion.walking_speed, 9.0);

        fs::write(&path, "locomotion = 3").unwrap();
        assert_eq!(GameSettings::load_from(&path).locomotion.walking_speed, 6.0);
        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }
}
