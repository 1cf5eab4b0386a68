//! Controller tunables and their validation.
//!
//! Every field has a default so partial YAML/JSON files are accepted.

use std::path::Path;

use dartroom_common::LayerMask;
use dartroom_input::Bindings;
use serde::{Deserialize, Serialize};

/// Errors from building or loading a `PlayerConfig` or `DartBoard`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format {0:?}, expected .yaml, .yml or .json")]
    UnsupportedFormat(String),
}

/// How the lock-in transition moves the player toward the anchor pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionStyle {
    /// Interpolate from the pose recorded at game start. Linear in time.
    #[default]
    FixedEndpoint,
    /// Interpolate from the current (already moved) pose each frame.
    /// Approaches the target with a decaying rate, then snaps at progress 1.
    Decaying,
}

/// Immutable controller configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Walk speed in units per second at full axis deflection.
    pub move_speed: f32,
    /// Degrees of rotation per unit of look axis delta.
    pub look_speed: f32,
    /// Vertical acceleration in units/s². Negative pulls down.
    pub gravity: f32,
    /// Vertical velocity applied while grounded, keeps the motor pressed to the floor.
    pub grounded_stick_velocity: f32,
    /// Camera pitch clamp in degrees either side of level. `None` disables clamping.
    pub pitch_limit_degrees: Option<f32>,
    /// Camera height above the body origin.
    pub eye_height: f32,
    /// Maximum interaction ray length.
    pub interact_range: f32,
    /// Layers the interaction ray can hit.
    pub interactable_layers: LayerMask,
    /// Seconds to move into the anchor pose when a game starts.
    pub smooth_move_duration: f32,
    pub transition_style: TransitionStyle,
    /// Create the crosshair marker at spawn. Without it, games end with no outcome.
    pub spawn_crosshair: bool,
    /// Distance in front of the camera where the crosshair appears on game start.
    pub crosshair_spawn_distance: f32,
    /// Angular speed of the crosshair circle, radians per second.
    pub crosshair_movement_speed: f32,
    /// Radius of the crosshair circle around the board origin.
    pub crosshair_movement_amplitude: f32,
    pub bindings: Bindings,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            look_speed: 2.0,
            gravity: -9.81,
            grounded_stick_velocity: -2.0,
            pitch_limit_degrees: Some(89.0),
            eye_height: 1.6,
            interact_range: 10.0,
            interactable_layers: LayerMask::default(),
            smooth_move_duration: 1.0,
            transition_style: TransitionStyle::default(),
            spawn_crosshair: true,
            crosshair_spawn_distance: 5.0,
            crosshair_movement_speed: 1.0,
            crosshair_movement_amplitude: 1.0,
            bindings: Bindings::default(),
        }
    }
}

impl PlayerConfig {
    /// Check ranges. Called by `PlayerController::spawn`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("move_speed", self.move_speed)?;
        finite("look_speed", self.look_speed)?;
        finite("gravity", self.gravity)?;
        finite("grounded_stick_velocity", self.grounded_stick_velocity)?;
        finite("eye_height", self.eye_height)?;
        finite("crosshair_spawn_distance", self.crosshair_spawn_distance)?;
        finite("crosshair_movement_speed", self.crosshair_movement_speed)?;
        non_negative("move_speed", self.move_speed)?;
        non_negative("crosshair_movement_amplitude", self.crosshair_movement_amplitude)?;
        positive("interact_range", self.interact_range)?;
        positive("smooth_move_duration", self.smooth_move_duration)?;
        if let Some(limit) = self.pitch_limit_degrees {
            non_negative("pitch_limit_degrees", limit)?;
        }
        Ok(())
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, picking the parser from the extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let text = std::fs::read_to_string(path)?;
        let config = match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&text)?,
            "json" => Self::from_json_str(&text)?,
            _ => return Err(ConfigError::UnsupportedFormat(ext)),
        };
        tracing::debug!(path = %path.display(), "loaded player config");
        Ok(config)
    }
}

pub(crate) fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

pub(crate) fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

pub(crate) fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
