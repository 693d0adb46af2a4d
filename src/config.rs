// Application configuration
//
// Configuration is loaded from multiple sources with the following priority (lowest to highest):
// 1. Built-in defaults
// 2. `config/default.toml` (version controlled)
// 3. `config/user.toml` (gitignored, user overrides)
// 4. Environment variables (`BACKDROP_SECTION__KEY`)

use figment::{Figment, providers::{Env, Format, Serialized, Toml}};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::theme::ThemeConfig;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Particle field configuration
    #[serde(default)]
    pub field: FieldConfig,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Snapshot configuration
    #[serde(default)]
    pub snapshot: SnapshotConfig,
}

impl AppConfig {
    /// Load configuration from the `config` directory next to the working directory
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        // Defaults first so partial files only override what they name
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // BACKDROP_FIELD__POINT_COUNT=120 -> field.point_count = 120
        figment = figment.merge(Env::prefixed("BACKDROP_").split("__"));

        let config: AppConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the field or canvas cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.field.validate()?;
        self.rendering.validate()
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Initial width in pixels
    pub width: usize,
    /// Initial height in pixels
    pub height: usize,
    /// Frame callback cadence; velocities are per frame, so this sets apparent speed
    pub target_fps: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Neural Backdrop".to_string(),
            width: 1280,
            height: 720,
            target_fps: 60,
        }
    }
}

/// Particle field configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Points per session
    pub point_count: usize,
    /// Pairs closer than this (px) are joined by a line
    pub connection_distance: f32,
    /// Points closer than this (px) to the pointer are pulled toward it
    pub pointer_radius: f32,
    /// Fraction of the pointer displacement applied per frame
    pub pointer_strength: f32,
    /// Velocity components are drawn from [-max_speed, max_speed] px/frame
    pub max_speed: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Alpha of every point
    pub point_alpha: f32,
    /// Alpha of a connection between coincident points
    pub connection_alpha: f32,
    /// Fixed RNG seed; `None` seeds from the OS
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            point_count: 60,
            connection_distance: 150.0,
            pointer_radius: 200.0,
            pointer_strength: 0.01,
            max_speed: 0.25,
            min_radius: 1.0,
            max_radius: 3.0,
            point_alpha: 0.5,
            connection_alpha: 0.2,
            seed: None,
        }
    }
}

impl FieldConfig {
    /// Distances, speeds and radii must be finite and non-negative; alphas in [0, 1].
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("field.max_speed", self.max_speed)?;
        non_negative("field.min_radius", self.min_radius)?;
        non_negative("field.max_radius", self.max_radius)?;
        non_negative("field.connection_distance", self.connection_distance)?;
        non_negative("field.pointer_radius", self.pointer_radius)?;
        non_negative("field.pointer_strength", self.pointer_strength)?;
        // Velocities are drawn from [-max_speed, max_speed]; the span must stay finite
        if !(2.0 * self.max_speed).is_finite() {
            return Err(ConfigError::invalid("field.max_speed", self.max_speed, "too large"));
        }
        unit("field.point_alpha", self.point_alpha)?;
        unit("field.connection_alpha", self.connection_alpha)
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderingConfig {
    /// Opacity of the whole backdrop layer over the page background
    pub layer_opacity: f32,
    /// Composite in linear light instead of straight sRGB
    pub linear_blending: bool,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            layer_opacity: 0.6,
            linear_blending: false,
        }
    }
}

impl RenderingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        unit("rendering.layer_opacity", self.layer_opacity)
    }
}

fn non_negative(key: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(key, value, "expected a finite value >= 0"))
    }
}

fn unit(key: &str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(key, value, "expected a value in [0, 1]"))
    }
}

/// Snapshot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Directory PNG snapshots are written to
    pub directory: PathBuf,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("snapshots"),
        }
    }
}

/// Configuration loading error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    fn invalid(key: &str, value: f32, reason: &str) -> Self {
        ConfigError {
            message: format!("{key} = {value}: {reason}"),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
