//! Viewer configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `screenfx.ron` file (if exists), or the file given with `--config`
//! 3. Environment variables prefixed with `SCREENFX_`
//!
//! Example environment variable: `SCREENFX_VIEW__FOV_DEGREES=45`

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use screenfx_core::{TransitionPreset, TEXTURE_ZOOM_STEPS};
use serde::{Deserialize, Serialize};

/// Main viewer configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ViewerConfig {
    #[serde(default)]
    pub view: ViewConfig,

    #[serde(default)]
    pub geometry: GeometryConfig,

    #[serde(default)]
    pub animation: AnimationConfig,

    #[serde(default)]
    pub debug: DebugConfig,
}

/// Projection and drawable settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane
    pub near_z: f32,
    /// Far clipping plane
    pub far_z: f32,
    /// Distance between the resting eye and the screen quad
    pub screen_distance: f32,
    /// Initial drawable width
    pub width: u32,
    /// Initial drawable height
    pub height: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            near_z: 0.1,
            far_z: 100.0,
            screen_distance: 1.4,
            width: 800,
            height: 600,
        }
    }
}

/// Eye position offsets from the geometry preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometryConfig {
    pub eye_x: f32,
    pub eye_y: f32,
    pub eye_z: f32,
}

/// Transition settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Duration of texture zooms in frames
    pub texture_zoom_steps: u32,
    /// Transition to play when the surface comes up
    #[serde(default)]
    pub startup_preset: Option<TransitionPreset>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            texture_zoom_steps: TEXTURE_ZOOM_STEPS,
            startup_preset: None,
        }
    }
}

/// Debug/development settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Enable verbose logging
    pub verbose_logging: bool,
}

impl ViewerConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `screenfx.ron` file (if exists)
    /// 3. Environment variables prefixed with `SCREENFX_` (highest priority)
    pub fn load() -> Result<Self> {
        let builder = Self::defaults()?
            .add_source(
                File::with_name("screenfx")
                    .format(config::FileFormat::Ron)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("SCREENFX")
                    .prefix_separator("_")
                    .separator("__"),
            );

        Self::build(builder)
    }

    /// Like [`ViewerConfig::load`], but the file layer is `path` and must exist.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let builder = Self::defaults()?
            .add_source(File::from(path).format(config::FileFormat::Ron))
            .add_source(
                Environment::with_prefix("SCREENFX")
                    .prefix_separator("_")
                    .separator("__"),
            );

        Self::build(builder)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        let builder = Config::builder()
            .set_default("view.fov_degrees", 60.0)?
            .set_default("view.near_z", 0.1)?
            .set_default("view.far_z", 100.0)?
            .set_default("view.screen_distance", 1.4)?
            .set_default("view.width", 800_i64)?
            .set_default("view.height", 600_i64)?
            .set_default("geometry.eye_x", 0.0)?
            .set_default("geometry.eye_y", 0.0)?
            .set_default("geometry.eye_z", 0.0)?
            .set_default("animation.texture_zoom_steps", TEXTURE_ZOOM_STEPS as i64)?
            .set_default("debug.verbose_logging", false)?;
        Ok(builder)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Render the effective configuration as RON.
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize configuration")
    }
}
