//! Serde-backed settings for turtles and surfaces, usually read from RON.
//!
//! ```rust
//! use terrapin::config::TurtleConfig;
//!
//! let cfg = TurtleConfig::from_ron_str("(heading: 90.0, pen_color: \"orange\")").unwrap();
//! assert_eq!(cfg.heading, 90.0);
//! assert!(cfg.pen_down);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{CssColor, PackedColor};
use crate::errors::ConfigError;

fn default_true() -> bool {
    true
}

fn default_white() -> CssColor {
    CssColor::from_rgba8(255, 255, 255, 255)
}

/// Starting state for a new turtle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TurtleConfig {
    /// Starting point. `None` means the centre of the surface.
    #[serde(default)]
    pub position: Option<(f64, f64)>,
    #[serde(default)]
    pub heading: f64,
    /// Any CSS colour string.
    #[serde(default = "default_white")]
    pub pen_color: CssColor,
    #[serde(default = "default_true")]
    pub pen_down: bool,
}

impl Default for TurtleConfig {
    fn default() -> Self {
        Self {
            position: None,
            heading: 0.0,
            pen_color: default_white(),
            pen_down: true,
        }
    }
}

impl TurtleConfig {
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading turtle config");
        Self::from_ron_str(&std::fs::read_to_string(path)?)
    }

    pub fn packed_pen_color(&self) -> PackedColor {
        PackedColor::from(self.pen_color.clone())
    }
}

/// Canvas settings used by the bundled surfaces.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SurfaceConfig {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub background: Option<PackedColor>,
    #[serde(default = "SurfaceConfig::default_stroke_width")]
    pub stroke_width: f64,
    /// Seed for `uniform_random`.
    #[serde(default)]
    pub seed: u64,
}

impl SurfaceConfig {
    fn default_stroke_width() -> f64 {
        1.0
    }

    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading surface config");
        Self::from_ron_str(&std::fs::read_to_string(path)?)
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 480.0,
            background: None,
            stroke_width: SurfaceConfig::default_stroke_width(),
            seed: 0,
        }
    }
}
