use std::ops::{Deref, DerefMut};
use std::path::Path;

use geo_types::Point;
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::sink::PenSink;
use crate::color::PackedColor;
use crate::errors::ConfigError;
use crate::surface::Surface;

/// One line a recording turtle drew. Fixed once created; to "edit" a
/// drawing, replace or remove entries in the [`History`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    from: Point<f64>,
    to: Point<f64>,
    color: PackedColor,
}

impl Segment {
    pub fn new(from: Point<f64>, to: Point<f64>, color: PackedColor) -> Segment {
        Segment { from, to, color }
    }

    pub fn from(&self) -> Point<f64> {
        self.from
    }

    pub fn to(&self) -> Point<f64> {
        self.to
    }

    pub fn color(&self) -> PackedColor {
        self.color
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &S) {
        surface.draw_line(self.from, self.to, self.color);
    }
}

/// Every segment drawn so far, in drawing order.
///
/// Derefs to the underlying `Vec<Segment>` so callers can index, splice,
/// retain or rewrite entries freely; the next replay draws whatever is
/// there.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct History {
    lines: Vec<Segment>,
}

impl History {
    pub fn new() -> History {
        History::default()
    }

    /// Draw every entry in order, each in its own colour.
    pub fn replay_on<S: Surface + ?Sized>(&self, surface: &S) {
        debug!(segments = self.lines.len(), "replaying history");
        for line in &self.lines {
            line.draw(surface);
        }
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, PrettyConfig::default())?)
    }

    pub fn from_ron_str(text: &str) -> Result<History, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_ron_string()?)?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<History, ConfigError> {
        History::from_ron_str(&std::fs::read_to_string(path)?)
    }
}

impl From<Vec<Segment>> for History {
    fn from(lines: Vec<Segment>) -> Self {
        History { lines }
    }
}

impl Deref for History {
    type Target = Vec<Segment>;

    fn deref(&self) -> &Self::Target {
        &self.lines
    }
}

impl DerefMut for History {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.lines
    }
}

impl<S: Surface> PenSink<S> for History {
    fn on_move(&mut self, _surface: &S, from: Point<f64>, to: Point<f64>, color: PackedColor) {
        self.lines.push(Segment::new(from, to, color));
    }
}
