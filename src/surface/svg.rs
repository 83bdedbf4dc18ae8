use std::cell::RefCell;
use std::path::Path;

use geo_types::Point;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use svg::node::element::{Line, Rectangle};
use svg::Document;
use tracing::info;

use super::{DrawCall, FrameHooks, Surface};
use crate::color::PackedColor;
use crate::config::SurfaceConfig;

/// Surface that turns strokes into an SVG document.
///
/// Every `draw_line` becomes one `<line>` element, in draw order. Calling
/// [`SvgSurface::clear`] and running a frame is how a recording turtle
/// rebuilds its drawing on a fresh canvas.
pub struct SvgSurface {
    width: f64,
    height: f64,
    background: Option<PackedColor>,
    stroke_width: f64,
    strokes: RefCell<Vec<DrawCall>>,
    rng: RefCell<SmallRng>,
    hooks: FrameHooks,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> SvgSurface {
        SvgSurface::from_config(&SurfaceConfig {
            width,
            height,
            ..SurfaceConfig::default()
        })
    }

    pub fn from_config(config: &SurfaceConfig) -> SvgSurface {
        SvgSurface {
            width: config.width,
            height: config.height,
            background: config.background,
            stroke_width: config.stroke_width,
            strokes: RefCell::new(vec![]),
            rng: RefCell::new(SmallRng::seed_from_u64(config.seed)),
            hooks: FrameHooks::new(),
        }
    }

    pub fn background(&mut self, color: Option<PackedColor>) -> &mut Self {
        self.background = color;
        self
    }

    pub fn stroke_width(&mut self, width: f64) -> &mut Self {
        self.stroke_width = width;
        self
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.borrow().len()
    }

    pub fn clear(&self) {
        self.strokes.borrow_mut().clear();
    }

    pub fn to_document(&self) -> Document {
        let mut doc = Document::new()
            .set("viewBox", (0.0, 0.0, self.width, self.height))
            .set("width", self.width)
            .set("height", self.height);
        if let Some(bg) = self.background {
            doc = doc.add(
                Rectangle::new()
                    .set("x", 0.0)
                    .set("y", 0.0)
                    .set("width", self.width)
                    .set("height", self.height)
                    .set("fill", bg.to_hex()),
            );
        }
        for stroke in self.strokes.borrow().iter() {
            doc = doc.add(
                Line::new()
                    .set("x1", stroke.from.x())
                    .set("y1", stroke.from.y())
                    .set("x2", stroke.to.x())
                    .set("y2", stroke.to.y())
                    .set("stroke", stroke.color.to_hex())
                    .set("stroke-width", self.stroke_width)
                    .set("stroke-linecap", "round"),
            );
        }
        doc
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        svg::save(path, &self.to_document())?;
        info!(path = %path.display(), strokes = self.stroke_count(), "svg written");
        Ok(())
    }
}

impl Surface for SvgSurface {
    fn draw_line(&self, from: Point<f64>, to: Point<f64>, color: PackedColor) {
        self.strokes.borrow_mut().push(DrawCall { from, to, color });
    }

    fn uniform_random(&self, min: f64, max: f64) -> f64 {
        if max > min {
            self.rng.borrow_mut().gen_range(min..max)
        } else {
            min
        }
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn frame_hooks(&self) -> &FrameHooks {
        &self.hooks
    }
}
