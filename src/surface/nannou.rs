use std::cell::RefCell;

use geo_types::Point;
use nannou::color::rgb8;
use nannou::geom::pt2;
use nannou::Draw;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::{FrameHooks, Surface};
use crate::color::PackedColor;

/// Strokes turtle lines straight onto a nannou [`Draw`].
///
/// Nannou puts the origin at the window centre with +y up; turtle
/// coordinates are translated so (0, 0) is the top-left corner and +y runs
/// down the window, matching the other surfaces.
pub struct NannouSurface {
    draw: RefCell<Draw>,
    width: f64,
    height: f64,
    weight: f32,
    rng: RefCell<SmallRng>,
    hooks: FrameHooks,
}

impl NannouSurface {
    pub fn new(draw: Draw, width: f64, height: f64) -> NannouSurface {
        NannouSurface {
            draw: RefCell::new(draw),
            width,
            height,
            weight: 1.0,
            rng: RefCell::new(SmallRng::from_entropy()),
            hooks: FrameHooks::new(),
        }
    }

    pub fn stroke_weight(&mut self, weight: f32) -> &mut Self {
        self.weight = weight;
        self
    }

    /// Swap in the `Draw` for the current frame.
    pub fn set_draw(&self, draw: Draw) {
        *self.draw.borrow_mut() = draw;
    }

    fn to_window(&self, p: Point<f64>) -> nannou::geom::Point2 {
        pt2(
            (p.x() - self.width / 2.0) as f32,
            (self.height / 2.0 - p.y()) as f32,
        )
    }
}

impl Surface for NannouSurface {
    fn draw_line(&self, from: Point<f64>, to: Point<f64>, color: PackedColor) {
        let (r, g, b) = color.rgb();
        self.draw
            .borrow()
            .line()
            .start(self.to_window(from))
            .end(self.to_window(to))
            .weight(self.weight)
            .color(rgb8(r, g, b));
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
