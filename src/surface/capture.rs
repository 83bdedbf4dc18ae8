use std::cell::{Ref, RefCell};

use geo_types::Point;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::{FrameHooks, Surface};
use crate::color::PackedColor;
use crate::config::SurfaceConfig;

/// One `draw_line` call as seen by a [`CaptureSurface`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub from: Point<f64>,
    pub to: Point<f64>,
    pub color: PackedColor,
}

/// A headless surface that just remembers what it was asked to draw.
///
/// Random numbers come from a seeded [`SmallRng`] so runs are repeatable.
pub struct CaptureSurface {
    width: f64,
    height: f64,
    calls: RefCell<Vec<DrawCall>>,
    rng: RefCell<SmallRng>,
    hooks: FrameHooks,
}

impl CaptureSurface {
    pub fn new(width: f64, height: f64) -> CaptureSurface {
        CaptureSurface::seeded(width, height, 0)
    }

    pub fn seeded(width: f64, height: f64, seed: u64) -> CaptureSurface {
        CaptureSurface {
            width,
            height,
            calls: RefCell::new(vec![]),
            rng: RefCell::new(SmallRng::seed_from_u64(seed)),
            hooks: FrameHooks::new(),
        }
    }

    pub fn from_config(config: &SurfaceConfig) -> CaptureSurface {
        CaptureSurface::seeded(config.width, config.height, config.seed)
    }

    /// Everything drawn so far, oldest first.
    pub fn calls(&self) -> Ref<'_, Vec<DrawCall>> {
        self.calls.borrow()
    }

    /// Forget all recorded calls, like wiping the display.
    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl Surface for CaptureSurface {
    fn draw_line(&self, from: Point<f64>, to: Point<f64>, color: PackedColor) {
        self.calls.borrow_mut().push(DrawCall { from, to, color });
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
