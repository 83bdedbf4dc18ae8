//! The rendering surface a turtle draws on.
//!
//! Turtles only ever need a narrow slice of a drawing API: stroke a line,
//! pack a colour, roll a random number, know the canvas size, and hook into
//! the host's per-frame redraw. [`Surface`] is that slice. Surfaces are
//! shared between turtles through `Rc`, so every method takes `&self` and
//! implementations keep their mutable bits behind `RefCell`s.

use geo_types::Point;

use crate::color::PackedColor;

pub mod capture;
pub mod hooks;
#[cfg(feature = "nannou")]
pub mod nannou;
pub mod svg;

pub use capture::{CaptureSurface, DrawCall};
pub use hooks::{FrameHooks, Replay, Subscription};
pub use self::svg::SvgSurface;

pub trait Surface {
    /// Stroke a single segment in `color`.
    fn draw_line(&self, from: Point<f64>, to: Point<f64>, color: PackedColor);

    /// Pack 8-bit channels into the surface's colour representation.
    fn pack_color(&self, r: u8, g: u8, b: u8) -> PackedColor {
        PackedColor::from_rgb(r, g, b)
    }

    /// A uniform sample in `[min, max)`.
    fn uniform_random(&self, min: f64, max: f64) -> f64;

    fn width(&self) -> f64;

    fn height(&self) -> f64;

    fn center(&self) -> Point<f64> {
        Point::new(self.width() / 2.0, self.height() / 2.0)
    }

    /// The per-frame redraw registry for this surface.
    fn frame_hooks(&self) -> &FrameHooks;
}
