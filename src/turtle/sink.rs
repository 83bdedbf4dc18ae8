use geo_types::Point;

use crate::color::PackedColor;
use crate::surface::Surface;

/// Where a pen-down move goes.
///
/// `Turtle::move_to` calls `on_move` exactly once for every move made with
/// the pen down, and never with the pen up. Everything else about a turtle is
/// shared; the sink is the only thing that differs between a plain turtle and
/// a recording one.
pub trait PenSink<S: Surface> {
    fn on_move(&mut self, surface: &S, from: Point<f64>, to: Point<f64>, color: PackedColor);
}

/// Strokes each move on the surface straight away.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImmediateDraw;

impl<S: Surface> PenSink<S> for ImmediateDraw {
    fn on_move(&mut self, surface: &S, from: Point<f64>, to: Point<f64>, color: PackedColor) {
        surface.draw_line(from, to, color);
    }
}
