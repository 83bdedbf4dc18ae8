//! # Turtle Module
//!
//! Logo-style turtle graphics: a pen point with a position, a heading in
//! degrees, a pen colour and a pen that is either up or down. Relative
//! motion (forward, turn, strafe, move toward) draws through the turtle's
//! [`PenSink`]; a plain [`Turtle`] strokes the surface immediately, while a
//! [`RecordingTurtle`] appends each line to a [`History`] that can be
//! replayed, edited and replayed again.
//!
//! Headings grow without bound (`right(270)` twice leaves 540) and are only
//! rounded when read through [`Turtle::rotation`]. Forward motion is snapped
//! to whole units per axis, the same way a pixel canvas would.

use std::cell::RefCell;
use std::fmt;
use std::path::Path;
use std::rc::Rc;

use geo_types::Point;
use tracing::{debug, trace, warn};

use crate::color::{palette_index, PackedColor, PALETTE};
use crate::config::TurtleConfig;
use crate::errors::{ConfigError, TurtleError};
use crate::geometry::{step, PointDistance};
use crate::surface::{Replay, Subscription, Surface};

pub mod history;
pub mod sink;

pub use history::{History, Segment};
pub use sink::{ImmediateDraw, PenSink};

/// A turtle that keeps every line it draws, see [`History`].
pub type RecordingTurtle<S> = Turtle<S, History>;

/// Anything with a position a turtle can measure against or head for.
pub trait Located {
    fn location(&self) -> Point<f64>;
}

impl Located for Point<f64> {
    fn location(&self) -> Point<f64> {
        *self
    }
}

impl<S, K> Located for Turtle<S, K> {
    fn location(&self) -> Point<f64> {
        self.position
    }
}

/// The turtle.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use terrapin::surface::CaptureSurface;
/// use terrapin::turtle::Turtle;
///
/// # fn main() -> Result<(), terrapin::errors::TurtleError> {
/// let surface = Rc::new(CaptureSurface::new(200.0, 200.0));
/// let mut t: Turtle<_> = Turtle::new(surface.clone());
/// t.forward(50.0)?.right(90.0)?.forward(50.0)?;
/// assert_eq!(surface.calls().len(), 2);
/// assert_eq!(t.to_string(), "Turtle at 150,150 facing 90");
/// # Ok(())
/// # }
/// ```
pub struct Turtle<S, K = ImmediateDraw> {
    surface: Rc<S>,
    sink: K,
    position: Point<f64>,
    heading: f64,
    pen_color: PackedColor,
    pen_down: bool,
}

impl<S: Surface, K: PenSink<S> + Default> Turtle<S, K> {
    /// A turtle in the middle of the surface, facing +x, drawing in white.
    /// A surface with non-finite dimensions has no usable centre; the
    /// turtle starts at the origin instead.
    pub fn new(surface: Rc<S>) -> Self {
        let mut position = surface.center();
        if !(position.x().is_finite() && position.y().is_finite()) {
            warn!(center = ?position, "surface centre is not finite, starting at the origin");
            position = Point::new(0.0, 0.0);
        }
        Turtle {
            surface,
            sink: K::default(),
            position,
            heading: 0.0,
            pen_color: PackedColor::WHITE,
            pen_down: true,
        }
    }

    pub fn with_config(surface: Rc<S>, config: &TurtleConfig) -> Result<Self, TurtleError> {
        let mut turtle = Self::new(surface);
        if let Some((x, y)) = config.position {
            turtle.set_location(x, y)?;
        }
        turtle.set_rotation(config.heading)?;
        turtle.set_pen_color(config.packed_pen_color());
        turtle.pen_down = config.pen_down;
        Ok(turtle)
    }

    /// Copy another turtle's position, heading and pen. The surface is
    /// shared; the sink is fresh, so a copied recording turtle starts with an
    /// empty history.
    pub fn from_turtle<K2>(other: &Turtle<S, K2>) -> Self {
        Turtle {
            surface: other.surface.clone(),
            sink: K::default(),
            position: other.position,
            heading: other.heading,
            pen_color: other.pen_color,
            pen_down: other.pen_down,
        }
    }
}

impl<S: Surface, K: PenSink<S>> Turtle<S, K> {
    pub fn surface(&self) -> &Rc<S> {
        &self.surface
    }

    pub fn position(&self) -> Point<f64> {
        self.position
    }

    /// The stored heading in degrees, unrounded and unnormalised.
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Heading rounded to the nearest whole degree, halves away from zero
    /// (`-0.5` reads as `-1`).
    pub fn rotation(&self) -> i64 {
        self.heading.round() as i64
    }

    pub fn pen_color(&self) -> PackedColor {
        self.pen_color
    }

    pub fn is_pen_down(&self) -> bool {
        self.pen_down
    }

    pub fn forward(&mut self, amount: f64) -> Result<&mut Self, TurtleError> {
        let to = self.target_along(self.heading, amount)?;
        self.move_to_point(to);
        Ok(self)
    }

    pub fn backward(&mut self, amount: f64) -> Result<&mut Self, TurtleError> {
        self.forward(-amount)
    }

    pub fn left(&mut self, amount: f64) -> Result<&mut Self, TurtleError> {
        TurtleError::check("turn", amount)?;
        self.heading = TurtleError::check("heading", self.heading - amount)?;
        Ok(self)
    }

    pub fn right(&mut self, amount: f64) -> Result<&mut Self, TurtleError> {
        TurtleError::check("turn", amount)?;
        self.heading = TurtleError::check("heading", self.heading + amount)?;
        Ok(self)
    }

    pub fn set_rotation(&mut self, angle: f64) -> Result<&mut Self, TurtleError> {
        self.heading = TurtleError::check("heading", angle)?;
        Ok(self)
    }

    /// Jump to `(x, y)`. **This never draws**, whatever the pen state.
    pub fn set_location(&mut self, x: f64, y: f64) -> Result<&mut Self, TurtleError> {
        TurtleError::check("x", x)?;
        TurtleError::check("y", y)?;
        self.position = Point::new(x, y);
        Ok(self)
    }

    /// Move to `(x, y)`, drawing a line from the current position if the pen
    /// is down.
    pub fn move_to(&mut self, x: f64, y: f64) -> Result<&mut Self, TurtleError> {
        TurtleError::check("x", x)?;
        TurtleError::check("y", y)?;
        self.move_to_point(Point::new(x, y));
        Ok(self)
    }

    /// Move `fraction` of the way toward `(x, y)`: 0 stays put, 1 arrives,
    /// 0.5 goes half way. The distance covered is rounded to whole units and
    /// the turtle turns to face the target.
    pub fn move_toward(&mut self, x: f64, y: f64, fraction: f64) -> Result<&mut Self, TurtleError> {
        TurtleError::check("fraction", fraction)?;
        let target = Point::new(TurtleError::check("x", x)?, TurtleError::check("y", y)?);
        let amount = (self.position.distance(&target) * fraction).round();
        self.move_toward_by(x, y, amount)
    }

    /// Turn to face `(x, y)` and move `amount` units along that bearing.
    /// There is no clamping; an `amount` larger than the distance overshoots.
    pub fn move_toward_by(&mut self, x: f64, y: f64, amount: f64) -> Result<&mut Self, TurtleError> {
        let target = Point::new(TurtleError::check("x", x)?, TurtleError::check("y", y)?);
        let bearing = self.position.bearing(&target);
        let to = self.target_along(bearing, amount)?;
        self.heading = bearing;
        self.move_to_point(to);
        Ok(self)
    }

    pub fn move_toward_turtle<L: Located>(&mut self, other: &L, fraction: f64) -> Result<&mut Self, TurtleError> {
        let p = other.location();
        self.move_toward(p.x(), p.y(), fraction)
    }

    pub fn move_toward_turtle_by<L: Located>(&mut self, other: &L, amount: f64) -> Result<&mut Self, TurtleError> {
        let p = other.location();
        self.move_toward_by(p.x(), p.y(), amount)
    }

    /// Sidestep `amount` units to the left without changing heading.
    ///
    /// With the pen down this draws the quarter turn, the step and the turn
    /// back as three connected segments, the turns being zero length.
    pub fn strafe_left(&mut self, amount: f64) -> Result<&mut Self, TurtleError> {
        self.strafe(self.heading - 90.0, amount)
    }

    pub fn strafe_right(&mut self, amount: f64) -> Result<&mut Self, TurtleError> {
        self.strafe(self.heading + 90.0, amount)
    }

    fn strafe(&mut self, side: f64, amount: f64) -> Result<&mut Self, TurtleError> {
        let to = self.target_along(side, amount)?;
        self.move_to_point(self.position);
        self.move_to_point(to);
        self.move_to_point(to);
        Ok(self)
    }

    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        self.position.distance(&Point::new(x, y))
    }

    pub fn distance<L: Located>(&self, other: &L) -> f64 {
        self.position.distance(&other.location())
    }

    /// The closest candidate; the first one wins a tie. `None` only if there
    /// are no candidates. A candidate at a NaN distance loses to any
    /// comparable one.
    pub fn nearest<'a, L, I>(&self, candidates: I) -> Option<&'a L>
    where
        L: Located + 'a,
        I: IntoIterator<Item = &'a L>,
    {
        let mut candidates = candidates.into_iter();
        let mut nearest = candidates.next()?;
        let mut nearest_dist = self.distance(nearest);
        for candidate in candidates {
            let dist = self.distance(candidate);
            if dist < nearest_dist || (nearest_dist.is_nan() && !dist.is_nan()) {
                nearest = candidate;
                nearest_dist = dist;
            }
        }
        Some(nearest)
    }

    pub fn set_pen_rgb(&mut self, r: u8, g: u8, b: u8) -> &mut Self {
        self.pen_color = self.surface.pack_color(r, g, b);
        self
    }

    pub fn set_pen_color(&mut self, color: PackedColor) -> &mut Self {
        self.pen_color = color;
        self
    }

    /// Set the pen from any CSS colour string, e.g. `"orange"` or `"#9b603b"`.
    pub fn set_pen_css(&mut self, color: &str) -> Result<&mut Self, TurtleError> {
        self.pen_color = color.parse()?;
        Ok(self)
    }

    /// Pick a pen colour from [`PALETTE`], uniformly.
    pub fn random_pen_color(&mut self) -> &mut Self {
        let sample = self.surface.uniform_random(0.0, PALETTE.len() as f64);
        let (r, g, b) = PALETTE[palette_index(sample)];
        self.set_pen_rgb(r, g, b)
    }

    /// Lift the pen: moves no longer draw.
    pub fn up(&mut self) -> &mut Self {
        self.pen_down = false;
        self
    }

    pub fn down(&mut self) -> &mut Self {
        self.pen_down = true;
        self
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    fn target_along(&self, heading: f64, amount: f64) -> Result<Point<f64>, TurtleError> {
        TurtleError::check("distance", amount)?;
        let to = self.position + step(heading, amount);
        TurtleError::check("x", to.x())?;
        TurtleError::check("y", to.y())?;
        Ok(to)
    }

    fn move_to_point(&mut self, to: Point<f64>) {
        if self.pen_down {
            trace!(from = ?self.position, to = ?to, color = %self.pen_color, "pen move");
            self.sink.on_move(&self.surface, self.position, to, self.pen_color);
        }
        self.position = to;
    }
}

impl<S: Surface> Turtle<S, History> {
    /// Create a recording turtle and hook it into the surface's per-frame
    /// redraw. Keep the [`Subscription`] to stop the redraws later.
    pub fn spawn(surface: Rc<S>) -> (Rc<RefCell<Self>>, Subscription)
    where
        S: 'static,
    {
        Self::new(surface).register()
    }

    /// Hook an existing recording turtle into its surface's per-frame redraw.
    pub fn register(self) -> (Rc<RefCell<Self>>, Subscription)
    where
        S: 'static,
    {
        let surface = self.surface.clone();
        let shared = Rc::new(RefCell::new(self));
        let subscription = surface.frame_hooks().register(&shared);
        debug!(hook = subscription.id(), "recording turtle registered for redraw");
        (shared, subscription)
    }

    /// Redraw every recorded line in order, each in the colour it was drawn
    /// with (not the current pen colour).
    pub fn replay(&self) {
        self.sink.replay_on(self.surface.as_ref());
    }

    pub fn history(&self) -> &History {
        &self.sink
    }

    pub fn lines(&self) -> &[Segment] {
        &self.sink
    }

    /// The raw history, for editing what has already been drawn.
    pub fn lines_mut(&mut self) -> &mut Vec<Segment> {
        &mut self.sink
    }

    pub fn clear_history(&mut self) -> &mut Self {
        self.sink.clear();
        self
    }

    pub fn save_history<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        self.sink.save(path)
    }

    /// Replace the history with one previously written by
    /// [`Turtle::save_history`]. Position and pen are left alone.
    pub fn load_history<P: AsRef<Path>>(&mut self, path: P) -> Result<&mut Self, ConfigError> {
        self.sink = History::load(path)?;
        Ok(self)
    }
}

impl<S: Surface> Replay for Turtle<S, History> {
    fn replay(&self) {
        self.sink.replay_on(self.surface.as_ref());
    }
}

impl<S, K: Clone> Clone for Turtle<S, K> {
    fn clone(&self) -> Self {
        Turtle {
            surface: self.surface.clone(),
            sink: self.sink.clone(),
            position: self.position,
            heading: self.heading,
            pen_color: self.pen_color,
            pen_down: self.pen_down,
        }
    }
}

impl<S, K: fmt::Debug> fmt::Debug for Turtle<S, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Turtle")
            .field("position", &self.position)
            .field("heading", &self.heading)
            .field("pen_color", &self.pen_color)
            .field("pen_down", &self.pen_down)
            .field("sink", &self.sink)
            .finish()
    }
}

impl<S, K> fmt::Display for Turtle<S, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Turtle at {},{} facing {}",
            self.position.x(),
            self.position.y(),
            self.heading.round() as i64
        )
    }
}

#[cfg(test)]
mod tests;
