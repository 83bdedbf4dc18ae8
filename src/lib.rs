//! Terrapin: Logo-style turtle graphics
//!
//! A turtle is a pen point with a position, a heading and a pen that is up or
//! down. Move it around with relative commands and it draws lines on a
//! [`surface::Surface`]. A [`turtle::RecordingTurtle`] keeps every line it
//! drew so the whole picture can be replayed (and edited) later, for example
//! once per frame after the host clears its canvas.
//!
//! ```rust
//! use std::rc::Rc;
//! use terrapin::prelude::*;
//!
//! # fn main() -> Result<(), TurtleError> {
//! let surface = Rc::new(SvgSurface::new(200.0, 200.0));
//! let (turtle, subscription) = RecordingTurtle::spawn(surface.clone());
//! {
//!     let mut t = turtle.borrow_mut();
//!     for _ in 0..4 {
//!         t.random_pen_color().forward(50.0)?.right(90.0)?;
//!     }
//! }
//! surface.frame_hooks().run_frame();
//! assert_eq!(surface.stroke_count(), 4);
//! subscription.unsubscribe();
//! # Ok(())
//! # }
//! ```

/// Packed RGB colours and the random pen palette.
pub mod color;

/// Settings for turtles and surfaces, loaded from RON.
pub mod config;

pub mod errors;

/// Small angle and distance helpers over [`geo_types::Point`].
pub mod geometry;

/// L-system implementation, with a path walker for turtles
pub mod l_system;

/// The rendering surface trait, per-frame hooks, and bundled surfaces.
pub mod surface;

/// Turtle graphics implementation
pub mod turtle;

/// Everything you usually need in one import.
pub mod prelude {
    pub use crate::color::PackedColor;
    pub use crate::errors::TurtleError;
    pub use crate::geometry::PointDistance;
    pub use crate::l_system::{walk_lpath, LSystem};
    pub use crate::surface::{CaptureSurface, FrameHooks, Subscription, Surface, SvgSurface};
    pub use crate::turtle::{Located, RecordingTurtle, Segment, Turtle};
}
