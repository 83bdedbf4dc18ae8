//! A small Lindenmayer system expander, plus [`walk_lpath`] to drive any
//! turtle from the expanded string.
//!
//! ```rust
//! use std::collections::HashMap;
//! use std::rc::Rc;
//! use terrapin::l_system::{walk_lpath, LSystem};
//! use terrapin::surface::SvgSurface;
//! use terrapin::turtle::RecordingTurtle;
//!
//! let gosper = LSystem {
//!     axiom: "A".to_string(),
//!     rules: HashMap::from([
//!         ('A', "A-B--B+A++AA+B-".to_string()),
//!         ('B', "+A-BB--B-A++A+B".to_string()),
//!     ]),
//! };
//! let surface = Rc::new(SvgSurface::new(800.0, 800.0));
//! let mut t: RecordingTurtle<_> = RecordingTurtle::new(surface.clone());
//! walk_lpath(&mut t, &gosper.expand(2), 60.0, 8.0).unwrap();
//! assert_eq!(t.lines().len(), 49);
//! ```

use std::collections::HashMap;

use geo_types::Point;
use tracing::warn;

use crate::errors::TurtleError;
use crate::surface::Surface;
use crate::turtle::{PenSink, Turtle};

#[derive(Clone, Debug)]
pub struct LSystem {
    pub axiom: String,
    pub rules: HashMap<char, String>,
}

impl LSystem {
    /// Rewrite the axiom `order` times. Symbols without a rule are copied
    /// through unchanged.
    pub fn expand(&self, order: u32) -> String {
        let mut state = self.axiom.clone();
        for _ in 0..order {
            let mut next = String::with_capacity(state.len() * 2);
            for c in state.chars() {
                match self.rules.get(&c) {
                    Some(replacement) => next.push_str(replacement),
                    None => next.push(c),
                }
            }
            state = next;
        }
        state
    }
}

/// Walk an L-system path with a turtle.
///
/// * `[` / `]` save and restore position and heading (restoring never draws)
/// * `-` turns left by `angle` degrees, `+` turns right
/// * any other symbol moves forward `distance`
///
/// An unbalanced `]` is ignored.
pub fn walk_lpath<S, K>(
    turtle: &mut Turtle<S, K>,
    lpath: &str,
    angle: f64,
    distance: f64,
) -> Result<(), TurtleError>
where
    S: Surface,
    K: PenSink<S>,
{
    let mut stack: Vec<(Point<f64>, f64)> = vec![];
    for c in lpath.chars() {
        match c {
            '[' => stack.push((turtle.position(), turtle.heading())),
            ']' => match stack.pop() {
                Some((p, heading)) => {
                    turtle.set_location(p.x(), p.y())?.set_rotation(heading)?;
                }
                None => warn!("unbalanced ']' in lpath, ignoring"),
            },
            '-' => {
                turtle.left(angle)?;
            }
            '+' => {
                turtle.right(angle)?;
            }
            _ => {
                turtle.forward(distance)?;
            }
        }
    }
    Ok(())
}
