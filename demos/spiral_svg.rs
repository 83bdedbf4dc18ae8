//! Draws a square spiral with a plain turtle, changing pen colour on every
//! side, and writes it out as `spiral.svg`.
use std::rc::Rc;

use terrapin::config::SurfaceConfig;
use terrapin::prelude::*;

fn main() -> anyhow::Result<()> {
    let config = SurfaceConfig {
        width: 400.0,
        height: 400.0,
        background: Some(PackedColor::BLACK),
        stroke_width: 1.5,
        seed: 7,
    };
    let surface = Rc::new(SvgSurface::from_config(&config));
    let mut turtle: Turtle<_> = Turtle::new(surface.clone());

    for side in 1..=80 {
        turtle
            .random_pen_color()
            .forward(side as f64 * 2.5)?
            .right(91.0)?;
    }
    println!("{}", turtle);

    surface.save("spiral.svg")?;
    Ok(())
}
