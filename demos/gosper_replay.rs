//! Grows a Gosper curve with a recording turtle, then "edits" the drawing by
//! recolouring every other segment and replays it onto a cleared canvas.
use std::collections::HashMap;
use std::rc::Rc;

use terrapin::prelude::*;

fn main() -> anyhow::Result<()> {
    let gosper = LSystem {
        axiom: "A".to_string(),
        rules: HashMap::from([
            ('A', "A-B--B+A++AA+B-".to_string()),
            ('B', "+A-BB--B-A++A+B".to_string()),
        ]),
    };

    let surface = Rc::new(SvgSurface::new(600.0, 600.0));
    let (turtle, subscription) = RecordingTurtle::spawn(surface.clone());
    {
        let mut t = turtle.borrow_mut();
        t.set_location(200.0, 150.0)?.set_pen_css("navy")?;
        walk_lpath(&mut *t, &gosper.expand(3), 60.0, 8.0)?;
    }

    surface.frame_hooks().run_frame();
    surface.save("gosper-before.svg")?;

    {
        let mut t = turtle.borrow_mut();
        let orange: PackedColor = "orange".parse()?;
        for (i, line) in t.lines_mut().iter_mut().enumerate() {
            if i % 2 == 1 {
                *line = Segment::new(line.from(), line.to(), orange);
            }
        }
    }

    surface.clear();
    surface.frame_hooks().run_frame();
    surface.save("gosper-after.svg")?;

    subscription.unsubscribe();
    Ok(())
}
