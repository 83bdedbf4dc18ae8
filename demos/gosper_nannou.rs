//! Grows a Gosper curve a few strokes per frame with a recording turtle, and
//! lets the surface's frame hooks redraw the whole history onto a fresh
//! nannou frame every time.
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use nannou::prelude::*;
use terrapin::l_system::{walk_lpath, LSystem};
use terrapin::surface::nannou::NannouSurface;
use terrapin::surface::{Subscription, Surface};
use terrapin::turtle::RecordingTurtle;

/// Symbols walked per frame.
const STEPS_PER_FRAME: usize = 12;

struct Model {
    surface: Rc<NannouSurface>,
    turtle: Rc<RefCell<RecordingTurtle<NannouSurface>>>,
    _subscription: Subscription,
    path: Vec<char>,
    walked: usize,
}

fn model(app: &App) -> Model {
    app.new_window().size(800, 800).view(view).build().unwrap();

    let gosper = LSystem {
        axiom: "A".to_string(),
        rules: HashMap::from([
            ('A', "A-B--B+A++AA+B-".to_string()),
            ('B', "+A-BB--B-A++A+B".to_string()),
        ]),
    };

    let mut surface = NannouSurface::new(app.draw(), 800.0, 800.0);
    surface.stroke_weight(2.0);
    let surface = Rc::new(surface);

    let (turtle, subscription) = RecordingTurtle::spawn(surface.clone());
    turtle
        .borrow_mut()
        .set_location(300.0, 200.0)
        .unwrap()
        .set_pen_css("navy")
        .unwrap();

    Model {
        surface,
        turtle,
        _subscription: subscription,
        path: gosper.expand(4).chars().collect(),
        walked: 0,
    }
}

fn update(_app: &App, model: &mut Model, _update: Update) {
    if model.walked >= model.path.len() {
        return;
    }
    let end = (model.walked + STEPS_PER_FRAME).min(model.path.len());
    let chunk: String = model.path[model.walked..end].iter().collect();
    let mut turtle = model.turtle.borrow_mut();
    if walk_lpath(&mut *turtle, &chunk, 60.0, 6.0).is_err() {
        model.walked = model.path.len();
        return;
    }
    if model.walked % 120 == 0 {
        turtle.random_pen_color();
    }
    model.walked = end;
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    frame.clear(PURPLE);
    model.surface.set_draw(draw.clone());
    model.surface.frame_hooks().run_frame();
    draw.to_frame(app, &frame).unwrap();
}

fn main() {
    nannou::app(model).update(update).run();
}
