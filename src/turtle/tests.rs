use std::rc::Rc;

use geo_types::Point;

use super::*;
use crate::surface::{CaptureSurface, DrawCall};

fn surface() -> Rc<CaptureSurface> {
    Rc::new(CaptureSurface::new(100.0, 100.0))
}

fn close(a: Point<f64>, b: Point<f64>) -> bool {
    a.distance(&b) < 0.0001
}

#[test]
fn test_defaults() {
    let t: Turtle<_> = Turtle::new(surface());
    assert_eq!(t.position(), Point::new(50.0, 50.0));
    assert_eq!(t.heading(), 0.0);
    assert!(t.is_pen_down());
    assert_eq!(t.pen_color(), PackedColor::WHITE);
    assert_eq!(t.to_string(), "Turtle at 50,50 facing 0");
}

#[test]
fn test_forward_backward_round_trip() {
    let s = surface();
    let mut t: Turtle<_> = Turtle::new(s.clone());
    t.set_rotation(33.0).unwrap();
    let start = t.position();
    t.forward(37.0).unwrap().backward(37.0).unwrap();
    assert!(close(t.position(), start));
    assert_eq!(t.heading(), 33.0);
    assert_eq!(s.calls().len(), 2);
}

#[test]
fn test_forward_rounds_displacement() {
    let mut t: Turtle<_> = Turtle::new(surface());
    t.set_location(0.0, 0.0).unwrap().set_rotation(45.0).unwrap();
    t.forward(10.0).unwrap();
    assert_eq!(t.position(), Point::new(7.0, 7.0));
}

#[test]
fn test_left_right_cancel() {
    let mut t: Turtle<_> = Turtle::new(surface());
    t.set_rotation(12.0).unwrap();
    t.left(75.0).unwrap().right(75.0).unwrap();
    assert_eq!(t.heading(), 12.0);
}

#[test]
fn test_heading_is_unbounded() {
    let mut t: Turtle<_> = Turtle::new(surface());
    t.right(270.0).unwrap().right(270.0).unwrap();
    assert_eq!(t.heading(), 540.0);
    assert_eq!(t.rotation(), 540);
    t.set_rotation(-10.4).unwrap();
    assert_eq!(t.rotation(), -10);
    assert_eq!(t.heading(), -10.4);
}

#[test]
fn test_set_location_never_draws() {
    let s = surface();
    let mut t: Turtle<_> = Turtle::new(s.clone());
    t.set_location(10.0, 10.0).unwrap();
    assert!(s.calls().is_empty());

    let mut r: RecordingTurtle<_> = Turtle::new(s.clone());
    r.set_location(10.0, 10.0).unwrap();
    assert!(r.lines().is_empty());
    assert!(s.calls().is_empty());
}

#[test]
fn test_move_to_draws_once_with_pen_down() {
    let s = surface();
    let mut t: Turtle<_> = Turtle::new(s.clone());
    t.set_pen_rgb(255, 0, 0).move_to(60.0, 70.0).unwrap();
    assert_eq!(
        s.calls().as_slice(),
        &[DrawCall {
            from: Point::new(50.0, 50.0),
            to: Point::new(60.0, 70.0),
            color: PackedColor::from_rgb(255, 0, 0),
        }]
    );
    t.up().move_to(0.0, 0.0).unwrap();
    assert_eq!(s.calls().len(), 1);
    assert_eq!(t.position(), Point::new(0.0, 0.0));
}

#[test]
fn test_recording_move_to_appends_once() {
    let s = surface();
    let mut r: RecordingTurtle<_> = Turtle::new(s.clone());
    r.move_to(60.0, 50.0).unwrap();
    assert_eq!(r.lines().len(), 1);
    assert_eq!(r.lines()[0].from(), Point::new(50.0, 50.0));
    assert_eq!(r.lines()[0].to(), Point::new(60.0, 50.0));
    assert!(s.calls().is_empty());
    r.up().move_to(0.0, 0.0).unwrap();
    assert_eq!(r.lines().len(), 1);
}

#[test]
fn test_distance_symmetric() {
    let s = surface();
    let mut a: Turtle<_> = Turtle::new(s.clone());
    let mut b: RecordingTurtle<_> = Turtle::new(s);
    a.set_location(3.0, 9.0).unwrap();
    b.set_location(-5.0, 1.5).unwrap();
    assert_eq!(a.distance(&b), b.distance(&a));
    assert_eq!(a.distance_to(6.0, 13.0), 5.0);
}

#[test]
fn test_nearest_first_tie_wins() {
    let mut t: Turtle<_> = Turtle::new(surface());
    t.set_location(0.0, 0.0).unwrap();
    let candidates = vec![
        Point::new(5.0, 0.0),
        Point::new(0.0, 3.0),
        Point::new(3.0, 0.0),
    ];
    let nearest = t.nearest(&candidates).unwrap();
    assert!(std::ptr::eq(nearest, &candidates[1]));

    let empty: Vec<Point<f64>> = vec![];
    assert!(t.nearest(&empty).is_none());
}

#[test]
fn test_nearest_turtles() {
    let s = surface();
    let t: Turtle<_> = Turtle::new(s.clone());
    let mut far: Turtle<_> = Turtle::new(s.clone());
    far.set_location(0.0, 0.0).unwrap();
    let mut near: Turtle<_> = Turtle::new(s);
    near.set_location(52.0, 50.0).unwrap();
    let flock = vec![far, near];
    assert_eq!(t.nearest(&flock).unwrap().position(), Point::new(52.0, 50.0));
}

#[test]
fn test_replay_uses_recorded_colors() {
    let s = surface();
    let mut r: RecordingTurtle<_> = Turtle::new(s.clone());
    r.set_pen_rgb(255, 0, 0).forward(10.0).unwrap();
    r.set_pen_rgb(0, 255, 0).right(90.0).unwrap().forward(10.0).unwrap();
    r.set_pen_rgb(0, 0, 255).right(90.0).unwrap().forward(10.0).unwrap();
    r.set_pen_rgb(255, 255, 0);
    r.replay();
    let colors: Vec<PackedColor> = s.calls().iter().map(|c| c.color).collect();
    assert_eq!(
        colors,
        vec![
            PackedColor::from_rgb(255, 0, 0),
            PackedColor::from_rgb(0, 255, 0),
            PackedColor::from_rgb(0, 0, 255),
        ]
    );
    assert_eq!(s.calls()[2].to, Point::new(50.0, 60.0));
}

#[test]
fn test_edited_history_changes_replay() {
    let s = surface();
    let mut r: RecordingTurtle<_> = Turtle::new(s.clone());
    r.forward(10.0).unwrap().forward(10.0).unwrap().forward(10.0).unwrap();
    r.lines_mut().remove(1);
    r.lines_mut()[0] = Segment::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0), PackedColor::BLACK);
    r.replay();
    let calls = s.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].color, PackedColor::BLACK);
    assert_eq!(calls[1].from, Point::new(70.0, 50.0));
}

#[test]
fn test_strafe_left_draws_three_and_keeps_heading() {
    let s = surface();
    let mut r: RecordingTurtle<_> = Turtle::new(s);
    r.set_location(0.0, 0.0).unwrap();
    r.strafe_left(10.0).unwrap();
    assert_eq!(r.heading(), 0.0);
    assert_eq!(r.position(), Point::new(0.0, -10.0));
    let lines = r.lines();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].from(), Point::new(0.0, 0.0));
    assert_eq!(lines[0].to(), lines[1].from());
    assert_eq!(lines[1].to(), lines[2].from());
    assert_eq!(lines[2].to(), Point::new(0.0, -10.0));
}

#[test]
fn test_strafe_right_pen_up() {
    let s = surface();
    let mut t: Turtle<_> = Turtle::new(s.clone());
    t.set_location(0.0, 0.0).unwrap().set_rotation(0.3).unwrap();
    t.up().strafe_right(10.0).unwrap();
    assert_eq!(t.heading(), 0.3);
    assert_eq!(t.position(), Point::new(0.0, 10.0));
    assert!(s.calls().is_empty());
}

#[test]
fn test_move_toward_fraction() {
    let mut t: Turtle<_> = Turtle::new(surface());
    t.move_toward(100.0, 50.0, 0.5).unwrap();
    assert_eq!(t.position(), Point::new(75.0, 50.0));
    assert_eq!(t.rotation(), 0);
}

#[test]
fn test_move_toward_turns_to_face_target() {
    let mut t: Turtle<_> = Turtle::new(surface());
    t.move_toward(50.0, 90.0, 0.25).unwrap();
    assert_eq!(t.rotation(), 90);
    assert_eq!(t.position(), Point::new(50.0, 60.0));
    t.move_toward(50.0, 60.0, 0.0).unwrap();
    assert_eq!(t.position(), Point::new(50.0, 60.0));
}

#[test]
fn test_move_toward_by_can_overshoot() {
    let mut t: Turtle<_> = Turtle::new(surface());
    t.move_toward_by(60.0, 50.0, 30.0).unwrap();
    assert_eq!(t.position(), Point::new(80.0, 50.0));
    assert_eq!(t.rotation(), 0);
}

#[test]
fn test_move_toward_turtle() {
    let s = surface();
    let mut a: Turtle<_> = Turtle::new(s.clone());
    let mut b: Turtle<_> = Turtle::new(s);
    b.set_location(50.0, 0.0).unwrap();
    a.move_toward_turtle(&b, 1.0).unwrap();
    assert_eq!(a.position(), Point::new(50.0, 0.0));
    assert_eq!(a.rotation(), -90);
    b.set_location(50.0, 40.0).unwrap();
    a.move_toward_turtle_by(&b, 10.0).unwrap();
    assert_eq!(a.position(), Point::new(50.0, 10.0));
}

#[test]
fn test_non_finite_rejected_without_change() {
    let s = surface();
    let mut t: Turtle<_> = Turtle::new(s.clone());
    assert!(matches!(t.forward(f64::NAN), Err(TurtleError::NonFinite { .. })));
    assert!(t.forward(f64::INFINITY).is_err());
    assert!(t.left(f64::INFINITY).is_err());
    assert!(t.set_location(f64::NAN, 0.0).is_err());
    assert!(t.move_to(0.0, f64::NEG_INFINITY).is_err());
    assert!(t.move_toward(10.0, 10.0, f64::NAN).is_err());
    assert!(t.move_toward_by(f64::NAN, 10.0, 1.0).is_err());
    assert!(t.strafe_left(f64::NAN).is_err());
    assert!(t.set_rotation(f64::NAN).is_err());
    assert_eq!(t.position(), Point::new(50.0, 50.0));
    assert_eq!(t.heading(), 0.0);
    assert!(s.calls().is_empty());
}

#[test]
fn test_copy_starts_with_empty_history() {
    let s = surface();
    let mut original: RecordingTurtle<_> = Turtle::new(s.clone());
    original.set_pen_rgb(1, 2, 3).right(45.0).unwrap().forward(20.0).unwrap().up();

    let mut copy: RecordingTurtle<_> = Turtle::from_turtle(&original);
    assert!(copy.lines().is_empty());
    assert_eq!(copy.position(), original.position());
    assert_eq!(copy.heading(), 45.0);
    assert_eq!(copy.pen_color(), PackedColor::from_rgb(1, 2, 3));
    assert!(!copy.is_pen_down());

    copy.down().forward(5.0).unwrap();
    assert_eq!(copy.lines().len(), 1);
    assert_eq!(original.lines().len(), 1);

    let plain: Turtle<_> = Turtle::from_turtle(&original);
    let mut back: RecordingTurtle<_> = Turtle::from_turtle(&plain);
    back.down().forward(1.0).unwrap();
    assert_eq!(back.lines().len(), 1);
    assert_eq!(original.lines().len(), 1);
}

#[test]
fn test_random_pen_color_from_palette() {
    let s = Rc::new(CaptureSurface::seeded(10.0, 10.0, 1234));
    let mut t: Turtle<_> = Turtle::new(s);
    for _ in 0..64 {
        let (r, g, b) = t.random_pen_color().pen_color().rgb();
        assert!(PALETTE.contains(&(r, g, b)));
    }
}

/// Always hands back the top of the requested range, just under `max`.
struct TopOfRange {
    hooks: crate::surface::FrameHooks,
}

impl Surface for TopOfRange {
    fn draw_line(&self, _from: Point<f64>, _to: Point<f64>, _color: PackedColor) {}

    fn uniform_random(&self, _min: f64, max: f64) -> f64 {
        max - 1e-9
    }

    fn width(&self) -> f64 {
        100.0
    }

    fn height(&self) -> f64 {
        100.0
    }

    fn frame_hooks(&self) -> &crate::surface::FrameHooks {
        &self.hooks
    }
}

#[test]
fn test_random_pen_color_reaches_last_palette_entry() {
    let s = Rc::new(TopOfRange {
        hooks: crate::surface::FrameHooks::new(),
    });
    let mut t: Turtle<_> = Turtle::new(s);
    let (r, g, b) = PALETTE[15];
    assert_eq!(t.random_pen_color().pen_color(), PackedColor::from_rgb(r, g, b));
}

#[test]
fn test_random_pen_color_covers_whole_palette() {
    let s = Rc::new(CaptureSurface::seeded(10.0, 10.0, 99));
    let mut t: Turtle<_> = Turtle::new(s);
    let mut seen = [false; 16];
    for _ in 0..4000 {
        let rgb = t.random_pen_color().pen_color().rgb();
        let index = PALETTE.iter().position(|c| *c == rgb).unwrap();
        seen[index] = true;
    }
    assert!(seen.iter().all(|hit| *hit), "palette entries drawn: {:?}", seen);
}

#[test]
fn test_infinite_surface_starts_at_origin() {
    let s = Rc::new(CaptureSurface::new(f64::INFINITY, 100.0));
    let mut t: Turtle<_> = Turtle::new(s);
    assert_eq!(t.position(), Point::new(0.0, 0.0));
    t.forward(10.0).unwrap();
    assert_eq!(t.position(), Point::new(10.0, 0.0));

    let r: RecordingTurtle<_> = Turtle::new(Rc::new(CaptureSurface::new(f64::NAN, f64::NAN)));
    assert_eq!(r.position(), Point::new(0.0, 0.0));
}

#[test]
fn test_nearest_none_only_when_empty() {
    let mut t: Turtle<_> = Turtle::new(surface());
    t.set_location(0.0, 0.0).unwrap();

    let unreachable = vec![Point::new(f64::NAN, 0.0), Point::new(f64::INFINITY, 0.0)];
    let nearest = t.nearest(&unreachable).unwrap();
    assert!(std::ptr::eq(nearest, &unreachable[1]));

    let only_nan = vec![Point::new(f64::NAN, f64::NAN)];
    assert!(t.nearest(&only_nan).is_some());

    let mixed = vec![
        Point::new(f64::NAN, 0.0),
        Point::new(4.0, 0.0),
        Point::new(0.0, 4.0),
    ];
    let nearest = t.nearest(&mixed).unwrap();
    assert!(std::ptr::eq(nearest, &mixed[1]));
}

#[test]
fn test_set_pen_css() {
    let mut t: Turtle<_> = Turtle::new(surface());
    t.set_pen_css("orange").unwrap();
    assert_eq!(t.pen_color(), PackedColor::from_rgb(255, 165, 0));
    assert!(matches!(t.set_pen_css("nope"), Err(TurtleError::Color(_))));
    assert_eq!(t.pen_color(), PackedColor::from_rgb(255, 165, 0));
}

#[test]
fn test_with_config() {
    let config = TurtleConfig::from_ron_str(
        "(position: Some((5.0, 6.0)), heading: 180.0, pen_color: \"blue\", pen_down: false)",
    )
    .unwrap();
    let t: Turtle<_> = Turtle::with_config(surface(), &config).unwrap();
    assert_eq!(t.position(), Point::new(5.0, 6.0));
    assert_eq!(t.rotation(), 180);
    assert_eq!(t.pen_color(), PackedColor::from_rgb(0, 0, 255));
    assert!(!t.is_pen_down());
}

#[test]
fn test_spawn_redraws_each_frame_until_unsubscribed() {
    let s = surface();
    let (r, sub) = RecordingTurtle::spawn(s.clone());
    r.borrow_mut().forward(10.0).unwrap().right(90.0).unwrap().forward(10.0).unwrap();
    assert!(s.calls().is_empty());

    assert_eq!(s.frame_hooks().run_frame(), 1);
    assert_eq!(s.calls().len(), 2);

    s.clear();
    r.borrow_mut().lines_mut().pop();
    s.frame_hooks().run_frame();
    assert_eq!(s.calls().len(), 1);

    assert!(sub.unsubscribe());
    s.clear();
    assert_eq!(s.frame_hooks().run_frame(), 0);
    assert!(s.calls().is_empty());
}

#[test]
fn test_dropped_recording_turtle_stops_redrawing() {
    let s = surface();
    let (r, _sub) = RecordingTurtle::spawn(s.clone());
    r.borrow_mut().forward(10.0).unwrap();
    drop(r);
    assert_eq!(s.frame_hooks().run_frame(), 0);
    assert!(s.frame_hooks().is_empty());
}

#[test]
fn test_register_copied_turtle() {
    let s = surface();
    let plain: Turtle<_> = Turtle::new(s.clone());
    let copy: RecordingTurtle<_> = Turtle::from_turtle(&plain);
    let (copy, sub) = copy.register();
    copy.borrow_mut().forward(5.0).unwrap();
    s.frame_hooks().run_frame();
    assert_eq!(s.calls().len(), 1);
    assert!(sub.unsubscribe());
}

#[test]
fn test_history_save_load() {
    let s = surface();
    let mut r: RecordingTurtle<_> = Turtle::new(s.clone());
    r.forward(10.0).unwrap().set_pen_rgb(9, 8, 7).forward(5.0).unwrap();
    let path = std::env::temp_dir().join(format!("terrapin-history-{}.ron", std::process::id()));
    r.save_history(&path).unwrap();

    let mut other: RecordingTurtle<_> = Turtle::new(s);
    other.load_history(&path).unwrap();
    assert_eq!(other.history(), r.history());
    let _ = std::fs::remove_file(&path);
}
