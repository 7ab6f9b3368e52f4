//! End-to-end update/render cascade over the public API.

use distort::{
    BezPathSink, Controller, DrawStyle, GlyphOutliner, GlyphSampling, NoiseField, Point, Shape,
    StyledPath,
};
use kurbo::PathEl;

fn scene() -> Controller {
    let mut controller = Controller::new(32.0, 30).unwrap();
    controller.spawn(
        &Shape::circle(220.0, 64).unwrap(),
        Point::new(320.0, 240.0),
    );
    controller.spawn(
        &Shape::line(Point::new(-100.0, 0.0), Point::new(100.0, 0.0), 16).unwrap(),
        Point::new(320.0, 400.0),
    );
    let noisy = controller.spawn(
        &Shape::triangle(
            Point::new(0.0, -60.0),
            Point::new(60.0, 60.0),
            Point::new(-60.0, 60.0),
            24,
        )
        .unwrap(),
        Point::new(120.0, 120.0),
    );
    controller
        .element_mut(noisy)
        .unwrap()
        .set_displace(NoiseField::new(7));
    controller
}

fn run(controller: &mut Controller, ticks: u32) -> Vec<StyledPath> {
    let mut sink = BezPathSink::new();
    for _ in 0..ticks {
        controller.update();
        sink.clear();
        controller.render(&mut sink);
    }
    sink.into_paths()
}

#[test]
fn cascade_is_deterministic_for_fixed_inputs() {
    let first = run(&mut scene(), 10);
    let second = run(&mut scene(), 10);
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.style, b.style);
        assert_eq!(a.path.elements(), b.path.elements());
    }
}

#[test]
fn render_emits_one_path_per_element_in_insertion_order() {
    let paths = run(&mut scene(), 1);
    assert_eq!(paths.len(), 3);
    // circle: filled and closed
    assert_eq!(paths[0].style, DrawStyle::filled());
    assert!(matches!(
        paths[0].path.elements().last(),
        Some(PathEl::ClosePath)
    ));
    // line: stroked and open
    assert_eq!(paths[1].style, DrawStyle::stroked());
    assert!(
        paths[1]
            .path
            .elements()
            .iter()
            .all(|el| !matches!(el, PathEl::ClosePath))
    );
}

#[test]
fn render_does_not_advance_the_clock() {
    let mut controller = scene();
    controller.update();
    let frame = controller.current_frame();
    let mut sink = BezPathSink::new();
    controller.render(&mut sink);
    controller.render(&mut sink);
    assert_eq!(controller.current_frame(), frame);
}

#[test]
fn noise_displaced_outline_stays_within_amplitude_bounds() {
    let mut controller = Controller::new(10.0, 30).unwrap();
    let center = Point::new(200.0, 200.0);
    let id = controller.spawn(&Shape::circle(220.0, 64).unwrap(), center);
    controller
        .element_mut(id)
        .unwrap()
        .set_displace(NoiseField::new(1));

    let mut sink = BezPathSink::new();
    for _ in 0..5 {
        controller.update();
        sink.clear();
        controller.render(&mut sink);
        // radius 100, displacement at most 10 on each axis
        let limit = 100.0 + 10.0 * std::f64::consts::SQRT_2 + 1e-9;
        for el in sink.paths()[0].path.elements() {
            let p = match el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => *p,
                _ => continue,
            };
            assert!(p.distance(center) <= limit);
        }
    }
}

#[test]
fn glyph_with_detached_stroke_renders_as_two_subpaths() {
    let mut controller = Controller::new(32.0, 30).unwrap();
    // stem and dot, separated well past the segmentation threshold
    let points = vec![
        Point::new(0.0, 0.0),
        Point::new(0.0, 2.0),
        Point::new(0.0, 4.0),
        Point::new(0.0, -20.0),
        Point::new(1.0, -21.0),
    ];
    controller.spawn(&Shape::glyph(points, 24.0), Point::new(50.0, 50.0));

    let mut sink = BezPathSink::new();
    controller.update();
    controller.render(&mut sink);
    let moves = sink.paths()[0]
        .path
        .elements()
        .iter()
        .filter(|el| matches!(el, PathEl::MoveTo(_)))
        .count();
    assert_eq!(moves, 2);
}

/// Fixed-pitch stand-in for a real text-to-points collaborator: one short
/// point run per character, one character advance apart, relative to the
/// element center.
struct FixedPitchOutliner;

impl GlyphOutliner for FixedPitchOutliner {
    fn glyph_outline(
        &self,
        text: &str,
        origin: Point,
        size: f64,
        options: &GlyphSampling,
    ) -> Vec<Point> {
        let per_char = (3.0 * options.sample_factor).max(1.0) as usize;
        let mut points = Vec::new();
        for (i, _) in text.chars().enumerate() {
            let pen = origin.x + i as f64 * size;
            for j in 0..per_char {
                points.push(Point::new(pen + j as f64, origin.y));
            }
        }
        points
    }
}

#[test]
fn outliner_output_feeds_glyph_elements_one_contour_per_stroke() {
    let size = 24.0;
    let points =
        FixedPitchOutliner.glyph_outline("hi", Point::ORIGIN, size, &GlyphSampling::default());
    assert_eq!(points.len(), 6);

    let mut controller = Controller::new(32.0, 30).unwrap();
    controller.spawn(&Shape::glyph(points, size), Point::new(100.0, 100.0));

    let mut sink = BezPathSink::new();
    controller.update();
    controller.render(&mut sink);
    // the character advance is far past the segmentation threshold, so each
    // character becomes its own contour
    let moves = sink.paths()[0]
        .path
        .elements()
        .iter()
        .filter(|el| matches!(el, PathEl::MoveTo(_)))
        .count();
    assert_eq!(moves, 2);
}

#[test]
fn transferred_element_renders_under_its_new_controller_only() {
    let mut a = scene();
    let mut b = Controller::new(32.0, 30).unwrap();
    let id = a.elements()[0].id();
    a.transfer_to(id, &mut b).unwrap();

    let mut sink_a = BezPathSink::new();
    let mut sink_b = BezPathSink::new();
    a.update();
    b.update();
    a.render(&mut sink_a);
    b.render(&mut sink_b);
    assert_eq!(sink_a.paths().len(), 2);
    assert_eq!(sink_b.paths().len(), 1);
}

#[test]
fn shape_specs_survive_a_json_round_trip_into_identical_geometry() {
    let shape = Shape::quad(
        Point::new(-40.0, -20.0),
        Point::new(40.0, -20.0),
        Point::new(40.0, 20.0),
        Point::new(-40.0, 20.0),
        32,
    )
    .unwrap();
    let back: Shape = serde_json::from_str(&serde_json::to_string(&shape).unwrap()).unwrap();

    let mut a = Controller::new(16.0, 30).unwrap();
    let mut b = Controller::new(16.0, 30).unwrap();
    let ia = a.spawn(&shape, Point::new(10.0, 10.0));
    let ib = b.spawn(&back, Point::new(10.0, 10.0));
    assert_eq!(
        a.element(ia).unwrap().point_groups(),
        b.element(ib).unwrap().point_groups()
    );
}

#[test]
fn open_contour_line_keeps_exactly_its_two_endpoints_at_minimum_detail() {
    let mut controller = Controller::new(32.0, 30).unwrap();
    let id = controller.spawn(
        &Shape::line(Point::new(-50.0, 0.0), Point::new(50.0, 0.0), 2).unwrap(),
        Point::new(100.0, 100.0),
    );
    let element = controller.element(id).unwrap();
    assert_eq!(element.point_groups()[0].len(), 2);
    assert_eq!(
        element.point_groups()[0].points(),
        &[Point::new(50.0, 100.0), Point::new(150.0, 100.0)]
    );

    let mut sink = BezPathSink::new();
    controller.render(&mut sink);
    assert_eq!(sink.paths()[0].style, DrawStyle::stroked());
    assert!(
        sink.paths()[0]
            .path
            .elements()
            .iter()
            .all(|el| !matches!(el, PathEl::ClosePath))
    );
}
