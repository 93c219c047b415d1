// Copyright 2024 the CPML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whole-path checks of segment reading and manipulation.

use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use cpml::{
    Affine, Arc, CubicBez, Extents, Pair, ParamCurve, ParamCurveOffset, Path, PathError, PathOp,
    PathRecord, PrimitiveKind, Segment, Vector,
};

fn random_pair(rng: &mut StdRng) -> Pair {
    Pair::new(rng.random_range(-100.0..100.0), rng.random_range(-100.0..100.0))
}

/// A random open segment of `n` primitives mixing lines, arcs and curves.
fn random_path(rng: &mut StdRng, n: usize) -> Path {
    let mut path = Path::new();
    path.move_to(random_pair(rng));
    for _ in 0..n {
        match rng.random_range(0..3) {
            0 => path.line_to(random_pair(rng)),
            1 => path.arc_to(random_pair(rng), random_pair(rng)),
            _ => path.curve_to(random_pair(rng), random_pair(rng), random_pair(rng)),
        }
    }
    path
}

#[test]
fn three_leading_moves() {
    let mut path = Path::new();
    path.move_to((-1., -1.));
    path.move_to((-2., -2.));
    path.move_to((0., 0.));
    path.line_to((4., 0.));
    path.curve_to((5., 0.), (6., 1.), (6., 2.));

    let segment = Segment::from_path(&path).unwrap();
    let records = segment.to_records();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0], PathRecord::new(PathOp::MoveTo, [Pair::new(0., 0.)]));
    assert_eq!(records[1].op, PathOp::LineTo);
    assert_eq!(records[2].op, PathOp::CurveTo);
}

#[test]
fn iterate_segments() {
    let mut path = Path::new();
    path.move_to((0., 0.));
    path.line_to((1., 0.));
    path.close_path();
    path.move_to((10., 0.));
    path.arc_to((11., 1.), (12., 0.));
    path.line_to((13., 0.));
    path.move_to((20., 0.));
    path.curve_to((21., 1.), (22., 1.), (23., 0.));

    let kinds: Vec<Vec<PrimitiveKind>> = path
        .segments()
        .map(|s| s.primitives().map(|p| p.kind()).collect())
        .collect();
    assert_eq!(
        kinds,
        [
            vec![PrimitiveKind::Line, PrimitiveKind::Close],
            vec![PrimitiveKind::Arc, PrimitiveKind::Line],
            vec![PrimitiveKind::Curve],
        ]
    );

    let mut segments = path.segments();
    assert_eq!(segments.by_ref().count(), 3);
    segments.reset();
    assert_eq!(segments.next().map(|s| s.start()), Some(Pair::new(0., 0.)));
}

#[test]
fn malformed_path_stops_iteration() {
    let mut path = Path::new();
    path.move_to((0., 0.));
    path.line_to((1., 0.));
    path.move_to((5., 5.));
    path.push(PathRecord::new(PathOp::ArcTo, [Pair::new(6., 6.)]));

    assert_eq!(path.segments().count(), 1);
    let mut tail = Path::new();
    tail.extend(path.records()[2..].iter().cloned());
    assert_eq!(
        Segment::from_path(&tail),
        Err(PathError::TooFewPoints {
            index: 1,
            op: PathOp::ArcTo,
            expected: 2,
            found: 1
        })
    );
}

#[test]
fn reverse_is_an_involution() {
    let mut rng = StdRng::seed_from_u64(7);
    for n in 1..20 {
        let path = random_path(&mut rng, n);
        let original = Segment::from_path(&path).unwrap();
        let mut segment = original.clone();
        segment.reverse();
        assert_eq!(segment.start(), original.end());
        assert_eq!(segment.end(), original.start());
        segment.reverse();
        assert_eq!(segment, original);
    }
}

#[test]
fn reversed_length_is_unchanged() {
    let mut rng = StdRng::seed_from_u64(11);
    let path = random_path(&mut rng, 8);
    let original = Segment::from_path(&path).unwrap();
    let mut reversed = original.clone();
    reversed.reverse();
    assert_abs_diff_eq!(original.length(), reversed.length(), epsilon = 1e-6);
}

#[test]
fn extents_are_minimal() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..50 {
        // Integer coordinates keep the box arithmetic exact.
        let n = rng.random_range(1..30_usize);
        let points: Vec<Pair> = (0..n)
            .map(|_| {
                Pair::new(
                    f64::from(rng.random_range(-1000_i32..1000)),
                    f64::from(rng.random_range(-1000_i32..1000)),
                )
            })
            .collect();
        let extents = Extents::from_points(points.iter().copied());
        assert!(points.iter().all(|&p| extents.contains_point(p)));

        let org = extents.org().unwrap();
        let max = extents.max().unwrap();
        assert!(points.iter().any(|p| p.x == org.x));
        assert!(points.iter().any(|p| p.y == org.y));
        assert!(points.iter().any(|p| p.x == max.x));
        assert!(points.iter().any(|p| p.y == max.y));
    }
}

#[test]
fn segment_extents_contain_the_curve() {
    let mut rng = StdRng::seed_from_u64(5);
    let path = random_path(&mut rng, 10);
    let segment = Segment::from_path(&path).unwrap();
    let extents = segment.extents();
    let slack = Vector::new(1e-9, 1e-9);
    let inflated = Extents::from_points([
        extents.org().unwrap() - slack,
        extents.max().unwrap() + slack,
    ]);
    for prim in segment.primitives() {
        for i in 0..=16 {
            let p = prim.eval(f64::from(i) / 16.0);
            assert!(inflated.contains_point(p), "{p} outside of {prim}");
        }
    }
}

#[test]
fn curve_offset_end_points() {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..100 {
        let c = CubicBez::new(
            random_pair(&mut rng),
            random_pair(&mut rng),
            random_pair(&mut rng),
            random_pair(&mut rng),
        );
        let d = rng.random_range(-5.0..5.0);
        let mut offset = c;
        assert!(offset.offset(d));
        let n0 = (c.p1 - c.p0).normalize().unwrap().normal();
        let n3 = (c.p3 - c.p2).normalize().unwrap().normal();
        let p0 = c.p0 + n0 * d;
        let p3 = c.p3 + n3 * d;
        assert_abs_diff_eq!(offset.p0.x, p0.x, epsilon = 1e-9);
        assert_abs_diff_eq!(offset.p0.y, p0.y, epsilon = 1e-9);
        assert_abs_diff_eq!(offset.p3.x, p3.x, epsilon = 1e-9);
        assert_abs_diff_eq!(offset.p3.y, p3.y, epsilon = 1e-9);
    }
}

#[test]
fn offset_polyline_with_joins() {
    // An open square, travelled counterclockwise.
    let mut path = Path::new();
    path.move_to((0., 0.));
    path.line_to((10., 0.));
    path.line_to((10., 10.));
    path.line_to((0., 10.));

    let mut segment = Segment::from_path(&path).unwrap();
    segment.offset(-2.0);
    let points: Vec<Pair> = segment
        .primitives()
        .flat_map(|p| [p.start(), p.end()])
        .collect();
    let expected = [
        (0., -2.),
        (12., -2.),
        (12., -2.),
        (12., 12.),
        (12., 12.),
        (0., 12.),
    ];
    for (p, (x, y)) in points.iter().zip(expected) {
        assert_abs_diff_eq!(p.x, x, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, y, epsilon = 1e-9);
    }
    assert_abs_diff_eq!(segment.length(), 38.0, epsilon = 1e-9);

    path.update_segment(&segment).unwrap();
    assert_eq!(Segment::from_path(&path).unwrap(), segment);
}

#[test]
fn offset_closed_square() {
    let mut path = Path::new();
    path.move_to((0., 0.));
    path.line_to((10., 0.));
    path.line_to((10., 10.));
    path.line_to((0., 10.));
    path.close_path();

    let mut segment = Segment::from_path(&path).unwrap();
    segment.offset(1.0);
    assert!(segment.is_closed());
    assert_eq!(segment.primitive_count(), 4);
    assert_eq!(segment.start(), Pair::new(0., 1.));

    let ends: Vec<Pair> = segment.primitives().map(|p| p.end()).collect();
    // The close keeps running back to the new start.
    for (p, (x, y)) in ends.iter().zip([(9., 1.), (9., 9.), (1., 9.), (0., 1.)]) {
        assert_abs_diff_eq!(p.x, x, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, y, epsilon = 1e-9);
    }
    assert_eq!(segment.primitive(3).map(|p| p.end()), Some(segment.start()));

    path.update_segment(&segment).unwrap();
    assert_eq!(path.records().last().map(|r| r.op), Some(PathOp::ClosePath));
}

#[test]
fn offset_line_arc_curve_seams() {
    let mut path = Path::new();
    path.move_to((0., 0.));
    path.line_to((10., 0.));
    path.arc_to((5., 5.), (0., 0.));
    path.curve_to((0., -4.), (3., -6.), (6., -6.));

    let mut segment = Segment::from_path(&path).unwrap();
    segment.offset(1.0);
    let prims: Vec<_> = segment.primitives().collect();
    assert_eq!(prims.len(), 3);
    assert_eq!(prims[0].start(), Pair::new(0., 1.));

    // Line into arc: the tangent lines cross at the corner.
    assert_eq!(prims[0].end(), prims[1].start());
    assert_abs_diff_eq!(prims[1].start().x, 9.0, epsilon = 1e-9);
    assert_abs_diff_eq!(prims[1].start().y, 1.0, epsilon = 1e-9);
    // Arc into curve: the radius shrank to 4 and the tangents are parallel.
    assert_eq!(prims[1].end(), prims[2].start());
    assert_abs_diff_eq!(prims[2].start().x, 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(prims[2].start().y, 0.0, epsilon = 1e-9);

    assert_abs_diff_eq!(prims[2].end().x, 6.0, epsilon = 1e-9);
    assert_abs_diff_eq!(prims[2].end().y, -5.0, epsilon = 1e-9);
    assert_eq!(segment.end(), prims[2].end());
}

#[test]
fn half_circle_in_eighths() {
    let half = Arc::new((1., 0.), (0., 1.), (-1., 0.));
    let curves = half.to_cubics_with(std::f64::consts::FRAC_PI_4);
    assert_eq!(curves.len(), 4);
    assert_eq!(curves[0].p0, half.p0);
    assert_eq!(curves[3].p3, half.p2);
    for pair in curves.windows(2) {
        assert_eq!(pair[0].p3, pair[1].p0);
    }
    for c in &curves {
        assert_abs_diff_eq!(c.eval(0.5).distance(Pair::ZERO), 1.0, epsilon = 1e-4);
    }
}

#[test]
fn offset_arc_keeps_the_center() {
    let mut path = Path::new();
    path.move_to((1., 0.));
    path.arc_to((0., 1.), (-1., 0.));
    let mut segment = Segment::from_path(&path).unwrap();
    // Counterclockwise travel: the normal points to the center.
    segment.offset(0.5);
    let arc = segment.primitive(0).unwrap();
    assert_abs_diff_eq!(arc.start().x, 0.5, epsilon = 1e-9);
    assert_abs_diff_eq!(arc.end().x, -0.5, epsilon = 1e-9);
    assert_abs_diff_eq!(arc.length(), std::f64::consts::PI * 0.5, epsilon = 1e-9);
}

#[test]
fn intersections_between_segments() {
    let mut comb = Path::new();
    comb.move_to((0., 0.));
    comb.line_to((0., 10.));
    comb.line_to((5., 0.));
    comb.line_to((10., 10.));
    let mut bar = Path::new();
    bar.move_to((-5., 5.));
    bar.line_to((15., 5.));

    let comb = Segment::from_path(&comb).unwrap();
    let bar = Segment::from_path(&bar).unwrap();
    let found = comb.intersections(&bar, 8);
    assert_eq!(found.len(), 3);
    let xs: Vec<f64> = found.iter().map(|p| p.x).collect();
    for (x, expected) in xs.iter().zip([0.0, 2.5, 7.5]) {
        assert_abs_diff_eq!(*x, expected, epsilon = 1e-9);
    }
    assert!(found.iter().all(|p| (p.y - 5.0).abs() < 1e-9));
    assert_eq!(comb.intersections(&bar, 2).len(), 2);
    assert!(comb.intersections(&bar, 0).is_empty());
}

#[test]
fn render_arcs_as_curves() {
    let mut path = Path::new();
    path.move_to((1., 0.));
    path.arc_to((0., 1.), (0., -1.));
    path.close_path();
    let segment = Segment::from_path(&path).unwrap();

    let mut rendered = Path::new();
    segment.render(&mut rendered);
    let ops: Vec<PathOp> = rendered.records().iter().map(|r| r.op).collect();
    // Three quarters of a circle, one curve per quarter.
    assert_eq!(
        ops,
        [
            PathOp::MoveTo,
            PathOp::CurveTo,
            PathOp::CurveTo,
            PathOp::CurveTo,
            PathOp::ClosePath
        ]
    );

    let rendered = Segment::from_path(&rendered).unwrap();
    for prim in rendered.primitives() {
        if prim.kind() == PrimitiveKind::Curve {
            let mid = prim.eval(0.5);
            assert_abs_diff_eq!(mid.distance(Pair::ZERO), 1.0, epsilon = 1e-3);
        }
    }
    assert_abs_diff_eq!(rendered.length(), segment.length(), epsilon = 1e-3);
}

#[test]
fn transform_then_extents() {
    let mut path = Path::new();
    path.move_to((0., 0.));
    path.line_to((1., 0.));
    path.line_to((1., 1.));
    let mut segment = Segment::from_path(&path).unwrap();
    let before = segment.extents();
    let rotation = Affine::rotate(std::f64::consts::FRAC_PI_2);
    segment.apply_affine(rotation);
    let after = segment.extents();
    let mapped = before.transform(rotation);
    assert_abs_diff_eq!(after.org().unwrap().x, mapped.org().unwrap().x, epsilon = 1e-12);
    assert_abs_diff_eq!(after.org().unwrap().y, mapped.org().unwrap().y, epsilon = 1e-12);
    assert_abs_diff_eq!(after.size().unwrap().x, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(after.size().unwrap().y, 1.0, epsilon = 1e-12);
}
