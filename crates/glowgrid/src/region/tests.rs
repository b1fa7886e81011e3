use super::*;
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn canvas() -> CanvasSize {
    CanvasSize::new(640, 480)
}

fn square() -> Corners {
    Corners::rect(50.0, 50.0, 300.0, 300.0)
}

#[test]
fn axis_aligned_rect_rows() {
    let r = ScanlineRegion::build(square(), canvas());
    assert_eq!(r.rows().len(), 480);
    assert_eq!(
        r.row(100),
        Some(Span {
            min: 50.0,
            max: 300.0
        })
    );
    assert_eq!(r.row(10), None);
    assert_eq!(r.row(400), None);
    // Top and bottom edges lie exactly on rows 50 and 300.
    assert_eq!(r.row(50).map(|s| (s.min, s.max)), Some((50.0, 300.0)));
    assert_eq!(r.row(300).map(|s| (s.min, s.max)), Some((50.0, 300.0)));
    assert_eq!(r.row(301), None);
    assert_eq!(r.covered_rows().len(), 251);
    assert_eq!(r.covered_rows()[0].y, 50);
    assert_eq!(r.covered_rows().last().map(|row| row.y), Some(300));
}

#[test]
fn contains_rect_interior_and_boundary() {
    let q = Quadrilateral::with_scanline(square(), canvas());
    assert!(q.contains(Point::new(100.0, 100.0)));
    assert!(q.contains(Point::new(50.0, 50.0)));
    assert!(q.contains(Point::new(300.0, 300.0)));
    assert!(!q.contains(Point::new(49.9, 100.0)));
    assert!(!q.contains(Point::new(100.0, 10.0)));
    assert!(!q.contains(Point::new(100.0, -1.0)));
    assert!(!q.contains(Point::new(100.0, 480.0)));
    assert!(!q.contains(Point::new(100.0, f64::NAN)));
}

#[test]
fn fractional_y_uses_floor_row() {
    let q = Quadrilateral::with_scanline(square(), canvas());
    assert!(q.contains(Point::new(100.0, 100.7)));
    assert!(!q.contains(Point::new(100.0, 49.5)));
}

#[test]
fn skewed_quad_rows_follow_edges() {
    // Left edge from (100,0) to (0,100): x = 100 - y. Right edge vertical at x=200.
    let c = Corners::new(
        Point::new(100.0, 0.0),
        Point::new(200.0, 0.0),
        Point::new(200.0, 100.0),
        Point::new(0.0, 100.0),
    );
    let r = ScanlineRegion::build(c, canvas());
    let row = r.row(40).unwrap();
    assert!((row.min - 60.0).abs() < 1e-9);
    assert!((row.max - 200.0).abs() < 1e-9);
    assert_eq!(r.row(101), None);
}

#[test]
fn collapsed_quad_is_uncovered() {
    let r = ScanlineRegion::build(Corners::splat(Point::new(120.0, 80.0)), canvas());
    assert!(r.rows().iter().all(Option::is_none));
    assert!(r.covered_rows().is_empty());
    // Collinear corners collapse as well.
    let line = Corners::new(
        Point::new(0.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(20.0, 20.0),
        Point::new(30.0, 30.0),
    );
    let r = ScanlineRegion::build(line, canvas());
    assert!(r.covered_rows().is_empty());
}

#[test]
fn never_contains_is_the_default() {
    let q = Quadrilateral::new(square());
    assert!(matches!(q.containment(), Containment::NeverContains));
    assert!(!q.contains(Point::new(100.0, 100.0)));
    assert!(q.covered_rows().is_empty());
    assert!(q.shared_rows().is_empty());

    let mut q = q;
    q.set_corners(Corners::rect(0.0, 0.0, 10.0, 10.0));
    assert!(matches!(q.containment(), Containment::NeverContains));
    q.use_scanline(canvas());
    assert!(q.contains(Point::new(5.0, 5.0)));
}

#[test]
fn set_corners_replaces_table() {
    let mut q = Quadrilateral::with_scanline(square(), canvas());
    let before = q.shared_rows();
    q.set_corners(Corners::rect(400.0, 300.0, 600.0, 400.0));
    // A reader holding the old rows still sees the complete old region.
    assert_eq!(before.len(), 251);
    assert_eq!(before[0].y, 50);
    assert!(!q.contains(Point::new(100.0, 100.0)));
    assert!(q.contains(Point::new(500.0, 350.0)));
    assert_eq!(q.corners(), Corners::rect(400.0, 300.0, 600.0, 400.0));
}

#[test]
fn corners_outside_canvas_are_not_clamped() {
    let c = Corners::rect(-50.0, -50.0, 100.0, 600.0);
    let r = ScanlineRegion::build(c, canvas());
    assert_eq!(r.rows().len(), 480);
    let row = r.row(0).unwrap();
    assert_eq!((row.min, row.max), (-50.0, 100.0));
    assert!(r.row(479).is_some());
}

#[test]
fn horizontal_edge_on_row_contributes_endpoints() {
    // Top edge horizontal at y=20 from x=10 to x=30; bottom corners far apart.
    // On row 20 the top edge supplies both endpoints.
    let c = Corners::new(
        Point::new(10.0, 20.0),
        Point::new(30.0, 20.0),
        Point::new(90.0, 80.0),
        Point::new(-50.0, 80.0),
    );
    let r = ScanlineRegion::build(c, canvas());
    let row = r.row(20).unwrap();
    assert_eq!((row.min, row.max), (10.0, 30.0));
}

#[test]
fn horizontal_edge_on_row_ends_the_scan() {
    // Concave quad: BL sits above the top edge, so the bottom edge BL→BR also
    // crosses row 50 (at x = 37.5). The horizontal top edge is scanned first
    // and stops the scan before the bottom edge can widen the span.
    let c = Corners::new(
        Point::new(40.0, 50.0),
        Point::new(60.0, 50.0),
        Point::new(100.0, 100.0),
        Point::new(0.0, 20.0),
    );
    let r = ScanlineRegion::build(c, canvas());
    let row = r.row(50).unwrap();
    assert_eq!((row.min, row.max), (40.0, 60.0));
    assert!(!r.contains(Point::new(38.0, 50.0)));
    // Row 51 has no horizontal edge and takes the bottom-edge crossing.
    let below = r.row(51).unwrap();
    assert!(below.min < 40.0);
}

#[test]
fn edge_functions_and_midpoints() {
    let e = EdgeFn::through(Point::new(0.0, 0.0), Point::new(10.0, 20.0));
    match e {
        EdgeFn::Affine {
            slope, intercept, ..
        } => {
            assert!((slope - 2.0).abs() < 1e-12);
            assert!(intercept.abs() < 1e-12);
        }
        EdgeFn::Vertical { .. } => panic!("expected affine"),
    }
    assert_eq!(e.midpoint(), Point::new(5.0, 10.0));
    let v = EdgeFn::through(Point::new(3.0, 0.0), Point::new(3.0, 8.0));
    assert!(matches!(v, EdgeFn::Vertical { x, .. } if x == 3.0));
    assert_eq!(v.midpoint(), Point::new(3.0, 4.0));
    assert!(v.touches_row(8.0));
    assert!(!v.touches_row(8.5));
}

#[test]
fn contains_matches_rows_seeded() {
    let mut rng = StdRng::seed_from_u64(42);
    let c = Corners::new(
        Point::new(120.5, 40.25),
        Point::new(510.0, 90.0),
        Point::new(560.75, 430.0),
        Point::new(80.0, 400.5),
    );
    let r = ScanlineRegion::build(c, canvas());
    for _ in 0..2000 {
        let x = rng.gen_range(0.0..640.0);
        let y = rng.gen_range(0..480usize);
        let expected = r.row(y).is_some_and(|s| s.min <= x && x <= s.max);
        assert_eq!(r.contains(Point::new(x, y as f64)), expected);
    }
}

fn corners_strategy() -> impl Strategy<Value = Corners> {
    (
        (0.0..320.0f64, 0.0..240.0f64),
        (320.0..640.0f64, 0.0..240.0f64),
        (320.0..640.0f64, 240.0..480.0f64),
        (0.0..320.0f64, 240.0..480.0f64),
    )
        .prop_map(|(tl, tr, br, bl)| {
            Corners::new(
                Point::new(tl.0, tl.1),
                Point::new(tr.0, tr.1),
                Point::new(br.0, br.1),
                Point::new(bl.0, bl.1),
            )
        })
}

proptest! {
    #[test]
    fn prop_contains_agrees_with_covered_rows(
        c in corners_strategy(),
        x in -10.0..650.0f64,
        y in 0usize..480,
    ) {
        let r = ScanlineRegion::build(c, canvas());
        let covered = r.covered_rows().iter().find(|row| row.y == y);
        let expected = covered.is_some_and(|row| row.min <= x && x <= row.max);
        prop_assert_eq!(r.contains(Point::new(x, y as f64)), expected);
    }

    #[test]
    fn prop_rebuild_is_idempotent(c in corners_strategy()) {
        let a = ScanlineRegion::build(c, canvas());
        let b = ScanlineRegion::build(c, canvas());
        prop_assert_eq!(a.rows(), b.rows());
        prop_assert_eq!(a.covered_rows(), b.covered_rows());
    }

    #[test]
    fn prop_spans_are_ordered(c in corners_strategy()) {
        let r = ScanlineRegion::build(c, canvas());
        let mut last = None;
        for row in r.covered_rows() {
            prop_assert!(row.min <= row.max);
            if let Some(prev) = last {
                prop_assert!(row.y > prev);
            }
            last = Some(row.y);
        }
    }
}
