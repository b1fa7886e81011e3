//! Value types shared by the scanline test, quads, and band subdivision.
//!
//! - `Point`: real-valued canvas coordinate (nalgebra `Point2<f64>`).
//! - `CanvasSize`: injected pixel dimensions; fixes the row count of every table.
//! - `EdgeFn`: per-edge line function (vertical or affine) keeping its endpoints.
//! - `Span`, `CoveredRow`: one scanline's `[min, max]` x-range.
//! - `Corners`, `QuadEdges`: ordered quad corners and the four derived edges.
//!
//! Code cross-refs: `scanline::ScanlineRegion`, `quad::Quadrilateral`, `grid::Grid`

use nalgebra::Point2;

/// Canvas coordinate. Never rounded before pixel sampling.
pub type Point = Point2<f64>;

/// Pixel dimensions of the canvas the regions live in (RGBA8, row-major).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: usize,
    pub height: usize,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

impl CanvasSize {
    #[inline]
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Bytes per row of an RGBA8 frame.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width * 4
    }

    /// Expected byte length of an RGBA8 frame.
    #[inline]
    pub fn frame_len(&self) -> usize {
        self.stride() * self.height
    }

    /// Clamp a point into `[0, width] x [0, height]`, the way drag handles are
    /// kept on the canvas. The region engine itself never clamps.
    #[inline]
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(
            p.x.clamp(0.0, self.width as f64),
            p.y.clamp(0.0, self.height as f64),
        )
    }
}

/// Line through one quad edge.
///
/// `Vertical` when both endpoints share an x-coordinate, else `Affine` with
/// `y = slope * x + intercept`. Both variants keep the two endpoints,
/// which bound the edge's y-range during scanning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgeFn {
    Vertical {
        x: f64,
        a: Point,
        b: Point,
    },
    Affine {
        slope: f64,
        intercept: f64,
        a: Point,
        b: Point,
    },
}

impl EdgeFn {
    /// Line through `a` and `b`.
    pub fn through(a: Point, b: Point) -> Self {
        if a.x - b.x == 0.0 {
            return EdgeFn::Vertical { x: a.x, a, b };
        }
        let slope = (a.y - b.y) / (a.x - b.x);
        let intercept = a.y - slope * a.x;
        EdgeFn::Affine {
            slope,
            intercept,
            a,
            b,
        }
    }

    #[inline]
    pub fn endpoints(&self) -> (Point, Point) {
        match *self {
            EdgeFn::Vertical { a, b, .. } | EdgeFn::Affine { a, b, .. } => (a, b),
        }
    }

    /// Point on the line at the average x of the endpoints (average y for
    /// vertical edges).
    pub fn midpoint(&self) -> Point {
        match *self {
            EdgeFn::Vertical { x, a, b } => Point::new(x, (a.y + b.y) / 2.0),
            EdgeFn::Affine {
                slope,
                intercept,
                a,
                b,
            } => {
                let x = (a.x + b.x) / 2.0;
                Point::new(x, intercept + slope * x)
            }
        }
    }

    /// False when both endpoints lie strictly above or strictly below row `y`.
    #[inline]
    pub fn touches_row(&self, y: f64) -> bool {
        let (a, b) = self.endpoints();
        !((a.y < y && b.y < y) || (a.y > y && b.y > y))
    }
}

/// Closed x-range `[min, max]` covered on one scanline. Invariant: `min <= max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }
}

/// A covered scanline: row index plus its span.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoveredRow {
    pub y: usize,
    pub min: f64,
    pub max: f64,
}

/// Ordered quad corners. Edges: top (TL→TR), right (TR→BR), bottom (BL→BR),
/// left (TL→BL).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Corners {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_right: Point,
    pub bottom_left: Point,
}

impl Default for Corners {
    fn default() -> Self {
        Self::splat(Point::origin())
    }
}

impl Corners {
    #[inline]
    pub fn new(top_left: Point, top_right: Point, bottom_right: Point, bottom_left: Point) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    /// All four corners at `p` (a collapsed quad).
    #[inline]
    pub fn splat(p: Point) -> Self {
        Self::new(p, p, p, p)
    }

    /// Axis-aligned rectangle from `(x0, y0)` to `(x1, y1)`.
    pub fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::new(
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        )
    }

    /// `[TL, TR, BR, BL]`.
    #[inline]
    pub fn to_array(&self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    /// Signed shoelace area in TL→TR→BR→BL order.
    pub fn signed_area(&self) -> f64 {
        let p = self.to_array();
        let mut acc = 0.0;
        for k in 0..4 {
            let a = p[k];
            let b = p[(k + 1) % 4];
            acc += a.x * b.y - b.x * a.y;
        }
        acc / 2.0
    }

    pub fn edges(&self) -> QuadEdges {
        QuadEdges {
            top: EdgeFn::through(self.top_left, self.top_right),
            left: EdgeFn::through(self.top_left, self.bottom_left),
            right: EdgeFn::through(self.top_right, self.bottom_right),
            bottom: EdgeFn::through(self.bottom_left, self.bottom_right),
        }
    }
}

/// The four edge functions of a quad.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadEdges {
    pub top: EdgeFn,
    pub left: EdgeFn,
    pub right: EdgeFn,
    pub bottom: EdgeFn,
}

impl QuadEdges {
    /// Scan order: top, left, right, bottom. The horizontal-edge early exit in
    /// the scanline builder depends on this order.
    #[inline]
    pub fn scan_order(&self) -> [EdgeFn; 4] {
        [self.top, self.left, self.right, self.bottom]
    }
}
