//! Scanline containment for convex quads (row-indexed boundary table).
//!
//! Purpose
//! - Answer "is this point inside the quad" in O(1) per query: one row lookup
//!   and one range check. The per-frame masking loop calls this for every pixel.
//!
//! Model
//! - For every integer row `y` in `[0, height)` intersect the row with the four
//!   edge lines (scan order top, left, right, bottom) and keep the min/max of
//!   the candidate x values. Rows outside the quad's y-extent, or where no edge
//!   contributes, are uncovered (`None`).
//! - An exactly horizontal edge lying on the row contributes both endpoints and
//!   stops the scan for that row. The remaining edges are not consulted.
//! - The table is rebuilt from scratch on every corner change (O(height)); it is
//!   never patched in place.
//!
//! Assumptions
//! - Corners form a simple, ideally convex quad. Concave or self-intersecting
//!   input produces some table, but its meaning is unspecified.
//! - Corners outside the canvas are not clamped; rows outside `[0, height)` do
//!   not exist in the table and read as uncovered.
//!
//! Code cross-refs: `types::{EdgeFn, QuadEdges, Span, CoveredRow}`, `quad::Containment`

use std::sync::Arc;

use super::types::{CanvasSize, Corners, CoveredRow, EdgeFn, Point, QuadEdges, Span};

/// Quads with `|area|` at or below this are treated as collapsed: every row is
/// uncovered.
pub(crate) const DEGENERATE_AREA_EPS: f64 = 1e-9;

/// Axis-aligned bounding box of the four corners.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Bounds {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Bounds {
    fn of(corners: &Corners) -> Self {
        corners.to_array().iter().fold(
            Bounds {
                min_x: f64::INFINITY,
                max_x: f64::NEG_INFINITY,
                min_y: f64::INFINITY,
                max_y: f64::NEG_INFINITY,
            },
            |b, p| Bounds {
                min_x: b.min_x.min(p.x),
                max_x: b.max_x.max(p.x),
                min_y: b.min_y.min(p.y),
                max_y: b.max_y.max(p.y),
            },
        )
    }
}

/// Boundary table of one quad plus the derived list of covered rows.
///
/// Invariants:
/// - `rows.len() == canvas.height`.
/// - Every `Some(span)` has `span.min <= span.max`.
/// - `covered` lists exactly the `Some` rows in ascending `y`.
#[derive(Clone, Debug)]
pub struct ScanlineRegion {
    canvas: CanvasSize,
    corners: Corners,
    rows: Vec<Option<Span>>,
    covered: Arc<[CoveredRow]>,
}

impl ScanlineRegion {
    /// Build the full table for `corners` on `canvas`.
    pub fn build(corners: Corners, canvas: CanvasSize) -> Self {
        let edges = corners.edges();
        let rows: Vec<Option<Span>> = if corners.signed_area().abs() <= DEGENERATE_AREA_EPS {
            vec![None; canvas.height]
        } else {
            let bounds = Bounds::of(&corners);
            (0..canvas.height)
                .map(|y| row_span(&edges, &bounds, y as f64))
                .collect()
        };
        let covered: Arc<[CoveredRow]> = rows
            .iter()
            .enumerate()
            .filter_map(|(y, span)| {
                span.map(|s| CoveredRow {
                    y,
                    min: s.min,
                    max: s.max,
                })
            })
            .collect();
        Self {
            canvas,
            corners,
            rows,
            covered,
        }
    }

    #[inline]
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    #[inline]
    pub fn corners(&self) -> Corners {
        self.corners
    }

    /// The whole table, one entry per canvas row.
    #[inline]
    pub fn rows(&self) -> &[Option<Span>] {
        &self.rows
    }

    /// Span of row `y`; `None` when uncovered or outside the canvas.
    #[inline]
    pub fn row(&self, y: usize) -> Option<Span> {
        self.rows.get(y).copied().flatten()
    }

    /// Point containment against the table. `p.y` selects row `floor(p.y)`.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        match row_index(p.y, self.canvas.height) {
            Some(y) => self.row(y).is_some_and(|s| s.contains(p.x)),
            None => false,
        }
    }

    /// Covered rows in ascending `y`.
    #[inline]
    pub fn covered_rows(&self) -> &[CoveredRow] {
        &self.covered
    }

    /// Shared handle to the covered rows, for samplers built from this table.
    #[inline]
    pub fn shared_rows(&self) -> Arc<[CoveredRow]> {
        Arc::clone(&self.covered)
    }
}

#[inline]
fn row_index(y: f64, height: usize) -> Option<usize> {
    if y.is_nan() || y < 0.0 {
        return None;
    }
    let r = y.floor();
    if r >= height as f64 {
        None
    } else {
        Some(r as usize)
    }
}

#[inline]
fn widen(span: Option<Span>, x: f64) -> Option<Span> {
    Some(match span {
        None => Span { min: x, max: x },
        Some(s) => Span {
            min: s.min.min(x),
            max: s.max.max(x),
        },
    })
}

fn row_span(edges: &QuadEdges, bounds: &Bounds, y: f64) -> Option<Span> {
    if y < bounds.min_y || y > bounds.max_y {
        return None;
    }
    let mut span = None;
    for edge in edges.scan_order() {
        if !edge.touches_row(y) {
            continue;
        }
        match edge {
            EdgeFn::Vertical { x, a, b } => {
                if a.y <= y && y <= b.y {
                    span = widen(span, x);
                }
            }
            EdgeFn::Affine {
                slope,
                intercept,
                a,
                b,
            } => {
                if slope == 0.0 {
                    if intercept == y {
                        span = widen(widen(span, a.x), b.x);
                        break;
                    }
                } else {
                    let x = (y - intercept) / slope;
                    if x >= bounds.min_x && x <= bounds.max_x {
                        span = widen(span, x);
                    }
                }
            }
        }
    }
    span
}
