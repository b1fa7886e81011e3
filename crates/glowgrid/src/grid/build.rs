//! Grid construction: center lines and directional band sub-quads.
//!
//! Model
//! - `vertical` center line: midpoint(left edge) → midpoint(right edge). It
//!   separates the top band from the bottom band.
//! - `horizontal` center line: midpoint(top edge) → midpoint(bottom edge). It
//!   separates the left band from the right band.
//! - Top/bottom bands are cut left-to-right into `column_bands` sub-quads,
//!   left/right bands top-to-bottom into `row_bands` sub-quads. Each sub-quad
//!   interpolates its corners along both bounding segments of its band, so a
//!   skewed band yields true quads, not parallelograms.
//! - The bands do not tile the main quad: near the center they may overlap and
//!   leave area unclaimed. Each band samples its own edge-adjacent population.

use tracing::debug;

use super::types::{Bands, CenterLine, GridCfg};
use crate::region::{CanvasSize, Corners, Point, Quadrilateral};

/// Main quad plus the four band lists derived from it.
///
/// Invariant: `bands` is always derived from the current main corners; both
/// are replaced together by `set_corners`.
#[derive(Clone, Debug)]
pub struct Grid {
    cfg: GridCfg,
    canvas: CanvasSize,
    main: Quadrilateral,
    bands: Bands<Quadrilateral>,
}

impl Grid {
    /// Unconfigured grid: main quad and every band quad use `NeverContains`
    /// until the first `set_corners`.
    pub fn new(canvas: CanvasSize, cfg: GridCfg) -> Self {
        let corners = Corners::default();
        Self {
            cfg,
            canvas,
            main: Quadrilateral::new(corners),
            bands: band_corners(&corners, cfg).map(|c| Quadrilateral::new(*c)),
        }
    }

    pub fn with_corners(canvas: CanvasSize, cfg: GridCfg, corners: Corners) -> Self {
        let main = Quadrilateral::with_scanline(corners, canvas);
        let bands = subdivide(&corners, cfg, canvas);
        debug!(
            covered_rows = main.covered_rows().len(),
            top = bands.top.len(),
            bottom = bands.bottom.len(),
            left = bands.left.len(),
            right = bands.right.len(),
            "grid_built"
        );
        Self {
            cfg,
            canvas,
            main,
            bands,
        }
    }

    /// Move the main corners and rebuild every band from scratch, each with a
    /// scanline table.
    pub fn set_corners(&mut self, corners: Corners) {
        *self = Self::with_corners(self.canvas, self.cfg, corners);
    }

    #[inline]
    pub fn cfg(&self) -> GridCfg {
        self.cfg
    }

    #[inline]
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    #[inline]
    pub fn corners(&self) -> Corners {
        self.main.corners()
    }

    #[inline]
    pub fn main(&self) -> &Quadrilateral {
        &self.main
    }

    #[inline]
    pub fn bands(&self) -> &Bands<Quadrilateral> {
        &self.bands
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.main.contains(p)
    }

    /// `(vertical, horizontal)` center lines of the current main quad.
    pub fn center_lines(&self) -> (CenterLine, CenterLine) {
        center_lines(&self.main.corners())
    }
}

/// `(vertical, horizontal)` center lines of `corners`.
pub fn center_lines(corners: &Corners) -> (CenterLine, CenterLine) {
    let edges = corners.edges();
    let vertical = CenterLine {
        start: edges.left.midpoint(),
        end: edges.right.midpoint(),
    };
    let horizontal = CenterLine {
        start: edges.top.midpoint(),
        end: edges.bottom.midpoint(),
    };
    (vertical, horizontal)
}

/// Derive all band sub-quads of `corners`, each with its own scanline table.
pub fn subdivide(corners: &Corners, cfg: GridCfg, canvas: CanvasSize) -> Bands<Quadrilateral> {
    band_corners(corners, cfg).map(|c| Quadrilateral::with_scanline(*c, canvas))
}

/// Corners of every band sub-quad of `corners`.
pub fn band_corners(corners: &Corners, cfg: GridCfg) -> Bands<Corners> {
    let (vertical, horizontal) = center_lines(corners);
    let top = Corners::new(
        corners.top_left,
        corners.top_right,
        vertical.end,
        vertical.start,
    );
    let bottom = Corners::new(
        vertical.start,
        vertical.end,
        corners.bottom_right,
        corners.bottom_left,
    );
    let left = Corners::new(
        corners.top_left,
        horizontal.start,
        horizontal.end,
        corners.bottom_left,
    );
    let right = Corners::new(
        horizontal.start,
        corners.top_right,
        corners.bottom_right,
        horizontal.end,
    );
    Bands {
        top: split_columns(&top, cfg.column_bands),
        bottom: split_columns(&bottom, cfg.column_bands),
        left: split_rows(&left, cfg.row_bands),
        right: split_rows(&right, cfg.row_bands),
    }
}

/// Point at fraction `i / count` from `a` to `b`.
#[inline]
fn step(a: Point, b: Point, count: usize, i: usize) -> Point {
    a + (b - a) / count as f64 * i as f64
}

/// Cut `band` left-to-right into `count` sub-quads.
fn split_columns(band: &Corners, count: usize) -> Vec<Corners> {
    let (tl, tr, br, bl) = (
        band.top_left,
        band.top_right,
        band.bottom_right,
        band.bottom_left,
    );
    (0..count)
        .map(|i| {
            Corners::new(
                step(tl, tr, count, i),
                step(tl, tr, count, i + 1),
                step(bl, br, count, i + 1),
                step(bl, br, count, i),
            )
        })
        .collect()
}

/// Cut `band` top-to-bottom into `count` sub-quads.
fn split_rows(band: &Corners, count: usize) -> Vec<Corners> {
    let (tl, tr, br, bl) = (
        band.top_left,
        band.top_right,
        band.bottom_right,
        band.bottom_left,
    );
    (0..count)
        .map(|i| {
            Corners::new(
                step(tl, bl, count, i),
                step(tr, br, count, i),
                step(tr, br, count, i + 1),
                step(tl, bl, count, i + 1),
            )
        })
        .collect()
}
