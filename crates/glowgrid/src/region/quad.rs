//! Quadrilateral with a pluggable containment strategy.
//!
//! - `Containment::NeverContains` is the state before any region is configured:
//!   no point is inside and there are no covered rows.
//! - `Containment::ConvexQuadScanline` carries a `ScanlineRegion` built from the
//!   quad's own corners.
//!
//! Corners are plain values. A quad derived from another (band sub-quads) gets
//! its own copies, so editing one quad never moves another.

use std::sync::Arc;

use super::scanline::ScanlineRegion;
use super::types::{CanvasSize, Corners, CoveredRow, Point};

/// Containment strategy of a quad.
#[derive(Clone, Debug, Default)]
pub enum Containment {
    #[default]
    NeverContains,
    ConvexQuadScanline(ScanlineRegion),
}

impl Containment {
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        match self {
            Containment::NeverContains => false,
            Containment::ConvexQuadScanline(region) => region.contains(p),
        }
    }

    #[inline]
    pub fn covered_rows(&self) -> &[CoveredRow] {
        match self {
            Containment::NeverContains => &[],
            Containment::ConvexQuadScanline(region) => region.covered_rows(),
        }
    }

    #[inline]
    pub fn scanline(&self) -> Option<&ScanlineRegion> {
        match self {
            Containment::NeverContains => None,
            Containment::ConvexQuadScanline(region) => Some(region),
        }
    }

    /// Same strategy, rebuilt for new corners. The old table is dropped only
    /// after the new one is complete.
    fn rebuilt(&self, corners: Corners) -> Self {
        match self {
            Containment::NeverContains => Containment::NeverContains,
            Containment::ConvexQuadScanline(region) => {
                Containment::ConvexQuadScanline(ScanlineRegion::build(corners, region.canvas()))
            }
        }
    }
}

/// Ordered four-corner shape (main region or a band sub-region).
#[derive(Clone, Debug, Default)]
pub struct Quadrilateral {
    corners: Corners,
    containment: Containment,
}

impl Quadrilateral {
    /// Quad without a containment strategy.
    pub fn new(corners: Corners) -> Self {
        Self {
            corners,
            containment: Containment::NeverContains,
        }
    }

    /// Quad backed by a scanline table on `canvas`.
    pub fn with_scanline(corners: Corners, canvas: CanvasSize) -> Self {
        Self {
            corners,
            containment: Containment::ConvexQuadScanline(ScanlineRegion::build(corners, canvas)),
        }
    }

    /// Replace the strategy, building it for the current corners.
    pub fn use_scanline(&mut self, canvas: CanvasSize) {
        self.containment =
            Containment::ConvexQuadScanline(ScanlineRegion::build(self.corners, canvas));
    }

    /// Move the corners and rebuild the containment table synchronously.
    pub fn set_corners(&mut self, corners: Corners) {
        let containment = self.containment.rebuilt(corners);
        self.corners = corners;
        self.containment = containment;
    }

    #[inline]
    pub fn corners(&self) -> Corners {
        self.corners
    }

    #[inline]
    pub fn containment(&self) -> &Containment {
        &self.containment
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.containment.contains(p)
    }

    #[inline]
    pub fn covered_rows(&self) -> &[CoveredRow] {
        self.containment.covered_rows()
    }

    /// Shared covered-row list (empty for `NeverContains`).
    pub fn shared_rows(&self) -> Arc<[CoveredRow]> {
        match &self.containment {
            Containment::NeverContains => Arc::from(Vec::<CoveredRow>::new()),
            Containment::ConvexQuadScanline(region) => region.shared_rows(),
        }
    }
}
