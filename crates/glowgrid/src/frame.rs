//! Per-frame masking and band sampling on top of an immutable region snapshot.
//!
//! Purpose
//! - Hold the current grid and its band samplers as one `RegionSnapshot`,
//!   replaced as a unit on every geometry edit (build, then swap the `Arc`).
//! - Run the two per-frame operations against whichever snapshot is current:
//!   alpha-masking the preview outside the main quad, and averaging each band.
//!
//! Concurrency
//! - `SharedRegion` is the publish point. Its lock guards only the `Arc`
//!   pointer: writers build the next snapshot without holding it, readers clone
//!   the pointer and then work lock-free on a snapshot that never changes.
//!
//! Code cross-refs: `grid::Grid`, `sampler::RegionSampler`, `region::ScanlineRegion`

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use crate::grid::{Bands, Grid, GridCfg};
use crate::region::{CanvasSize, Corners, Point};
use crate::sampler::{RegionSampler, Rgb};

/// Preview masking options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaskCfg {
    /// Alpha written to pixels outside the main quad.
    pub outside_alpha: u8,
}

impl Default for MaskCfg {
    fn default() -> Self {
        Self { outside_alpha: 50 }
    }
}

/// Grid plus the samplers built from its bands. Immutable once built.
#[derive(Clone, Debug)]
pub struct RegionSnapshot {
    grid: Grid,
    samplers: Bands<RegionSampler>,
}

impl RegionSnapshot {
    pub fn build(canvas: CanvasSize, cfg: GridCfg, corners: Corners) -> Self {
        Self::from_grid(Grid::with_corners(canvas, cfg, corners))
    }

    pub fn from_grid(grid: Grid) -> Self {
        let samplers = grid.bands().map(|q| RegionSampler::new(q.shared_rows()));
        Self { grid, samplers }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn samplers(&self) -> &Bands<RegionSampler> {
        &self.samplers
    }

    #[inline]
    pub fn corners(&self) -> Corners {
        self.grid.corners()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.grid.contains(p)
    }

    /// Mean color of every band sub-region. No geometry work happens here.
    pub fn sample_bands(&self, pixels: &[u8], row_stride: usize) -> Bands<Option<Rgb>> {
        self.samplers.map(|s| s.process(pixels, row_stride))
    }

    /// Write `alpha` into every pixel outside the main quad; returns how many
    /// pixels were dimmed. `pixels` must hold `canvas.height` rows.
    ///
    /// Equivalent to testing `contains` per pixel, but resolves each row's span
    /// to an integer range once and then touches only alpha bytes.
    pub fn mask(&self, pixels: &mut [u8], alpha: u8) -> usize {
        let canvas = self.grid.canvas();
        let stride = canvas.stride();
        if stride == 0 {
            return 0;
        }
        let table = self.grid.main().containment().scanline();
        let mut dimmed = 0usize;
        for (y, line) in pixels.chunks_exact_mut(stride).enumerate() {
            let inside = table
                .and_then(|t| t.row(y))
                .and_then(|span| inside_range(span.min, span.max, canvas.width));
            match inside {
                Some((lo, hi)) => {
                    dimmed += dim(&mut line[..4 * lo], alpha);
                    dimmed += dim(&mut line[4 * (hi + 1)..], alpha);
                }
                None => dimmed += dim(line, alpha),
            }
        }
        dimmed
    }
}

/// Integer x-range `[lo, hi]` with `min <= x <= max`, clipped to the row.
#[inline]
fn inside_range(min: f64, max: f64, width: usize) -> Option<(usize, usize)> {
    let lo = min.ceil().max(0.0);
    let hi = max.floor().min(width as f64 - 1.0);
    if lo <= hi {
        Some((lo as usize, hi as usize))
    } else {
        None
    }
}

#[inline]
fn dim(pixels: &mut [u8], alpha: u8) -> usize {
    let mut n = 0;
    for px in pixels.chunks_exact_mut(4) {
        px[3] = alpha;
        n += 1;
    }
    n
}

/// Publish point for region snapshots, shareable across threads.
#[derive(Clone, Debug)]
pub struct SharedRegion {
    current: Arc<RwLock<Arc<RegionSnapshot>>>,
}

impl SharedRegion {
    pub fn new(snapshot: RegionSnapshot) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(snapshot))),
        }
    }

    /// The snapshot current at the time of the call.
    pub fn load(&self) -> Arc<RegionSnapshot> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replace the current snapshot. Readers see either the old or the new one.
    pub fn publish(&self, snapshot: RegionSnapshot) {
        let next = Arc::new(snapshot);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = next;
    }
}

/// Owns the canvas configuration and the current region; runs per-frame work.
#[derive(Clone, Debug)]
pub struct FrameProcessor {
    canvas: CanvasSize,
    grid_cfg: GridCfg,
    mask_cfg: MaskCfg,
    region: SharedRegion,
}

impl FrameProcessor {
    /// Processor with an unconfigured region: nothing is contained and no band
    /// samples until the first `set_corners`.
    pub fn new(canvas: CanvasSize, grid_cfg: GridCfg, mask_cfg: MaskCfg) -> Self {
        Self {
            canvas,
            grid_cfg,
            mask_cfg,
            region: SharedRegion::new(RegionSnapshot::from_grid(Grid::new(canvas, grid_cfg))),
        }
    }

    pub fn with_corners(
        canvas: CanvasSize,
        grid_cfg: GridCfg,
        mask_cfg: MaskCfg,
        corners: Corners,
    ) -> Self {
        Self {
            canvas,
            grid_cfg,
            mask_cfg,
            region: SharedRegion::new(RegionSnapshot::build(canvas, grid_cfg, corners)),
        }
    }

    #[inline]
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    #[inline]
    pub fn grid_cfg(&self) -> GridCfg {
        self.grid_cfg
    }

    #[inline]
    pub fn mask_cfg(&self) -> MaskCfg {
        self.mask_cfg
    }

    /// Handle for readers on other threads (e.g. a sampling tick).
    pub fn shared(&self) -> SharedRegion {
        self.region.clone()
    }

    #[inline]
    pub fn snapshot(&self) -> Arc<RegionSnapshot> {
        self.region.load()
    }

    /// Rebuild grid, tables, and samplers for new corners, then publish.
    pub fn set_corners(&self, corners: Corners) {
        let next = RegionSnapshot::build(self.canvas, self.grid_cfg, corners);
        debug!(
            tl = ?(corners.top_left.x, corners.top_left.y),
            tr = ?(corners.top_right.x, corners.top_right.y),
            br = ?(corners.bottom_right.x, corners.bottom_right.y),
            bl = ?(corners.bottom_left.x, corners.bottom_left.y),
            samplers = next.samplers().len(),
            "region_published"
        );
        self.region.publish(next);
    }

    /// Current main-quad corners, for drawing drag handles.
    pub fn coordinates(&self) -> Corners {
        self.snapshot().corners()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.snapshot().contains(p)
    }

    /// Dim pixels outside the main quad in place. `None` if `frame` is not an
    /// RGBA8 buffer of the configured canvas size.
    pub fn mask(&self, frame: &mut [u8]) -> Option<usize> {
        if !self.check_frame(frame.len()) {
            return None;
        }
        Some(self.snapshot().mask(frame, self.mask_cfg.outside_alpha))
    }

    /// Mean color per band sub-region. `None` on a frame size mismatch.
    pub fn sample_bands(&self, frame: &[u8]) -> Option<Bands<Option<Rgb>>> {
        if !self.check_frame(frame.len()) {
            return None;
        }
        Some(self.snapshot().sample_bands(frame, self.canvas.stride()))
    }

    fn check_frame(&self, len: usize) -> bool {
        let expected = self.canvas.frame_len();
        if len != expected {
            warn!(len, expected, "frame_size_mismatch");
            return false;
        }
        true
    }
}
