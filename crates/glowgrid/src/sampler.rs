//! Mean color over a region's covered rows.
//!
//! - Pixel layout: RGBA8, row-major; pixel `(x, y)` starts at
//!   `row_stride * y + 4 * x`. Region coordinates and pixel coordinates are the
//!   same space (no scaling).
//! - Each covered row reads integer `x` from `floor(min)` to `ceil(max)`
//!   inclusive. Pixels outside the buffer (or outside the row) are skipped.
//! - Zero accumulated pixels yields `None` ("no sample"), never NaN.

use std::sync::Arc;

use crate::region::CoveredRow;

/// Mean RGB color, channels in `[0, 255]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn max_channel(&self) -> f64 {
        self.r.max(self.g).max(self.b)
    }

    /// Round and clamp to 8-bit channels.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let q = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        [q(self.r), q(self.g), q(self.b)]
    }
}

/// Averages pixels over a fixed list of covered rows.
///
/// Built once per geometry edit from a band sub-quad; reused unchanged for
/// every frame until the next edit.
#[derive(Clone, Debug)]
pub struct RegionSampler {
    rows: Arc<[CoveredRow]>,
}

impl RegionSampler {
    pub fn new(rows: Arc<[CoveredRow]>) -> Self {
        Self { rows }
    }

    #[inline]
    pub fn rows(&self) -> &[CoveredRow] {
        &self.rows
    }

    /// Mean color of the region in `pixels`; `None` when no pixel was read.
    #[inline]
    pub fn process(&self, pixels: &[u8], row_stride: usize) -> Option<Rgb> {
        average_rows(&self.rows, pixels, row_stride)
    }
}

/// Mean color over `rows` in an RGBA8 buffer with `row_stride` bytes per row.
pub fn average_rows(rows: &[CoveredRow], pixels: &[u8], row_stride: usize) -> Option<Rgb> {
    let width = row_stride / 4;
    let mut sum = [0u64; 3];
    let mut count = 0u64;
    for row in rows {
        let Some(start) = row_stride.checked_mul(row.y) else {
            continue;
        };
        // Clip the pixel range to the row before indexing.
        let lo = row.min.floor().max(0.0);
        let hi = row.max.ceil().min(width as f64 - 1.0);
        if !(lo <= hi) {
            continue;
        }
        let (lo, hi) = (lo as usize, hi as usize);
        let Some(line) = pixels.get(start + 4 * lo..start + 4 * (hi + 1)) else {
            continue;
        };
        for px in line.chunks_exact(4) {
            sum[0] += u64::from(px[0]);
            sum[1] += u64::from(px[1]);
            sum[2] += u64::from(px[2]);
        }
        count += (hi - lo + 1) as u64;
    }
    if count == 0 {
        return None;
    }
    let n = count as f64;
    Some(Rgb {
        r: sum[0] as f64 / n,
        g: sum[1] as f64 / n,
        b: sum[2] as f64 / n,
    })
}
