//! Reproducible random quads, drags, and frames.
//!
//! Purpose
//! - Feed benches, property-style tests, and the CLI simulator with realistic
//!   input: user-like quads (one corner per canvas quadrant), handle drags
//!   clamped to the canvas, and RGBA noise frames.
//!
//! Model
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG, so
//!   draw `k` of a run can be regenerated without replaying draws `0..k`.
//! - A quad with each corner inside its own quadrant (in TL, TR, BR, BL order)
//!   is always simple; it is usually but not always convex.
//!
//! Code cross-refs: `region::{Corners, CanvasSize::clamp}`

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::region::{CanvasSize, Corners, Point};

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    /// Token for the next draw of the same run.
    #[inline]
    pub fn next(self) -> Self {
        Self {
            seed: self.seed,
            index: self.index.wrapping_add(1),
        }
    }

    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Random quad configuration.
#[derive(Clone, Copy, Debug)]
pub struct QuadJitterCfg {
    /// Keep-out band around each quadrant, as a fraction of the canvas size.
    /// Clamped to [0, 0.24].
    pub margin_frac: f64,
}

impl Default for QuadJitterCfg {
    fn default() -> Self {
        Self { margin_frac: 0.05 }
    }
}

/// Draw a quad with one corner in each canvas quadrant.
pub fn draw_quad(canvas: CanvasSize, cfg: QuadJitterCfg, tok: ReplayToken) -> Corners {
    let mut rng = tok.to_std_rng();
    let m = cfg.margin_frac.clamp(0.0, 0.24);
    let (w, h) = (canvas.width as f64, canvas.height as f64);
    let (mx, my) = (m * w, m * h);
    let (cx, cy) = (w / 2.0, h / 2.0);
    let mut corner = |x0: f64, x1: f64, y0: f64, y1: f64| {
        Point::new(uniform(&mut rng, x0, x1), uniform(&mut rng, y0, y1))
    };
    let top_left = corner(mx, cx - mx, my, cy - my);
    let top_right = corner(cx + mx, w - mx, my, cy - my);
    let bottom_right = corner(cx + mx, w - mx, cy + my, h - my);
    let bottom_left = corner(mx, cx - mx, cy + my, h - my);
    Corners::new(top_left, top_right, bottom_right, bottom_left)
}

#[inline]
fn uniform<R: Rng>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

/// Move one randomly chosen handle by up to `max_step` per axis, clamped to
/// the canvas the way a drag collaborator clamps pointer positions.
pub fn drag_handle(
    corners: Corners,
    canvas: CanvasSize,
    max_step: f64,
    tok: ReplayToken,
) -> Corners {
    let mut rng = tok.to_std_rng();
    let step = max_step.abs();
    let handle = rng.gen_range(0..4u8);
    let mut jitter = |p: Point| {
        canvas.clamp(Point::new(
            p.x + uniform(&mut rng, -step, step),
            p.y + uniform(&mut rng, -step, step),
        ))
    };
    let mut out = corners;
    match handle {
        0 => out.top_left = jitter(corners.top_left),
        1 => out.top_right = jitter(corners.top_right),
        2 => out.bottom_right = jitter(corners.bottom_right),
        _ => out.bottom_left = jitter(corners.bottom_left),
    }
    out
}

/// Opaque RGBA8 noise frame of the canvas size.
pub fn noise_frame(canvas: CanvasSize, tok: ReplayToken) -> Vec<u8> {
    let mut rng = tok.to_std_rng();
    let mut frame = vec![0u8; canvas.frame_len()];
    rng.fill(&mut frame[..]);
    for px in frame.chunks_exact_mut(4) {
        px[3] = 255;
    }
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::ScanlineRegion;

    #[test]
    fn replay_is_deterministic() {
        let canvas = CanvasSize::default();
        let tok = ReplayToken::new(2025, 3);
        let a = draw_quad(canvas, QuadJitterCfg::default(), tok);
        let b = draw_quad(canvas, QuadJitterCfg::default(), tok);
        assert_eq!(a, b);
        let c = draw_quad(canvas, QuadJitterCfg::default(), tok.next());
        assert_ne!(a, c);
    }

    #[test]
    fn corners_stay_in_their_quadrants() {
        let canvas = CanvasSize::new(640, 480);
        for i in 0..50 {
            let q = draw_quad(canvas, QuadJitterCfg::default(), ReplayToken::new(1, i));
            assert!(q.top_left.x < 320.0 && q.top_left.y < 240.0);
            assert!(q.top_right.x > 320.0 && q.top_right.y < 240.0);
            assert!(q.bottom_right.x > 320.0 && q.bottom_right.y > 240.0);
            assert!(q.bottom_left.x < 320.0 && q.bottom_left.y > 240.0);
            // TL→TR→BR→BL is clockwise on screen (y down): positive shoelace area.
            assert!(q.signed_area() > 0.0);
            assert!(!ScanlineRegion::build(q, canvas).covered_rows().is_empty());
        }
    }

    #[test]
    fn drag_moves_one_handle_within_canvas() {
        let canvas = CanvasSize::new(100, 100);
        let start = Corners::rect(0.0, 0.0, 100.0, 100.0);
        for i in 0..40 {
            let moved = drag_handle(start, canvas, 30.0, ReplayToken::new(9, i));
            let changed = start
                .to_array()
                .iter()
                .zip(moved.to_array())
                .filter(|(a, b)| **a != *b)
                .count();
            assert!(changed <= 1);
            for p in moved.to_array() {
                assert!((0.0..=100.0).contains(&p.x) && (0.0..=100.0).contains(&p.y));
            }
        }
    }

    #[test]
    fn noise_frame_is_opaque() {
        let canvas = CanvasSize::new(16, 8);
        let f = noise_frame(canvas, ReplayToken::new(4, 0));
        assert_eq!(f.len(), canvas.frame_len());
        assert!(f.chunks_exact(4).all(|px| px[3] == 255));
        assert_ne!(f, noise_frame(canvas, ReplayToken::new(4, 1)));
    }
}
