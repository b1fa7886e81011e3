//! Region geometry engine for ambient-light color extraction.
//!
//! A user outlines an arbitrary convex quad on a live video frame. This crate
//! turns the quad into a row-indexed boundary table (fast containment for the
//! preview mask), subdivides it into four directional bands of sub-quads, and
//! averages the pixel color of every sub-quad each frame.
//!
//! Layout
//! - `region`: points, edge functions, quads, scanline containment.
//! - `grid`: center lines and band subdivision.
//! - `sampler`: mean color over covered rows.
//! - `frame`: per-frame masking/sampling on copy-on-write snapshots.
//! - `ambient`: band samples to one light color.
//! - `synth`: reproducible random quads, drags, and frames.
//!
//! Capture, UI handles, and the light transport live outside this crate.

pub mod ambient;
pub mod frame;
pub mod grid;
pub mod region;
pub mod sampler;
pub mod synth;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::ambient::{boost, mix, AmbientMixer, BandSelection, MixCfg};
    pub use crate::frame::{FrameProcessor, MaskCfg, RegionSnapshot, SharedRegion};
    pub use crate::grid::{Bands, CenterLine, Grid, GridCfg};
    pub use crate::region::{
        CanvasSize, Containment, Corners, CoveredRow, EdgeFn, Point, Quadrilateral,
        ScanlineRegion, Span,
    };
    pub use crate::sampler::{average_rows, RegionSampler, Rgb};
    pub use crate::synth::{draw_quad, drag_handle, noise_frame, QuadJitterCfg, ReplayToken};
}
