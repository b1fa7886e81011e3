//! Band subdivision of the main region.
//!
//! Purpose
//! - Own the user's main quad and derive four directional bands (top, bottom,
//!   left, right) of sub-quads from it, each with its own boundary table.
//! - Rebuild everything synchronously whenever the main corners move.
//!
//! Code cross-refs: `region::{Quadrilateral, Corners, EdgeFn::midpoint}`, `sampler::RegionSampler`

mod build;
mod types;

pub use build::{band_corners, center_lines, subdivide, Grid};
pub use types::{Bands, CenterLine, GridCfg};
