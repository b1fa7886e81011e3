//! Region geometry: points, quads, and the scanline containment test.
//!
//! Purpose
//! - Turn four user-dragged corners into a row-indexed boundary table that
//!   answers containment in O(1) and lists the covered rows for sampling.
//! - Keep every derived structure a fresh value: rebuilding never mutates a
//!   table that a reader may already hold.
//!
//! Code cross-refs: `ScanlineRegion`, `Quadrilateral`, `Containment`, `EdgeFn`

mod quad;
mod scanline;
mod types;

pub use quad::{Containment, Quadrilateral};
pub use scanline::ScanlineRegion;
pub use types::{CanvasSize, Corners, CoveredRow, EdgeFn, Point, QuadEdges, Span};

#[cfg(test)]
mod tests;
