//! Data types for band subdivision.
//!
//! Kept small and explicit so `build` reads as geometry only.

use crate::region::Point;

/// Subdivision counts, fixed when a `Grid` is created.
///
/// - `row_bands`: sub-regions in the left and right bands (split top-to-bottom).
/// - `column_bands`: sub-regions in the top and bottom bands (split left-to-right).
///
/// A count of 0 leaves that band pair empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridCfg {
    pub row_bands: usize,
    pub column_bands: usize,
}

impl Default for GridCfg {
    fn default() -> Self {
        Self {
            row_bands: 1,
            column_bands: 0,
        }
    }
}

/// Segment between the midpoints of two opposite edges of the main quad.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CenterLine {
    pub start: Point,
    pub end: Point,
}

/// One value per band sub-region, grouped by direction.
///
/// Used for sub-quads, samplers, and sampled colors alike.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bands<T> {
    pub top: Vec<T>,
    pub bottom: Vec<T>,
    pub left: Vec<T>,
    pub right: Vec<T>,
}

impl<T> Bands<T> {
    /// Apply `f` to every entry, keeping the grouping and order.
    pub fn map<U, F: FnMut(&T) -> U>(&self, mut f: F) -> Bands<U> {
        Bands {
            top: self.top.iter().map(&mut f).collect(),
            bottom: self.bottom.iter().map(&mut f).collect(),
            left: self.left.iter().map(&mut f).collect(),
            right: self.right.iter().map(&mut f).collect(),
        }
    }

    /// Total number of sub-regions across all four bands.
    pub fn len(&self) -> usize {
        self.top.len() + self.bottom.len() + self.left.len() + self.right.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries in band order top, bottom, left, right.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.top
            .iter()
            .chain(self.bottom.iter())
            .chain(self.left.iter())
            .chain(self.right.iter())
    }
}
