use anyhow::{Context, Result};
use glowgrid::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Region configuration file (JSON). Every field is optional; missing fields
/// take the defaults below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    pub canvas: CanvasConfig,
    pub row_bands: usize,
    pub column_bands: usize,
    pub corners: CornersConfig,
    pub mask_alpha: u8,
    pub mix: MixConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    pub width: usize,
    pub height: usize,
}

/// Corners as `[x, y]` pairs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CornersConfig {
    pub top_left: [f64; 2],
    pub top_right: [f64; 2],
    pub bottom_right: [f64; 2],
    pub bottom_left: [f64; 2],
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixConfig {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
    pub first_only: bool,
    pub boost: bool,
}

impl Default for RegionConfig {
    fn default() -> Self {
        let grid = GridCfg::default();
        let canvas = CanvasSize::default();
        Self {
            canvas: CanvasConfig {
                width: canvas.width,
                height: canvas.height,
            },
            row_bands: grid.row_bands,
            column_bands: grid.column_bands,
            corners: CornersConfig {
                top_left: [50.0, 50.0],
                top_right: [300.0, 50.0],
                bottom_right: [300.0, 300.0],
                bottom_left: [50.0, 300.0],
            },
            mask_alpha: MaskCfg::default().outside_alpha,
            mix: MixConfig::default(),
        }
    }
}

impl Default for MixConfig {
    fn default() -> Self {
        let d = MixCfg::default();
        Self {
            top: d.bands.top,
            bottom: d.bands.bottom,
            left: d.bands.left,
            right: d.bands.right,
            first_only: d.first_only,
            boost: d.boost,
        }
    }
}

impl RegionConfig {
    /// Read `path` if given, otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn canvas(&self) -> CanvasSize {
        CanvasSize::new(self.canvas.width, self.canvas.height)
    }

    pub fn grid_cfg(&self) -> GridCfg {
        GridCfg {
            row_bands: self.row_bands,
            column_bands: self.column_bands,
        }
    }

    pub fn corners(&self) -> Corners {
        let p = |[x, y]: [f64; 2]| Point::new(x, y);
        Corners::new(
            p(self.corners.top_left),
            p(self.corners.top_right),
            p(self.corners.bottom_right),
            p(self.corners.bottom_left),
        )
    }

    pub fn mask_cfg(&self) -> MaskCfg {
        MaskCfg {
            outside_alpha: self.mask_alpha,
        }
    }

    pub fn mix_cfg(&self) -> MixCfg {
        MixCfg {
            bands: BandSelection {
                top: self.mix.top,
                bottom: self.mix.bottom,
                left: self.mix.left,
                right: self.mix.right,
            },
            first_only: self.mix.first_only,
            boost: self.mix.boost,
        }
    }

    /// Processor on `canvas` (the captured frame's size), seeded with the
    /// configured corners.
    pub fn processor(&self, canvas: CanvasSize) -> FrameProcessor {
        FrameProcessor::with_corners(canvas, self.grid_cfg(), self.mask_cfg(), self.corners())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_path_gives_defaults() {
        let cfg = RegionConfig::load(None).unwrap();
        assert_eq!(cfg, RegionConfig::default());
        assert_eq!(cfg.corners(), Corners::rect(50.0, 50.0, 300.0, 300.0));
        assert_eq!(cfg.grid_cfg(), GridCfg::default());
        assert_eq!(cfg.mix_cfg(), MixCfg::default());
        assert_eq!(cfg.mask_cfg().outside_alpha, 50);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("region.json");
        fs::write(
            &path,
            r#"{"row_bands": 3, "canvas": {"width": 320, "height": 240}, "mix": {"boost": false}}"#,
        )
        .unwrap();
        let cfg = RegionConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.row_bands, 3);
        assert_eq!(cfg.column_bands, 0);
        assert_eq!(cfg.canvas(), CanvasSize::new(320, 240));
        assert!(!cfg.mix.boost);
        assert!(cfg.mix.left && cfg.mix.right);
    }

    #[test]
    fn bad_file_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();
        let err = RegionConfig::load(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("broken.json"));
    }

    #[test]
    fn processor_uses_configured_corners() {
        let cfg = RegionConfig::default();
        let fp = cfg.processor(CanvasSize::new(400, 400));
        assert_eq!(fp.coordinates(), cfg.corners());
        assert!(fp.contains(Point::new(100.0, 100.0)));
    }
}
