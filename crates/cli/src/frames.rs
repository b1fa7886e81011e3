use anyhow::{anyhow, Context, Result};
use glowgrid::region::CanvasSize;
use image::{ImageFormat, RgbaImage};
use std::path::Path;

/// One captured RGBA8 frame plus its size.
pub struct Frame {
    pub canvas: CanvasSize,
    pub pixels: Vec<u8>,
}

/// Decode an image file into RGBA8.
pub fn load(path: &Path) -> Result<Frame> {
    let img = image::open(path)
        .with_context(|| format!("decoding {}", path.display()))?
        .to_rgba8();
    let canvas = CanvasSize::new(img.width() as usize, img.height() as usize);
    Ok(Frame {
        canvas,
        pixels: img.into_raw(),
    })
}

/// Encode `frame` as PNG at `path`, creating parent directories.
pub fn save_png(path: &Path, frame: &Frame) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let img = RgbaImage::from_raw(
        u32::try_from(frame.canvas.width)?,
        u32::try_from(frame.canvas.height)?,
        frame.pixels.clone(),
    )
    .ok_or_else(|| anyhow!("frame buffer does not match {:?}", frame.canvas))?;
    img.save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("writing {}", path.display()))
}
