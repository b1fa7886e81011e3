//! Print band colors for a few random regions over a synthetic gradient frame.
//!
//! Usage:
//!   cargo run -p glowgrid --example band_colors -- 4 2
//!
//! Arguments are `row_bands column_bands` (defaults 2 and 3).

use glowgrid::prelude::*;

fn main() {
    let mut args = std::env::args().skip(1);
    let row_bands = args.next().and_then(|s| s.parse().ok()).unwrap_or(2);
    let column_bands = args.next().and_then(|s| s.parse().ok()).unwrap_or(3);
    let canvas = CanvasSize::default();
    let cfg = GridCfg {
        row_bands,
        column_bands,
    };
    let frame = gradient(canvas);
    let fp = FrameProcessor::new(canvas, cfg, MaskCfg::default());
    let mut mixer = AmbientMixer::new(MixCfg::default());
    for i in 0..3 {
        let corners = draw_quad(canvas, QuadJitterCfg::default(), ReplayToken::new(2025, i));
        fp.set_corners(corners);
        let Some(samples) = fp.sample_bands(&frame) else {
            eprintln!("frame does not match canvas");
            return;
        };
        println!("region {i}: {:?}", corners.to_array().map(|p| (p.x, p.y)));
        for (name, band) in [
            ("top", &samples.top),
            ("bottom", &samples.bottom),
            ("left", &samples.left),
            ("right", &samples.right),
        ] {
            let colors: Vec<String> = band
                .iter()
                .map(|c| match c {
                    Some(c) => format!("{:?}", c.to_rgb8()),
                    None => "none".to_string(),
                })
                .collect();
            println!("  {name:<6} {}", colors.join(" "));
        }
        println!("  light  {:?}", mixer.update(&samples).map(|c| c.to_rgb8()));
    }
}

/// Red grows left to right, blue grows top to bottom.
fn gradient(canvas: CanvasSize) -> Vec<u8> {
    let mut out = Vec::with_capacity(canvas.frame_len());
    for y in 0..canvas.height {
        for x in 0..canvas.width {
            let r = (255 * x / canvas.width.max(1)) as u8;
            let b = (255 * y / canvas.height.max(1)) as u8;
            out.extend_from_slice(&[r, 64, b, 255]);
        }
    }
    out
}
