use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use glowgrid::prelude::*;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::fmt::SubscriberBuilder;

mod config;
mod frames;

use config::RegionConfig;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Sample ambient light colors from a quad region of a frame")]
struct Cmd {
    /// Region config (JSON); built-in defaults when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Print per-band colors and the mixed light color for one frame
    Sample {
        #[arg(long)]
        frame: PathBuf,
    },
    /// Write the masked preview of one frame
    Mask {
        #[arg(long)]
        frame: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Drive the processor with synthetic frames and random handle drags
    Simulate {
        #[arg(long, default_value_t = 120)]
        frames: u64,
        #[arg(long, default_value_t = 7)]
        seed: u64,
        /// Move one handle every N frames (0 = never)
        #[arg(long, default_value_t = 10)]
        drag_every: u64,
        /// Sample the bands every N frames
        #[arg(long, default_value_t = 6)]
        sample_every: u64,
    },
    /// Print the effective configuration
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let cfg = RegionConfig::load(cmd.config.as_deref())?;
    match cmd.action {
        Action::Sample { frame } => sample(&cfg, frame),
        Action::Mask { frame, out } => mask(&cfg, frame, out),
        Action::Simulate {
            frames,
            seed,
            drag_every,
            sample_every,
        } => simulate(&cfg, frames, seed, drag_every, sample_every),
        Action::Report => report(&cfg),
    }
}

/// Processor sized to the captured frame. The frame decides the canvas; a
/// differing configured canvas is only logged.
fn processor_for(cfg: &RegionConfig, canvas: CanvasSize) -> FrameProcessor {
    if canvas != cfg.canvas() {
        tracing::info!(
            frame_width = canvas.width,
            frame_height = canvas.height,
            config_width = cfg.canvas.width,
            config_height = cfg.canvas.height,
            "canvas_from_frame"
        );
    }
    cfg.processor(canvas)
}

fn sample(cfg: &RegionConfig, frame: PathBuf) -> Result<()> {
    tracing::info!(frame = %frame.display(), "sample");
    let out = sample_frame(cfg, &frame)?;
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

/// Band colors and mixed light color of the frame at `path`, as JSON.
fn sample_frame(cfg: &RegionConfig, path: &Path) -> Result<Value> {
    let f = frames::load(path)?;
    let fp = processor_for(cfg, f.canvas);
    let Some(samples) = fp.sample_bands(&f.pixels) else {
        bail!("frame buffer does not match {:?}", f.canvas);
    };
    let mut mixer = AmbientMixer::new(cfg.mix_cfg());
    let light = mixer.update(&samples);
    Ok(sample_json(fp.canvas(), fp.coordinates(), &samples, light))
}

fn mask(cfg: &RegionConfig, frame: PathBuf, out: PathBuf) -> Result<()> {
    tracing::info!(frame = %frame.display(), out = %out.display(), "mask");
    let dimmed = mask_frame(cfg, &frame, &out)?;
    tracing::info!(dimmed, "masked");
    Ok(())
}

/// Write the masked preview of `frame` to `out`; returns the dimmed pixel count.
fn mask_frame(cfg: &RegionConfig, frame: &Path, out: &Path) -> Result<usize> {
    let mut f = frames::load(frame)?;
    let fp = processor_for(cfg, f.canvas);
    let Some(dimmed) = fp.mask(&mut f.pixels) else {
        bail!("frame buffer does not match {:?}", f.canvas);
    };
    tracing::debug!(dimmed, total = f.canvas.width * f.canvas.height, "mask_applied");
    frames::save_png(out, &f)?;
    Ok(dimmed)
}

fn simulate(
    cfg: &RegionConfig,
    frames: u64,
    seed: u64,
    drag_every: u64,
    sample_every: u64,
) -> Result<()> {
    let canvas = cfg.canvas();
    tracing::info!(frames, seed, drag_every, sample_every, "simulate");
    let fp = cfg.processor(canvas);
    let mut mixer = AmbientMixer::new(cfg.mix_cfg());
    let (mut drags, mut ticks, mut held) = (0u64, 0u64, 0u64);
    let (mut mask_secs, mut sample_secs, mut drag_secs) = (0.0f64, 0.0f64, 0.0f64);
    let mut last = None;

    for i in 0..frames {
        if drag_every > 0 && i > 0 && i % drag_every == 0 {
            let t = Instant::now();
            let next = drag_handle(fp.coordinates(), canvas, 40.0, ReplayToken::new(seed, i));
            fp.set_corners(next);
            drag_secs += t.elapsed().as_secs_f64();
            drags += 1;
        }

        let mut frame = noise_frame(canvas, ReplayToken::new(seed ^ 0x5eed, i));
        let t = Instant::now();
        if fp.mask(&mut frame).is_none() {
            bail!("synthetic frame does not match {canvas:?}");
        }
        mask_secs += t.elapsed().as_secs_f64();

        if sample_every > 0 && i % sample_every == 0 {
            let t = Instant::now();
            let Some(samples) = fp.sample_bands(&frame) else {
                bail!("synthetic frame does not match {canvas:?}");
            };
            last = mixer.update(&samples);
            if mixer.held() {
                held += 1;
            }
            sample_secs += t.elapsed().as_secs_f64();
            ticks += 1;
        }
    }

    let mean_ms = |secs: f64, n: u64| if n == 0 { 0.0 } else { secs * 1e3 / n as f64 };
    tracing::info!(
        mask_ms = mean_ms(mask_secs, frames),
        sample_ms = mean_ms(sample_secs, ticks),
        rebuild_ms = mean_ms(drag_secs, drags),
        "simulate_done"
    );
    let summary = json!({
        "frames": frames,
        "drags": drags,
        "sample_ticks": ticks,
        "held_ticks": held,
        "mean_ms": {
            "mask": mean_ms(mask_secs, frames),
            "sample": mean_ms(sample_secs, ticks),
            "rebuild": mean_ms(drag_secs, drags),
        },
        "corners": corners_json(fp.coordinates()),
        "light": last.map(|c: Rgb| c.to_rgb8()),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn report(cfg: &RegionConfig) -> Result<()> {
    let obj = json!({
        "version": glowgrid::VERSION,
        "config": cfg,
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn corners_json(c: Corners) -> Value {
    let p = |p: Point| json!([p.x, p.y]);
    json!({
        "top_left": p(c.top_left),
        "top_right": p(c.top_right),
        "bottom_right": p(c.bottom_right),
        "bottom_left": p(c.bottom_left),
    })
}

fn sample_json(
    canvas: CanvasSize,
    corners: Corners,
    samples: &Bands<Option<Rgb>>,
    light: Option<Rgb>,
) -> Value {
    let band = |colors: &[Option<Rgb>]| -> Value {
        Value::Array(
            colors
                .iter()
                .map(|c| json!(c.map(|c| c.to_rgb8())))
                .collect(),
        )
    };
    json!({
        "canvas": { "width": canvas.width, "height": canvas.height },
        "corners": corners_json(corners),
        "bands": {
            "top": band(samples.top.as_slice()),
            "bottom": band(samples.bottom.as_slice()),
            "left": band(samples.left.as_slice()),
            "right": band(samples.right.as_slice()),
        },
        "light": light.map(|c| c.to_rgb8()),
    })
}
