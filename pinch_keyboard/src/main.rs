//! pinch_keyboard — interactive entry point.

use std::path::PathBuf;

use clap::Parser;

use keyboard_core::KeyboardConfig;
use pinch_keyboard::app::{run, AppConfig, FrameMode, TrackerMode, WIN_H, WIN_W};

/// Type on a virtual keyboard by pinching index and middle fingers over a key.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Camera index (needs the `camera` feature).
    #[arg(long, conflicts_with = "sim")]
    camera: Option<u32>,

    /// Use the synthetic backdrop instead of a camera.
    #[arg(long)]
    sim: bool,

    /// Read hand landmarks from stdin (one JSON array of 21 [x, y] per line)
    /// instead of following the mouse.
    #[arg(long)]
    landmarks_stdin: bool,

    /// Do not forward typed keys to the operating system.
    #[arg(long)]
    no_keystrokes: bool,

    /// JSON file with keyboard thresholds and timings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pinch distance in pixels below which a pinch registers.
    #[arg(long)]
    pinch_threshold: Option<f32>,

    /// Seconds before the same key can fire again.
    #[arg(long)]
    debounce: Option<f64>,

    #[arg(long, default_value_t = WIN_W)]
    width: u32,

    #[arg(long, default_value_t = WIN_H)]
    height: u32,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║         Pinch Keyboard — type in the air over a camera       ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let cfg = match app_config(args) {
        Ok(cfg) => cfg,
        Err(e)  => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match cfg.frames {
        FrameMode::Simulated     => println!("  Mode: Simulation  (use --features camera for a webcam)"),
        FrameMode::Camera(index) => println!("  Mode: Camera {}", index),
    }
    match cfg.tracker {
        TrackerMode::Mouse     => println!("  Hand: mouse — hold the left button to pinch"),
        TrackerMode::StdinFeed => println!("  Hand: landmark feed on stdin"),
    }
    println!("  Press q in the window to quit.");
    println!();

    if let Err(e) = run(cfg) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn app_config(args: Args) -> Result<AppConfig, keyboard_core::ConfigError> {
    let mut keyboard = match &args.config {
        Some(path) => KeyboardConfig::load(path)?,
        None       => KeyboardConfig::default(),
    };
    if let Some(t) = args.pinch_threshold { keyboard.pinch_threshold = t; }
    if let Some(d) = args.debounce        { keyboard.debounce_secs = d; }
    keyboard.validate()?;

    let defaults = AppConfig::default();
    let frames = match (args.sim, args.camera) {
        (true, _)       => FrameMode::Simulated,
        (_, Some(i))    => FrameMode::Camera(i),
        (false, None)   => defaults.frames,
    };

    Ok(AppConfig {
        frames,
        tracker:    if args.landmarks_stdin { TrackerMode::StdinFeed } else { TrackerMode::Mouse },
        width:      args.width.max(1),
        height:     args.height.max(1),
        keystrokes: !args.no_keystrokes,
        keyboard,
    })
}
