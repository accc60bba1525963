use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use screenfx::config::ViewerConfig;
use screenfx::image_toolbox::{background_texture, save_png, screenshot};
use screenfx::ViewSurface;
use screenfx_core::TransitionPreset;

/// Upper bound on frames per transition when `--frames` is not given
const MAX_FRAMES: u32 = 10_000;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (RON); defaults to ./screenfx.ron if present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Transition to play: zoom, rotate, rotate-back, scroll, blend-in, blend-out, snap-to-front
    /// (repeatable, played in order)
    #[arg(long = "preset")]
    presets: Vec<TransitionPreset>,

    /// Frames to run per transition (default: until the transition settles)
    #[arg(long)]
    frames: Option<u32>,

    /// Zoom the display texture in or out
    #[arg(long, value_enum)]
    zoom_texture: Option<TextureZoom>,

    /// Drawable width (overrides config)
    #[arg(long)]
    width: Option<u32>,

    /// Drawable height (overrides config)
    #[arg(long)]
    height: Option<u32>,

    /// Print the animated values of every frame
    #[arg(long)]
    trace: bool,

    /// Save the visible part of the display texture as PNG after all transitions
    #[arg(long)]
    screenshot: Option<PathBuf>,

    /// Print the effective configuration as RON and exit
    #[arg(long)]
    dump_config: bool,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TextureZoom {
    In,
    Out,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ViewerConfig::load_from(path)?,
        None => ViewerConfig::load()?,
    };

    let default_level = if args.verbose || config.debug.verbose_logging {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if args.dump_config {
        println!("{}", config.to_ron()?);
        return Ok(());
    }

    let mut surface = ViewSurface::new(&config)?;

    if args.width.is_some() || args.height.is_some() {
        let (width, height) = surface.size();
        let (width, height) = (args.width.unwrap_or(width), args.height.unwrap_or(height));
        if let Err(e) = surface.resize(width, height) {
            log::warn!("{e}, keeping {}x{}", surface.size().0, surface.size().1);
        }
    }

    match args.zoom_texture {
        Some(TextureZoom::In) => surface.zoom_texture_in(),
        Some(TextureZoom::Out) => surface.zoom_texture_out(),
        None => {}
    }

    if let Some(preset) = config.animation.startup_preset {
        log::info!("Playing startup transition {}", preset);
        run_frames(&mut surface, args.frames, args.trace);
    }

    for preset in &args.presets {
        log::info!("Playing {} ({} frames)", preset, preset.steps());
        surface.apply(*preset);
        run_frames(&mut surface, args.frames, args.trace);
    }

    // Let a texture zoom that outlasts the transitions finish
    if surface.is_texture_animating() {
        run_frames(&mut surface, args.frames, args.trace);
    }

    print_summary(&surface);

    if let Some(path) = &args.screenshot {
        match background_texture().and_then(|texture| screenshot(&texture, surface.crop_rect())) {
            Some(image) => save_png(&image, path)?,
            None => log::warn!("No screenshot produced"),
        }
    }

    Ok(())
}

/// Tick the surface until everything settles or `limit` frames have passed.
fn run_frames(surface: &mut ViewSurface, limit: Option<u32>, trace: bool) {
    let limit = limit.unwrap_or(MAX_FRAMES);
    let mut frames = 0;

    while frames < limit && (surface.is_animating() || surface.is_texture_animating()) {
        let uniforms = surface.tick();
        frames += 1;

        if trace {
            let a = surface.animation();
            println!(
                "frame {:5}  pitch {:8.3}  yaw {:8.3}  roll {:8.3}  eye ({:6.3}, {:6.3}, {:6.3})  alpha {:5.3}  crop {:?}",
                surface.frame(),
                a.pitch.current(),
                a.yaw.current(),
                a.roll.current(),
                a.eye_x(),
                a.eye_y(),
                a.eye_z(),
                uniforms.alpha,
                uniforms.crop,
            );
        }
    }

    if surface.is_animating() || surface.is_texture_animating() {
        log::debug!("Stopped after {} frames with animation still running", frames);
    } else {
        log::debug!("Settled after {} frames", frames);
    }
}

fn print_summary(surface: &ViewSurface) {
    let a = surface.animation();
    println!("frames:   {}", surface.frame());
    println!(
        "rotation: pitch {} yaw {} roll {}",
        a.pitch.current(),
        a.yaw.current(),
        a.roll.current()
    );
    println!(
        "eye:      ({}, {}, {})",
        surface.eye_x(),
        surface.eye_y(),
        surface.eye_z()
    );
    println!("alpha:    {}", a.alpha.current());
    println!("crop:     {:?}", surface.crop_rect().to_array());
    println!("mvp (columns):");
    for column in surface.mvp().to_cols_array_2d() {
        println!("  {:10.5} {:10.5} {:10.5} {:10.5}", column[0], column[1], column[2], column[3]);
    }
}
