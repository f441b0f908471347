#![deny(unsafe_code)]
//! CLI binary for landing-fx.
//!
//! Subcommands:
//! - `render`: run the particle field N frames, write PNG
//! - `trace`: run the whole scene against a scripted pointer sweep and print
//!   the style changes it emits
//! - `schema`: print the particle parameter schema

mod args;
mod error;
mod trace;

use args::ResizeAt;
use clap::{Parser, Subcommand};
use error::CliError;
use landing_fx_core::color::Srgb;
use landing_fx_core::frame::{FixedFrames, FrameLoop};
use landing_fx_core::surface::PixelSurface;
use landing_fx_effects::EffectsConfig;
use landing_fx_particles::{ParticleField, ParticleParams};
use landing_fx_scene::Scene;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "landing-fx", about = "Landing page particle field and effects CLI")]
#[command(version)]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the particle field for N frames and write a PNG snapshot.
    Render {
        /// Canvas width in pixels.
        #[arg(short = 'W', long, default_value_t = 800)]
        width: usize,

        /// Canvas height in pixels.
        #[arg(short = 'H', long, default_value_t = 600)]
        height: usize,

        /// Number of frames to run.
        #[arg(short, long, default_value_t = 300)]
        frames: u64,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Resize the canvas after the given frame, as WxH@frame.
        #[arg(long)]
        resize: Option<ResizeAt>,

        /// Flatten onto this page color (#rrggbb) instead of keeping alpha.
        #[arg(long)]
        background: Option<String>,

        /// Output file path.
        #[arg(short, long, default_value = "particles.png")]
        output: PathBuf,

        /// Particle parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// Run every effect against a scripted pointer sweep and print the
    /// style changes.
    Trace {
        /// Viewport width in pixels.
        #[arg(short = 'W', long, default_value_t = 1280)]
        width: usize,

        /// Viewport height in pixels.
        #[arg(short = 'H', long, default_value_t = 800)]
        height: usize,

        /// Number of frames to run.
        #[arg(short, long, default_value_t = 120)]
        frames: u64,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Particle parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Effect constants as a JSON string.
        #[arg(long, default_value = "{}")]
        config: String,
    },
    /// Print the particle parameter schema.
    Schema,
}

fn parse_json(raw: &str, flag: &str) -> Result<serde_json::Value, CliError> {
    serde_json::from_str(raw).map_err(|e| CliError::Input(format!("invalid {flag} JSON: {e}")))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Schema => {
            println!("{}", serde_json::to_string_pretty(&ParticleParams::schema())?);
        }
        Command::Render {
            width,
            height,
            frames,
            seed,
            resize,
            background,
            output,
            params,
        } => {
            let params = parse_json(&params, "--params")?;
            let background = background.as_deref().map(Srgb::from_hex).transpose()?;

            let surface = PixelSurface::new(width, height)?;
            let mut field = ParticleField::from_json(surface, seed, &params)?;
            let mut frame_loop = FrameLoop::new();

            match resize {
                Some(r) if r.frame < frames => {
                    frame_loop.run(&mut FixedFrames::new(r.frame), &mut field)?;
                    log::info!("resizing to {}x{} after frame {}", r.width, r.height, r.frame);
                    field.resize(r.width, r.height)?;
                    frame_loop.run(&mut FixedFrames::new(frames - r.frame), &mut field)?;
                }
                Some(r) => {
                    log::warn!(
                        "resize at frame {} is past the last frame {frames}, ignored",
                        r.frame
                    );
                    frame_loop.run(&mut FixedFrames::new(frames), &mut field)?;
                }
                None => {
                    frame_loop.run(&mut FixedFrames::new(frames), &mut field)?;
                }
            }

            landing_fx_scene::snapshot::write_png(field.surface(), background, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "width": field.width(),
                    "height": field.height(),
                    "frames": frame_loop.frames_run(),
                    "seed": seed,
                    "particles": field.particles().len(),
                    "params": field.params().to_json(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} particles ({}x{}, {} frames, seed {seed}) -> {}",
                    field.particles().len(),
                    field.width(),
                    field.height(),
                    frame_loop.frames_run(),
                    output.display()
                );
            }
        }
        Command::Trace {
            width,
            height,
            frames,
            seed,
            params,
            config,
        } => {
            let params = ParticleParams::from_json(&parse_json(&params, "--params")?)?;
            let config = EffectsConfig::from_json(&parse_json(&config, "--config")?)?;
            let layout = trace::demo_layout(width as f64, height as f64);
            let surface = PixelSurface::new(width, height)?;
            let mut scene = Scene::seeded(surface, seed, params, config, layout)?;

            let report = trace::run(&mut scene, frames)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for event in &report.events {
                    println!(
                        "frame {:>4} {:>8.1}ms  {}",
                        event.frame, event.time_ms, event.change
                    );
                }
                match report.scroll {
                    Some(req) => println!(
                        "cta click -> scroll apps into view ({:?}, {:?})",
                        req.behavior, req.block
                    ),
                    None => println!("cta click -> no scroll"),
                }
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
