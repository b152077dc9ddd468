//! rustendo command-line front-end: load an iNES image and run it headless
//! for a number of frames or seconds, optionally in a window.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, error, info};

use rustendo::Console;

/// Cycle-stepped NES emulator
#[derive(Parser, Debug)]
#[command(name = "rustendo", version, about, long_about = None)]
struct Args {
    /// Path to the iNES ROM file
    rom: PathBuf,

    /// Number of frames to run headless
    #[arg(short, long, default_value_t = 60, conflicts_with = "seconds")]
    frames: u64,

    /// Emulated seconds to run headless (instead of --frames)
    #[arg(short, long)]
    seconds: Option<f64>,

    /// Save the last frame as an image when done
    #[arg(long)]
    screenshot: Option<PathBuf>,

    /// Open a window instead of running headless
    #[arg(short, long)]
    display: bool,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> rustendo::Result<()> {
    let mut console = Console::from_ines_file(&args.rom)?;

    if args.display {
        return open_window(console);
    }

    match args.seconds {
        Some(seconds) => {
            info!("running {seconds}s of emulated time");
            console.step_seconds(seconds);
        }
        None => {
            info!("running {} frames", args.frames);
            for _ in 0..args.frames {
                console.step_frame();
            }
        }
    }

    let cpu = console.cpu();
    info!(
        "done: frame {} cycles {} pc ${:04X} a ${:02X} x ${:02X} y ${:02X} p ${:02X} sp ${:02X}",
        console.ppu().frame(),
        cpu.cycles,
        cpu.pc,
        cpu.a,
        cpu.x,
        cpu.y,
        cpu.flags(),
        cpu.sp
    );

    if let Some(path) = &args.screenshot {
        save_screenshot(&console, path)?;
    }
    Ok(())
}

#[cfg(feature = "display")]
fn open_window(console: Console) -> rustendo::Result<()> {
    rustendo::display::run(console)
}

#[cfg(not(feature = "display"))]
fn open_window(_console: Console) -> rustendo::Result<()> {
    error!("built without the `display` feature; rebuild with --features display");
    Ok(())
}

#[cfg(feature = "screenshot")]
fn save_screenshot(console: &Console, path: &std::path::Path) -> rustendo::Result<()> {
    rustendo::screenshot::save_png(console.buffer(), path)
}

#[cfg(not(feature = "screenshot"))]
fn save_screenshot(_console: &Console, path: &std::path::Path) -> rustendo::Result<()> {
    error!(
        "built without the `screenshot` feature; not writing {}",
        path.display()
    );
    Ok(())
}
