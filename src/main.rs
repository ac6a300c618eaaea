// nescore - headless CLI entry point
//
// Loads an iNES ROM, attaches it to the console, and ticks the master
// clock. With --frames the run stops after that many completed frames;
// without it the core runs until the process is killed. Display and
// input belong to embedding hosts, not this binary.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::info;

use nescore::{Cartridge, Console};

#[derive(Parser)]
#[command(name = "nescore", about = "A cycle-accurate NES emulator core")]
struct Args {
    /// Path to an iNES (.nes) ROM image
    rom: PathBuf,

    /// Stop after this many completed frames
    #[arg(long)]
    frames: Option<u64>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let image = match fs::read(&args.rom) {
        Ok(image) => image,
        Err(err) => {
            eprintln!("{}: {}", args.rom.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let cartridge = match Cartridge::from_ines(&image) {
        Ok(cartridge) => cartridge,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut console = Console::new();
    console.attach_cartridge(cartridge);
    console.reset();

    info!("running {}", args.rom.display());

    let mut completed = 0u64;
    loop {
        console.step_frame();
        completed += 1;
        if args.frames.is_some_and(|limit| completed >= limit) {
            info!("stopped after {} frames", completed);
            return ExitCode::SUCCESS;
        }
    }
}
