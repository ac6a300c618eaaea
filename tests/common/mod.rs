//! Shared helpers for integration tests: iNES image assembly

use nescore::{Cartridge, Console};

/// One PRG bank (16KB) and one CHR bank (8KB)
pub const PRG_BANK: usize = 16 * 1024;
pub const CHR_BANK: usize = 8 * 1024;

/// Assemble a minimal NROM-128 image
///
/// `program` lands at $8000; the reset vector points there. Patch the
/// returned bytes for anything fancier before parsing.
pub fn build_ines(program: &[u8]) -> Vec<u8> {
    let mut image = vec![0u8; 16 + PRG_BANK + CHR_BANK];
    image[0..4].copy_from_slice(b"NES\x1A");
    image[4] = 1; // 16KB PRG
    image[5] = 1; // 8KB CHR
    image[16..16 + program.len()].copy_from_slice(program);

    // Reset vector -> $8000
    image[16 + 0x3FFC] = 0x00;
    image[16 + 0x3FFD] = 0x80;
    image
}

/// A reset console running `program` from $8000
pub fn console_with(program: &[u8]) -> Console {
    let cartridge = Cartridge::from_ines(&build_ines(program)).expect("test image is valid");
    let mut console = Console::new();
    console.attach_cartridge(cartridge);
    console.reset();
    console
}

/// Tick until the CPU sits at an instruction boundary
pub fn run_to_boundary(console: &mut Console) {
    while !console.cpu().instruction_boundary() {
        console.tick();
    }
}

/// Execute through the end of the next instruction, returning its cycle count
pub fn measure_instruction(console: &mut Console) -> u64 {
    run_to_boundary(console);
    let start = console.cpu().cycles();
    loop {
        console.tick();
        if console.cpu().instruction_boundary() && console.cpu().cycles() > start {
            return console.cpu().cycles() - start;
        }
    }
}
