//! PPU unit tests, organized by area
//!
//! Register semantics, internal bus mirroring, frame timing, the
//! rendering pipelines, and the hardware quirks each get a module.

use super::*;
use crate::cartridge::{Cartridge, CHR_BANK_SIZE, PRG_BANK_SIZE};

mod quirks;
mod registers;
mod rendering;

// ========================================
// Test Helpers
// ========================================

/// Build an NROM cartridge with explicit mirroring and CHR contents
///
/// `chr` pairs of (offset, byte) are patched into an otherwise zeroed
/// 8KB CHR bank.
pub(super) fn cartridge_with_chr(vertical: bool, chr: &[(usize, u8)]) -> Cartridge {
    let mut image = vec![0u8; 16 + PRG_BANK_SIZE + CHR_BANK_SIZE];
    image[0..4].copy_from_slice(b"NES\x1A");
    image[4] = 1;
    image[5] = 1;
    image[6] = if vertical { 0x01 } else { 0x00 };
    for &(offset, byte) in chr {
        image[16 + PRG_BANK_SIZE + offset] = byte;
    }
    Cartridge::from_ines(&image).expect("test image is valid")
}

/// Plain horizontal-mirroring test cartridge with recognizable CHR
///
/// CHR byte n holds n & 0xFF, so pattern fetches are easy to predict.
pub(super) fn test_cartridge() -> Cartridge {
    let chr: Vec<(usize, u8)> = (0..CHR_BANK_SIZE).map(|i| (i, (i & 0xFF) as u8)).collect();
    cartridge_with_chr(false, &chr)
}

/// Cartridge whose tile 1 is solid color 1 (low plane set, high clear)
pub(super) fn solid_tile_cartridge() -> Cartridge {
    let chr: Vec<(usize, u8)> = (16..24).map(|i| (i, 0xFF)).collect();
    cartridge_with_chr(false, &chr)
}

/// Point `v` at an address through the PPUADDR write pair
pub(super) fn set_vram_addr(ppu: &mut Ppu, cart: &mut Cartridge, addr: u16) {
    ppu.write_register(6, (addr >> 8) as u8, cart);
    ppu.write_register(6, (addr & 0xFF) as u8, cart);
}

/// Clock the PPU through one whole frame
pub(super) fn run_frame(ppu: &mut Ppu, cart: &Cartridge) {
    while !ppu.frame_complete() {
        ppu.clock(cart);
    }
    ppu.clear_frame_complete();
}

/// Clock the PPU until it reaches the given scanline and dot
pub(super) fn run_to(ppu: &mut Ppu, cart: &Cartridge, scanline: i16, cycle: u16) {
    let mut safety = 0u32;
    while !(ppu.scanline == scanline && ppu.cycle == cycle) {
        ppu.clock(cart);
        safety += 1;
        assert!(safety < 200_000, "position never reached");
    }
}
