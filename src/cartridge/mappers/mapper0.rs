// Mapper 0 (NROM) - direct ROM mapping with no bank switching
//
// Memory layout:
// - CPU $8000-$BFFF: first 16KB of PRG ROM
// - CPU $C000-$FFFF: last 16KB of PRG ROM (mirror of the first for NROM-128)
// - PPU $0000-$1FFF: 8KB CHR ROM
//
// NROM has no registers; CPU and PPU writes into its ranges are claimed
// and dropped. Mirroring is hard-wired on the board, so the mapper defers
// to the cartridge header.

use super::Mirroring;

/// Mapper 0 implementation (NROM)
///
/// Used by the earliest cartridges (Super Mario Bros., Donkey Kong,
/// Balloon Fight). The only variation between boards is whether one or
/// two 16KB PRG banks are populated.
#[derive(Debug)]
pub struct Nrom {
    prg_banks: u8,
}

impl Nrom {
    /// Create an NROM mapper for the given PRG bank count
    pub fn new(prg_banks: u8) -> Self {
        Nrom { prg_banks }
    }

    /// Map a CPU address to a PRG ROM offset
    ///
    /// NROM-128 (one bank) mirrors $8000-$BFFF into $C000-$FFFF by
    /// masking with $3FFF; NROM-256 uses the full $7FFF window.
    #[inline]
    pub fn cpu_map(&self, address: u16) -> Option<usize> {
        match address {
            0x8000..=0xFFFF => {
                let mask = if self.prg_banks == 2 { 0x7FFF } else { 0x3FFF };
                Some((address & mask) as usize)
            }
            _ => None,
        }
    }

    /// Map a PPU address to a CHR ROM offset
    #[inline]
    pub fn ppu_map(&self, address: u16) -> Option<usize> {
        match address {
            0x0000..=0x1FFF => Some(address as usize),
            _ => None,
        }
    }

    /// NROM boards have no mirroring control
    pub fn mirroring(&self) -> Mirroring {
        Mirroring::CartridgeDefault
    }
}
