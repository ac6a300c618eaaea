// Mappers module - cartridge address translation
//
// Mappers sit between the two system buses and the cartridge ROM. Each one
// answers five questions: the four read/write translations for the CPU and
// PPU sides, and which nametable mirroring the board wires up. The set of
// boards is closed at this seam, so dispatch is a plain enum rather than a
// trait object; adding a mapper means adding a variant and a module.

mod mapper0;

use crate::cartridge::{INesError, INesHeader};

pub use mapper0::Nrom;

/// Nametable mirroring arrangements a mapper can report
///
/// `CartridgeDefault` means the board has no mirroring control of its own
/// and the cartridge should fall back to the iNES header's hard-wired bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    /// $2000/$2400 share nametable A, $2800/$2C00 share nametable B
    Horizontal,
    /// $2000/$2800 share nametable A, $2400/$2C00 share nametable B
    Vertical,
    /// Defer to the cartridge header
    CartridgeDefault,
}

/// The mapper dispatcher
///
/// One variant per supported board. Methods translate bus addresses into
/// ROM offsets and index the buffers the cartridge owns; a `None`/`false`
/// answer means the address is not the mapper's to handle and the bus
/// supplies its open-bus behavior instead.
#[derive(Debug)]
pub enum Mapper {
    /// Mapper 0: NROM
    Nrom(Nrom),
}

impl Mapper {
    /// Select a mapper implementation by iNES mapper ID
    ///
    /// # Errors
    /// [`INesError::UnsupportedMapper`] for any ID this core does not
    /// implement (everything except 0).
    pub fn from_id(id: u8, header: &INesHeader) -> Result<Mapper, INesError> {
        match id {
            0 => Ok(Mapper::Nrom(Nrom::new(header.prg_banks))),
            unsupported => Err(INesError::UnsupportedMapper(unsupported)),
        }
    }

    /// Translate and service a CPU read
    #[inline]
    pub fn cpu_read(&self, prg_rom: &[u8], address: u16) -> Option<u8> {
        match self {
            Mapper::Nrom(nrom) => nrom
                .cpu_map(address)
                .and_then(|offset| prg_rom.get(offset).copied()),
        }
    }

    /// Service a CPU write; returns whether the address was claimed
    #[inline]
    pub fn cpu_write(&mut self, address: u16, _byte: u8) -> bool {
        match self {
            Mapper::Nrom(nrom) => nrom.cpu_map(address).is_some(),
        }
    }

    /// Translate and service a PPU read
    #[inline]
    pub fn ppu_read(&self, chr_rom: &[u8], address: u16) -> Option<u8> {
        match self {
            Mapper::Nrom(nrom) => nrom
                .ppu_map(address)
                .and_then(|offset| chr_rom.get(offset).copied()),
        }
    }

    /// Service a PPU write; returns whether the address was claimed
    #[inline]
    pub fn ppu_write(&mut self, address: u16, _byte: u8) -> bool {
        match self {
            Mapper::Nrom(nrom) => nrom.ppu_map(address).is_some(),
        }
    }

    /// The mirroring this board selects
    pub fn mirroring(&self) -> Mirroring {
        match self {
            Mapper::Nrom(nrom) => nrom.mirroring(),
        }
    }
}
