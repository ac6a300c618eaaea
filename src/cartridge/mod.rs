// Cartridge module - iNES ROM parsing and mapper-backed bus access
//
// A cartridge owns the PRG and CHR ROM banks read out of an iNES image and
// answers bus requests from both the CPU ($4020-$FFFF in practice) and the
// PPU (pattern tables at $0000-$1FFF). The address translation itself is
// delegated to the mapper; the cartridge performs the actual ROM indexing
// and resolves the effective nametable mirroring.
//
// # iNES header (16 bytes, little-endian)
//
// ```text
// 0-3   magic "NES\x1A"
// 4     PRG ROM size in 16KB units
// 5     CHR ROM size in 8KB units
// 6     flags6: mirroring, PRG-RAM, trainer, alt layout, mapper low nibble
// 7     flags7: mapper high nibble
// 8-15  extensions (not honored by this core)
// ```

pub mod mappers;

use log::{debug, info};

pub use mappers::{Mapper, Mirroring};

/// Size of one PRG ROM bank in bytes (16KB)
pub const PRG_BANK_SIZE: usize = 16 * 1024;

/// Size of one CHR ROM bank in bytes (8KB)
pub const CHR_BANK_SIZE: usize = 8 * 1024;

/// Size of the iNES header in bytes
const HEADER_SIZE: usize = 16;

/// Size of an optional trainer blob between header and PRG ROM
const TRAINER_SIZE: usize = 512;

/// The iNES magic bytes: "NES" followed by an MS-DOS end-of-file
const INES_MAGIC: [u8; 4] = [0x4E, 0x45, 0x53, 0x1A];

/// Errors produced while parsing an iNES image
///
/// Every variant renders as the single-line message the CLI prints to
/// stderr before exiting with status 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum INesError {
    /// The input is shorter than the 16-byte header
    HeaderTooSmall,
    /// The first four bytes are not "NES\x1A"
    BadMagic,
    /// The input is shorter than the header-declared geometry requires
    SizeMismatch { expected: usize, actual: usize },
    /// The header names a mapper this core does not implement
    UnsupportedMapper(u8),
}

impl std::fmt::Display for INesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            INesError::HeaderTooSmall => write!(f, "iNES header size too small"),
            INesError::BadMagic => write!(f, "incorrect magic"),
            INesError::SizeMismatch { expected, actual } => {
                write!(f, "expected size ${:X}, got ${:X}", expected, actual)
            }
            INesError::UnsupportedMapper(id) => {
                write!(f, "mapper ID {} is currently not supported", id)
            }
        }
    }
}

impl std::error::Error for INesError {}

/// Parsed iNES header fields
///
/// Only the fields this core honors are retained; bytes 8-15 of the
/// header are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct INesHeader {
    /// PRG ROM size in 16KB banks
    pub prg_banks: u8,
    /// CHR ROM size in 8KB banks
    pub chr_banks: u8,
    /// Mapper ID assembled from the flags6/flags7 nibbles
    pub mapper_id: u8,
    /// Hard-wired mirroring bit (false: horizontal, true: vertical)
    pub vertical_mirroring: bool,
    /// PRG-RAM present bit (stored, not emulated)
    pub has_prg_ram: bool,
    /// 512-byte trainer present bit
    pub has_trainer: bool,
    /// Alternative nametable layout bit (stored, not emulated)
    pub alternative_layout: bool,
}

impl INesHeader {
    /// Parse the 16-byte header from the start of an iNES image
    pub fn parse(data: &[u8]) -> Result<INesHeader, INesError> {
        if data.len() < HEADER_SIZE {
            return Err(INesError::HeaderTooSmall);
        }
        if data[0..4] != INES_MAGIC {
            return Err(INesError::BadMagic);
        }

        let flags6 = data[6];
        let flags7 = data[7];

        Ok(INesHeader {
            prg_banks: data[4],
            chr_banks: data[5],
            mapper_id: (flags6 >> 4) | (flags7 & 0xF0),
            vertical_mirroring: flags6 & 0x01 != 0,
            has_prg_ram: flags6 & 0x02 != 0,
            has_trainer: flags6 & 0x04 != 0,
            alternative_layout: flags6 & 0x08 != 0,
        })
    }

    /// Total image size in bytes this header declares
    fn expected_size(&self) -> usize {
        HEADER_SIZE
            + if self.has_trainer { TRAINER_SIZE } else { 0 }
            + self.prg_banks as usize * PRG_BANK_SIZE
            + self.chr_banks as usize * CHR_BANK_SIZE
    }
}

/// A loaded cartridge: header, ROM banks, and the selected mapper
#[derive(Debug)]
pub struct Cartridge {
    header: INesHeader,
    prg_rom: Vec<u8>,
    chr_rom: Vec<u8>,
    mapper: Mapper,
}

impl Cartridge {
    /// Parse a full iNES image into a cartridge
    ///
    /// Validates the header, checks the declared geometry against the
    /// actual input length, skips a trainer when present, copies the ROM
    /// banks, and selects the mapper implementation by ID.
    ///
    /// # Errors
    /// Any [`INesError`] variant; partial state is discarded on failure.
    pub fn from_ines(data: &[u8]) -> Result<Cartridge, INesError> {
        let header = INesHeader::parse(data)?;

        let expected = header.expected_size();
        if data.len() < expected {
            return Err(INesError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        let mapper = Mapper::from_id(header.mapper_id, &header)?;

        let mut offset = HEADER_SIZE;
        if header.has_trainer {
            offset += TRAINER_SIZE;
        }

        let prg_len = header.prg_banks as usize * PRG_BANK_SIZE;
        let prg_rom = data[offset..offset + prg_len].to_vec();
        offset += prg_len;

        let chr_len = header.chr_banks as usize * CHR_BANK_SIZE;
        let chr_rom = data[offset..offset + chr_len].to_vec();

        info!(
            "loaded cartridge: mapper {}, {}x16KB PRG, {}x8KB CHR, {:?} mirroring",
            header.mapper_id,
            header.prg_banks,
            header.chr_banks,
            if header.vertical_mirroring {
                Mirroring::Vertical
            } else {
                Mirroring::Horizontal
            },
        );
        if header.has_trainer {
            debug!("skipped {} byte trainer", TRAINER_SIZE);
        }

        Ok(Cartridge {
            header,
            prg_rom,
            chr_rom,
            mapper,
        })
    }

    /// The parsed header
    pub fn header(&self) -> &INesHeader {
        &self.header
    }

    /// Service a CPU bus read
    ///
    /// Returns `Some(byte)` when the mapper claims the address, `None`
    /// when the request should fall through to the rest of the bus.
    #[inline]
    pub fn cpu_read(&self, address: u16) -> Option<u8> {
        self.mapper.cpu_read(&self.prg_rom, address)
    }

    /// Service a CPU bus write
    ///
    /// Returns `true` when the mapper claimed the address (even if the
    /// write was dropped, as NROM does for its ROM range).
    #[inline]
    pub fn cpu_write(&mut self, address: u16, byte: u8) -> bool {
        self.mapper.cpu_write(address, byte)
    }

    /// Service a PPU bus read (pattern table space)
    #[inline]
    pub fn ppu_read(&self, address: u16) -> Option<u8> {
        self.mapper.ppu_read(&self.chr_rom, address)
    }

    /// Service a PPU bus write (pattern table space)
    #[inline]
    pub fn ppu_write(&mut self, address: u16, byte: u8) -> bool {
        self.mapper.ppu_write(address, byte)
    }

    /// Effective nametable mirroring
    ///
    /// Asks the mapper first; a mapper answering
    /// [`Mirroring::CartridgeDefault`] defers to the header's hard-wired
    /// bit, so callers never observe `CartridgeDefault`.
    pub fn mirroring(&self) -> Mirroring {
        match self.mapper.mirroring() {
            Mirroring::CartridgeDefault => {
                if self.header.vertical_mirroring {
                    Mirroring::Vertical
                } else {
                    Mirroring::Horizontal
                }
            }
            fixed => fixed,
        }
    }
}
