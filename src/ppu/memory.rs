// PPU internal bus - pattern tables, nametables, palette RAM
//
// The PPU address bus is 14 bits wide; every access masks with $3FFF.
// Pattern table addresses go to the cartridge, nametable addresses hit
// the 2KB internal VRAM through the cartridge's mirroring scheme, and
// the top of the space is the 32-byte palette RAM.

use super::constants::NAMETABLE_SIZE;
use super::Ppu;
use crate::cartridge::{Cartridge, Mirroring};

impl Ppu {
    /// Map a nametable address ($2000-$2FFF equivalent) into the 2KB VRAM
    ///
    /// Horizontal: tables 0/1 share physical table A, 2/3 share B.
    /// Vertical: tables 0/2 share A, 1/3 share B.
    pub(super) fn mirror_nametable_addr(&self, cart: &Cartridge, addr: u16) -> usize {
        let addr = (addr & 0x0FFF) as usize;
        let table = addr / NAMETABLE_SIZE;
        let offset = addr % NAMETABLE_SIZE;

        let physical = match cart.mirroring() {
            Mirroring::Horizontal => table / 2,
            Mirroring::Vertical => table % 2,
            Mirroring::CartridgeDefault => unreachable!("resolved by the cartridge"),
        };

        physical * NAMETABLE_SIZE + offset
    }

    /// Map a palette address into the 32-byte palette RAM
    ///
    /// $3F10/$3F14/$3F18/$3F1C mirror $3F00/$3F04/$3F08/$3F0C: entry 0
    /// of each sprite palette is the shared backdrop entry.
    pub(super) fn mirror_palette_addr(&self, addr: u16) -> usize {
        let addr = addr & 0x001F;
        if addr & 0x0013 == 0x0010 {
            (addr & 0x000F) as usize
        } else {
            addr as usize
        }
    }

    /// Read one byte from the PPU bus
    pub(super) fn bus_read(&self, cart: &Cartridge, addr: u16) -> u8 {
        let addr = addr & 0x3FFF;

        match addr {
            // Pattern tables: cartridge CHR space
            0x0000..=0x1FFF => cart.ppu_read(addr).unwrap_or(0),

            // Nametables and their $3000-$3EFF mirror
            0x2000..=0x3EFF => self.vram[self.mirror_nametable_addr(cart, addr)],

            // Palette RAM
            0x3F00..=0x3FFF => self.palette_ram[self.mirror_palette_addr(addr)],

            _ => unreachable!("address masked to 14 bits"),
        }
    }

    /// Write one byte to the PPU bus
    pub(super) fn bus_write(&mut self, cart: &mut Cartridge, addr: u16, byte: u8) {
        let addr = addr & 0x3FFF;

        match addr {
            // Pattern tables: NROM drops these, CHR-RAM boards would take them
            0x0000..=0x1FFF => {
                cart.ppu_write(addr, byte);
            }

            0x2000..=0x3EFF => {
                let mirrored = self.mirror_nametable_addr(cart, addr);
                self.vram[mirrored] = byte;
            }

            0x3F00..=0x3FFF => {
                let mirrored = self.mirror_palette_addr(addr);
                self.palette_ram[mirrored] = byte;
            }

            _ => unreachable!("address masked to 14 bits"),
        }
    }
}
