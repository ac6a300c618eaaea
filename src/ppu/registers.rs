// PPU register file - the eight CPU-visible ports at $2000-$2007

use super::constants::*;
use super::Ppu;
use crate::cartridge::Cartridge;

impl Ppu {
    /// Read from a PPU register (0-7, pre-masked by the bus)
    ///
    /// Write-only registers are open bus; this PPU returns its PPUDATA
    /// read buffer as the open-bus value, like the later 2C02 revisions.
    pub(crate) fn read_register(&mut self, register: u16, cart: &Cartridge) -> u8 {
        match register {
            // $2002: PPUSTATUS
            // The low five bits are open bus. Reading has two side
            // effects: the vblank flag clears and the $2005/$2006 write
            // toggle resets.
            2 => {
                let value = (self.status & 0xE0) | (self.read_buffer & 0x1F);
                self.status &= !STATUS_VBLANK;
                self.write_toggle = false;
                value
            }

            // $2004: OAMDATA - reads do not advance OAMADDR
            4 => self.oam[self.oam_addr as usize],

            // $2007: PPUDATA
            // Non-palette reads are delayed one access through the read
            // buffer. Palette reads return directly, but the buffer
            // still picks up the nametable byte underneath the palette.
            7 => {
                let addr = self.v.addr();
                let value = if addr >= 0x3F00 {
                    self.read_buffer = self.bus_read(cart, addr - 0x1000);
                    self.bus_read(cart, addr)
                } else {
                    let buffered = self.read_buffer;
                    self.read_buffer = self.bus_read(cart, addr);
                    buffered
                };
                self.increment_vram_addr();
                value
            }

            // $2000/$2001/$2003/$2005/$2006: write-only
            _ => self.read_buffer,
        }
    }

    /// Write to a PPU register (0-7, pre-masked by the bus)
    pub(crate) fn write_register(&mut self, register: u16, byte: u8, cart: &mut Cartridge) {
        match register {
            // $2000: PPUCTRL
            // Bits 0-1 also land in t's nametable select. The NMI output
            // follows vblank AND bit 7, so enabling it mid-vblank raises
            // the line immediately (the console samples it every tick).
            0 => {
                self.ctrl = byte;
                self.t.set_nametable((byte & 0x03) as u16);
            }

            // $2001: PPUMASK
            1 => {
                self.mask = byte;
            }

            // $2002: PPUSTATUS is read-only
            2 => {}

            // $2003: OAMADDR
            3 => {
                self.oam_addr = byte;
            }

            // $2004: OAMDATA - writes advance OAMADDR
            4 => {
                self.oam[self.oam_addr as usize] = byte;
                self.oam_addr = self.oam_addr.wrapping_add(1);
            }

            // $2005: PPUSCROLL - two writes sharing the toggle with $2006
            5 => {
                if !self.write_toggle {
                    // First write: coarse X into t, fine X into its own register
                    self.t.set_coarse_x((byte >> 3) as u16);
                    self.fine_x = byte & 0x07;
                    self.write_toggle = true;
                } else {
                    // Second write: coarse and fine Y into t
                    self.t.set_coarse_y((byte >> 3) as u16);
                    self.t.set_fine_y((byte & 0x07) as u16);
                    self.write_toggle = false;
                }
            }

            // $2006: PPUADDR - high byte first; the second write copies t into v
            6 => {
                if !self.write_toggle {
                    // Bit 14 of t clears here: only 6 bits of the high byte land
                    self.t.0 = (self.t.0 & 0x00FF) | (((byte & 0x3F) as u16) << 8);
                    self.write_toggle = true;
                } else {
                    self.t.0 = (self.t.0 & 0xFF00) | byte as u16;
                    self.v = self.t;
                    self.write_toggle = false;
                }
            }

            // $2007: PPUDATA
            7 => {
                self.bus_write(cart, self.v.addr(), byte);
                self.increment_vram_addr();
            }

            _ => unreachable!("register index masked to 0-7"),
        }
    }

    /// Post-access VRAM address increment: +1 across, +32 down
    fn increment_vram_addr(&mut self) {
        let step = if self.ctrl & CTRL_VRAM_INCREMENT != 0 {
            32
        } else {
            1
        };
        self.v.0 = self.v.0.wrapping_add(step) & 0x7FFF;
    }
}
