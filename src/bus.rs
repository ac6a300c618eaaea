// Bus module - the CPU-visible system bus
//
// # NES Memory Map (CPU address space)
//
// ```text
// $0000-$07FF: 2KB internal RAM
// $0800-$1FFF: RAM mirrors (every $0800)
// $2000-$3FFF: PPU registers, mirrored every 8 bytes
// $4014:       OAM DMA trigger
// $4016-$4017: Controller serial ports
// $4000-$401F: remaining APU/I-O registers - open bus for this core
// $4020-$FFFF: cartridge space via the mapper
// ```
//
// The console owns every component; a `CpuBus` is a short-lived view
// over split borrows of those parts, built once per CPU tick. That
// keeps the address decoding in one place without back-pointers
// between the chips.

use crate::cartridge::Cartridge;
use crate::console::OamDma;
use crate::input::ControllerPorts;
use crate::ppu::Ppu;

/// Size of the console's internal RAM
pub const CPU_RAM_SIZE: usize = 2048;

/// Per-tick view of everything the CPU can address
pub struct CpuBus<'a> {
    ram: &'a mut [u8; CPU_RAM_SIZE],
    ppu: &'a mut Ppu,
    cart: &'a mut Cartridge,
    ports: &'a mut ControllerPorts,
    dma: &'a mut OamDma,
    /// CPU tick count at bus construction; $4014 captures its parity
    cpu_cycle: u64,
}

impl<'a> CpuBus<'a> {
    /// Assemble a bus view from the console's parts
    pub(crate) fn new(
        ram: &'a mut [u8; CPU_RAM_SIZE],
        ppu: &'a mut Ppu,
        cart: &'a mut Cartridge,
        ports: &'a mut ControllerPorts,
        dma: &'a mut OamDma,
        cpu_cycle: u64,
    ) -> Self {
        CpuBus {
            ram,
            ppu,
            cart,
            ports,
            dma,
            cpu_cycle,
        }
    }

    /// Read a byte from the bus
    ///
    /// Undecoded addresses read as open bus, modeled as 0.
    pub fn read(&mut self, addr: u16) -> u8 {
        match addr {
            // Internal RAM, mirrored through $1FFF
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize],

            // PPU registers, mirrored every 8 bytes
            0x2000..=0x3FFF => self.ppu.read_register(addr & 0x0007, self.cart),

            // Controller serial ports
            0x4016 => self.ports.read(0),
            0x4017 => self.ports.read(1),

            // $4014 is write-only; the rest of $4000-$401F is the APU
            // and test space this core does not decode
            0x4000..=0x401F => 0,

            // Cartridge space
            _ => self.cart.cpu_read(addr).unwrap_or(0),
        }
    }

    /// Write a byte to the bus
    ///
    /// Writes to undecoded or read-only ranges are silently dropped,
    /// as on hardware.
    pub fn write(&mut self, addr: u16, byte: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize] = byte,

            0x2000..=0x3FFF => self.ppu.write_register(addr & 0x0007, byte, self.cart),

            // OAM DMA trigger: the page latches now, the engine takes
            // over the CPU's ticks starting with the next one
            0x4014 => self.dma.request(byte, self.cpu_cycle & 1 == 1),

            // Controller strobe
            0x4016 => self.ports.write_strobe(byte),

            // APU and test registers: not decoded
            0x4000..=0x401F => {}

            _ => {
                self.cart.cpu_write(addr, byte);
            }
        }
    }

    /// Read a little-endian 16-bit word
    pub fn read_u16(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }
}
