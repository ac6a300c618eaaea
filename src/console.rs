// Console module - master clock, OAM DMA engine, host API
//
// The console owns every chip as a plain value: CPU, PPU, cartridge,
// RAM, controller ports, and the DMA engine. One `tick` is one master
// clock edge (21.477 MHz on NTSC hardware): every 4th edge clocks the
// PPU and every 12th clocks the CPU, giving the canonical three PPU
// dots per CPU cycle. The PPU always runs first on a shared edge, so
// a CPU read in the same tick sees the freshly updated PPU state.

use log::info;

use crate::bus::{CpuBus, CPU_RAM_SIZE};
use crate::cartridge::Cartridge;
use crate::cpu::Cpu;
use crate::display::FrameBuffer;
use crate::input::{Buttons, ControllerPorts};
use crate::ppu::Ppu;

/// Master-clock edges per PPU dot
const PPU_CLOCK_DIVIDER: u64 = 4;

/// Master-clock edges per CPU cycle
const CPU_CLOCK_DIVIDER: u64 = 12;

/// The OAM DMA engine behind $4014
///
/// A write to $4014 halts the CPU and copies one 256-byte page into
/// OAM: one idle cycle to get off the bus (two when the write landed on
/// an odd CPU cycle), then 256 read/write pairs, 513 or 514 CPU cycles
/// in total. While active, the engine is serviced in place of the CPU
/// on every CPU-rate tick.
pub(crate) struct OamDma {
    active: bool,
    page: u8,
    offset: u16,
    latch: u8,
    wait: u8,
    read_phase: bool,
}

impl OamDma {
    pub(crate) fn new() -> Self {
        OamDma {
            active: false,
            page: 0,
            offset: 0,
            latch: 0,
            wait: 0,
            read_phase: true,
        }
    }

    /// Arm the engine from a $4014 write
    pub(crate) fn request(&mut self, page: u8, odd_cycle: bool) {
        self.active = true;
        self.page = page;
        self.offset = 0;
        self.read_phase = true;
        self.wait = if odd_cycle { 2 } else { 1 };
    }

    /// Is a transfer in flight?
    pub(crate) fn active(&self) -> bool {
        self.active
    }
}

/// The NES console: all chips, wired
pub struct Console {
    pub(crate) cpu: Cpu,
    pub(crate) ppu: Ppu,
    pub(crate) cartridge: Option<Cartridge>,
    pub(crate) ram: [u8; CPU_RAM_SIZE],
    pub(crate) ports: ControllerPorts,
    pub(crate) dma: OamDma,
    master_clock: u64,
}

impl Console {
    /// Create a console with CPU and PPU in their power-on state and no
    /// cartridge attached
    pub fn new() -> Self {
        Console {
            cpu: Cpu::new(),
            ppu: Ppu::new(),
            cartridge: None,
            ram: [0; CPU_RAM_SIZE],
            ports: ControllerPorts::new(),
            dma: OamDma::new(),
            master_clock: 0,
        }
    }

    /// Insert a cartridge
    ///
    /// The console does not reset automatically; call [`Console::reset`]
    /// once the cartridge is in.
    pub fn attach_cartridge(&mut self, cartridge: Cartridge) {
        self.cartridge = Some(cartridge);
    }

    /// Run the CPU and PPU reset sequences
    ///
    /// The PPU returns to the pre-render scanline on an even frame; the
    /// CPU drops SP by 3, sets I, and reloads PC from the reset vector
    /// (when a cartridge is present to supply it).
    pub fn reset(&mut self) {
        self.ppu.reset();
        self.dma = OamDma::new();
        self.master_clock = 0;

        if let Some(cart) = self.cartridge.as_mut() {
            let mut bus = CpuBus::new(
                &mut self.ram,
                &mut self.ppu,
                cart,
                &mut self.ports,
                &mut self.dma,
                self.cpu.cycles(),
            );
            self.cpu.reset(&mut bus);
            info!("console reset, PC = {:04X}", self.cpu.pc);
        }
    }

    /// Advance the console by one master-clock edge
    ///
    /// A no-op until a cartridge is attached. After the PPU's dot the
    /// CPU NMI line is recomputed, and again after the CPU's cycle so
    /// that PPUCTRL writes toggling bit 7 mid-vblank take effect in the
    /// same tick.
    pub fn tick(&mut self) {
        let Some(cart) = self.cartridge.as_mut() else {
            return;
        };

        if self.master_clock % PPU_CLOCK_DIVIDER == 0 {
            self.ppu.clock(cart);
            self.cpu.set_nmi_line(self.ppu.nmi_line());
        }

        if self.master_clock % CPU_CLOCK_DIVIDER == 0 {
            if self.dma.active() {
                Self::dma_clock(
                    &mut self.dma,
                    &mut self.cpu,
                    &mut self.ram,
                    &mut self.ppu,
                    cart,
                );
            } else {
                let mut bus = CpuBus::new(
                    &mut self.ram,
                    &mut self.ppu,
                    cart,
                    &mut self.ports,
                    &mut self.dma,
                    self.cpu.cycles(),
                );
                self.cpu.clock(&mut bus);
            }
            self.cpu.set_nmi_line(self.ppu.nmi_line());
        }

        self.master_clock = (self.master_clock + 1) % CPU_CLOCK_DIVIDER;
    }

    /// Tick until the PPU finishes the current frame
    ///
    /// Convenience wrapper over [`Console::tick`]; acknowledges the
    /// frame flag before returning. Does nothing without a cartridge.
    pub fn step_frame(&mut self) {
        if self.cartridge.is_none() {
            return;
        }
        while !self.ppu.frame_complete() {
            self.tick();
        }
        self.ppu.clear_frame_complete();
    }

    /// One DMA engine cycle, run in place of the CPU's
    ///
    /// The stalled CPU still counts the tick. Reads go through the same
    /// address decoding as CPU reads (pages in PPU-register space
    /// trigger the usual read side effects); writes land directly in
    /// OAM, bypassing OAMADDR.
    fn dma_clock(
        dma: &mut OamDma,
        cpu: &mut Cpu,
        ram: &mut [u8; CPU_RAM_SIZE],
        ppu: &mut Ppu,
        cart: &Cartridge,
    ) {
        cpu.halt_tick();

        if dma.wait > 0 {
            dma.wait -= 1;
            return;
        }

        if dma.read_phase {
            let addr = ((dma.page as u16) << 8) | dma.offset;
            dma.latch = match addr {
                0x0000..=0x1FFF => ram[(addr & 0x07FF) as usize],
                0x2000..=0x3FFF => ppu.read_register(addr & 0x0007, cart),
                0x4020..=0xFFFF => cart.cpu_read(addr).unwrap_or(0),
                _ => 0,
            };
            dma.read_phase = false;
        } else {
            ppu.write_oam(dma.offset as u8, dma.latch);
            dma.offset += 1;
            dma.read_phase = true;
            if dma.offset == 0x0100 {
                dma.active = false;
            }
        }
    }

    /// Update the live button state for a controller port (0 or 1)
    pub fn set_controller(&mut self, port: usize, buttons: Buttons) {
        self.ports.set_buttons(port, buttons);
    }

    /// Borrow the current RGBA frame buffer
    pub fn frame(&self) -> &FrameBuffer {
        self.ppu.frame()
    }

    /// Has the PPU wrapped into the pre-render scanline?
    pub fn frame_complete(&self) -> bool {
        self.ppu.frame_complete()
    }

    /// Acknowledge the completed frame
    pub fn clear_frame_complete(&mut self) {
        self.ppu.clear_frame_complete();
    }

    /// Read access to the CPU (hosts, debuggers, tests)
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Read access to the PPU
    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::tests::build_ines;

    /// Console around an image whose PRG starts with `prg` at $8000
    fn console_with_prg(prg: &[u8]) -> Console {
        let cart = Cartridge::from_ines(&build_ines(prg, false)).expect("valid test image");
        let mut console = Console::new();
        console.attach_cartridge(cart);
        console.reset();
        console
    }

    #[test]
    fn test_tick_without_cartridge_is_noop() {
        let mut console = Console::new();
        console.tick();
        console.step_frame();
        assert_eq!(console.cpu().cycles(), 0);
        assert_eq!(console.ppu().cycle(), 0);
    }

    #[test]
    fn test_reset_vector_fetch() {
        // PRG bytes 0x3FFC/0x3FFD hold the reset vector. Point it at
        // $1234 and check the documented reset effects.
        let mut image = build_ines(&[], false);
        image[16 + 0x3FFC] = 0x34;
        image[16 + 0x3FFD] = 0x12;
        let cart = Cartridge::from_ines(&image).expect("valid test image");

        let mut console = Console::new();
        console.attach_cartridge(cart);
        let sp_before = console.cpu().sp;
        console.reset();

        assert_eq!(console.cpu().pc, 0x1234);
        assert_eq!(console.cpu().sp, sp_before.wrapping_sub(3));
        assert!(console.cpu().get_interrupt_disable());
        assert_eq!(console.ppu().scanline(), -1);
        assert_eq!(console.ppu().cycle(), 0);
    }

    #[test]
    fn test_master_clock_divider() {
        // NOP spin so the CPU has something to execute.
        let mut console = console_with_prg(&[0xEA, 0x4C, 0x00, 0x80]);
        let cpu_cycles = console.cpu().cycles();

        for _ in 0..CPU_CLOCK_DIVIDER {
            console.tick();
        }

        assert_eq!(
            console.cpu().cycles(),
            cpu_cycles + 1,
            "one CPU cycle per 12 master ticks"
        );
        assert_eq!(console.ppu().cycle(), 3, "three PPU dots per CPU cycle");
    }

    #[test]
    fn test_frame_flag_rises_and_clears() {
        let mut console = console_with_prg(&[0x4C, 0x00, 0x80]); // JMP $8000
        let mut safety = 0u64;
        while !console.frame_complete() {
            console.tick();
            safety += 1;
            assert!(safety < 500_000, "frame flag should rise within a frame");
        }
        assert_eq!(console.ppu().scanline(), -1, "flag rises entering pre-render");
        console.clear_frame_complete();
        assert!(!console.frame_complete());
    }

    #[test]
    fn test_oam_dma_timing_and_contents() {
        let mut console = console_with_prg(&[0xEA]);
        console.ram[0x0200..0x0300].fill(0xAB);

        // Arm the engine as a $4014 write on an even cycle would.
        console.dma.request(0x02, false);
        let cycles_before = console.cpu().cycles();

        let mut safety = 0u64;
        while console.dma.active() {
            console.tick();
            safety += 1;
            assert!(safety < 100_000, "DMA must terminate");
        }

        assert_eq!(
            console.cpu().cycles() - cycles_before,
            513,
            "even-cycle DMA stalls the CPU for 513 cycles"
        );
        for i in 0..=255u8 {
            assert_eq!(console.ppu().read_oam(i), 0xAB, "OAM[{}]", i);
        }
    }

    #[test]
    fn test_oam_dma_odd_cycle_pays_extra_idle() {
        let mut console = console_with_prg(&[0xEA]);
        console.ram[0x0240] = 0x77;

        console.dma.request(0x02, true);
        let cycles_before = console.cpu().cycles();
        while console.dma.active() {
            console.tick();
        }

        assert_eq!(console.cpu().cycles() - cycles_before, 514);
        assert_eq!(console.ppu().read_oam(0x40), 0x77);
    }

    #[test]
    fn test_dma_source_can_be_rom() {
        // Page $80 reads straight out of PRG ROM.
        let mut console = console_with_prg(&[0x11, 0x22, 0x33]);
        console.dma.request(0x80, false);
        while console.dma.active() {
            console.tick();
        }
        assert_eq!(console.ppu().read_oam(0), 0x11);
        assert_eq!(console.ppu().read_oam(1), 0x22);
        assert_eq!(console.ppu().read_oam(2), 0x33);
    }

    #[test]
    fn test_nmi_once_per_frame() {
        // $8000: LDA #$80; STA $2000; JMP *   (enable vblank NMI, spin)
        // $9000: INC $00; RTI                 (NMI handler counts entries)
        let mut image = build_ines(&[0xA9, 0x80, 0x8D, 0x00, 0x20, 0x4C, 0x05, 0x80], false);
        image[16 + 0x1000] = 0xE6; // INC $00
        image[16 + 0x1001] = 0x00;
        image[16 + 0x1002] = 0x40; // RTI
        image[16 + 0x3FFA] = 0x00; // NMI vector -> $9000
        image[16 + 0x3FFB] = 0x90;
        let cart = Cartridge::from_ines(&image).expect("valid test image");

        let mut console = Console::new();
        console.attach_cartridge(cart);
        console.reset();

        for frame in 1..=3u8 {
            console.step_frame();
            assert_eq!(
                console.ram[0], frame,
                "exactly one NMI entry per frame"
            );
        }
    }

    #[test]
    fn test_nmi_suppressed_without_enable() {
        // Same spin loop, NMI never enabled: the handler never runs.
        let mut image = build_ines(&[0x4C, 0x00, 0x80], false);
        image[16 + 0x1000] = 0xE6;
        image[16 + 0x1001] = 0x00;
        image[16 + 0x1002] = 0x40;
        image[16 + 0x3FFA] = 0x00;
        image[16 + 0x3FFB] = 0x90;
        let cart = Cartridge::from_ines(&image).expect("valid test image");

        let mut console = Console::new();
        console.attach_cartridge(cart);
        console.reset();

        console.step_frame();
        console.step_frame();
        assert_eq!(console.ram[0], 0, "no NMI without PPUCTRL bit 7");
    }

    #[test]
    fn test_vblank_flag_set_at_241_1() {
        let mut console = console_with_prg(&[0x4C, 0x00, 0x80]);

        // Tick until the PPU has just executed scanline 241, dot 1.
        let mut safety = 0u64;
        while !(console.ppu().scanline() == 241 && console.ppu().cycle() == 2) {
            console.tick();
            safety += 1;
            assert!(safety < 500_000);
        }
        assert!(!console.ppu().nmi_line(), "NMI gated off by default");
        assert_ne!(console.ppu().status & 0x80, 0, "vblank flag is up");
    }
}
