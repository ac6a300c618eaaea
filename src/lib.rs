// nescore - cycle-accurate NES (NTSC) emulator core
//
// The crate models the 2A03 CPU and 2C02 PPU as values owned by a
// single `Console`, clocked together off one master counter (three PPU
// dots per CPU cycle). The host drives `Console::tick` in a loop and
// presents the RGBA frame buffer however it likes; windowing, audio,
// and input translation all live outside this crate.

// Public modules
pub mod bus;
pub mod cartridge;
pub mod console;
pub mod cpu;
pub mod display;
pub mod input;
pub mod ppu;

// Re-export main types for convenience
pub use bus::CpuBus;
pub use cartridge::{Cartridge, INesError, INesHeader, Mapper, Mirroring};
pub use console::Console;
pub use cpu::Cpu;
pub use display::{palette_rgba, FrameBuffer, NES_PALETTE};
pub use input::{Buttons, ControllerPorts};
pub use ppu::Ppu;
