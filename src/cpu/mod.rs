// CPU module - 2A03 (6502 core) implementation
//
// The 2A03 is a 6502 with the BCD unit disconnected: the D flag can be
// set and cleared but never affects arithmetic. This module holds the
// register file, flag helpers, stack discipline, and the interrupt and
// per-tick dispatch machinery; addressing modes, the opcode table, and
// the instruction bodies live in the sibling modules.

pub mod addressing;
pub mod execute;
pub mod instructions;
pub mod opcodes;

use crate::bus::CpuBus;

/// Processor Status Flags (P register)
///
/// Bit layout:
/// ```text
/// 7  6  5  4  3  2  1  0
/// N  V  -  B  D  I  Z  C
/// ```
///
/// - N: Negative flag (bit 7)
/// - V: Overflow flag (bit 6)
/// - -: Unused flag (bit 5, always 1 when pushed)
/// - B: Break command flag (bit 4, only exists on the stack)
/// - D: Decimal mode flag (bit 3, stored but ignored by the ALU)
/// - I: Interrupt disable flag (bit 2)
/// - Z: Zero flag (bit 1)
/// - C: Carry flag (bit 0)
pub mod flags {
    pub const CARRY: u8 = 0b0000_0001; // Bit 0: C
    pub const ZERO: u8 = 0b0000_0010; // Bit 1: Z
    pub const INTERRUPT_DISABLE: u8 = 0b0000_0100; // Bit 2: I
    pub const DECIMAL: u8 = 0b0000_1000; // Bit 3: D (ignored on the 2A03)
    pub const BREAK: u8 = 0b0001_0000; // Bit 4: B
    pub const UNUSED: u8 = 0b0010_0000; // Bit 5: - (always 1)
    pub const OVERFLOW: u8 = 0b0100_0000; // Bit 6: V
    pub const NEGATIVE: u8 = 0b1000_0000; // Bit 7: N
}

/// Interrupt Vector Addresses
///
/// The 6502 fetches its handler addresses from fixed locations at the
/// top of the address space.
pub mod vectors {
    /// NMI (Non-Maskable Interrupt) vector address ($FFFA-$FFFB)
    pub const NMI: u16 = 0xFFFA;

    /// RESET vector address ($FFFC-$FFFD)
    pub const RESET: u16 = 0xFFFC;

    /// IRQ/BRK vector address ($FFFE-$FFFF)
    pub const IRQ: u16 = 0xFFFE;
}

/// Cycle cost of the NMI, IRQ, and reset sequences
const INTERRUPT_CYCLES: u8 = 7;

/// CPU structure representing the 2A03 processor state
pub struct Cpu {
    // Registers
    pub a: u8,      // Accumulator
    pub x: u8,      // Index Register X
    pub y: u8,      // Index Register Y
    pub sp: u8,     // Stack Pointer (stack lives at $0100 | SP)
    pub pc: u16,    // Program Counter
    pub status: u8, // Processor Status flags

    /// Total CPU ticks since power-on (also advances while DMA stalls us)
    cycles: u64,

    /// Ticks left before the current instruction finishes
    cycles_remaining: u8,

    /// Level of the IRQ input (true = asserted)
    irq_line: bool,

    /// Level of the NMI input, for edge detection
    nmi_line: bool,

    /// A falling NMI edge was seen and not yet serviced
    nmi_pending: bool,

    /// I flag as it was when the current instruction was fetched
    ///
    /// IRQ gating uses this snapshot instead of the live I bit, which is
    /// exactly the one-instruction delay CLI/SEI/PLP exhibit on hardware.
    i_latched: bool,
}

impl Cpu {
    /// Create a new CPU in its power-on state
    ///
    /// - A, X, Y are 0
    /// - SP is 0xFD
    /// - PC is 0 until a reset loads the vector
    /// - Status has the unused flag and I set (0x24)
    pub fn new() -> Self {
        Cpu {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFD,
            pc: 0,
            status: flags::UNUSED | flags::INTERRUPT_DISABLE,
            cycles: 0,
            cycles_remaining: 0,
            irq_line: false,
            nmi_line: false,
            nmi_pending: false,
            i_latched: true,
        }
    }

    /// Run the reset sequence
    ///
    /// Reset performs the stack pushes of a normal interrupt with the
    /// read/write line held to "read", so nothing reaches memory but SP
    /// still drops by 3. A, X, and Y survive, I is set, and PC is loaded
    /// from $FFFC/$FFFD. The sequence costs 7 cycles.
    pub fn reset(&mut self, bus: &mut CpuBus) {
        self.sp = self.sp.wrapping_sub(3);
        self.set_interrupt_disable(true);
        self.i_latched = true;
        self.pc = bus.read_u16(vectors::RESET);
        self.nmi_pending = false;
        self.cycles_remaining = INTERRUPT_CYCLES;
    }

    /// Total CPU ticks executed so far
    #[inline]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// True when the next tick will dispatch a new instruction
    #[inline]
    pub fn instruction_boundary(&self) -> bool {
        self.cycles_remaining == 0
    }

    // ========================================
    // Status Flag Manipulation Methods
    // ========================================

    /// Get the value of a specific flag
    #[inline]
    pub fn get_flag(&self, flag: u8) -> bool {
        (self.status & flag) != 0
    }

    /// Set a specific flag to 1
    #[inline]
    pub fn set_flag(&mut self, flag: u8) {
        self.status |= flag;
    }

    /// Clear a specific flag (set to 0)
    #[inline]
    pub fn clear_flag(&mut self, flag: u8) {
        self.status &= !flag;
    }

    /// Update a flag based on a condition
    #[inline]
    pub fn update_flag(&mut self, flag: u8, condition: bool) {
        if condition {
            self.set_flag(flag);
        } else {
            self.clear_flag(flag);
        }
    }

    /// Get Carry flag (C)
    #[inline]
    pub fn get_carry(&self) -> bool {
        self.get_flag(flags::CARRY)
    }

    /// Set Carry flag (C)
    #[inline]
    pub fn set_carry(&mut self, value: bool) {
        self.update_flag(flags::CARRY, value);
    }

    /// Get Zero flag (Z)
    #[inline]
    pub fn get_zero(&self) -> bool {
        self.get_flag(flags::ZERO)
    }

    /// Set Zero flag (Z)
    #[inline]
    pub fn set_zero(&mut self, value: bool) {
        self.update_flag(flags::ZERO, value);
    }

    /// Get Interrupt Disable flag (I)
    #[inline]
    pub fn get_interrupt_disable(&self) -> bool {
        self.get_flag(flags::INTERRUPT_DISABLE)
    }

    /// Set Interrupt Disable flag (I)
    #[inline]
    pub fn set_interrupt_disable(&mut self, value: bool) {
        self.update_flag(flags::INTERRUPT_DISABLE, value);
    }

    /// Get Overflow flag (V)
    #[inline]
    pub fn get_overflow(&self) -> bool {
        self.get_flag(flags::OVERFLOW)
    }

    /// Set Overflow flag (V)
    #[inline]
    pub fn set_overflow(&mut self, value: bool) {
        self.update_flag(flags::OVERFLOW, value);
    }

    /// Get Negative flag (N)
    #[inline]
    pub fn get_negative(&self) -> bool {
        self.get_flag(flags::NEGATIVE)
    }

    /// Set Negative flag (N)
    #[inline]
    pub fn set_negative(&mut self, value: bool) {
        self.update_flag(flags::NEGATIVE, value);
    }

    /// Update Zero and Negative flags from a result byte
    ///
    /// The common tail of loads, transfers, and arithmetic.
    #[inline]
    pub fn update_zero_and_negative_flags(&mut self, value: u8) {
        self.set_zero(value == 0);
        self.set_negative((value & 0x80) != 0);
    }

    // ========================================
    // Stack Operations
    // ========================================
    // The stack occupies page 1. A push stores at $0100 | SP and then
    // decrements SP; a pop increments SP and reads at $0100 | SP, so a
    // push/pop pair restores SP exactly.

    /// Push one byte onto the stack
    #[inline]
    pub(crate) fn stack_push(&mut self, bus: &mut CpuBus, byte: u8) {
        bus.write(0x0100 | self.sp as u16, byte);
        self.sp = self.sp.wrapping_sub(1);
    }

    /// Pop one byte off the stack
    #[inline]
    pub(crate) fn stack_pop(&mut self, bus: &mut CpuBus) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        bus.read(0x0100 | self.sp as u16)
    }

    /// Push a 16-bit value (high byte first, so it pops low-then-high)
    #[inline]
    pub(crate) fn stack_push_u16(&mut self, bus: &mut CpuBus, value: u16) {
        self.stack_push(bus, (value >> 8) as u8);
        self.stack_push(bus, (value & 0xFF) as u8);
    }

    /// Pop a 16-bit value
    #[inline]
    pub(crate) fn stack_pop_u16(&mut self, bus: &mut CpuBus) -> u16 {
        let lo = self.stack_pop(bus) as u16;
        let hi = self.stack_pop(bus) as u16;
        (hi << 8) | lo
    }

    // ========================================
    // Interrupt Handling
    // ========================================

    /// Drive the IRQ input (level-triggered, true = asserted)
    #[inline]
    pub fn set_irq_line(&mut self, asserted: bool) {
        self.irq_line = asserted;
    }

    /// Drive the NMI input
    ///
    /// NMI is edge-triggered: the pending latch is set when the line
    /// goes from released to asserted and survives until serviced, even
    /// if the line is released again in between.
    #[inline]
    pub fn set_nmi_line(&mut self, asserted: bool) {
        if asserted && !self.nmi_line {
            self.nmi_pending = true;
        }
        self.nmi_line = asserted;
    }

    /// Shared NMI/IRQ entry: push PC and status, set I, load the vector
    ///
    /// The pushed status has bit 5 set and bit 4 clear, which is how a
    /// handler distinguishes hardware interrupts from BRK (whose push
    /// sets bit 4 and lives in `instructions::miscellaneous`).
    fn interrupt(&mut self, bus: &mut CpuBus, vector: u16) {
        self.stack_push_u16(bus, self.pc);
        self.stack_push(bus, (self.status & !flags::BREAK) | flags::UNUSED);
        self.set_interrupt_disable(true);
        self.pc = bus.read_u16(vector);
    }

    /// Run the NMI sequence (vector at $FFFA/$FFFB)
    pub fn nmi(&mut self, bus: &mut CpuBus) {
        self.interrupt(bus, vectors::NMI);
    }

    /// Run the IRQ sequence (vector at $FFFE/$FFFF), honoring the I flag
    pub fn irq(&mut self, bus: &mut CpuBus) {
        if self.get_interrupt_disable() {
            return;
        }
        self.interrupt(bus, vectors::IRQ);
    }

    // ========================================
    // Per-tick Dispatch
    // ========================================

    /// Execute one CPU tick
    ///
    /// While an instruction is in flight this only burns a cycle. At an
    /// instruction boundary the dispatch order is: pending NMI edge,
    /// then IRQ (line asserted, I clear as of the previous instruction
    /// fetch), then the next instruction. The whole instruction executes
    /// on its first tick and the remaining cycles are counted down.
    pub fn clock(&mut self, bus: &mut CpuBus) {
        if self.cycles_remaining == 0 {
            if self.nmi_pending {
                self.nmi_pending = false;
                self.interrupt(bus, vectors::NMI);
                self.cycles_remaining = INTERRUPT_CYCLES;
            } else if self.irq_line && !self.i_latched {
                self.interrupt(bus, vectors::IRQ);
                self.cycles_remaining = INTERRUPT_CYCLES;
            } else {
                self.i_latched = self.get_interrupt_disable();
                self.cycles_remaining = self.step(bus);
            }
        }
        self.cycles_remaining -= 1;
        self.cycles = self.cycles.wrapping_add(1);
    }

    /// Advance the tick counter while the DMA engine owns the bus
    #[inline]
    pub(crate) fn halt_tick(&mut self) {
        self.cycles = self.cycles.wrapping_add(1);
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
