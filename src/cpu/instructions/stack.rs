// Stack instructions: PHA, PHP, PLA, PLP, TXS, TSX

use crate::bus::CpuBus;
use crate::cpu::flags;

impl crate::cpu::Cpu {
    /// PHA - Push Accumulator
    pub fn pha(&mut self, bus: &mut CpuBus) {
        self.stack_push(bus, self.a);
    }

    /// PLA - Pull Accumulator
    ///
    /// Flags affected: Z, N
    pub fn pla(&mut self, bus: &mut CpuBus) {
        self.a = self.stack_pop(bus);
        self.update_zero_and_negative_flags(self.a);
    }

    /// PHP - Push Processor Status
    ///
    /// The pushed copy always has bits 4 (B) and 5 set; the flags in
    /// the register itself do not change.
    pub fn php(&mut self, bus: &mut CpuBus) {
        self.stack_push(bus, self.status | flags::BREAK | flags::UNUSED);
    }

    /// PLP - Pull Processor Status
    ///
    /// B has no storage in the register, so the pulled bit 4 is
    /// discarded; bit 5 reads back as 1. A change to I takes effect for
    /// IRQ gating only after the next instruction (handled by the fetch
    /// snapshot in the dispatch loop).
    pub fn plp(&mut self, bus: &mut CpuBus) {
        let pulled = self.stack_pop(bus);
        self.status = (pulled & !flags::BREAK) | flags::UNUSED;
    }

    /// TXS - Transfer X to Stack Pointer (no flags)
    pub fn txs(&mut self) {
        self.sp = self.x;
    }

    /// TSX - Transfer Stack Pointer to X
    ///
    /// Flags affected: Z, N
    pub fn tsx(&mut self) {
        self.x = self.sp;
        self.update_zero_and_negative_flags(self.x);
    }
}
