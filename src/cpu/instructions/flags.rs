// Flag manipulation instructions: CLC, CLD, CLI, CLV, SEC, SED, SEI
//
// CLI and SEI change I immediately, but the IRQ gate in the dispatch
// loop samples I at instruction fetch, so their effect on interrupt
// delivery lands one instruction late, as on hardware.

use crate::cpu::flags;

impl crate::cpu::Cpu {
    /// CLC - Clear Carry Flag
    pub fn clc(&mut self) {
        self.clear_flag(flags::CARRY);
    }

    /// SEC - Set Carry Flag
    pub fn sec(&mut self) {
        self.set_flag(flags::CARRY);
    }

    /// CLD - Clear Decimal Mode
    pub fn cld(&mut self) {
        self.clear_flag(flags::DECIMAL);
    }

    /// SED - Set Decimal Mode (stored only; the 2A03 ALU ignores it)
    pub fn sed(&mut self) {
        self.set_flag(flags::DECIMAL);
    }

    /// CLI - Clear Interrupt Disable
    pub fn cli(&mut self) {
        self.clear_flag(flags::INTERRUPT_DISABLE);
    }

    /// SEI - Set Interrupt Disable
    pub fn sei(&mut self) {
        self.set_flag(flags::INTERRUPT_DISABLE);
    }

    /// CLV - Clear Overflow Flag (there is no SEV)
    pub fn clv(&mut self) {
        self.clear_flag(flags::OVERFLOW);
    }
}
