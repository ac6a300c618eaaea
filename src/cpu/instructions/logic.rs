// Logical instructions: AND, ORA, EOR, and BIT

use crate::bus::CpuBus;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::flags;

impl crate::cpu::Cpu {
    /// AND - Bitwise AND with Accumulator
    ///
    /// Flags affected: Z, N
    pub fn and(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) {
        self.a &= self.read_operand(bus, addr_result);
        self.update_zero_and_negative_flags(self.a);
    }

    /// ORA - Bitwise OR with Accumulator
    ///
    /// Flags affected: Z, N
    pub fn ora(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) {
        self.a |= self.read_operand(bus, addr_result);
        self.update_zero_and_negative_flags(self.a);
    }

    /// EOR - Bitwise Exclusive OR with Accumulator
    ///
    /// Flags affected: Z, N
    pub fn eor(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) {
        self.a ^= self.read_operand(bus, addr_result);
        self.update_zero_and_negative_flags(self.a);
    }

    /// BIT - Bit Test
    ///
    /// Z from A & M; V and N are copied straight from bits 6 and 7 of
    /// the operand, regardless of A.
    pub fn bit(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) {
        let operand = self.read_operand(bus, addr_result);
        self.set_zero(self.a & operand == 0);
        self.update_flag(flags::OVERFLOW, operand & 0x40 != 0);
        self.update_flag(flags::NEGATIVE, operand & 0x80 != 0);
    }
}
