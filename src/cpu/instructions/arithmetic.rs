// Arithmetic instructions
//
// ADC and SBC share one adder: SBC inverts the operand and runs the
// same sum, which also makes the overflow rule identical. The 2A03 has
// no BCD mode, so the D flag never changes the result.

use crate::bus::CpuBus;
use crate::cpu::addressing::AddressingResult;

impl crate::cpu::Cpu {
    /// Common add core for ADC/SBC
    ///
    /// C is the carry out of bit 7. V is set when both inputs share a
    /// sign that the result does not: `(result ^ A) & (result ^ operand)
    /// & 0x80`.
    fn add_with_carry(&mut self, operand: u8) {
        let carry_in = self.get_carry() as u16;
        let sum = self.a as u16 + operand as u16 + carry_in;
        let result = sum as u8;

        self.set_carry(sum > 0xFF);
        self.set_overflow((result ^ self.a) & (result ^ operand) & 0x80 != 0);
        self.a = result;
        self.update_zero_and_negative_flags(result);
    }

    /// ADC - Add with Carry
    ///
    /// Flags affected: C, Z, V, N
    pub fn adc(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) {
        let operand = self.read_operand(bus, addr_result);
        self.add_with_carry(operand);
    }

    /// SBC - Subtract with Carry
    ///
    /// A - M - (1 - C), computed as A + !M + C.
    ///
    /// Flags affected: C, Z, V, N
    pub fn sbc(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) {
        let operand = self.read_operand(bus, addr_result);
        self.add_with_carry(!operand);
    }

    /// INC - Increment Memory
    ///
    /// Read-modify-write: the unmodified value is written back once
    /// before the result, as the hardware does.
    ///
    /// Flags affected: Z, N
    pub fn inc(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) {
        let value = bus.read(addr_result.address);
        bus.write(addr_result.address, value);
        let result = value.wrapping_add(1);
        bus.write(addr_result.address, result);
        self.update_zero_and_negative_flags(result);
    }

    /// DEC - Decrement Memory
    ///
    /// Flags affected: Z, N
    pub fn dec(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) {
        let value = bus.read(addr_result.address);
        bus.write(addr_result.address, value);
        let result = value.wrapping_sub(1);
        bus.write(addr_result.address, result);
        self.update_zero_and_negative_flags(result);
    }

    /// INX - Increment X
    pub fn inx(&mut self) {
        self.x = self.x.wrapping_add(1);
        self.update_zero_and_negative_flags(self.x);
    }

    /// INY - Increment Y
    pub fn iny(&mut self) {
        self.y = self.y.wrapping_add(1);
        self.update_zero_and_negative_flags(self.y);
    }

    /// DEX - Decrement X
    pub fn dex(&mut self) {
        self.x = self.x.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.x);
    }

    /// DEY - Decrement Y
    pub fn dey(&mut self) {
        self.y = self.y.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.y);
    }
}
