// Shift and rotate instructions
//
// All four come in an accumulator form and four memory forms. The
// memory forms are read-modify-write: the unmodified byte is written
// back once before the shifted result, which memory-mapped registers
// can observe.

use crate::bus::CpuBus;
use crate::cpu::addressing::AddressingResult;

impl crate::cpu::Cpu {
    /// Run a shift/rotate against either A or memory
    ///
    /// `transform` maps the old value and carry-in to the new value and
    /// carry-out.
    fn shift_op(
        &mut self,
        bus: &mut CpuBus,
        addr_result: &AddressingResult,
        accumulator: bool,
        transform: fn(u8, bool) -> (u8, bool),
    ) {
        let carry_in = self.get_carry();
        if accumulator {
            let (result, carry_out) = transform(self.a, carry_in);
            self.a = result;
            self.set_carry(carry_out);
            self.update_zero_and_negative_flags(result);
        } else {
            let value = bus.read(addr_result.address);
            bus.write(addr_result.address, value); // dummy write of the old value
            let (result, carry_out) = transform(value, carry_in);
            bus.write(addr_result.address, result);
            self.set_carry(carry_out);
            self.update_zero_and_negative_flags(result);
        }
    }

    /// ASL - Arithmetic Shift Left
    ///
    /// Flags affected: C (old bit 7), Z, N
    pub fn asl(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult, accumulator: bool) {
        self.shift_op(bus, addr_result, accumulator, |value, _| {
            (value << 1, value & 0x80 != 0)
        });
    }

    /// LSR - Logical Shift Right
    ///
    /// Flags affected: C (old bit 0), Z, N (always clear)
    pub fn lsr(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult, accumulator: bool) {
        self.shift_op(bus, addr_result, accumulator, |value, _| {
            (value >> 1, value & 0x01 != 0)
        });
    }

    /// ROL - Rotate Left through Carry
    ///
    /// Flags affected: C (old bit 7), Z, N
    pub fn rol(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult, accumulator: bool) {
        self.shift_op(bus, addr_result, accumulator, |value, carry| {
            ((value << 1) | carry as u8, value & 0x80 != 0)
        });
    }

    /// ROR - Rotate Right through Carry
    ///
    /// Flags affected: C (old bit 0), Z, N
    pub fn ror(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult, accumulator: bool) {
        self.shift_op(bus, addr_result, accumulator, |value, carry| {
            ((value >> 1) | ((carry as u8) << 7), value & 0x01 != 0)
        });
    }
}
