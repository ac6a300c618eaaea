// Load and store instructions
//
// Loads move a byte from memory into a register and update Z and N;
// stores copy a register to memory and touch no flags.

use crate::bus::CpuBus;
use crate::cpu::addressing::AddressingResult;

impl crate::cpu::Cpu {
    /// LDA - Load Accumulator
    ///
    /// Flags affected: Z, N
    pub fn lda(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.a = value;
        self.update_zero_and_negative_flags(value);
    }

    /// LDX - Load X Register
    ///
    /// Flags affected: Z, N
    pub fn ldx(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.x = value;
        self.update_zero_and_negative_flags(value);
    }

    /// LDY - Load Y Register
    ///
    /// Flags affected: Z, N
    pub fn ldy(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.y = value;
        self.update_zero_and_negative_flags(value);
    }

    /// STA - Store Accumulator
    pub fn sta(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) {
        bus.write(addr_result.address, self.a);
    }

    /// STX - Store X Register
    pub fn stx(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) {
        bus.write(addr_result.address, self.x);
    }

    /// STY - Store Y Register
    pub fn sty(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) {
        bus.write(addr_result.address, self.y);
    }
}

#[cfg(test)]
mod tests {
    use crate::cpu::test_rig::CpuRig;

    #[test]
    fn test_lda_immediate() {
        let mut rig = CpuRig::new();
        rig.load(&[0xA9, 0x42]); // LDA #$42
        let cycles = rig.step();

        assert_eq!(rig.cpu.a, 0x42);
        assert!(!rig.cpu.get_zero());
        assert!(!rig.cpu.get_negative());
        assert_eq!(rig.cpu.pc, 0x0202);
        assert_eq!(cycles, 2);
    }

    #[test]
    fn test_lda_sets_zero_and_negative() {
        let mut rig = CpuRig::new();
        rig.load(&[0xA9, 0x00, 0xA9, 0x80]);
        rig.step();
        assert!(rig.cpu.get_zero());
        rig.step();
        assert!(rig.cpu.get_negative());
        assert!(!rig.cpu.get_zero());
    }

    #[test]
    fn test_lda_absolute_from_rom() {
        let mut rig = CpuRig::with_prg(&[0x77]); // $8000 holds $77
        rig.load(&[0xAD, 0x00, 0x80]); // LDA $8000
        rig.step();
        assert_eq!(rig.cpu.a, 0x77);
    }

    #[test]
    fn test_sta_zero_page() {
        let mut rig = CpuRig::new();
        rig.cpu.a = 0x99;
        rig.load(&[0x85, 0x10]); // STA $10
        rig.step();
        assert_eq!(rig.read(0x0010), 0x99);
    }

    #[test]
    fn test_stx_sty() {
        let mut rig = CpuRig::new();
        rig.cpu.x = 0x11;
        rig.cpu.y = 0x22;
        rig.load(&[0x86, 0x20, 0x84, 0x21]); // STX $20; STY $21
        rig.step();
        rig.step();
        assert_eq!(rig.read(0x0020), 0x11);
        assert_eq!(rig.read(0x0021), 0x22);
    }

    #[test]
    fn test_ldx_zero_page_y() {
        let mut rig = CpuRig::new();
        rig.cpu.y = 0x05;
        rig.write(0x0015, 0xAB);
        rig.load(&[0xB6, 0x10]); // LDX $10,Y
        rig.step();
        assert_eq!(rig.cpu.x, 0xAB);
    }
}
