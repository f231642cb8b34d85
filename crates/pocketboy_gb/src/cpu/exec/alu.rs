//! 8-bit and 16-bit arithmetic/logic actions.

use crate::bus::Bus;
use crate::cpu::operand::{Imm8Src, Operand8, Reg16};
use crate::cpu::regs::Flag;
use crate::cpu::Cpu;

impl Cpu {
    /// `ADD A, r` / `ADC A, r` (and their `[HL]` forms).
    pub(crate) fn exec_add_a(&mut self, bus: &mut dyn Bus, src: Operand8, use_carry: bool) {
        let value = self.load_reg8(bus, src);
        self.alu_add(value, use_carry);
    }

    /// `ADD A, n8` / `ADC A, n8`.
    pub(crate) fn exec_add_a_imm(&mut self, bus: &mut dyn Bus, use_carry: bool) {
        let value = self.load_imm8(bus, Imm8Src::Direct);
        self.alu_add(value, use_carry);
    }

    /// `SUB A, r` / `SBC A, r`.
    pub(crate) fn exec_sub_a(&mut self, bus: &mut dyn Bus, src: Operand8, use_carry: bool) {
        let value = self.load_reg8(bus, src);
        self.alu_sub(value, use_carry);
    }

    /// `SUB A, n8` / `SBC A, n8`.
    pub(crate) fn exec_sub_a_imm(&mut self, bus: &mut dyn Bus, use_carry: bool) {
        let value = self.load_imm8(bus, Imm8Src::Direct);
        self.alu_sub(value, use_carry);
    }

    pub(crate) fn exec_and_a(&mut self, bus: &mut dyn Bus, src: Operand8) {
        let value = self.load_reg8(bus, src);
        self.alu_and(value);
    }

    pub(crate) fn exec_and_a_imm(&mut self, bus: &mut dyn Bus) {
        let value = self.load_imm8(bus, Imm8Src::Direct);
        self.alu_and(value);
    }

    pub(crate) fn exec_or_a(&mut self, bus: &mut dyn Bus, src: Operand8) {
        let value = self.load_reg8(bus, src);
        self.alu_or(value);
    }

    pub(crate) fn exec_or_a_imm(&mut self, bus: &mut dyn Bus) {
        let value = self.load_imm8(bus, Imm8Src::Direct);
        self.alu_or(value);
    }

    pub(crate) fn exec_xor_a(&mut self, bus: &mut dyn Bus, src: Operand8) {
        let value = self.load_reg8(bus, src);
        self.alu_xor(value);
    }

    pub(crate) fn exec_xor_a_imm(&mut self, bus: &mut dyn Bus) {
        let value = self.load_imm8(bus, Imm8Src::Direct);
        self.alu_xor(value);
    }

    pub(crate) fn exec_cp_a(&mut self, bus: &mut dyn Bus, src: Operand8) {
        let value = self.load_reg8(bus, src);
        self.alu_cp(value);
    }

    pub(crate) fn exec_cp_a_imm(&mut self, bus: &mut dyn Bus) {
        let value = self.load_imm8(bus, Imm8Src::Direct);
        self.alu_cp(value);
    }

    /// `ADD HL, rr`.
    pub(crate) fn exec_add_hl(&mut self, src: Reg16) {
        let value = self.load_reg16(src);
        self.alu_add16_hl(value);
    }

    /// `ADD SP, e8`.
    pub(crate) fn exec_add_sp_e8(&mut self, bus: &mut dyn Bus) {
        let offset = self.load_imm8(bus, Imm8Src::Direct);
        self.regs.sp = self.alu_add16_signed(self.regs.sp, offset);
    }

    pub(crate) fn exec_daa(&mut self) {
        self.alu_daa();
    }

    /// `CPL`: complement A; N and H set, Z and C preserved.
    pub(crate) fn exec_cpl(&mut self) {
        self.regs.a = !self.regs.a;
        self.regs.set_flag(Flag::N);
        self.regs.set_flag(Flag::H);
    }

    /// `SCF`: set carry; N and H cleared, Z preserved.
    pub(crate) fn exec_scf(&mut self) {
        self.regs.clear_flag(Flag::N);
        self.regs.clear_flag(Flag::H);
        self.regs.set_flag(Flag::C);
    }

    /// `CCF`: complement carry; N and H cleared, Z preserved.
    pub(crate) fn exec_ccf(&mut self) {
        self.regs.clear_flag(Flag::N);
        self.regs.clear_flag(Flag::H);
        self.regs.toggle_flag(Flag::C);
    }
}
