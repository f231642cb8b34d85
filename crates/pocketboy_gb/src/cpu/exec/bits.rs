//! Rotates, shifts, swap, and single-bit operations.

use pocketboy_common::BitOps;

use crate::bus::Bus;
use crate::cpu::operand::Operand8;
use crate::cpu::regs::Flag;
use crate::cpu::Cpu;

/// Which rotate primitive a table entry wires to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Rotate {
    /// RLC: rotate left through itself.
    LeftCircular,
    /// RRC: rotate right through itself.
    RightCircular,
    /// RL: rotate left through carry.
    Left,
    /// RR: rotate right through carry.
    Right,
}

/// Shift flavour for the CB shift group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Shift {
    /// SLA.
    LeftArithmetic,
    /// SRA: sign-preserving.
    RightArithmetic,
    /// SRL.
    RightLogical,
}

impl Cpu {
    fn rotate_value(&mut self, value: u8, rotate: Rotate) -> u8 {
        match rotate {
            Rotate::LeftCircular => self.alu_rlc(value),
            Rotate::RightCircular => self.alu_rrc(value),
            Rotate::Left => self.alu_rl(value),
            Rotate::Right => self.alu_rr(value),
        }
    }

    /// Primary-page RLCA/RRCA/RLA/RRA: same data paths as the CB rotates
    /// but Z is always cleared.
    pub(crate) fn exec_rotate_a(&mut self, rotate: Rotate) {
        let value = self.regs.a;
        self.regs.a = self.rotate_value(value, rotate);
        self.regs.clear_flag(Flag::Z);
    }

    /// CB-page `RLC/RRC/RL/RR r`: Z tracks the result.
    pub(crate) fn exec_rotate(&mut self, bus: &mut dyn Bus, operand: Operand8, rotate: Rotate) {
        let value = self.load_reg8(bus, operand);
        let result = self.rotate_value(value, rotate);
        self.store_reg8(bus, operand, result);
    }

    /// CB-page `SLA/SRA/SRL r`.
    pub(crate) fn exec_shift(&mut self, bus: &mut dyn Bus, operand: Operand8, shift: Shift) {
        let value = self.load_reg8(bus, operand);
        let result = match shift {
            Shift::LeftArithmetic => self.alu_sla(value),
            Shift::RightArithmetic => self.alu_sra(value),
            Shift::RightLogical => self.alu_srl(value),
        };
        self.store_reg8(bus, operand, result);
    }

    /// `SWAP r`.
    pub(crate) fn exec_swap(&mut self, bus: &mut dyn Bus, operand: Operand8) {
        let value = self.load_reg8(bus, operand);
        let result = self.alu_swap(value);
        self.store_reg8(bus, operand, result);
    }

    /// `BIT b, r`: test only, flags updated, C preserved.
    pub(crate) fn exec_bit(&mut self, bus: &mut dyn Bus, bit: u8, operand: Operand8) {
        let value = self.load_reg8(bus, operand);
        self.alu_bit_test(bit, value);
    }

    /// `RES b, r`: clear one bit, flags preserved.
    pub(crate) fn exec_res(&mut self, bus: &mut dyn Bus, bit: u8, operand: Operand8) {
        let mut value = self.load_reg8(bus, operand);
        value.clear_bit(bit as u32);
        self.store_reg8(bus, operand, value);
    }

    /// `SET b, r`: set one bit, flags preserved.
    pub(crate) fn exec_set(&mut self, bus: &mut dyn Bus, bit: u8, operand: Operand8) {
        let mut value = self.load_reg8(bus, operand);
        value.set_bit(bit as u32);
        self.store_reg8(bus, operand, value);
    }
}
