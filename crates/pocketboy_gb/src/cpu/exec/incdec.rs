//! Increment/decrement actions, 8-bit and 16-bit.

use crate::bus::Bus;
use crate::cpu::operand::{Operand8, Reg16};
use crate::cpu::Cpu;

impl Cpu {
    /// `INC r` / `INC [HL]`: read-modify-write in a single step.
    pub(crate) fn exec_inc8(&mut self, bus: &mut dyn Bus, operand: Operand8) {
        let value = self.load_reg8(bus, operand);
        let result = self.alu_inc8(value);
        self.store_reg8(bus, operand, result);
    }

    /// `DEC r` / `DEC [HL]`.
    pub(crate) fn exec_dec8(&mut self, bus: &mut dyn Bus, operand: Operand8) {
        let value = self.load_reg8(bus, operand);
        let result = self.alu_dec8(value);
        self.store_reg8(bus, operand, result);
    }

    /// `INC rr`: no flag changes.
    pub(crate) fn exec_inc16(&mut self, reg: Reg16) {
        let value = self.load_reg16(reg).wrapping_add(1);
        self.store_reg16(reg, value);
    }

    /// `DEC rr`: no flag changes.
    pub(crate) fn exec_dec16(&mut self, reg: Reg16) {
        let value = self.load_reg16(reg).wrapping_sub(1);
        self.store_reg16(reg, value);
    }
}
