//! Control-flow actions.
//!
//! Conditional variants charge the descriptor's not-taken cost by default;
//! the taken path adds the difference through `add_cycles`.

use crate::bus::Bus;
use crate::cpu::regs::Condition;
use crate::cpu::Cpu;

impl Cpu {
    /// `JP n16`.
    pub(crate) fn exec_jp(&mut self, bus: &mut dyn Bus) {
        self.regs.pc = self.load_imm16(bus);
    }

    /// `JP HL`.
    pub(crate) fn exec_jp_hl(&mut self) {
        self.regs.pc = self.regs.hl();
    }

    /// `JP cc, n16`: one extra m-cycle when taken.
    pub(crate) fn exec_jp_cc(&mut self, bus: &mut dyn Bus, condition: Condition) {
        let addr = self.load_imm16(bus);
        if self.regs.is_condition_set(condition) {
            self.regs.pc = addr;
            self.add_cycles(1);
        }
    }

    /// `JR e8`: signed displacement relative to the byte after the operand.
    pub(crate) fn exec_jr(&mut self, bus: &mut dyn Bus) {
        let offset = self.fetch8(bus) as i8;
        self.regs.pc = self.regs.pc.wrapping_add(offset as i16 as u16);
    }

    /// `JR cc, e8`: one extra m-cycle when taken.
    pub(crate) fn exec_jr_cc(&mut self, bus: &mut dyn Bus, condition: Condition) {
        let offset = self.fetch8(bus) as i8;
        if self.regs.is_condition_set(condition) {
            self.regs.pc = self.regs.pc.wrapping_add(offset as i16 as u16);
            self.add_cycles(1);
        }
    }

    /// `CALL n16`: push the address after the operand, then jump.
    pub(crate) fn exec_call(&mut self, bus: &mut dyn Bus) {
        let addr = self.load_imm16(bus);
        self.push_pc(bus);
        self.regs.pc = addr;
    }

    /// `CALL cc, n16`: three extra m-cycles when taken.
    pub(crate) fn exec_call_cc(&mut self, bus: &mut dyn Bus, condition: Condition) {
        let addr = self.load_imm16(bus);
        if self.regs.is_condition_set(condition) {
            self.push_pc(bus);
            self.regs.pc = addr;
            self.add_cycles(3);
        }
    }

    /// `RET`.
    pub(crate) fn exec_ret(&mut self, bus: &mut dyn Bus) {
        self.pop_pc(bus);
    }

    /// `RET cc`: three extra m-cycles when taken.
    pub(crate) fn exec_ret_cc(&mut self, bus: &mut dyn Bus, condition: Condition) {
        if self.regs.is_condition_set(condition) {
            self.pop_pc(bus);
            self.add_cycles(3);
        }
    }

    /// `RETI`: return and enable interrupts.
    pub(crate) fn exec_reti(&mut self, bus: &mut dyn Bus) {
        self.pop_pc(bus);
        self.ime = true;
    }

    /// `RST v`: push PC and jump to the fixed vector.
    pub(crate) fn exec_rst(&mut self, bus: &mut dyn Bus, vector: u8) {
        self.push_pc(bus);
        self.regs.pc = vector as u16;
    }
}
