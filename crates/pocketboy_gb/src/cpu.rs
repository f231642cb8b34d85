//! SM83 execution core.
//!
//! The Game Boy's CPU is an 8-bit Sharp design that borrows from both the
//! Intel 8080 and the Zilog Z80 without being either: there are no I/O
//! ports, the HRAM page gets its own load forms, and DAA has its own rules.
//! Decoding is table-driven: a 256-entry primary table plus a 256-entry
//! table for the `0xCB` prefix, each slot carrying mnemonic, byte length,
//! base machine-cycle cost, and the action to run. Conditional control flow
//! stores the not-taken cost in the table and charges the extra cycles from
//! the action when the branch is taken.
//!
//! See <https://gbdev.io/pandocs/CPU_Instruction_Set.html>.

mod alu;
mod exec;
mod opcodes;
pub mod interrupts;
pub mod operand;
pub mod regs;

#[cfg(test)]
mod tests;

use thiserror::Error;

use crate::bus::Bus;
use self::regs::Registers;

pub use self::regs::{Condition, Flag};

/// Cost of a maskable interrupt entry, in m-cycles.
const INTERRUPT_DISPATCH_MCYCLES: u64 = 5;

/// Execution mode of the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Running,
    /// Entered by HALT. The core idles until an interrupt line is pending.
    Halted,
    /// Entered by STOP. The core idles until externally woken.
    Stopped,
}

/// Errors surfaced by [`Cpu::step`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CpuError {
    /// One of the eleven primary-table holes was fetched.
    #[error("illegal opcode {mnemonic} (0x{opcode:02X}) at PC 0x{pc:04X}")]
    IllegalOpcode {
        mnemonic: &'static str,
        opcode: u8,
        pc: u16,
    },

    /// A `0xCB`-prefixed slot without an action was fetched. Every slot in
    /// the prefix table is populated, so this indicates table corruption
    /// rather than a ROM fault.
    #[error("illegal opcode {mnemonic} (0xCB 0x{opcode:02X}) at PC 0x{pc:04X}")]
    IllegalPrefixedOpcode {
        mnemonic: &'static str,
        opcode: u8,
        pc: u16,
    },
}

/// Game Boy CPU core.
///
/// Owns the register file, interrupt master enable, execution mode, and the
/// cycle counters. The memory bus is borrowed per [`Cpu::step`] call so the
/// outer loop can interleave peripheral work between instructions.
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    pub ime: bool,
    mode: Mode,
    /// One-shot HALT-bug latch: the next opcode fetch does not advance PC.
    halt_bug: bool,
    mcycles: u64,
    tstates: u64,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Construct a core in the DMG post-boot-ROM state.
    pub fn new() -> Self {
        let mut cpu = Self {
            regs: Registers::default(),
            ime: false,
            mode: Mode::Running,
            halt_bug: false,
            mcycles: 0,
            tstates: 0,
        };
        cpu.reset();
        cpu
    }

    /// Reset to the DMG power-on state (post boot ROM, as documented in
    /// Pan Docs) and zero the cycle counters.
    pub fn reset(&mut self) {
        self.regs = Registers {
            a: 0x01,
            f: 0x80,
            b: 0x00,
            c: 0x13,
            d: 0x00,
            e: 0xD8,
            h: 0x01,
            l: 0x4D,
            sp: 0xFFFE,
            pc: 0x0100,
        };
        self.ime = true;
        self.mode = Mode::Running;
        self.halt_bug = false;
        self.mcycles = 0;
        self.tstates = 0;
    }

    /// Accumulated machine cycles.
    #[inline]
    pub fn mcycles(&self) -> u64 {
        self.mcycles
    }

    /// Accumulated T-states (always four per machine cycle).
    #[inline]
    pub fn tstates(&self) -> u64 {
        self.tstates
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Return a stopped or halted core to [`Mode::Running`].
    ///
    /// STOP can only be left through an external event (joypad on real
    /// hardware); the outer loop models that by calling this.
    pub fn wake(&mut self) {
        self.mode = Mode::Running;
    }

    #[inline]
    pub(crate) fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    #[inline]
    pub(crate) fn set_halt_bug(&mut self) {
        self.halt_bug = true;
    }

    /// Charge extra cycles beyond the descriptor base (taken branches).
    #[inline]
    pub(crate) fn add_cycles(&mut self, mcycles: u64) {
        self.mcycles += mcycles;
        self.tstates += mcycles * 4;
    }

    /// Fetch one byte at PC and advance.
    ///
    /// When the HALT-bug latch is armed the fetch still happens but PC
    /// stays put, so the byte is seen twice.
    #[inline]
    pub(crate) fn fetch8(&mut self, bus: &mut dyn Bus) -> u8 {
        let value = bus.read_byte(self.regs.pc);
        if self.halt_bug {
            self.halt_bug = false;
        } else {
            self.regs.pc = self.regs.pc.wrapping_add(1);
        }
        value
    }

    /// Fetch a 16-bit immediate operand, low byte first.
    #[inline]
    pub(crate) fn fetch16(&mut self, bus: &mut dyn Bus) -> u16 {
        let lo = self.fetch8(bus);
        let hi = self.fetch8(bus);
        u16::from_be_bytes([hi, lo])
    }

    /// Push PC for CALL/RST/interrupt entry: SP drops by two, then the word
    /// write puts the high byte at the new SP and the low byte above it.
    #[inline]
    pub(crate) fn push_pc(&mut self, bus: &mut dyn Bus) {
        self.regs.sp = self.regs.sp.wrapping_sub(2);
        bus.write_word(self.regs.sp, self.regs.pc);
    }

    /// Pop PC for RET/RETI: high byte at SP, low byte at SP+1.
    #[inline]
    pub(crate) fn pop_pc(&mut self, bus: &mut dyn Bus) {
        self.regs.pc = bus.read_word(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(2);
    }

    /// Execute a single instruction (or interrupt entry) and accumulate its
    /// timing.
    ///
    /// A stopped core returns immediately with a zero cycle delta. A halted
    /// core with nothing pending charges one idle m-cycle. Otherwise the
    /// opcode at PC is fetched, decoded through the primary table (or the
    /// `0xCB` table after a prefix byte), and its action runs. Decoding one
    /// of the eleven primary-table holes fails with [`CpuError`] and leaves
    /// PC just past the offending byte.
    pub fn step(&mut self, bus: &mut dyn Bus) -> Result<(), CpuError> {
        if self.mode == Mode::Stopped {
            return Ok(());
        }

        if self.service_interrupt(bus) {
            self.add_cycles(INTERRUPT_DISPATCH_MCYCLES);
            return Ok(());
        }

        if self.mode == Mode::Halted {
            self.add_cycles(1);
            return Ok(());
        }

        let opcode = self.fetch8(bus);
        let (instr, prefixed) = if opcode == opcodes::CB_PREFIX_BYTE {
            let cb_opcode = self.fetch8(bus);
            (opcodes::cb_prefix(cb_opcode), Some(cb_opcode))
        } else {
            (opcodes::no_prefix(opcode), None)
        };

        let Some(execute) = instr.execute else {
            return Err(match prefixed {
                Some(cb_opcode) => CpuError::IllegalPrefixedOpcode {
                    mnemonic: instr.mnemonic,
                    opcode: cb_opcode,
                    pc: self.regs.pc,
                },
                None => CpuError::IllegalOpcode {
                    mnemonic: instr.mnemonic,
                    opcode,
                    pc: self.regs.pc,
                },
            });
        };

        log::debug!("execute {} ({} bytes)", instr.mnemonic, instr.length);
        execute(self, bus);

        self.mcycles += instr.mcycles as u64;
        self.tstates += instr.tstates as u64;
        Ok(())
    }
}
