//! Maskable interrupt sources and dispatch.
//!
//! A source is *pending* when its bit is set in both IF (0xFF0F) and IE
//! (0xFFFF). Peripherals raise lines by setting IF bits through the bus;
//! the CPU consumes them before each instruction fetch when IME allows.

use pocketboy_common::BitOps;

use crate::bus::{Bus, IoReg};

use super::{Cpu, Mode};

/// Interrupt flags found in the IF and IE registers, in priority order
/// (VBlank highest).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interrupt {
    VBlank = 0,
    Lcd = 1,
    Timer = 2,
    Serial = 3,
    Joypad = 4,
}

impl Interrupt {
    /// Bit position in IF/IE.
    #[inline]
    pub const fn bit(self) -> u32 {
        self as u32
    }

    /// Fixed dispatch vector for the source.
    #[inline]
    pub const fn vector(self) -> u16 {
        0x0040 + (self as u16) * 8
    }

    fn from_bit(bit: u32) -> Interrupt {
        match bit {
            0 => Interrupt::VBlank,
            1 => Interrupt::Lcd,
            2 => Interrupt::Timer,
            3 => Interrupt::Serial,
            4 => Interrupt::Joypad,
            _ => unreachable!("interrupt bit out of range: {bit}"),
        }
    }
}

/// Request an interrupt by setting its flag in IF.
pub fn request_interrupt(bus: &mut dyn Bus, interrupt: Interrupt) {
    let mut iflags = bus.read_io_reg(IoReg::If);
    iflags.set_bit(interrupt.bit());
    bus.write_io_reg(IoReg::If, iflags);
}

/// Clear an interrupt's flag in IF.
pub fn clear_interrupt(bus: &mut dyn Bus, interrupt: Interrupt) {
    let mut iflags = bus.read_io_reg(IoReg::If);
    iflags.clear_bit(interrupt.bit());
    bus.write_io_reg(IoReg::If, iflags);
}

/// Whether `interrupt` is enabled in IE and flagged in IF.
pub fn is_interrupt_pending(bus: &mut dyn Bus, interrupt: Interrupt) -> bool {
    pending_mask(bus).is_bit_set(interrupt.bit())
}

/// Bitmask of sources pending in both IF and IE.
pub(crate) fn pending_mask(bus: &mut dyn Bus) -> u8 {
    bus.read_io_reg(IoReg::If) & bus.read_io_reg(IoReg::Ie) & 0x1F
}

impl Cpu {
    /// Service the highest-priority pending interrupt, if any.
    ///
    /// A pending line always wakes a halted core. Dispatch itself requires
    /// IME: it clears IME and the source's IF bit, pushes PC, and jumps to
    /// the source's vector. Returns true when a dispatch happened; the
    /// caller charges the five m-cycle entry cost.
    pub(super) fn service_interrupt(&mut self, bus: &mut dyn Bus) -> bool {
        let pending = pending_mask(bus);
        if pending == 0 {
            return false;
        }

        if self.mode() == Mode::Halted {
            self.set_mode(Mode::Running);
        }

        if !self.ime {
            return false;
        }

        let interrupt = Interrupt::from_bit(pending.trailing_zeros());
        self.ime = false;
        clear_interrupt(bus, interrupt);
        self.push_pc(bus);
        self.regs.pc = interrupt.vector();
        true
    }
}
