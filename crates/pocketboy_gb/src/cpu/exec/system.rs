//! NOP, HALT, STOP, and interrupt-enable control.

use crate::bus::Bus;
use crate::cpu::interrupts;
use crate::cpu::{Cpu, Mode};

impl Cpu {
    pub(crate) fn exec_nop(&mut self) {}

    /// `HALT`.
    ///
    /// Entering HALT with IME clear while an interrupt line is already
    /// pending triggers the hardware's HALT bug instead of halting: the
    /// byte after HALT is fetched twice because the first fetch does not
    /// advance PC.
    pub(crate) fn exec_halt(&mut self, bus: &mut dyn Bus) {
        if !self.ime && interrupts::pending_mask(bus) != 0 {
            self.set_halt_bug();
            return;
        }
        self.set_mode(Mode::Halted);
    }

    /// `STOP`: consumes its padding byte and idles the core until an
    /// external wakeup.
    pub(crate) fn exec_stop(&mut self, bus: &mut dyn Bus) {
        let _padding = self.fetch8(bus);
        self.set_mode(Mode::Stopped);
    }

    /// `DI`: takes effect immediately.
    pub(crate) fn exec_di(&mut self) {
        self.ime = false;
    }

    /// `EI`: takes effect immediately.
    pub(crate) fn exec_ei(&mut self) {
        self.ime = true;
    }
}
