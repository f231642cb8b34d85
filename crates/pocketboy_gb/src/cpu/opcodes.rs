//! Opcode decode tables.
//!
//! Two 256-entry arrays, one for the primary page and one for the `0xCB`
//! prefix page. Each slot carries the canonical mnemonic, the instruction
//! byte length, the base m-cycle cost (the not-taken cost for conditional
//! control flow; `tstates` is always four times `mcycles`), and the action
//! to run. The eleven primary-page holes have no action; fetching one
//! surfaces as [`super::CpuError`].
//!
//! Opcode assignments and timing follow the published SM83 tables in
//! Pan Docs: <https://gbdev.io/pandocs/CPU_Instruction_Set.html>.

use once_cell::sync::Lazy;

use crate::bus::Bus;

use super::exec::{Rotate, Shift};
use super::operand::{Imm8Dst, Imm8Src, Operand8, Reg16, Reg16Indir, Reg16Stack};
use super::regs::Condition;
use super::Cpu;

/// First byte of every two-byte bit-manipulation instruction.
pub(super) const CB_PREFIX_BYTE: u8 = 0xCB;

/// The eleven primary-page slots with no defined SM83 behaviour.
pub(crate) const ILLEGAL_OPCODES: [u8; 11] = [
    0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD,
];

type Action = fn(&mut Cpu, &mut dyn Bus);

/// One decode-table slot.
#[derive(Clone, Copy)]
pub(crate) struct Instruction {
    pub mnemonic: &'static str,
    /// Total instruction length in bytes, prefix and operands included.
    pub length: u8,
    /// Base cost in m-cycles; taken branches add their extra on top.
    pub mcycles: u8,
    /// Base cost in T-states, always `4 * mcycles`.
    pub tstates: u8,
    pub execute: Option<Action>,
}

const fn instr(mnemonic: &'static str, length: u8, mcycles: u8, execute: Action) -> Instruction {
    Instruction {
        mnemonic,
        length,
        mcycles,
        tstates: mcycles * 4,
        execute: Some(execute),
    }
}

const ILLEGAL: Instruction = Instruction {
    mnemonic: "???",
    length: 1,
    mcycles: 0,
    tstates: 0,
    execute: None,
};

#[inline]
pub(super) fn no_prefix(opcode: u8) -> &'static Instruction {
    &NO_PREFIX[opcode as usize]
}

#[inline]
pub(super) fn cb_prefix(opcode: u8) -> &'static Instruction {
    &CB_PREFIX[opcode as usize]
}

#[cfg(test)]
pub(crate) fn tables() -> (&'static [Instruction; 256], &'static [Instruction; 256]) {
    (&NO_PREFIX, &CB_PREFIX)
}

static NO_PREFIX: Lazy<[Instruction; 256]> = Lazy::new(new_no_prefix_table);
static CB_PREFIX: Lazy<[Instruction; 256]> = Lazy::new(new_cb_prefix_table);

fn new_no_prefix_table() -> [Instruction; 256] {
    use Operand8::{IndirHl, IndirHramC, A, B, C, D, E, H, L};

    let mut t = [ILLEGAL; 256];

    // 8-bit register/register loads, 0x40–0x7F (0x76 is HALT).
    t[0x40] = instr("LD B, B", 1, 1, |cpu, bus| cpu.exec_ld8(bus, B, B));
    t[0x41] = instr("LD B, C", 1, 1, |cpu, bus| cpu.exec_ld8(bus, B, C));
    t[0x42] = instr("LD B, D", 1, 1, |cpu, bus| cpu.exec_ld8(bus, B, D));
    t[0x43] = instr("LD B, E", 1, 1, |cpu, bus| cpu.exec_ld8(bus, B, E));
    t[0x44] = instr("LD B, H", 1, 1, |cpu, bus| cpu.exec_ld8(bus, B, H));
    t[0x45] = instr("LD B, L", 1, 1, |cpu, bus| cpu.exec_ld8(bus, B, L));
    t[0x46] = instr("LD B, [HL]", 1, 2, |cpu, bus| cpu.exec_ld8(bus, B, IndirHl));
    t[0x47] = instr("LD B, A", 1, 1, |cpu, bus| cpu.exec_ld8(bus, B, A));
    t[0x48] = instr("LD C, B", 1, 1, |cpu, bus| cpu.exec_ld8(bus, C, B));
    t[0x49] = instr("LD C, C", 1, 1, |cpu, bus| cpu.exec_ld8(bus, C, C));
    t[0x4A] = instr("LD C, D", 1, 1, |cpu, bus| cpu.exec_ld8(bus, C, D));
    t[0x4B] = instr("LD C, E", 1, 1, |cpu, bus| cpu.exec_ld8(bus, C, E));
    t[0x4C] = instr("LD C, H", 1, 1, |cpu, bus| cpu.exec_ld8(bus, C, H));
    t[0x4D] = instr("LD C, L", 1, 1, |cpu, bus| cpu.exec_ld8(bus, C, L));
    t[0x4E] = instr("LD C, [HL]", 1, 2, |cpu, bus| cpu.exec_ld8(bus, C, IndirHl));
    t[0x4F] = instr("LD C, A", 1, 1, |cpu, bus| cpu.exec_ld8(bus, C, A));
    t[0x50] = instr("LD D, B", 1, 1, |cpu, bus| cpu.exec_ld8(bus, D, B));
    t[0x51] = instr("LD D, C", 1, 1, |cpu, bus| cpu.exec_ld8(bus, D, C));
    t[0x52] = instr("LD D, D", 1, 1, |cpu, bus| cpu.exec_ld8(bus, D, D));
    t[0x53] = instr("LD D, E", 1, 1, |cpu, bus| cpu.exec_ld8(bus, D, E));
    t[0x54] = instr("LD D, H", 1, 1, |cpu, bus| cpu.exec_ld8(bus, D, H));
    t[0x55] = instr("LD D, L", 1, 1, |cpu, bus| cpu.exec_ld8(bus, D, L));
    t[0x56] = instr("LD D, [HL]", 1, 2, |cpu, bus| cpu.exec_ld8(bus, D, IndirHl));
    t[0x57] = instr("LD D, A", 1, 1, |cpu, bus| cpu.exec_ld8(bus, D, A));
    t[0x58] = instr("LD E, B", 1, 1, |cpu, bus| cpu.exec_ld8(bus, E, B));
    t[0x59] = instr("LD E, C", 1, 1, |cpu, bus| cpu.exec_ld8(bus, E, C));
    t[0x5A] = instr("LD E, D", 1, 1, |cpu, bus| cpu.exec_ld8(bus, E, D));
    t[0x5B] = instr("LD E, E", 1, 1, |cpu, bus| cpu.exec_ld8(bus, E, E));
    t[0x5C] = instr("LD E, H", 1, 1, |cpu, bus| cpu.exec_ld8(bus, E, H));
    t[0x5D] = instr("LD E, L", 1, 1, |cpu, bus| cpu.exec_ld8(bus, E, L));
    t[0x5E] = instr("LD E, [HL]", 1, 2, |cpu, bus| cpu.exec_ld8(bus, E, IndirHl));
    t[0x5F] = instr("LD E, A", 1, 1, |cpu, bus| cpu.exec_ld8(bus, E, A));
    t[0x60] = instr("LD H, B", 1, 1, |cpu, bus| cpu.exec_ld8(bus, H, B));
    t[0x61] = instr("LD H, C", 1, 1, |cpu, bus| cpu.exec_ld8(bus, H, C));
    t[0x62] = instr("LD H, D", 1, 1, |cpu, bus| cpu.exec_ld8(bus, H, D));
    t[0x63] = instr("LD H, E", 1, 1, |cpu, bus| cpu.exec_ld8(bus, H, E));
    t[0x64] = instr("LD H, H", 1, 1, |cpu, bus| cpu.exec_ld8(bus, H, H));
    t[0x65] = instr("LD H, L", 1, 1, |cpu, bus| cpu.exec_ld8(bus, H, L));
    t[0x66] = instr("LD H, [HL]", 1, 2, |cpu, bus| cpu.exec_ld8(bus, H, IndirHl));
    t[0x67] = instr("LD H, A", 1, 1, |cpu, bus| cpu.exec_ld8(bus, H, A));
    t[0x68] = instr("LD L, B", 1, 1, |cpu, bus| cpu.exec_ld8(bus, L, B));
    t[0x69] = instr("LD L, C", 1, 1, |cpu, bus| cpu.exec_ld8(bus, L, C));
    t[0x6A] = instr("LD L, D", 1, 1, |cpu, bus| cpu.exec_ld8(bus, L, D));
    t[0x6B] = instr("LD L, E", 1, 1, |cpu, bus| cpu.exec_ld8(bus, L, E));
    t[0x6C] = instr("LD L, H", 1, 1, |cpu, bus| cpu.exec_ld8(bus, L, H));
    t[0x6D] = instr("LD L, L", 1, 1, |cpu, bus| cpu.exec_ld8(bus, L, L));
    t[0x6E] = instr("LD L, [HL]", 1, 2, |cpu, bus| cpu.exec_ld8(bus, L, IndirHl));
    t[0x6F] = instr("LD L, A", 1, 1, |cpu, bus| cpu.exec_ld8(bus, L, A));
    t[0x70] = instr("LD [HL], B", 1, 2, |cpu, bus| cpu.exec_ld8(bus, IndirHl, B));
    t[0x71] = instr("LD [HL], C", 1, 2, |cpu, bus| cpu.exec_ld8(bus, IndirHl, C));
    t[0x72] = instr("LD [HL], D", 1, 2, |cpu, bus| cpu.exec_ld8(bus, IndirHl, D));
    t[0x73] = instr("LD [HL], E", 1, 2, |cpu, bus| cpu.exec_ld8(bus, IndirHl, E));
    t[0x74] = instr("LD [HL], H", 1, 2, |cpu, bus| cpu.exec_ld8(bus, IndirHl, H));
    t[0x75] = instr("LD [HL], L", 1, 2, |cpu, bus| cpu.exec_ld8(bus, IndirHl, L));
    t[0x77] = instr("LD [HL], A", 1, 2, |cpu, bus| cpu.exec_ld8(bus, IndirHl, A));
    t[0x78] = instr("LD A, B", 1, 1, |cpu, bus| cpu.exec_ld8(bus, A, B));
    t[0x79] = instr("LD A, C", 1, 1, |cpu, bus| cpu.exec_ld8(bus, A, C));
    t[0x7A] = instr("LD A, D", 1, 1, |cpu, bus| cpu.exec_ld8(bus, A, D));
    t[0x7B] = instr("LD A, E", 1, 1, |cpu, bus| cpu.exec_ld8(bus, A, E));
    t[0x7C] = instr("LD A, H", 1, 1, |cpu, bus| cpu.exec_ld8(bus, A, H));
    t[0x7D] = instr("LD A, L", 1, 1, |cpu, bus| cpu.exec_ld8(bus, A, L));
    t[0x7E] = instr("LD A, [HL]", 1, 2, |cpu, bus| cpu.exec_ld8(bus, A, IndirHl));
    t[0x7F] = instr("LD A, A", 1, 1, |cpu, bus| cpu.exec_ld8(bus, A, A));

    // 8-bit immediate loads.
    t[0x06] = instr("LD B, n8", 2, 2, |cpu, bus| cpu.exec_ld8_imm(bus, B));
    t[0x0E] = instr("LD C, n8", 2, 2, |cpu, bus| cpu.exec_ld8_imm(bus, C));
    t[0x16] = instr("LD D, n8", 2, 2, |cpu, bus| cpu.exec_ld8_imm(bus, D));
    t[0x1E] = instr("LD E, n8", 2, 2, |cpu, bus| cpu.exec_ld8_imm(bus, E));
    t[0x26] = instr("LD H, n8", 2, 2, |cpu, bus| cpu.exec_ld8_imm(bus, H));
    t[0x2E] = instr("LD L, n8", 2, 2, |cpu, bus| cpu.exec_ld8_imm(bus, L));
    t[0x36] = instr("LD [HL], n8", 2, 3, |cpu, bus| cpu.exec_ld8_imm(bus, IndirHl));
    t[0x3E] = instr("LD A, n8", 2, 2, |cpu, bus| cpu.exec_ld8_imm(bus, A));

    // Accumulator transfers through 16-bit pairs (with HL post-inc/dec).
    t[0x02] = instr("LD [BC], A", 1, 2, |cpu, bus| {
        cpu.exec_ld_a_to_indir(bus, Reg16Indir::Bc)
    });
    t[0x12] = instr("LD [DE], A", 1, 2, |cpu, bus| {
        cpu.exec_ld_a_to_indir(bus, Reg16Indir::De)
    });
    t[0x22] = instr("LD [HL+], A", 1, 2, |cpu, bus| {
        cpu.exec_ld_a_to_indir(bus, Reg16Indir::Hli)
    });
    t[0x32] = instr("LD [HL-], A", 1, 2, |cpu, bus| {
        cpu.exec_ld_a_to_indir(bus, Reg16Indir::Hld)
    });
    t[0x0A] = instr("LD A, [BC]", 1, 2, |cpu, bus| {
        cpu.exec_ld_a_from_indir(bus, Reg16Indir::Bc)
    });
    t[0x1A] = instr("LD A, [DE]", 1, 2, |cpu, bus| {
        cpu.exec_ld_a_from_indir(bus, Reg16Indir::De)
    });
    t[0x2A] = instr("LD A, [HL+]", 1, 2, |cpu, bus| {
        cpu.exec_ld_a_from_indir(bus, Reg16Indir::Hli)
    });
    t[0x3A] = instr("LD A, [HL-]", 1, 2, |cpu, bus| {
        cpu.exec_ld_a_from_indir(bus, Reg16Indir::Hld)
    });

    // HRAM and absolute accumulator loads.
    t[0xE0] = instr("LDH [n8], A", 2, 3, |cpu, bus| {
        cpu.exec_ld_a_to_imm(bus, Imm8Dst::IndirHram)
    });
    t[0xF0] = instr("LDH A, [n8]", 2, 3, |cpu, bus| {
        cpu.exec_ld_a_from_imm(bus, Imm8Src::IndirHram)
    });
    t[0xE2] = instr("LDH [C], A", 1, 2, |cpu, bus| cpu.exec_ld8(bus, IndirHramC, A));
    t[0xF2] = instr("LDH A, [C]", 1, 2, |cpu, bus| cpu.exec_ld8(bus, A, IndirHramC));
    t[0xEA] = instr("LD [n16], A", 3, 4, |cpu, bus| {
        cpu.exec_ld_a_to_imm(bus, Imm8Dst::IndirAbsolute)
    });
    t[0xFA] = instr("LD A, [n16]", 3, 4, |cpu, bus| {
        cpu.exec_ld_a_from_imm(bus, Imm8Src::IndirAbsolute)
    });

    // 16-bit loads and stack plumbing.
    t[0x01] = instr("LD BC, n16", 3, 3, |cpu, bus| cpu.exec_ld16_imm(bus, Reg16::Bc));
    t[0x11] = instr("LD DE, n16", 3, 3, |cpu, bus| cpu.exec_ld16_imm(bus, Reg16::De));
    t[0x21] = instr("LD HL, n16", 3, 3, |cpu, bus| cpu.exec_ld16_imm(bus, Reg16::Hl));
    t[0x31] = instr("LD SP, n16", 3, 3, |cpu, bus| cpu.exec_ld16_imm(bus, Reg16::Sp));
    t[0x08] = instr("LD [n16], SP", 3, 5, |cpu, bus| cpu.exec_ld_imm16_sp(bus));
    t[0xF9] = instr("LD SP, HL", 1, 2, |cpu, _| cpu.exec_ld_sp_hl());
    t[0xF8] = instr("LD HL, SP + e8", 2, 3, |cpu, bus| cpu.exec_ld_hl_sp_e8(bus));
    t[0xC5] = instr("PUSH BC", 1, 4, |cpu, bus| cpu.exec_push(bus, Reg16Stack::Bc));
    t[0xD5] = instr("PUSH DE", 1, 4, |cpu, bus| cpu.exec_push(bus, Reg16Stack::De));
    t[0xE5] = instr("PUSH HL", 1, 4, |cpu, bus| cpu.exec_push(bus, Reg16Stack::Hl));
    t[0xF5] = instr("PUSH AF", 1, 4, |cpu, bus| cpu.exec_push(bus, Reg16Stack::Af));
    t[0xC1] = instr("POP BC", 1, 3, |cpu, bus| cpu.exec_pop(bus, Reg16Stack::Bc));
    t[0xD1] = instr("POP DE", 1, 3, |cpu, bus| cpu.exec_pop(bus, Reg16Stack::De));
    t[0xE1] = instr("POP HL", 1, 3, |cpu, bus| cpu.exec_pop(bus, Reg16Stack::Hl));
    t[0xF1] = instr("POP AF", 1, 3, |cpu, bus| cpu.exec_pop(bus, Reg16Stack::Af));

    // 8-bit arithmetic on A.
    t[0x80] = instr("ADD A, B", 1, 1, |cpu, bus| cpu.exec_add_a(bus, B, false));
    t[0x81] = instr("ADD A, C", 1, 1, |cpu, bus| cpu.exec_add_a(bus, C, false));
    t[0x82] = instr("ADD A, D", 1, 1, |cpu, bus| cpu.exec_add_a(bus, D, false));
    t[0x83] = instr("ADD A, E", 1, 1, |cpu, bus| cpu.exec_add_a(bus, E, false));
    t[0x84] = instr("ADD A, H", 1, 1, |cpu, bus| cpu.exec_add_a(bus, H, false));
    t[0x85] = instr("ADD A, L", 1, 1, |cpu, bus| cpu.exec_add_a(bus, L, false));
    t[0x86] = instr("ADD A, [HL]", 1, 2, |cpu, bus| cpu.exec_add_a(bus, IndirHl, false));
    t[0x87] = instr("ADD A, A", 1, 1, |cpu, bus| cpu.exec_add_a(bus, A, false));
    t[0x88] = instr("ADC A, B", 1, 1, |cpu, bus| cpu.exec_add_a(bus, B, true));
    t[0x89] = instr("ADC A, C", 1, 1, |cpu, bus| cpu.exec_add_a(bus, C, true));
    t[0x8A] = instr("ADC A, D", 1, 1, |cpu, bus| cpu.exec_add_a(bus, D, true));
    t[0x8B] = instr("ADC A, E", 1, 1, |cpu, bus| cpu.exec_add_a(bus, E, true));
    t[0x8C] = instr("ADC A, H", 1, 1, |cpu, bus| cpu.exec_add_a(bus, H, true));
    t[0x8D] = instr("ADC A, L", 1, 1, |cpu, bus| cpu.exec_add_a(bus, L, true));
    t[0x8E] = instr("ADC A, [HL]", 1, 2, |cpu, bus| cpu.exec_add_a(bus, IndirHl, true));
    t[0x8F] = instr("ADC A, A", 1, 1, |cpu, bus| cpu.exec_add_a(bus, A, true));
    t[0x90] = instr("SUB A, B", 1, 1, |cpu, bus| cpu.exec_sub_a(bus, B, false));
    t[0x91] = instr("SUB A, C", 1, 1, |cpu, bus| cpu.exec_sub_a(bus, C, false));
    t[0x92] = instr("SUB A, D", 1, 1, |cpu, bus| cpu.exec_sub_a(bus, D, false));
    t[0x93] = instr("SUB A, E", 1, 1, |cpu, bus| cpu.exec_sub_a(bus, E, false));
    t[0x94] = instr("SUB A, H", 1, 1, |cpu, bus| cpu.exec_sub_a(bus, H, false));
    t[0x95] = instr("SUB A, L", 1, 1, |cpu, bus| cpu.exec_sub_a(bus, L, false));
    t[0x96] = instr("SUB A, [HL]", 1, 2, |cpu, bus| cpu.exec_sub_a(bus, IndirHl, false));
    t[0x97] = instr("SUB A, A", 1, 1, |cpu, bus| cpu.exec_sub_a(bus, A, false));
    t[0x98] = instr("SBC A, B", 1, 1, |cpu, bus| cpu.exec_sub_a(bus, B, true));
    t[0x99] = instr("SBC A, C", 1, 1, |cpu, bus| cpu.exec_sub_a(bus, C, true));
    t[0x9A] = instr("SBC A, D", 1, 1, |cpu, bus| cpu.exec_sub_a(bus, D, true));
    t[0x9B] = instr("SBC A, E", 1, 1, |cpu, bus| cpu.exec_sub_a(bus, E, true));
    t[0x9C] = instr("SBC A, H", 1, 1, |cpu, bus| cpu.exec_sub_a(bus, H, true));
    t[0x9D] = instr("SBC A, L", 1, 1, |cpu, bus| cpu.exec_sub_a(bus, L, true));
    t[0x9E] = instr("SBC A, [HL]", 1, 2, |cpu, bus| cpu.exec_sub_a(bus, IndirHl, true));
    t[0x9F] = instr("SBC A, A", 1, 1, |cpu, bus| cpu.exec_sub_a(bus, A, true));
    t[0xC6] = instr("ADD A, n8", 2, 2, |cpu, bus| cpu.exec_add_a_imm(bus, false));
    t[0xCE] = instr("ADC A, n8", 2, 2, |cpu, bus| cpu.exec_add_a_imm(bus, true));
    t[0xD6] = instr("SUB A, n8", 2, 2, |cpu, bus| cpu.exec_sub_a_imm(bus, false));
    t[0xDE] = instr("SBC A, n8", 2, 2, |cpu, bus| cpu.exec_sub_a_imm(bus, true));

    // 8-bit logic on A.
    t[0xA0] = instr("AND A, B", 1, 1, |cpu, bus| cpu.exec_and_a(bus, B));
    t[0xA1] = instr("AND A, C", 1, 1, |cpu, bus| cpu.exec_and_a(bus, C));
    t[0xA2] = instr("AND A, D", 1, 1, |cpu, bus| cpu.exec_and_a(bus, D));
    t[0xA3] = instr("AND A, E", 1, 1, |cpu, bus| cpu.exec_and_a(bus, E));
    t[0xA4] = instr("AND A, H", 1, 1, |cpu, bus| cpu.exec_and_a(bus, H));
    t[0xA5] = instr("AND A, L", 1, 1, |cpu, bus| cpu.exec_and_a(bus, L));
    t[0xA6] = instr("AND A, [HL]", 1, 2, |cpu, bus| cpu.exec_and_a(bus, IndirHl));
    t[0xA7] = instr("AND A, A", 1, 1, |cpu, bus| cpu.exec_and_a(bus, A));
    t[0xA8] = instr("XOR A, B", 1, 1, |cpu, bus| cpu.exec_xor_a(bus, B));
    t[0xA9] = instr("XOR A, C", 1, 1, |cpu, bus| cpu.exec_xor_a(bus, C));
    t[0xAA] = instr("XOR A, D", 1, 1, |cpu, bus| cpu.exec_xor_a(bus, D));
    t[0xAB] = instr("XOR A, E", 1, 1, |cpu, bus| cpu.exec_xor_a(bus, E));
    t[0xAC] = instr("XOR A, H", 1, 1, |cpu, bus| cpu.exec_xor_a(bus, H));
    t[0xAD] = instr("XOR A, L", 1, 1, |cpu, bus| cpu.exec_xor_a(bus, L));
    t[0xAE] = instr("XOR A, [HL]", 1, 2, |cpu, bus| cpu.exec_xor_a(bus, IndirHl));
    t[0xAF] = instr("XOR A, A", 1, 1, |cpu, bus| cpu.exec_xor_a(bus, A));
    t[0xB0] = instr("OR A, B", 1, 1, |cpu, bus| cpu.exec_or_a(bus, B));
    t[0xB1] = instr("OR A, C", 1, 1, |cpu, bus| cpu.exec_or_a(bus, C));
    t[0xB2] = instr("OR A, D", 1, 1, |cpu, bus| cpu.exec_or_a(bus, D));
    t[0xB3] = instr("OR A, E", 1, 1, |cpu, bus| cpu.exec_or_a(bus, E));
    t[0xB4] = instr("OR A, H", 1, 1, |cpu, bus| cpu.exec_or_a(bus, H));
    t[0xB5] = instr("OR A, L", 1, 1, |cpu, bus| cpu.exec_or_a(bus, L));
    t[0xB6] = instr("OR A, [HL]", 1, 2, |cpu, bus| cpu.exec_or_a(bus, IndirHl));
    t[0xB7] = instr("OR A, A", 1, 1, |cpu, bus| cpu.exec_or_a(bus, A));
    t[0xB8] = instr("CP A, B", 1, 1, |cpu, bus| cpu.exec_cp_a(bus, B));
    t[0xB9] = instr("CP A, C", 1, 1, |cpu, bus| cpu.exec_cp_a(bus, C));
    t[0xBA] = instr("CP A, D", 1, 1, |cpu, bus| cpu.exec_cp_a(bus, D));
    t[0xBB] = instr("CP A, E", 1, 1, |cpu, bus| cpu.exec_cp_a(bus, E));
    t[0xBC] = instr("CP A, H", 1, 1, |cpu, bus| cpu.exec_cp_a(bus, H));
    t[0xBD] = instr("CP A, L", 1, 1, |cpu, bus| cpu.exec_cp_a(bus, L));
    t[0xBE] = instr("CP A, [HL]", 1, 2, |cpu, bus| cpu.exec_cp_a(bus, IndirHl));
    t[0xBF] = instr("CP A, A", 1, 1, |cpu, bus| cpu.exec_cp_a(bus, A));
    t[0xE6] = instr("AND A, n8", 2, 2, |cpu, bus| cpu.exec_and_a_imm(bus));
    t[0xEE] = instr("XOR A, n8", 2, 2, |cpu, bus| cpu.exec_xor_a_imm(bus));
    t[0xF6] = instr("OR A, n8", 2, 2, |cpu, bus| cpu.exec_or_a_imm(bus));
    t[0xFE] = instr("CP A, n8", 2, 2, |cpu, bus| cpu.exec_cp_a_imm(bus));

    // 8-bit increment/decrement.
    t[0x04] = instr("INC B", 1, 1, |cpu, bus| cpu.exec_inc8(bus, B));
    t[0x0C] = instr("INC C", 1, 1, |cpu, bus| cpu.exec_inc8(bus, C));
    t[0x14] = instr("INC D", 1, 1, |cpu, bus| cpu.exec_inc8(bus, D));
    t[0x1C] = instr("INC E", 1, 1, |cpu, bus| cpu.exec_inc8(bus, E));
    t[0x24] = instr("INC H", 1, 1, |cpu, bus| cpu.exec_inc8(bus, H));
    t[0x2C] = instr("INC L", 1, 1, |cpu, bus| cpu.exec_inc8(bus, L));
    t[0x34] = instr("INC [HL]", 1, 3, |cpu, bus| cpu.exec_inc8(bus, IndirHl));
    t[0x3C] = instr("INC A", 1, 1, |cpu, bus| cpu.exec_inc8(bus, A));
    t[0x05] = instr("DEC B", 1, 1, |cpu, bus| cpu.exec_dec8(bus, B));
    t[0x0D] = instr("DEC C", 1, 1, |cpu, bus| cpu.exec_dec8(bus, C));
    t[0x15] = instr("DEC D", 1, 1, |cpu, bus| cpu.exec_dec8(bus, D));
    t[0x1D] = instr("DEC E", 1, 1, |cpu, bus| cpu.exec_dec8(bus, E));
    t[0x25] = instr("DEC H", 1, 1, |cpu, bus| cpu.exec_dec8(bus, H));
    t[0x2D] = instr("DEC L", 1, 1, |cpu, bus| cpu.exec_dec8(bus, L));
    t[0x35] = instr("DEC [HL]", 1, 3, |cpu, bus| cpu.exec_dec8(bus, IndirHl));
    t[0x3D] = instr("DEC A", 1, 1, |cpu, bus| cpu.exec_dec8(bus, A));

    // 16-bit arithmetic.
    t[0x03] = instr("INC BC", 1, 2, |cpu, _| cpu.exec_inc16(Reg16::Bc));
    t[0x13] = instr("INC DE", 1, 2, |cpu, _| cpu.exec_inc16(Reg16::De));
    t[0x23] = instr("INC HL", 1, 2, |cpu, _| cpu.exec_inc16(Reg16::Hl));
    t[0x33] = instr("INC SP", 1, 2, |cpu, _| cpu.exec_inc16(Reg16::Sp));
    t[0x0B] = instr("DEC BC", 1, 2, |cpu, _| cpu.exec_dec16(Reg16::Bc));
    t[0x1B] = instr("DEC DE", 1, 2, |cpu, _| cpu.exec_dec16(Reg16::De));
    t[0x2B] = instr("DEC HL", 1, 2, |cpu, _| cpu.exec_dec16(Reg16::Hl));
    t[0x3B] = instr("DEC SP", 1, 2, |cpu, _| cpu.exec_dec16(Reg16::Sp));
    t[0x09] = instr("ADD HL, BC", 1, 2, |cpu, _| cpu.exec_add_hl(Reg16::Bc));
    t[0x19] = instr("ADD HL, DE", 1, 2, |cpu, _| cpu.exec_add_hl(Reg16::De));
    t[0x29] = instr("ADD HL, HL", 1, 2, |cpu, _| cpu.exec_add_hl(Reg16::Hl));
    t[0x39] = instr("ADD HL, SP", 1, 2, |cpu, _| cpu.exec_add_hl(Reg16::Sp));
    t[0xE8] = instr("ADD SP, e8", 2, 4, |cpu, bus| cpu.exec_add_sp_e8(bus));

    // Miscellaneous ALU.
    t[0x27] = instr("DAA", 1, 1, |cpu, _| cpu.exec_daa());
    t[0x2F] = instr("CPL", 1, 1, |cpu, _| cpu.exec_cpl());
    t[0x37] = instr("SCF", 1, 1, |cpu, _| cpu.exec_scf());
    t[0x3F] = instr("CCF", 1, 1, |cpu, _| cpu.exec_ccf());

    // Accumulator rotates (Z always cleared on this page).
    t[0x07] = instr("RLCA", 1, 1, |cpu, _| cpu.exec_rotate_a(Rotate::LeftCircular));
    t[0x0F] = instr("RRCA", 1, 1, |cpu, _| cpu.exec_rotate_a(Rotate::RightCircular));
    t[0x17] = instr("RLA", 1, 1, |cpu, _| cpu.exec_rotate_a(Rotate::Left));
    t[0x1F] = instr("RRA", 1, 1, |cpu, _| cpu.exec_rotate_a(Rotate::Right));

    // Control flow. Conditional entries carry the not-taken cost.
    t[0xC3] = instr("JP n16", 3, 4, |cpu, bus| cpu.exec_jp(bus));
    t[0xE9] = instr("JP HL", 1, 1, |cpu, _| cpu.exec_jp_hl());
    t[0xC2] = instr("JP NZ, n16", 3, 3, |cpu, bus| cpu.exec_jp_cc(bus, Condition::Nz));
    t[0xCA] = instr("JP Z, n16", 3, 3, |cpu, bus| cpu.exec_jp_cc(bus, Condition::Z));
    t[0xD2] = instr("JP NC, n16", 3, 3, |cpu, bus| cpu.exec_jp_cc(bus, Condition::Nc));
    t[0xDA] = instr("JP C, n16", 3, 3, |cpu, bus| cpu.exec_jp_cc(bus, Condition::C));
    t[0x18] = instr("JR e8", 2, 3, |cpu, bus| cpu.exec_jr(bus));
    t[0x20] = instr("JR NZ, e8", 2, 2, |cpu, bus| cpu.exec_jr_cc(bus, Condition::Nz));
    t[0x28] = instr("JR Z, e8", 2, 2, |cpu, bus| cpu.exec_jr_cc(bus, Condition::Z));
    t[0x30] = instr("JR NC, e8", 2, 2, |cpu, bus| cpu.exec_jr_cc(bus, Condition::Nc));
    t[0x38] = instr("JR C, e8", 2, 2, |cpu, bus| cpu.exec_jr_cc(bus, Condition::C));
    t[0xCD] = instr("CALL n16", 3, 6, |cpu, bus| cpu.exec_call(bus));
    t[0xC4] = instr("CALL NZ, n16", 3, 3, |cpu, bus| {
        cpu.exec_call_cc(bus, Condition::Nz)
    });
    t[0xCC] = instr("CALL Z, n16", 3, 3, |cpu, bus| cpu.exec_call_cc(bus, Condition::Z));
    t[0xD4] = instr("CALL NC, n16", 3, 3, |cpu, bus| {
        cpu.exec_call_cc(bus, Condition::Nc)
    });
    t[0xDC] = instr("CALL C, n16", 3, 3, |cpu, bus| cpu.exec_call_cc(bus, Condition::C));
    t[0xC9] = instr("RET", 1, 4, |cpu, bus| cpu.exec_ret(bus));
    t[0xC0] = instr("RET NZ", 1, 2, |cpu, bus| cpu.exec_ret_cc(bus, Condition::Nz));
    t[0xC8] = instr("RET Z", 1, 2, |cpu, bus| cpu.exec_ret_cc(bus, Condition::Z));
    t[0xD0] = instr("RET NC", 1, 2, |cpu, bus| cpu.exec_ret_cc(bus, Condition::Nc));
    t[0xD8] = instr("RET C", 1, 2, |cpu, bus| cpu.exec_ret_cc(bus, Condition::C));
    t[0xD9] = instr("RETI", 1, 4, |cpu, bus| cpu.exec_reti(bus));
    t[0xC7] = instr("RST $00", 1, 4, |cpu, bus| cpu.exec_rst(bus, 0x00));
    t[0xCF] = instr("RST $08", 1, 4, |cpu, bus| cpu.exec_rst(bus, 0x08));
    t[0xD7] = instr("RST $10", 1, 4, |cpu, bus| cpu.exec_rst(bus, 0x10));
    t[0xDF] = instr("RST $18", 1, 4, |cpu, bus| cpu.exec_rst(bus, 0x18));
    t[0xE7] = instr("RST $20", 1, 4, |cpu, bus| cpu.exec_rst(bus, 0x20));
    t[0xEF] = instr("RST $28", 1, 4, |cpu, bus| cpu.exec_rst(bus, 0x28));
    t[0xF7] = instr("RST $30", 1, 4, |cpu, bus| cpu.exec_rst(bus, 0x30));
    t[0xFF] = instr("RST $38", 1, 4, |cpu, bus| cpu.exec_rst(bus, 0x38));

    // Mode and interrupt control. The 0xCB slot is never consulted (step
    // intercepts the prefix before lookup) but stays populated so that
    // every non-illegal slot has an action.
    t[0x00] = instr("NOP", 1, 1, |cpu, _| cpu.exec_nop());
    t[0x76] = instr("HALT", 1, 1, |cpu, bus| cpu.exec_halt(bus));
    t[0x10] = instr("STOP", 2, 1, |cpu, bus| cpu.exec_stop(bus));
    t[0xF3] = instr("DI", 1, 1, |cpu, _| cpu.exec_di());
    t[0xFB] = instr("EI", 1, 1, |cpu, _| cpu.exec_ei());
    t[0xCB] = instr("PREFIX", 1, 1, |cpu, _| cpu.exec_nop());

    for opcode in ILLEGAL_OPCODES {
        debug_assert!(t[opcode as usize].execute.is_none());
    }

    t
}

fn new_cb_prefix_table() -> [Instruction; 256] {
    use Operand8::{IndirHl, A, B, C, D, E, H, L};

    let mut t = [ILLEGAL; 256];

    // Rotates.
    t[0x00] = instr("RLC B", 2, 2, |cpu, bus| {
        cpu.exec_rotate(bus, B, Rotate::LeftCircular)
    });
    t[0x01] = instr("RLC C", 2, 2, |cpu, bus| {
        cpu.exec_rotate(bus, C, Rotate::LeftCircular)
    });
    t[0x02] = instr("RLC D", 2, 2, |cpu, bus| {
        cpu.exec_rotate(bus, D, Rotate::LeftCircular)
    });
    t[0x03] = instr("RLC E", 2, 2, |cpu, bus| {
        cpu.exec_rotate(bus, E, Rotate::LeftCircular)
    });
    t[0x04] = instr("RLC H", 2, 2, |cpu, bus| {
        cpu.exec_rotate(bus, H, Rotate::LeftCircular)
    });
    t[0x05] = instr("RLC L", 2, 2, |cpu, bus| {
        cpu.exec_rotate(bus, L, Rotate::LeftCircular)
    });
    t[0x06] = instr("RLC [HL]", 2, 4, |cpu, bus| {
        cpu.exec_rotate(bus, IndirHl, Rotate::LeftCircular)
    });
    t[0x07] = instr("RLC A", 2, 2, |cpu, bus| {
        cpu.exec_rotate(bus, A, Rotate::LeftCircular)
    });
    t[0x08] = instr("RRC B", 2, 2, |cpu, bus| {
        cpu.exec_rotate(bus, B, Rotate::RightCircular)
    });
    t[0x09] = instr("RRC C", 2, 2, |cpu, bus| {
        cpu.exec_rotate(bus, C, Rotate::RightCircular)
    });
    t[0x0A] = instr("RRC D", 2, 2, |cpu, bus| {
        cpu.exec_rotate(bus, D, Rotate::RightCircular)
    });
    t[0x0B] = instr("RRC E", 2, 2, |cpu, bus| {
        cpu.exec_rotate(bus, E, Rotate::RightCircular)
    });
    t[0x0C] = instr("RRC H", 2, 2, |cpu, bus| {
        cpu.exec_rotate(bus, H, Rotate::RightCircular)
    });
    t[0x0D] = instr("RRC L", 2, 2, |cpu, bus| {
        cpu.exec_rotate(bus, L, Rotate::RightCircular)
    });
    t[0x0E] = instr("RRC [HL]", 2, 4, |cpu, bus| {
        cpu.exec_rotate(bus, IndirHl, Rotate::RightCircular)
    });
    t[0x0F] = instr("RRC A", 2, 2, |cpu, bus| {
        cpu.exec_rotate(bus, A, Rotate::RightCircular)
    });
    t[0x10] = instr("RL B", 2, 2, |cpu, bus| cpu.exec_rotate(bus, B, Rotate::Left));
    t[0x11] = instr("RL C", 2, 2, |cpu, bus| cpu.exec_rotate(bus, C, Rotate::Left));
    t[0x12] = instr("RL D", 2, 2, |cpu, bus| cpu.exec_rotate(bus, D, Rotate::Left));
    t[0x13] = instr("RL E", 2, 2, |cpu, bus| cpu.exec_rotate(bus, E, Rotate::Left));
    t[0x14] = instr("RL H", 2, 2, |cpu, bus| cpu.exec_rotate(bus, H, Rotate::Left));
    t[0x15] = instr("RL L", 2, 2, |cpu, bus| cpu.exec_rotate(bus, L, Rotate::Left));
    t[0x16] = instr("RL [HL]", 2, 4, |cpu, bus| {
        cpu.exec_rotate(bus, IndirHl, Rotate::Left)
    });
    t[0x17] = instr("RL A", 2, 2, |cpu, bus| cpu.exec_rotate(bus, A, Rotate::Left));
    t[0x18] = instr("RR B", 2, 2, |cpu, bus| cpu.exec_rotate(bus, B, Rotate::Right));
    t[0x19] = instr("RR C", 2, 2, |cpu, bus| cpu.exec_rotate(bus, C, Rotate::Right));
    t[0x1A] = instr("RR D", 2, 2, |cpu, bus| cpu.exec_rotate(bus, D, Rotate::Right));
    t[0x1B] = instr("RR E", 2, 2, |cpu, bus| cpu.exec_rotate(bus, E, Rotate::Right));
    t[0x1C] = instr("RR H", 2, 2, |cpu, bus| cpu.exec_rotate(bus, H, Rotate::Right));
    t[0x1D] = instr("RR L", 2, 2, |cpu, bus| cpu.exec_rotate(bus, L, Rotate::Right));
    t[0x1E] = instr("RR [HL]", 2, 4, |cpu, bus| {
        cpu.exec_rotate(bus, IndirHl, Rotate::Right)
    });
    t[0x1F] = instr("RR A", 2, 2, |cpu, bus| cpu.exec_rotate(bus, A, Rotate::Right));

    // Shifts and nibble swap.
    t[0x20] = instr("SLA B", 2, 2, |cpu, bus| {
        cpu.exec_shift(bus, B, Shift::LeftArithmetic)
    });
    t[0x21] = instr("SLA C", 2, 2, |cpu, bus| {
        cpu.exec_shift(bus, C, Shift::LeftArithmetic)
    });
    t[0x22] = instr("SLA D", 2, 2, |cpu, bus| {
        cpu.exec_shift(bus, D, Shift::LeftArithmetic)
    });
    t[0x23] = instr("SLA E", 2, 2, |cpu, bus| {
        cpu.exec_shift(bus, E, Shift::LeftArithmetic)
    });
    t[0x24] = instr("SLA H", 2, 2, |cpu, bus| {
        cpu.exec_shift(bus, H, Shift::LeftArithmetic)
    });
    t[0x25] = instr("SLA L", 2, 2, |cpu, bus| {
        cpu.exec_shift(bus, L, Shift::LeftArithmetic)
    });
    t[0x26] = instr("SLA [HL]", 2, 4, |cpu, bus| {
        cpu.exec_shift(bus, IndirHl, Shift::LeftArithmetic)
    });
    t[0x27] = instr("SLA A", 2, 2, |cpu, bus| {
        cpu.exec_shift(bus, A, Shift::LeftArithmetic)
    });
    t[0x28] = instr("SRA B", 2, 2, |cpu, bus| {
        cpu.exec_shift(bus, B, Shift::RightArithmetic)
    });
    t[0x29] = instr("SRA C", 2, 2, |cpu, bus| {
        cpu.exec_shift(bus, C, Shift::RightArithmetic)
    });
    t[0x2A] = instr("SRA D", 2, 2, |cpu, bus| {
        cpu.exec_shift(bus, D, Shift::RightArithmetic)
    });
    t[0x2B] = instr("SRA E", 2, 2, |cpu, bus| {
        cpu.exec_shift(bus, E, Shift::RightArithmetic)
    });
    t[0x2C] = instr("SRA H", 2, 2, |cpu, bus| {
        cpu.exec_shift(bus, H, Shift::RightArithmetic)
    });
    t[0x2D] = instr("SRA L", 2, 2, |cpu, bus| {
        cpu.exec_shift(bus, L, Shift::RightArithmetic)
    });
    t[0x2E] = instr("SRA [HL]", 2, 4, |cpu, bus| {
        cpu.exec_shift(bus, IndirHl, Shift::RightArithmetic)
    });
    t[0x2F] = instr("SRA A", 2, 2, |cpu, bus| {
        cpu.exec_shift(bus, A, Shift::RightArithmetic)
    });
    t[0x30] = instr("SWAP B", 2, 2, |cpu, bus| cpu.exec_swap(bus, B));
    t[0x31] = instr("SWAP C", 2, 2, |cpu, bus| cpu.exec_swap(bus, C));
    t[0x32] = instr("SWAP D", 2, 2, |cpu, bus| cpu.exec_swap(bus, D));
    t[0x33] = instr("SWAP E", 2, 2, |cpu, bus| cpu.exec_swap(bus, E));
    t[0x34] = instr("SWAP H", 2, 2, |cpu, bus| cpu.exec_swap(bus, H));
    t[0x35] = instr("SWAP L", 2, 2, |cpu, bus| cpu.exec_swap(bus, L));
    t[0x36] = instr("SWAP [HL]", 2, 4, |cpu, bus| cpu.exec_swap(bus, IndirHl));
    t[0x37] = instr("SWAP A", 2, 2, |cpu, bus| cpu.exec_swap(bus, A));
    t[0x38] = instr("SRL B", 2, 2, |cpu, bus| {
        cpu.exec_shift(bus, B, Shift::RightLogical)
    });
    t[0x39] = instr("SRL C", 2, 2, |cpu, bus| {
        cpu.exec_shift(bus, C, Shift::RightLogical)
    });
    t[0x3A] = instr("SRL D", 2, 2, |cpu, bus| {
        cpu.exec_shift(bus, D, Shift::RightLogical)
    });
    t[0x3B] = instr("SRL E", 2, 2, |cpu, bus| {
        cpu.exec_shift(bus, E, Shift::RightLogical)
    });
    t[0x3C] = instr("SRL H", 2, 2, |cpu, bus| {
        cpu.exec_shift(bus, H, Shift::RightLogical)
    });
    t[0x3D] = instr("SRL L", 2, 2, |cpu, bus| {
        cpu.exec_shift(bus, L, Shift::RightLogical)
    });
    t[0x3E] = instr("SRL [HL]", 2, 4, |cpu, bus| {
        cpu.exec_shift(bus, IndirHl, Shift::RightLogical)
    });
    t[0x3F] = instr("SRL A", 2, 2, |cpu, bus| {
        cpu.exec_shift(bus, A, Shift::RightLogical)
    });

    // BIT b, r.
    t[0x40] = instr("BIT 0, B", 2, 2, |cpu, bus| cpu.exec_bit(bus, 0, B));
    t[0x41] = instr("BIT 0, C", 2, 2, |cpu, bus| cpu.exec_bit(bus, 0, C));
    t[0x42] = instr("BIT 0, D", 2, 2, |cpu, bus| cpu.exec_bit(bus, 0, D));
    t[0x43] = instr("BIT 0, E", 2, 2, |cpu, bus| cpu.exec_bit(bus, 0, E));
    t[0x44] = instr("BIT 0, H", 2, 2, |cpu, bus| cpu.exec_bit(bus, 0, H));
    t[0x45] = instr("BIT 0, L", 2, 2, |cpu, bus| cpu.exec_bit(bus, 0, L));
    t[0x46] = instr("BIT 0, [HL]", 2, 3, |cpu, bus| cpu.exec_bit(bus, 0, IndirHl));
    t[0x47] = instr("BIT 0, A", 2, 2, |cpu, bus| cpu.exec_bit(bus, 0, A));
    t[0x48] = instr("BIT 1, B", 2, 2, |cpu, bus| cpu.exec_bit(bus, 1, B));
    t[0x49] = instr("BIT 1, C", 2, 2, |cpu, bus| cpu.exec_bit(bus, 1, C));
    t[0x4A] = instr("BIT 1, D", 2, 2, |cpu, bus| cpu.exec_bit(bus, 1, D));
    t[0x4B] = instr("BIT 1, E", 2, 2, |cpu, bus| cpu.exec_bit(bus, 1, E));
    t[0x4C] = instr("BIT 1, H", 2, 2, |cpu, bus| cpu.exec_bit(bus, 1, H));
    t[0x4D] = instr("BIT 1, L", 2, 2, |cpu, bus| cpu.exec_bit(bus, 1, L));
    t[0x4E] = instr("BIT 1, [HL]", 2, 3, |cpu, bus| cpu.exec_bit(bus, 1, IndirHl));
    t[0x4F] = instr("BIT 1, A", 2, 2, |cpu, bus| cpu.exec_bit(bus, 1, A));
    t[0x50] = instr("BIT 2, B", 2, 2, |cpu, bus| cpu.exec_bit(bus, 2, B));
    t[0x51] = instr("BIT 2, C", 2, 2, |cpu, bus| cpu.exec_bit(bus, 2, C));
    t[0x52] = instr("BIT 2, D", 2, 2, |cpu, bus| cpu.exec_bit(bus, 2, D));
    t[0x53] = instr("BIT 2, E", 2, 2, |cpu, bus| cpu.exec_bit(bus, 2, E));
    t[0x54] = instr("BIT 2, H", 2, 2, |cpu, bus| cpu.exec_bit(bus, 2, H));
    t[0x55] = instr("BIT 2, L", 2, 2, |cpu, bus| cpu.exec_bit(bus, 2, L));
    t[0x56] = instr("BIT 2, [HL]", 2, 3, |cpu, bus| cpu.exec_bit(bus, 2, IndirHl));
    t[0x57] = instr("BIT 2, A", 2, 2, |cpu, bus| cpu.exec_bit(bus, 2, A));
    t[0x58] = instr("BIT 3, B", 2, 2, |cpu, bus| cpu.exec_bit(bus, 3, B));
    t[0x59] = instr("BIT 3, C", 2, 2, |cpu, bus| cpu.exec_bit(bus, 3, C));
    t[0x5A] = instr("BIT 3, D", 2, 2, |cpu, bus| cpu.exec_bit(bus, 3, D));
    t[0x5B] = instr("BIT 3, E", 2, 2, |cpu, bus| cpu.exec_bit(bus, 3, E));
    t[0x5C] = instr("BIT 3, H", 2, 2, |cpu, bus| cpu.exec_bit(bus, 3, H));
    t[0x5D] = instr("BIT 3, L", 2, 2, |cpu, bus| cpu.exec_bit(bus, 3, L));
    t[0x5E] = instr("BIT 3, [HL]", 2, 3, |cpu, bus| cpu.exec_bit(bus, 3, IndirHl));
    t[0x5F] = instr("BIT 3, A", 2, 2, |cpu, bus| cpu.exec_bit(bus, 3, A));
    t[0x60] = instr("BIT 4, B", 2, 2, |cpu, bus| cpu.exec_bit(bus, 4, B));
    t[0x61] = instr("BIT 4, C", 2, 2, |cpu, bus| cpu.exec_bit(bus, 4, C));
    t[0x62] = instr("BIT 4, D", 2, 2, |cpu, bus| cpu.exec_bit(bus, 4, D));
    t[0x63] = instr("BIT 4, E", 2, 2, |cpu, bus| cpu.exec_bit(bus, 4, E));
    t[0x64] = instr("BIT 4, H", 2, 2, |cpu, bus| cpu.exec_bit(bus, 4, H));
    t[0x65] = instr("BIT 4, L", 2, 2, |cpu, bus| cpu.exec_bit(bus, 4, L));
    t[0x66] = instr("BIT 4, [HL]", 2, 3, |cpu, bus| cpu.exec_bit(bus, 4, IndirHl));
    t[0x67] = instr("BIT 4, A", 2, 2, |cpu, bus| cpu.exec_bit(bus, 4, A));
    t[0x68] = instr("BIT 5, B", 2, 2, |cpu, bus| cpu.exec_bit(bus, 5, B));
    t[0x69] = instr("BIT 5, C", 2, 2, |cpu, bus| cpu.exec_bit(bus, 5, C));
    t[0x6A] = instr("BIT 5, D", 2, 2, |cpu, bus| cpu.exec_bit(bus, 5, D));
    t[0x6B] = instr("BIT 5, E", 2, 2, |cpu, bus| cpu.exec_bit(bus, 5, E));
    t[0x6C] = instr("BIT 5, H", 2, 2, |cpu, bus| cpu.exec_bit(bus, 5, H));
    t[0x6D] = instr("BIT 5, L", 2, 2, |cpu, bus| cpu.exec_bit(bus, 5, L));
    t[0x6E] = instr("BIT 5, [HL]", 2, 3, |cpu, bus| cpu.exec_bit(bus, 5, IndirHl));
    t[0x6F] = instr("BIT 5, A", 2, 2, |cpu, bus| cpu.exec_bit(bus, 5, A));
    t[0x70] = instr("BIT 6, B", 2, 2, |cpu, bus| cpu.exec_bit(bus, 6, B));
    t[0x71] = instr("BIT 6, C", 2, 2, |cpu, bus| cpu.exec_bit(bus, 6, C));
    t[0x72] = instr("BIT 6, D", 2, 2, |cpu, bus| cpu.exec_bit(bus, 6, D));
    t[0x73] = instr("BIT 6, E", 2, 2, |cpu, bus| cpu.exec_bit(bus, 6, E));
    t[0x74] = instr("BIT 6, H", 2, 2, |cpu, bus| cpu.exec_bit(bus, 6, H));
    t[0x75] = instr("BIT 6, L", 2, 2, |cpu, bus| cpu.exec_bit(bus, 6, L));
    t[0x76] = instr("BIT 6, [HL]", 2, 3, |cpu, bus| cpu.exec_bit(bus, 6, IndirHl));
    t[0x77] = instr("BIT 6, A", 2, 2, |cpu, bus| cpu.exec_bit(bus, 6, A));
    t[0x78] = instr("BIT 7, B", 2, 2, |cpu, bus| cpu.exec_bit(bus, 7, B));
    t[0x79] = instr("BIT 7, C", 2, 2, |cpu, bus| cpu.exec_bit(bus, 7, C));
    t[0x7A] = instr("BIT 7, D", 2, 2, |cpu, bus| cpu.exec_bit(bus, 7, D));
    t[0x7B] = instr("BIT 7, E", 2, 2, |cpu, bus| cpu.exec_bit(bus, 7, E));
    t[0x7C] = instr("BIT 7, H", 2, 2, |cpu, bus| cpu.exec_bit(bus, 7, H));
    t[0x7D] = instr("BIT 7, L", 2, 2, |cpu, bus| cpu.exec_bit(bus, 7, L));
    t[0x7E] = instr("BIT 7, [HL]", 2, 3, |cpu, bus| cpu.exec_bit(bus, 7, IndirHl));
    t[0x7F] = instr("BIT 7, A", 2, 2, |cpu, bus| cpu.exec_bit(bus, 7, A));

    // RES b, r.
    t[0x80] = instr("RES 0, B", 2, 2, |cpu, bus| cpu.exec_res(bus, 0, B));
    t[0x81] = instr("RES 0, C", 2, 2, |cpu, bus| cpu.exec_res(bus, 0, C));
    t[0x82] = instr("RES 0, D", 2, 2, |cpu, bus| cpu.exec_res(bus, 0, D));
    t[0x83] = instr("RES 0, E", 2, 2, |cpu, bus| cpu.exec_res(bus, 0, E));
    t[0x84] = instr("RES 0, H", 2, 2, |cpu, bus| cpu.exec_res(bus, 0, H));
    t[0x85] = instr("RES 0, L", 2, 2, |cpu, bus| cpu.exec_res(bus, 0, L));
    t[0x86] = instr("RES 0, [HL]", 2, 4, |cpu, bus| cpu.exec_res(bus, 0, IndirHl));
    t[0x87] = instr("RES 0, A", 2, 2, |cpu, bus| cpu.exec_res(bus, 0, A));
    t[0x88] = instr("RES 1, B", 2, 2, |cpu, bus| cpu.exec_res(bus, 1, B));
    t[0x89] = instr("RES 1, C", 2, 2, |cpu, bus| cpu.exec_res(bus, 1, C));
    t[0x8A] = instr("RES 1, D", 2, 2, |cpu, bus| cpu.exec_res(bus, 1, D));
    t[0x8B] = instr("RES 1, E", 2, 2, |cpu, bus| cpu.exec_res(bus, 1, E));
    t[0x8C] = instr("RES 1, H", 2, 2, |cpu, bus| cpu.exec_res(bus, 1, H));
    t[0x8D] = instr("RES 1, L", 2, 2, |cpu, bus| cpu.exec_res(bus, 1, L));
    t[0x8E] = instr("RES 1, [HL]", 2, 4, |cpu, bus| cpu.exec_res(bus, 1, IndirHl));
    t[0x8F] = instr("RES 1, A", 2, 2, |cpu, bus| cpu.exec_res(bus, 1, A));
    t[0x90] = instr("RES 2, B", 2, 2, |cpu, bus| cpu.exec_res(bus, 2, B));
    t[0x91] = instr("RES 2, C", 2, 2, |cpu, bus| cpu.exec_res(bus, 2, C));
    t[0x92] = instr("RES 2, D", 2, 2, |cpu, bus| cpu.exec_res(bus, 2, D));
    t[0x93] = instr("RES 2, E", 2, 2, |cpu, bus| cpu.exec_res(bus, 2, E));
    t[0x94] = instr("RES 2, H", 2, 2, |cpu, bus| cpu.exec_res(bus, 2, H));
    t[0x95] = instr("RES 2, L", 2, 2, |cpu, bus| cpu.exec_res(bus, 2, L));
    t[0x96] = instr("RES 2, [HL]", 2, 4, |cpu, bus| cpu.exec_res(bus, 2, IndirHl));
    t[0x97] = instr("RES 2, A", 2, 2, |cpu, bus| cpu.exec_res(bus, 2, A));
    t[0x98] = instr("RES 3, B", 2, 2, |cpu, bus| cpu.exec_res(bus, 3, B));
    t[0x99] = instr("RES 3, C", 2, 2, |cpu, bus| cpu.exec_res(bus, 3, C));
    t[0x9A] = instr("RES 3, D", 2, 2, |cpu, bus| cpu.exec_res(bus, 3, D));
    t[0x9B] = instr("RES 3, E", 2, 2, |cpu, bus| cpu.exec_res(bus, 3, E));
    t[0x9C] = instr("RES 3, H", 2, 2, |cpu, bus| cpu.exec_res(bus, 3, H));
    t[0x9D] = instr("RES 3, L", 2, 2, |cpu, bus| cpu.exec_res(bus, 3, L));
    t[0x9E] = instr("RES 3, [HL]", 2, 4, |cpu, bus| cpu.exec_res(bus, 3, IndirHl));
    t[0x9F] = instr("RES 3, A", 2, 2, |cpu, bus| cpu.exec_res(bus, 3, A));
    t[0xA0] = instr("RES 4, B", 2, 2, |cpu, bus| cpu.exec_res(bus, 4, B));
    t[0xA1] = instr("RES 4, C", 2, 2, |cpu, bus| cpu.exec_res(bus, 4, C));
    t[0xA2] = instr("RES 4, D", 2, 2, |cpu, bus| cpu.exec_res(bus, 4, D));
    t[0xA3] = instr("RES 4, E", 2, 2, |cpu, bus| cpu.exec_res(bus, 4, E));
    t[0xA4] = instr("RES 4, H", 2, 2, |cpu, bus| cpu.exec_res(bus, 4, H));
    t[0xA5] = instr("RES 4, L", 2, 2, |cpu, bus| cpu.exec_res(bus, 4, L));
    t[0xA6] = instr("RES 4, [HL]", 2, 4, |cpu, bus| cpu.exec_res(bus, 4, IndirHl));
    t[0xA7] = instr("RES 4, A", 2, 2, |cpu, bus| cpu.exec_res(bus, 4, A));
    t[0xA8] = instr("RES 5, B", 2, 2, |cpu, bus| cpu.exec_res(bus, 5, B));
    t[0xA9] = instr("RES 5, C", 2, 2, |cpu, bus| cpu.exec_res(bus, 5, C));
    t[0xAA] = instr("RES 5, D", 2, 2, |cpu, bus| cpu.exec_res(bus, 5, D));
    t[0xAB] = instr("RES 5, E", 2, 2, |cpu, bus| cpu.exec_res(bus, 5, E));
    t[0xAC] = instr("RES 5, H", 2, 2, |cpu, bus| cpu.exec_res(bus, 5, H));
    t[0xAD] = instr("RES 5, L", 2, 2, |cpu, bus| cpu.exec_res(bus, 5, L));
    t[0xAE] = instr("RES 5, [HL]", 2, 4, |cpu, bus| cpu.exec_res(bus, 5, IndirHl));
    t[0xAF] = instr("RES 5, A", 2, 2, |cpu, bus| cpu.exec_res(bus, 5, A));
    t[0xB0] = instr("RES 6, B", 2, 2, |cpu, bus| cpu.exec_res(bus, 6, B));
    t[0xB1] = instr("RES 6, C", 2, 2, |cpu, bus| cpu.exec_res(bus, 6, C));
    t[0xB2] = instr("RES 6, D", 2, 2, |cpu, bus| cpu.exec_res(bus, 6, D));
    t[0xB3] = instr("RES 6, E", 2, 2, |cpu, bus| cpu.exec_res(bus, 6, E));
    t[0xB4] = instr("RES 6, H", 2, 2, |cpu, bus| cpu.exec_res(bus, 6, H));
    t[0xB5] = instr("RES 6, L", 2, 2, |cpu, bus| cpu.exec_res(bus, 6, L));
    t[0xB6] = instr("RES 6, [HL]", 2, 4, |cpu, bus| cpu.exec_res(bus, 6, IndirHl));
    t[0xB7] = instr("RES 6, A", 2, 2, |cpu, bus| cpu.exec_res(bus, 6, A));
    t[0xB8] = instr("RES 7, B", 2, 2, |cpu, bus| cpu.exec_res(bus, 7, B));
    t[0xB9] = instr("RES 7, C", 2, 2, |cpu, bus| cpu.exec_res(bus, 7, C));
    t[0xBA] = instr("RES 7, D", 2, 2, |cpu, bus| cpu.exec_res(bus, 7, D));
    t[0xBB] = instr("RES 7, E", 2, 2, |cpu, bus| cpu.exec_res(bus, 7, E));
    t[0xBC] = instr("RES 7, H", 2, 2, |cpu, bus| cpu.exec_res(bus, 7, H));
    t[0xBD] = instr("RES 7, L", 2, 2, |cpu, bus| cpu.exec_res(bus, 7, L));
    t[0xBE] = instr("RES 7, [HL]", 2, 4, |cpu, bus| cpu.exec_res(bus, 7, IndirHl));
    t[0xBF] = instr("RES 7, A", 2, 2, |cpu, bus| cpu.exec_res(bus, 7, A));

    // SET b, r.
    t[0xC0] = instr("SET 0, B", 2, 2, |cpu, bus| cpu.exec_set(bus, 0, B));
    t[0xC1] = instr("SET 0, C", 2, 2, |cpu, bus| cpu.exec_set(bus, 0, C));
    t[0xC2] = instr("SET 0, D", 2, 2, |cpu, bus| cpu.exec_set(bus, 0, D));
    t[0xC3] = instr("SET 0, E", 2, 2, |cpu, bus| cpu.exec_set(bus, 0, E));
    t[0xC4] = instr("SET 0, H", 2, 2, |cpu, bus| cpu.exec_set(bus, 0, H));
    t[0xC5] = instr("SET 0, L", 2, 2, |cpu, bus| cpu.exec_set(bus, 0, L));
    t[0xC6] = instr("SET 0, [HL]", 2, 4, |cpu, bus| cpu.exec_set(bus, 0, IndirHl));
    t[0xC7] = instr("SET 0, A", 2, 2, |cpu, bus| cpu.exec_set(bus, 0, A));
    t[0xC8] = instr("SET 1, B", 2, 2, |cpu, bus| cpu.exec_set(bus, 1, B));
    t[0xC9] = instr("SET 1, C", 2, 2, |cpu, bus| cpu.exec_set(bus, 1, C));
    t[0xCA] = instr("SET 1, D", 2, 2, |cpu, bus| cpu.exec_set(bus, 1, D));
    t[0xCB] = instr("SET 1, E", 2, 2, |cpu, bus| cpu.exec_set(bus, 1, E));
    t[0xCC] = instr("SET 1, H", 2, 2, |cpu, bus| cpu.exec_set(bus, 1, H));
    t[0xCD] = instr("SET 1, L", 2, 2, |cpu, bus| cpu.exec_set(bus, 1, L));
    t[0xCE] = instr("SET 1, [HL]", 2, 4, |cpu, bus| cpu.exec_set(bus, 1, IndirHl));
    t[0xCF] = instr("SET 1, A", 2, 2, |cpu, bus| cpu.exec_set(bus, 1, A));
    t[0xD0] = instr("SET 2, B", 2, 2, |cpu, bus| cpu.exec_set(bus, 2, B));
    t[0xD1] = instr("SET 2, C", 2, 2, |cpu, bus| cpu.exec_set(bus, 2, C));
    t[0xD2] = instr("SET 2, D", 2, 2, |cpu, bus| cpu.exec_set(bus, 2, D));
    t[0xD3] = instr("SET 2, E", 2, 2, |cpu, bus| cpu.exec_set(bus, 2, E));
    t[0xD4] = instr("SET 2, H", 2, 2, |cpu, bus| cpu.exec_set(bus, 2, H));
    t[0xD5] = instr("SET 2, L", 2, 2, |cpu, bus| cpu.exec_set(bus, 2, L));
    t[0xD6] = instr("SET 2, [HL]", 2, 4, |cpu, bus| cpu.exec_set(bus, 2, IndirHl));
    t[0xD7] = instr("SET 2, A", 2, 2, |cpu, bus| cpu.exec_set(bus, 2, A));
    t[0xD8] = instr("SET 3, B", 2, 2, |cpu, bus| cpu.exec_set(bus, 3, B));
    t[0xD9] = instr("SET 3, C", 2, 2, |cpu, bus| cpu.exec_set(bus, 3, C));
    t[0xDA] = instr("SET 3, D", 2, 2, |cpu, bus| cpu.exec_set(bus, 3, D));
    t[0xDB] = instr("SET 3, E", 2, 2, |cpu, bus| cpu.exec_set(bus, 3, E));
    t[0xDC] = instr("SET 3, H", 2, 2, |cpu, bus| cpu.exec_set(bus, 3, H));
    t[0xDD] = instr("SET 3, L", 2, 2, |cpu, bus| cpu.exec_set(bus, 3, L));
    t[0xDE] = instr("SET 3, [HL]", 2, 4, |cpu, bus| cpu.exec_set(bus, 3, IndirHl));
    t[0xDF] = instr("SET 3, A", 2, 2, |cpu, bus| cpu.exec_set(bus, 3, A));
    t[0xE0] = instr("SET 4, B", 2, 2, |cpu, bus| cpu.exec_set(bus, 4, B));
    t[0xE1] = instr("SET 4, C", 2, 2, |cpu, bus| cpu.exec_set(bus, 4, C));
    t[0xE2] = instr("SET 4, D", 2, 2, |cpu, bus| cpu.exec_set(bus, 4, D));
    t[0xE3] = instr("SET 4, E", 2, 2, |cpu, bus| cpu.exec_set(bus, 4, E));
    t[0xE4] = instr("SET 4, H", 2, 2, |cpu, bus| cpu.exec_set(bus, 4, H));
    t[0xE5] = instr("SET 4, L", 2, 2, |cpu, bus| cpu.exec_set(bus, 4, L));
    t[0xE6] = instr("SET 4, [HL]", 2, 4, |cpu, bus| cpu.exec_set(bus, 4, IndirHl));
    t[0xE7] = instr("SET 4, A", 2, 2, |cpu, bus| cpu.exec_set(bus, 4, A));
    t[0xE8] = instr("SET 5, B", 2, 2, |cpu, bus| cpu.exec_set(bus, 5, B));
    t[0xE9] = instr("SET 5, C", 2, 2, |cpu, bus| cpu.exec_set(bus, 5, C));
    t[0xEA] = instr("SET 5, D", 2, 2, |cpu, bus| cpu.exec_set(bus, 5, D));
    t[0xEB] = instr("SET 5, E", 2, 2, |cpu, bus| cpu.exec_set(bus, 5, E));
    t[0xEC] = instr("SET 5, H", 2, 2, |cpu, bus| cpu.exec_set(bus, 5, H));
    t[0xED] = instr("SET 5, L", 2, 2, |cpu, bus| cpu.exec_set(bus, 5, L));
    t[0xEE] = instr("SET 5, [HL]", 2, 4, |cpu, bus| cpu.exec_set(bus, 5, IndirHl));
    t[0xEF] = instr("SET 5, A", 2, 2, |cpu, bus| cpu.exec_set(bus, 5, A));
    t[0xF0] = instr("SET 6, B", 2, 2, |cpu, bus| cpu.exec_set(bus, 6, B));
    t[0xF1] = instr("SET 6, C", 2, 2, |cpu, bus| cpu.exec_set(bus, 6, C));
    t[0xF2] = instr("SET 6, D", 2, 2, |cpu, bus| cpu.exec_set(bus, 6, D));
    t[0xF3] = instr("SET 6, E", 2, 2, |cpu, bus| cpu.exec_set(bus, 6, E));
    t[0xF4] = instr("SET 6, H", 2, 2, |cpu, bus| cpu.exec_set(bus, 6, H));
    t[0xF5] = instr("SET 6, L", 2, 2, |cpu, bus| cpu.exec_set(bus, 6, L));
    t[0xF6] = instr("SET 6, [HL]", 2, 4, |cpu, bus| cpu.exec_set(bus, 6, IndirHl));
    t[0xF7] = instr("SET 6, A", 2, 2, |cpu, bus| cpu.exec_set(bus, 6, A));
    t[0xF8] = instr("SET 7, B", 2, 2, |cpu, bus| cpu.exec_set(bus, 7, B));
    t[0xF9] = instr("SET 7, C", 2, 2, |cpu, bus| cpu.exec_set(bus, 7, C));
    t[0xFA] = instr("SET 7, D", 2, 2, |cpu, bus| cpu.exec_set(bus, 7, D));
    t[0xFB] = instr("SET 7, E", 2, 2, |cpu, bus| cpu.exec_set(bus, 7, E));
    t[0xFC] = instr("SET 7, H", 2, 2, |cpu, bus| cpu.exec_set(bus, 7, H));
    t[0xFD] = instr("SET 7, L", 2, 2, |cpu, bus| cpu.exec_set(bus, 7, L));
    t[0xFE] = instr("SET 7, [HL]", 2, 4, |cpu, bus| cpu.exec_set(bus, 7, IndirHl));
    t[0xFF] = instr("SET 7, A", 2, 2, |cpu, bus| cpu.exec_set(bus, 7, A));

    t
}
