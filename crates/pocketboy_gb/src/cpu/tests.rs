use super::opcodes::{self, ILLEGAL_OPCODES};
use super::*;
use crate::bus::{Bus, IoReg, MemoryBus};
use crate::cpu::interrupts::{self, Interrupt};

/// Fresh core plus a flat bus with `program` placed at the reset PC.
fn cpu_with_program(program: &[u8]) -> (Cpu, MemoryBus) {
    let mut bus = MemoryBus::new();
    bus.load(0x0100, program);
    (Cpu::new(), bus)
}

fn flags(cpu: &Cpu) -> (bool, bool, bool, bool) {
    (
        cpu.regs.is_flag_set(Flag::Z),
        cpu.regs.is_flag_set(Flag::N),
        cpu.regs.is_flag_set(Flag::H),
        cpu.regs.is_flag_set(Flag::C),
    )
}

#[test]
fn reset_state_matches_dmg_post_boot() {
    let cpu = Cpu::new();
    assert_eq!(cpu.regs.a, 0x01);
    assert_eq!(cpu.regs.f, 0x80);
    assert_eq!(cpu.regs.b, 0x00);
    assert_eq!(cpu.regs.c, 0x13);
    assert_eq!(cpu.regs.d, 0x00);
    assert_eq!(cpu.regs.e, 0xD8);
    assert_eq!(cpu.regs.h, 0x01);
    assert_eq!(cpu.regs.l, 0x4D);
    assert_eq!(cpu.regs.sp, 0xFFFE);
    assert_eq!(cpu.regs.pc, 0x0100);
    assert!(cpu.ime);
    assert_eq!(cpu.mode(), Mode::Running);
    assert_eq!(cpu.mcycles(), 0);
    assert_eq!(cpu.tstates(), 0);
}

#[test]
fn decode_tables_are_fully_populated() {
    let (no_prefix, cb_prefix) = opcodes::tables();

    for opcode in 0x00..=0xFFusize {
        let entry = &no_prefix[opcode];
        if ILLEGAL_OPCODES.contains(&(opcode as u8)) {
            assert!(entry.execute.is_none(), "0x{opcode:02X} should be illegal");
            assert_eq!(entry.mnemonic, "???");
        } else {
            assert!(
                entry.execute.is_some(),
                "0x{opcode:02X} is missing an action"
            );
            assert!((1..=3).contains(&entry.length), "0x{opcode:02X} length");
            assert_eq!(
                entry.tstates,
                entry.mcycles * 4,
                "0x{opcode:02X} T-state ratio"
            );
        }
    }

    for opcode in 0x00..=0xFFusize {
        let entry = &cb_prefix[opcode];
        assert!(
            entry.execute.is_some(),
            "CB 0x{opcode:02X} is missing an action"
        );
        assert_eq!(entry.length, 2, "CB 0x{opcode:02X} length");
        assert_eq!(
            entry.tstates,
            entry.mcycles * 4,
            "CB 0x{opcode:02X} T-state ratio"
        );
    }
}

#[test]
fn register_load_chain() {
    // LD A, 0x42; LD B, A; LD A, B
    let (mut cpu, mut bus) = cpu_with_program(&[0x3E, 0x42, 0x47, 0x78]);
    cpu.regs.a = 0x00;

    for _ in 0..3 {
        cpu.step(&mut bus).unwrap();
    }

    assert_eq!(cpu.regs.a, 0x42);
    assert_eq!(cpu.regs.b, 0x42);
    assert_eq!(cpu.regs.pc, 0x0104);
    assert_eq!(cpu.mcycles(), 4);
    assert_eq!(cpu.tstates(), 16);
}

#[test]
fn add_with_carry_out_and_half_carry() {
    // ADD A, 0xC6 with A = 0x3A wraps to zero with both carries.
    let (mut cpu, mut bus) = cpu_with_program(&[0xC6, 0xC6]);
    cpu.regs.a = 0x3A;
    cpu.regs.f = 0x00;

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(flags(&cpu), (true, false, true, true));
    assert_eq!(cpu.mcycles(), 2);
}

#[test]
fn sbc_with_borrow() {
    // SBC A, B with A == B and carry-in set leaves 0xFF and every borrow.
    let (mut cpu, mut bus) = cpu_with_program(&[0x98]);
    cpu.regs.a = 0x3E;
    cpu.regs.b = 0x3E;
    cpu.regs.f = 0x00;
    cpu.regs.set_flag(Flag::C);

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.a, 0xFF);
    assert_eq!(flags(&cpu), (false, true, true, true));
    assert_eq!(cpu.mcycles(), 1);
}

#[test]
fn jr_not_taken_vs_taken() {
    // JR NZ, +5 with Z set falls through in 2 m-cycles.
    let (mut cpu, mut bus) = cpu_with_program(&[0x20, 0x05]);
    cpu.regs.f = 0x00;
    cpu.regs.set_flag(Flag::Z);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0x0102);
    assert_eq!(cpu.mcycles(), 2);

    // Same program with Z clear branches and costs the extra cycle.
    let (mut cpu, mut bus) = cpu_with_program(&[0x20, 0x05]);
    cpu.regs.f = 0x00;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0x0107);
    assert_eq!(cpu.mcycles(), 3);
}

#[test]
fn call_then_ret_round_trips() {
    // CALL 0x0200 at 0x0100; RET at 0x0200.
    let (mut cpu, mut bus) = cpu_with_program(&[0xCD, 0x00, 0x02]);
    bus.write_byte(0x0200, 0xC9);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0x0200);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    // Return address 0x0103: high byte at the lower stack address.
    assert_eq!(bus.read_byte(0xFFFC), 0x01);
    assert_eq!(bus.read_byte(0xFFFD), 0x03);
    assert_eq!(cpu.mcycles(), 6);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0x0103);
    assert_eq!(cpu.regs.sp, 0xFFFE);
    assert_eq!(cpu.mcycles(), 10);
}

#[test]
fn rla_shifts_through_carry() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x17]);
    cpu.regs.a = 0x80;
    cpu.regs.f = 0x00;

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(flags(&cpu), (false, false, false, true));
    assert_eq!(cpu.mcycles(), 1);
}

#[test]
fn bit_test_on_hl_indirect() {
    // BIT 4, [HL] then BIT 3, [HL] against 0b0001_0000.
    let (mut cpu, mut bus) = cpu_with_program(&[0xCB, 0x66, 0xCB, 0x5E]);
    cpu.regs.set_hl(0xC000);
    bus.write_byte(0xC000, 0b0001_0000);
    cpu.regs.f = 0x00;
    cpu.regs.set_flag(Flag::C);

    cpu.step(&mut bus).unwrap();
    assert_eq!(flags(&cpu), (false, false, true, true));
    assert_eq!(cpu.mcycles(), 3);

    cpu.step(&mut bus).unwrap();
    assert!(cpu.regs.is_flag_set(Flag::Z));
}

#[test]
fn inc_wraps_and_preserves_carry() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x3C]);
    cpu.regs.a = 0xFF;
    cpu.regs.f = 0x00;
    cpu.regs.set_flag(Flag::C);

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(flags(&cpu), (true, false, true, true));
}

#[test]
fn dec_wraps_and_preserves_carry() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x3D]);
    cpu.regs.a = 0x00;
    cpu.regs.f = 0x00;
    cpu.regs.set_flag(Flag::C);

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.a, 0xFF);
    assert_eq!(flags(&cpu), (false, true, true, true));
}

#[test]
fn add_overflow_boundary() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xC6, 0xFF]);
    cpu.regs.a = 0x01;
    cpu.regs.f = 0x00;

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(flags(&cpu), (true, false, true, true));
}

#[test]
fn sub_underflow_boundary() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xD6, 0x01]);
    cpu.regs.a = 0x00;
    cpu.regs.f = 0x00;

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.a, 0xFF);
    assert_eq!(flags(&cpu), (false, true, true, true));
}

#[test]
fn add_hl_hl_carries_out_of_bit_15() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x29]);
    cpu.regs.set_hl(0x8000);
    cpu.regs.f = 0x00;
    cpu.regs.set_flag(Flag::Z);

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.hl(), 0x0000);
    // Z is untouched by ADD HL.
    assert_eq!(flags(&cpu), (true, false, false, true));
    assert_eq!(cpu.mcycles(), 2);
}

#[test]
fn ld_hl_sp_plus_offset_flags_from_low_byte() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xF8, 0x08]);
    cpu.regs.sp = 0xFFF8;
    cpu.regs.f = 0x00;

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.hl(), 0x0000);
    assert_eq!(flags(&cpu), (false, false, true, true));
    assert_eq!(cpu.mcycles(), 3);
}

#[test]
fn add_sp_negative_offset() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xE8, 0xFE]);
    cpu.regs.sp = 0xFFFE;
    cpu.regs.f = 0x00;

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.sp, 0xFFFC);
    // Low-byte addition 0xFE + 0xFE overflows both nibble and byte.
    assert_eq!(flags(&cpu), (false, false, true, true));
    assert_eq!(cpu.mcycles(), 4);
}

#[test]
fn daa_after_addition() {
    // 0x38 + 0x38 = 0x70 with no carries needs no adjustment.
    let (mut cpu, mut bus) = cpu_with_program(&[0x87, 0x27]);
    cpu.regs.a = 0x38;
    cpu.regs.f = 0x00;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x70);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x70);
    assert_eq!(flags(&cpu), (false, false, false, false));

    // 0x09 + 0x01 = 0x0A adjusts the low nibble to 0x10.
    let (mut cpu, mut bus) = cpu_with_program(&[0xC6, 0x01, 0x27]);
    cpu.regs.a = 0x09;
    cpu.regs.f = 0x00;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x0A);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x10);
    assert!(!cpu.regs.is_flag_set(Flag::C));
}

#[test]
fn daa_after_subtraction() {
    // BCD 0x42 - 0x09 = 0x33: the half-borrow drives a 0x06 correction.
    let (mut cpu, mut bus) = cpu_with_program(&[0xD6, 0x09, 0x27]);
    cpu.regs.a = 0x42;
    cpu.regs.f = 0x00;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x39);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x33);
    assert!(cpu.regs.is_flag_set(Flag::N));
    assert!(!cpu.regs.is_flag_set(Flag::H));
}

#[test]
fn push_pop_round_trips() {
    // PUSH BC; POP DE
    let (mut cpu, mut bus) = cpu_with_program(&[0xC5, 0xD1]);
    cpu.regs.set_bc(0xBEEF);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.sp, 0xFFFC);
    // PUSH leaves the low byte at the final SP.
    assert_eq!(bus.read_byte(0xFFFC), 0xEF);
    assert_eq!(bus.read_byte(0xFFFD), 0xBE);
    assert_eq!(cpu.mcycles(), 4);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.de(), 0xBEEF);
    assert_eq!(cpu.regs.sp, 0xFFFE);
    assert_eq!(cpu.mcycles(), 7);
}

#[test]
fn pop_af_zeroes_the_low_nibble() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xF1]);
    cpu.regs.sp = 0xFFFC;
    bus.write_byte(0xFFFC, 0xFF); // would-be F
    bus.write_byte(0xFFFD, 0x12); // A

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.a, 0x12);
    assert_eq!(cpu.regs.f, 0xF0);
    assert_eq!(cpu.regs.sp, 0xFFFE);
}

#[test]
fn push_af_then_pop_af_preserves_the_visible_f() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xF5, 0xF1]);
    cpu.regs.a = 0x42;
    cpu.regs.f = 0xA0;

    cpu.step(&mut bus).unwrap();
    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.af(), 0x42A0);
}

#[test]
fn swap_twice_is_identity() {
    // SWAP A twice.
    let (mut cpu, mut bus) = cpu_with_program(&[0xCB, 0x37, 0xCB, 0x37]);
    cpu.regs.a = 0x5C;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0xC5);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x5C);
}

#[test]
fn cpl_twice_restores_a_and_ccf_twice_restores_c() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x2F, 0x2F, 0x3F, 0x3F]);
    cpu.regs.a = 0x5A;
    cpu.regs.f = 0x00;
    cpu.regs.set_flag(Flag::C);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0xA5);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x5A);

    cpu.step(&mut bus).unwrap();
    assert!(!cpu.regs.is_flag_set(Flag::C));
    cpu.step(&mut bus).unwrap();
    assert!(cpu.regs.is_flag_set(Flag::C));
}

#[test]
fn jr_minus_two_loops_in_place() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x18, 0xFE]);
    for _ in 0..3 {
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.regs.pc, 0x0100);
    }
    assert_eq!(cpu.mcycles(), 9);
}

#[test]
fn jp_and_jp_hl() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xC3, 0x00, 0xC0]);
    bus.write_byte(0xC000, 0xE9); // JP HL
    cpu.regs.set_hl(0x0150);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0xC000);
    assert_eq!(cpu.mcycles(), 4);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0x0150);
    assert_eq!(cpu.mcycles(), 5);
}

#[test]
fn conditional_call_and_ret_timing() {
    // CALL NC taken: 6 m-cycles; RET NC at the target not taken: 2.
    let (mut cpu, mut bus) = cpu_with_program(&[0xD4, 0x00, 0x02]);
    bus.write_byte(0x0200, 0xD0); // RET NC
    cpu.regs.f = 0x00;

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0x0200);
    assert_eq!(cpu.mcycles(), 6);

    cpu.regs.set_flag(Flag::C);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0x0201);
    assert_eq!(cpu.mcycles(), 8);

    // CALL NC not taken costs 3 and falls through.
    let (mut cpu, mut bus) = cpu_with_program(&[0xD4, 0x00, 0x02]);
    cpu.regs.f = 0x00;
    cpu.regs.set_flag(Flag::C);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0x0103);
    assert_eq!(cpu.mcycles(), 3);

    // RET Z taken costs 5.
    let (mut cpu, mut bus) = cpu_with_program(&[0xC8]);
    cpu.regs.sp = 0xFFFC;
    bus.write_word(0xFFFC, 0x0200);
    cpu.regs.set_flag(Flag::Z);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0x0200);
    assert_eq!(cpu.mcycles(), 5);
}

#[test]
fn rst_jumps_to_fixed_vector() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xEF]); // RST $28
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0x0028);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(bus.read_word(0xFFFC), 0x0101);
    assert_eq!(cpu.mcycles(), 4);
}

#[test]
fn ld_imm16_sp_stores_low_byte_first() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x08, 0x34, 0x12]);
    cpu.regs.sp = 0xFFFE;

    cpu.step(&mut bus).unwrap();

    assert_eq!(bus.read_byte(0x1234), 0xFE);
    assert_eq!(bus.read_byte(0x1235), 0xFF);
    assert_eq!(cpu.regs.pc, 0x0103);
    assert_eq!(cpu.mcycles(), 5);
}

#[test]
fn hram_load_forms() {
    // LDH [n8], A; LDH A, [C]; LDH [C], A; LDH A, [n8]
    let (mut cpu, mut bus) = cpu_with_program(&[0xE0, 0x80, 0xF2, 0xE2, 0xF0, 0x81]);
    cpu.regs.a = 0x42;
    cpu.regs.c = 0x81;
    bus.write_byte(0xFF81, 0x99);

    cpu.step(&mut bus).unwrap();
    assert_eq!(bus.read_byte(0xFF80), 0x42);
    assert_eq!(cpu.mcycles(), 3);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x99);
    assert_eq!(cpu.mcycles(), 5);

    cpu.regs.a = 0x17;
    cpu.step(&mut bus).unwrap();
    assert_eq!(bus.read_byte(0xFF81), 0x17);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x17);
    assert_eq!(cpu.regs.pc, 0x0106);
}

#[test]
fn absolute_accumulator_loads() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xEA, 0x00, 0xC1, 0xFA, 0x00, 0xC1]);
    cpu.regs.a = 0x7E;

    cpu.step(&mut bus).unwrap();
    assert_eq!(bus.read_byte(0xC100), 0x7E);
    assert_eq!(cpu.mcycles(), 4);

    cpu.regs.a = 0x00;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x7E);
    assert_eq!(cpu.mcycles(), 8);
}

#[test]
fn hl_post_increment_and_decrement() {
    // LD [HL+], A; LD [HL-], A; LD A, [HL+]
    let (mut cpu, mut bus) = cpu_with_program(&[0x22, 0x32, 0x2A]);
    cpu.regs.set_hl(0xC000);
    cpu.regs.a = 0x11;

    cpu.step(&mut bus).unwrap();
    assert_eq!(bus.read_byte(0xC000), 0x11);
    assert_eq!(cpu.regs.hl(), 0xC001);

    cpu.regs.a = 0x22;
    cpu.step(&mut bus).unwrap();
    assert_eq!(bus.read_byte(0xC001), 0x22);
    assert_eq!(cpu.regs.hl(), 0xC000);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x11);
    assert_eq!(cpu.regs.hl(), 0xC001);
}

#[test]
fn read_modify_write_on_hl() {
    // INC [HL]; CB SET 7, [HL]; CB RES 0, [HL]
    let (mut cpu, mut bus) = cpu_with_program(&[0x34, 0xCB, 0xFE, 0xCB, 0x86]);
    cpu.regs.set_hl(0xC000);
    bus.write_byte(0xC000, 0x0F);

    cpu.step(&mut bus).unwrap();
    assert_eq!(bus.read_byte(0xC000), 0x10);
    assert!(cpu.regs.is_flag_set(Flag::H));
    assert_eq!(cpu.mcycles(), 3);

    cpu.step(&mut bus).unwrap();
    assert_eq!(bus.read_byte(0xC000), 0x90);
    assert_eq!(cpu.mcycles(), 7);

    cpu.step(&mut bus).unwrap();
    assert_eq!(bus.read_byte(0xC000), 0x90);
    assert_eq!(cpu.mcycles(), 11);
}

#[test]
fn cb_shifts() {
    // SLA A with the top bit set.
    let (mut cpu, mut bus) = cpu_with_program(&[0xCB, 0x27]);
    cpu.regs.a = 0x80;
    cpu.regs.f = 0x00;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(flags(&cpu), (true, false, false, true));
    assert_eq!(cpu.mcycles(), 2);

    // SRA B keeps the sign bit.
    let (mut cpu, mut bus) = cpu_with_program(&[0xCB, 0x28]);
    cpu.regs.b = 0x81;
    cpu.regs.f = 0x00;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.b, 0xC0);
    assert_eq!(flags(&cpu), (false, false, false, true));

    // SRL B clears the sign bit.
    let (mut cpu, mut bus) = cpu_with_program(&[0xCB, 0x38]);
    cpu.regs.b = 0x81;
    cpu.regs.f = 0x00;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.b, 0x40);
    assert_eq!(flags(&cpu), (false, false, false, true));
}

#[test]
fn cb_rotates_wire_carry_correctly() {
    // RLC B rotates through itself.
    let (mut cpu, mut bus) = cpu_with_program(&[0xCB, 0x00]);
    cpu.regs.b = 0x80;
    cpu.regs.f = 0x00;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.b, 0x01);
    assert!(cpu.regs.is_flag_set(Flag::C));

    // RL B shifts the old carry in.
    let (mut cpu, mut bus) = cpu_with_program(&[0xCB, 0x10]);
    cpu.regs.b = 0x80;
    cpu.regs.f = 0x00;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.b, 0x00);
    assert!(cpu.regs.is_flag_set(Flag::Z));
    assert!(cpu.regs.is_flag_set(Flag::C));

    // RRC A vs RR A on the same input.
    let (mut cpu, mut bus) = cpu_with_program(&[0xCB, 0x0F]);
    cpu.regs.a = 0x01;
    cpu.regs.f = 0x00;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x80);
    assert!(cpu.regs.is_flag_set(Flag::C));

    let (mut cpu, mut bus) = cpu_with_program(&[0xCB, 0x1F]);
    cpu.regs.a = 0x01;
    cpu.regs.f = 0x00;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.regs.is_flag_set(Flag::Z));
    assert!(cpu.regs.is_flag_set(Flag::C));
}

#[test]
fn illegal_opcode_surfaces_with_diagnostics() {
    for opcode in ILLEGAL_OPCODES {
        let (mut cpu, mut bus) = cpu_with_program(&[opcode]);
        let err = cpu.step(&mut bus).unwrap_err();
        assert_eq!(
            err,
            CpuError::IllegalOpcode {
                mnemonic: "???",
                opcode,
                pc: 0x0101,
            }
        );
        // PC stays just past the fetched byte; nothing else advanced.
        assert_eq!(cpu.regs.pc, 0x0101);
        assert_eq!(cpu.mcycles(), 0);
    }

    let (mut cpu, mut bus) = cpu_with_program(&[0xD3]);
    let err = cpu.step(&mut bus).unwrap_err();
    assert_eq!(err.to_string(), "illegal opcode ??? (0xD3) at PC 0x0101");
}

#[test]
fn interrupt_dispatch_vblank_priority_and_cost() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x00]);
    cpu.regs.pc = 0x1234;
    cpu.ime = true;
    bus.write_io_reg(IoReg::Ie, 0x1F);
    bus.write_io_reg(IoReg::If, 0x01);

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.pc, 0x0040);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(bus.read_word(0xFFFC), 0x1234);
    assert!(!cpu.ime);
    assert_eq!(bus.read_io_reg(IoReg::If), 0x00);
    assert_eq!(cpu.mcycles(), 5);
    assert_eq!(cpu.tstates(), 20);
}

#[test]
fn interrupt_priority_order() {
    // LCD and Joypad both pending: LCD wins.
    let (mut cpu, mut bus) = cpu_with_program(&[0x00]);
    bus.write_io_reg(IoReg::Ie, 0x1F);
    interrupts::request_interrupt(&mut bus, Interrupt::Lcd);
    interrupts::request_interrupt(&mut bus, Interrupt::Joypad);

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.pc, Interrupt::Lcd.vector());
    // The Joypad line is still flagged.
    assert!(interrupts::is_interrupt_pending(&mut bus, Interrupt::Joypad));
    assert!(!interrupts::is_interrupt_pending(&mut bus, Interrupt::Lcd));
}

#[test]
fn interrupt_masked_by_ie() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x00]);
    bus.write_io_reg(IoReg::Ie, 0x00);
    interrupts::request_interrupt(&mut bus, Interrupt::Timer);

    cpu.step(&mut bus).unwrap();

    // No dispatch: the NOP ran instead.
    assert_eq!(cpu.regs.pc, 0x0101);
    assert_eq!(cpu.mcycles(), 1);
}

#[test]
fn halt_idles_until_interrupt() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x76, 0x00]);
    cpu.ime = true;

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.mode(), Mode::Halted);
    assert_eq!(cpu.mcycles(), 1);

    // Halted with nothing pending: one idle m-cycle per step.
    cpu.step(&mut bus).unwrap();
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0x0101);
    assert_eq!(cpu.mcycles(), 3);

    // A pending line dispatches straight out of HALT.
    bus.write_io_reg(IoReg::Ie, 0x04);
    interrupts::request_interrupt(&mut bus, Interrupt::Timer);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, Interrupt::Timer.vector());
    assert_eq!(cpu.mode(), Mode::Running);
    assert_eq!(cpu.mcycles(), 8);
}

#[test]
fn halt_wakes_without_dispatch_when_ime_clear() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x76, 0x00]);
    cpu.ime = false;

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.mode(), Mode::Halted);

    bus.write_io_reg(IoReg::Ie, 0x04);
    interrupts::request_interrupt(&mut bus, Interrupt::Timer);
    cpu.step(&mut bus).unwrap();

    // Woke up and executed the NOP; the IF bit survives.
    assert_eq!(cpu.regs.pc, 0x0102);
    assert!(!cpu.ime);
    assert!(interrupts::is_interrupt_pending(&mut bus, Interrupt::Timer));
}

#[test]
fn halt_bug_fetches_the_next_byte_twice() {
    // HALT with IME clear and a line already pending: INC A runs twice.
    let (mut cpu, mut bus) = cpu_with_program(&[0x76, 0x3C, 0x00]);
    cpu.ime = false;
    cpu.regs.a = 0x00;
    bus.write_io_reg(IoReg::Ie, 0x01);
    interrupts::request_interrupt(&mut bus, Interrupt::VBlank);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.mode(), Mode::Running);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x01);
    assert_eq!(cpu.regs.pc, 0x0101);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x02);
    assert_eq!(cpu.regs.pc, 0x0102);
}

#[test]
fn stop_consumes_padding_and_requires_external_wake() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x10, 0x00, 0x04]);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.mode(), Mode::Stopped);
    assert_eq!(cpu.regs.pc, 0x0102);
    assert_eq!(cpu.mcycles(), 1);

    // Stepping a stopped core is a no-op with zero cycle delta.
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.mcycles(), 1);
    assert_eq!(cpu.regs.pc, 0x0102);

    cpu.wake();
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.b, 0x01); // INC B ran
}

#[test]
fn ei_di_and_reti() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xF3, 0xFB]);
    cpu.step(&mut bus).unwrap();
    assert!(!cpu.ime);
    cpu.step(&mut bus).unwrap();
    assert!(cpu.ime);

    let (mut cpu, mut bus) = cpu_with_program(&[0xD9]);
    cpu.ime = false;
    cpu.regs.sp = 0xFFFC;
    bus.write_word(0xFFFC, 0x0200);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0x0200);
    assert!(cpu.ime);
    assert_eq!(cpu.mcycles(), 4);
}

#[test]
fn f_low_nibble_stays_zero_across_a_program() {
    // A mix of arithmetic, rotates, stack, and flag ops.
    let program = [
        0x3E, 0x0F, // LD A, 0x0F
        0xC6, 0x01, // ADD A, 0x01
        0x17, // RLA
        0xF5, // PUSH AF
        0x37, // SCF
        0x3F, // CCF
        0xF1, // POP AF
        0xCB, 0x37, // SWAP A
    ];
    let (mut cpu, mut bus) = cpu_with_program(&program);

    let mut steps = 0;
    while steps < 9 {
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.regs.f & 0x0F, 0, "low nibble of F leaked");
        steps += 1;
    }
    assert_eq!(cpu.tstates(), cpu.mcycles() * 4);
}

#[test]
fn inc_then_dec_restores_the_register() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x04, 0x05, 0x05, 0x04]);
    cpu.regs.b = 0x42;

    cpu.step(&mut bus).unwrap();
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.b, 0x42);

    cpu.step(&mut bus).unwrap();
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.b, 0x42);
}

#[test]
fn sixteen_bit_inc_dec_do_not_touch_flags() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x03, 0x0B]);
    cpu.regs.set_bc(0xFFFF);
    cpu.regs.f = 0xF0;

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.bc(), 0x0000);
    assert_eq!(cpu.regs.f, 0xF0);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.bc(), 0xFFFF);
    assert_eq!(cpu.regs.f, 0xF0);
    assert_eq!(cpu.mcycles(), 4);
}

#[test]
fn and_or_xor_flag_profiles() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xA0, 0xB0, 0xA8]);
    cpu.regs.a = 0xF0;
    cpu.regs.b = 0x0F;
    cpu.regs.f = 0x00;

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(flags(&cpu), (true, false, true, false));

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x0F);
    assert_eq!(flags(&cpu), (false, false, false, false));

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(flags(&cpu), (true, false, false, false));
}

#[test]
fn cp_leaves_a_untouched() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xFE, 0x42]);
    cpu.regs.a = 0x42;
    cpu.regs.f = 0x00;

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.a, 0x42);
    assert_eq!(flags(&cpu), (true, true, false, false));
}
