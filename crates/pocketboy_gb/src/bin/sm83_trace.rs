//! Load a flat ROM image and step the SM83 core, tracing each instruction.
//!
//! Run with `RUST_LOG=debug` to see the per-instruction decode records.

use anyhow::{Context, Result};

use pocketboy_gb::{Cpu, MemoryBus, Mode};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let rom_path = args
        .next()
        .context("usage: sm83_trace <rom-image> [max-steps]")?;
    let max_steps: u64 = match args.next() {
        Some(arg) => arg.parse().context("max-steps must be an integer")?,
        None => 1_000_000,
    };

    let rom = std::fs::read(&rom_path).with_context(|| format!("failed to read {rom_path}"))?;
    log::info!("loaded {} ({} bytes)", rom_path, rom.len());

    let mut bus = MemoryBus::new();
    bus.load(0x0000, &rom);

    let mut cpu = Cpu::new();
    let mut steps = 0u64;
    while steps < max_steps {
        if cpu.mode() == Mode::Stopped {
            log::info!("CPU stopped after {steps} instructions");
            break;
        }
        if let Err(err) = cpu.step(&mut bus) {
            log::error!("{err}");
            break;
        }
        steps += 1;
    }

    let regs = &cpu.regs;
    println!(
        "steps={} mcycles={} tstates={} AF={:04X} BC={:04X} DE={:04X} HL={:04X} SP={:04X} PC={:04X}",
        steps,
        cpu.mcycles(),
        cpu.tstates(),
        regs.af(),
        regs.bc(),
        regs.de(),
        regs.hl(),
        regs.sp,
        regs.pc,
    );
    Ok(())
}
