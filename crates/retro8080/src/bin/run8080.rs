use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use retro8080::{format_registers, parse_address, parse_boundary};
use retro8080_cpu::{Machine, MachineConfig, UndocumentedOpcodes};

/// Run an Intel 8080 program image on the Space Invaders memory map.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Raw binary image
    path: PathBuf,
    /// Number of instructions to execute
    #[arg(short, long, default_value_t = 1000)]
    steps: u64,
    /// Initial program counter (hex)
    #[arg(long, value_parser = parse_address, default_value = "0")]
    entry: u16,
    /// Initial stack pointer (hex)
    #[arg(long, value_parser = parse_address, default_value = "2400")]
    stack_top: u16,
    /// Address the image is loaded at (hex)
    #[arg(long, value_parser = parse_address, default_value = "0")]
    load_address: u16,
    /// First address past the read-only region (hex)
    #[arg(long, value_parser = parse_boundary, default_value = "2000")]
    rom_end: usize,
    /// First address past writable RAM (hex)
    #[arg(long, value_parser = parse_boundary, default_value = "4000")]
    ram_end: usize,
    /// Execute undocumented opcodes as their documented aliases
    #[arg(long)]
    alias_undocumented: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = MachineConfig::builder()
        .rom_end(args.rom_end)
        .ram_end(args.ram_end)
        .entry_point(args.entry)
        .stack_top(args.stack_top)
        .load_address(args.load_address)
        .undocumented(if args.alias_undocumented {
            UndocumentedOpcodes::Alias
        } else {
            UndocumentedOpcodes::Reject
        })
        .build();
    let mut machine = Machine::new(config).context("invalid machine configuration")?;

    let image = retro8080::read_image(&args.path)?;
    machine
        .load_program(&image)
        .with_context(|| format!("failed to load '{}'", args.path.display()))?;
    log::info!(
        "Loaded '{}' at {:04x} ({} bytes)",
        args.path.display(),
        machine.config().load_address,
        image.len()
    );

    let result = machine.run(args.steps);
    let summary = match &result {
        Ok(summary) => *summary,
        Err(stop) => stop.summary,
    };

    println!("{}", format_registers(machine.cpu()));
    let faults = machine.write_fault_count();
    if faults > 0 {
        println!("write faults: {faults}");
    }
    println!("steps={} cycles={}", summary.steps, summary.cycles);

    result?;
    Ok(())
}
