//! Shared plumbing for the `disasm8080` and `run8080` binaries.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use retro8080_cpu::{listing, Cpu8080, MEMORY_SIZE};

/// Read a whole program image into memory.
///
/// The buffer is reserved up front from the file length, so an image too big
/// to hold fails with an error rather than aborting the process.
pub fn read_image(path: &Path) -> Result<Vec<u8>> {
    let mut file = File::open(path)
        .with_context(|| format!("failed to open program image '{}'", path.display()))?;
    let len = file
        .metadata()
        .with_context(|| format!("failed to stat program image '{}'", path.display()))?
        .len();
    let len = usize::try_from(len)
        .with_context(|| format!("program image '{}' is too large", path.display()))?;

    let mut image = Vec::new();
    image
        .try_reserve_exact(len)
        .with_context(|| format!("failed to allocate {len} bytes for '{}'", path.display()))?;
    file.read_to_end(&mut image)
        .with_context(|| format!("failed to read program image '{}'", path.display()))?;
    Ok(image)
}

/// Write one line per instruction, from offset 0 to the end of `image`.
pub fn write_listing<W: Write>(image: &[u8], out: &mut W) -> io::Result<()> {
    for instruction in listing(image) {
        writeln!(out, "{instruction}")?;
    }
    Ok(())
}

/// Register and flag dump used by `run8080`.
pub fn format_registers(cpu: &Cpu8080) -> String {
    let f = cpu.flags;
    format!(
        "PC={:04X} SP={:04X} A={:02X} BC={:04X} DE={:04X} HL={:04X} F={:02X} \
         (Z={} S={} P={} CY={} AC={})",
        cpu.pc,
        cpu.sp,
        cpu.a,
        cpu.bc(),
        cpu.de(),
        cpu.hl(),
        f.to_psw(),
        f.z as u8,
        f.s as u8,
        f.p as u8,
        f.cy as u8,
        f.ac as u8,
    )
}

fn parse_hex(s: &str) -> Result<usize, String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .or_else(|| s.strip_prefix('$'))
        .unwrap_or(s);
    usize::from_str_radix(digits, 16).map_err(|e| format!("'{s}' is not a hex address: {e}"))
}

/// clap value parser for a 16-bit address written in hex (`2400`, `0x2400`
/// or `$2400`).
pub fn parse_address(s: &str) -> Result<u16, String> {
    let value = parse_hex(s)?;
    u16::try_from(value).map_err(|_| format!("'{s}' does not fit in 16 bits"))
}

/// clap value parser for a region boundary. Unlike an address it may equal
/// the size of the address space.
pub fn parse_boundary(s: &str) -> Result<usize, String> {
    let value = parse_hex(s)?;
    if value > MEMORY_SIZE {
        return Err(format!("'{s}' lies beyond the 64 KiB address space"));
    }
    Ok(value)
}
