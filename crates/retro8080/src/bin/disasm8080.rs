use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Disassemble an Intel 8080 program image, one instruction per line.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Raw binary image, disassembled from offset 0
    path: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let image = retro8080::read_image(&args.path)?;
    log::info!(
        "Loaded '{}' into buffer ({} bytes)",
        args.path.display(),
        image.len()
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    retro8080::write_listing(&image, &mut out).context("failed to write listing")?;
    out.flush().context("failed to write listing")?;
    Ok(())
}
