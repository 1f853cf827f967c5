use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use dmgcore::{GameBoy, SCREEN_HEIGHT, SCREEN_WIDTH};

const USAGE: &str = "Usage: dmg_frame_dump <rom_path> <out_rgb24_path> [frames]";

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let (Some(rom_path), Some(out_path)) = (args.next(), args.next()) else {
        bail!(USAGE);
    };
    let rom_path = PathBuf::from(rom_path);
    let out_path = PathBuf::from(out_path);
    let frames: u32 = match args.next() {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("invalid frame count '{arg}'\n{USAGE}"))?,
        None => 60,
    };

    let rom = std::fs::read(&rom_path)
        .with_context(|| format!("failed to read ROM '{}'", rom_path.display()))?;

    let mut gb = GameBoy::new();
    let header = gb
        .load_rom(&rom)
        .with_context(|| format!("failed to load '{}'", rom_path.display()))?;

    for _ in 0..frames {
        gb.step_frame()
            .with_context(|| format!("'{}' stopped after {} cycles", header.title, gb.cycles()))?;
    }

    let buffer = gb.sink().to_rgb24();
    std::fs::write(&out_path, &buffer)
        .with_context(|| format!("failed to write '{}'", out_path.display()))?;

    println!(
        "Wrote {} bytes ({}x{} rgb24) after {} frames to '{}'",
        buffer.len(),
        SCREEN_WIDTH,
        SCREEN_HEIGHT,
        frames,
        out_path.display()
    );

    let serial = gb.take_serial_output();
    if !serial.is_empty() {
        println!("Serial output:\n{}", String::from_utf8_lossy(&serial));
    }

    Ok(())
}
