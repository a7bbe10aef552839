#![forbid(unsafe_code)]

mod generator;
mod json_io;

use anyhow::Result;

const DEFAULT_COUNT: usize = 12;
const OUTPUT_PATH: &str = "palette-seeds.json";

/// Generate a seed pigment set and write it as a backend config file.
///
/// Usage: `tool-palette-gen [count]`
pub fn run() -> Result<()> {
    let count = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<usize>().ok())
        .unwrap_or(DEFAULT_COUNT);

    let swatches = generator::perceptual_wheel(count);
    let path = json_io::save_pigments_json(OUTPUT_PATH, &swatches)?;
    println!("wrote {} pigments to {}", swatches.len(), path.display());
    Ok(())
}
