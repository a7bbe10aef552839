//! Helper tool to generate seed pigment sets for the backend's palette config.

#[cfg(feature = "tool-palette-gen")]
mod palette_gen;

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "tool-palette-gen")]
    {
        palette_gen::run()?;
    }
    Ok(())
}
