#![forbid(unsafe_code)]

use anyhow::Result;
use serde_json::json;
use std::{fs::File, io::BufWriter, path::PathBuf};

use super::generator::SeedSwatch;

/// Serialize seed swatches into the backend's config JSON shape.
pub fn save_pigments_json(
    path: impl AsRef<std::path::Path>,
    swatches: &[SeedSwatch],
) -> Result<PathBuf> {
    let path = path.as_ref();
    let pigments: Vec<_> = swatches
        .iter()
        .map(|swatch| {
            json!({
                "name": swatch.name,
                "rgb": format!("rgb({}, {}, {})", swatch.rgb.0, swatch.rgb.1, swatch.rgb.2),
            })
        })
        .collect();

    let f = File::create(path)?;
    let w = BufWriter::new(f);
    serde_json::to_writer_pretty(w, &json!({ "pigments": pigments }))?;
    Ok(path.to_path_buf())
}
