//! Texture bake: decode any supported image and re-encode as PNG.

use std::path::Path;

use image::ImageFormat;

use crate::error::CliError;
use crate::input_stem;

/// Bake one image file into `<stem>.baked.png` in `output_dir`.
pub fn bake_texture(input: &Path, output_dir: &Path) -> Result<(), CliError> {
    let decoded = image::open(input)?;
    log::info!(
        "baking texture '{}' ({}x{})",
        input.display(),
        decoded.width(),
        decoded.height()
    );

    let output_path = output_dir.join(format!("{}.baked.png", input_stem(input)?));
    decoded.save_with_format(&output_path, ImageFormat::Png)?;
    log::info!("wrote {}", output_path.display());
    Ok(())
}
