//! Model bake: load glTF, run the bake graph, write the baked model.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde::Serialize;

use kiln_baker::Baker;
use kiln_core::model::Model;

use crate::error::CliError;
use crate::input_stem;

/// Bumped whenever the baked model encoding changes shape.
const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct BakedModelFile<'a> {
    format_version: u32,
    baker_version: &'static str,
    model: &'a Model,
}

/// Bake one model file into `<stem>.baked.cbor` in `output_dir`.
///
/// Returns the non-fatal errors jobs reported during the bake; the baked
/// file is written even when that list is non-empty, because meshes that
/// baked cleanly are still usable.
pub fn bake_model(input: &Path, output_dir: &Path) -> Result<Vec<String>, CliError> {
    let model = kiln_core::gltf::load_model(input)?;

    let mesh_count = model.meshes.len();
    log::info!("baking model '{}' ({mesh_count} meshes)", input.display());
    let result = Baker::new(model).run();

    let output_path = output_path(input, output_dir)?;
    let writer = BufWriter::new(File::create(&output_path)?);
    ciborium::ser::into_writer(
        &BakedModelFile {
            format_version: FORMAT_VERSION,
            baker_version: kiln_core::VERSION,
            model: &result.model,
        },
        writer,
    )?;
    log::info!("wrote {}", output_path.display());

    Ok(result.errors)
}

fn output_path(input: &Path, output_dir: &Path) -> Result<PathBuf, CliError> {
    Ok(output_dir.join(format!("{}.baked.cbor", input_stem(input)?)))
}
