//! Command line arguments and asset kind inference.

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

/// What kind of bake to run on the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AssetKind {
    /// glTF model: resolve normals/tangents and build draw-ready buffers.
    Model,
    /// JavaScript source: strip comments and collapse blank lines.
    Script,
    /// Image: decode and re-encode as PNG.
    Texture,
}

#[derive(Parser, Debug)]
#[command(name = "kiln")]
#[command(about = "Bake models, scripts, and textures for runtime consumption")]
#[command(version)]
pub struct Args {
    /// Asset to bake
    pub input: PathBuf,

    /// Directory baked files are written into (created if missing)
    pub output_dir: PathBuf,

    /// Override the asset kind inferred from the input extension
    #[arg(short, long, value_enum)]
    pub kind: Option<AssetKind>,
}

/// Infer the asset kind from the input's file extension.
pub fn infer_kind(path: &Path) -> Option<AssetKind> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "gltf" | "glb" => Some(AssetKind::Model),
        "js" => Some(AssetKind::Script),
        "png" | "jpg" | "jpeg" | "bmp" | "tga" | "gif" | "webp" => Some(AssetKind::Texture),
        _ => None,
    }
}
