//! glTF 2.0 import.
//!
//! Loads `.gltf`/`.glb` files into the bake-ready [`Model`](crate::model::Model)
//! representation. Each glTF primitive becomes one flat mesh entry with a
//! single part carrying its material; morph targets import as sparse
//! blendshapes whose normals and tangents are computed by the bake.
//!
//! External buffer and image URIs are resolved relative to the input file.
//!
//! # Example
//!
//! ```ignore
//! use kiln_core::gltf::load_model;
//!
//! let model = load_model("assets/helmet.glb".as_ref())?;
//! println!("meshes: {}", model.meshes.len());
//! ```

mod error;
mod loader;

pub use error::GltfError;

use std::path::Path;

use crate::model::Model;

/// Load a model from a `.gltf` or `.glb` file.
pub fn load_model(path: &Path) -> Result<Model, GltfError> {
    loader::load_model_from_path(path)
}
