//! # Kiln Core
//!
//! Data types shared by the Kiln baking pipeline: the in-memory model
//! representation fed into a bake, the draw-ready mesh produced by it,
//! and the optional glTF importer that populates models from files.

#[cfg(feature = "gltf")]
pub mod gltf;
pub mod math;
pub mod mesh;
pub mod model;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
