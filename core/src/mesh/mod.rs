//! Draw-ready mesh types produced by the bake.
//!
//! - [`VertexLayout`] - Describes the interleaved vertex attributes
//! - [`GraphicsMesh`] - Baked vertex and index buffers
//! - [`IndexFormat`] - Index data format (u16 or u32)

mod data;
mod layout;

pub use data::{GraphicsMesh, IndexFormat};
pub use layout::{VertexAttribute, VertexAttributeFormat, VertexAttributeSemantic, VertexLayout};
