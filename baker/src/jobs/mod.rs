//! The concrete bake jobs, in the order the bake graph runs them.

mod blendshape_normals;
mod blendshape_tangents;
mod graphics_mesh;
mod mesh_normals;
mod mesh_tangents;
mod model_parts;
mod rebuild;

pub use blendshape_normals::CalculateBlendshapeNormals;
pub use blendshape_tangents::CalculateBlendshapeTangents;
pub use graphics_mesh::BuildGraphicsMesh;
pub use mesh_normals::CalculateMeshNormals;
pub use mesh_tangents::CalculateMeshTangents;
pub use model_parts::ExtractModelParts;
pub use rebuild::{BuildBlendshapes, BuildMeshes, BuildModel};
