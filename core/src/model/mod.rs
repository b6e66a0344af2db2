//! The in-memory model representation baked by the pipeline.
//!
//! A [`Model`] is produced by a format loader (e.g. the glTF importer),
//! handed to the baker, and replaced wholesale by the bake output: jobs
//! never mutate the model they were given, they build new values.
//!
//! # Index stability
//!
//! Mesh index `i` in [`Model::meshes`] is the key joining every per-mesh
//! sequence derived during a bake (normals-per-mesh, tangents-per-mesh,
//! graphics meshes). Likewise blendshape index `j` within a mesh joins the
//! `[mesh][blendshape]` sequences. Derived sequences always have exactly
//! the input sequence's length.

mod material;

pub use material::{Material, Texture};

use std::collections::HashMap;
use std::sync::Arc;

use crate::math::{Vec2, Vec3};
use crate::mesh::GraphicsMesh;

/// A sparse morph target storing deltas relative to the base mesh.
///
/// `indices[k]` names the base-mesh vertex that `position_deltas[k]`,
/// `normals[k]` and `tangents[k]` (when present) apply to.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Blendshape {
    /// Base-mesh vertex indices affected by this shape.
    pub indices: Vec<u32>,
    /// Position offsets, parallel to `indices`.
    pub position_deltas: Vec<Vec3>,
    /// Vertex normals of the deformed surface, parallel to `indices`.
    /// Computed by the bake when absent.
    pub normals: Vec<Vec3>,
    /// Vertex tangents of the deformed surface, parallel to `indices`.
    /// Computed by the bake when absent and the material needs them.
    pub tangents: Vec<Vec3>,
}

/// One draw batch of a mesh: a triangle index list sharing a material.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeshPart {
    /// Triangle indices, three per triangle.
    pub triangle_indices: Vec<u32>,
    /// Key into [`Model::materials`].
    pub material_id: String,
}

impl MeshPart {
    /// Number of whole triangles in this part.
    pub fn triangle_count(&self) -> usize {
        self.triangle_indices.len() / 3
    }
}

/// A single drawable mesh with optional blendshapes.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mesh {
    /// Draw batches, each with its own material.
    pub parts: Vec<MeshPart>,

    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Vertex normals; empty when the source format did not author them.
    pub normals: Vec<Vec3>,
    /// Vertex tangents; empty when the source format did not author them.
    pub tangents: Vec<Vec3>,
    /// Vertex colors, if authored.
    pub colors: Vec<Vec3>,
    /// Texture coordinates, set 0.
    pub tex_coords: Vec<Vec2>,
    /// Skinning joint indices, four per vertex.
    pub skin_indices: Vec<u16>,
    /// Skinning joint weights, four per vertex, parallel to `skin_indices`.
    pub skin_weights: Vec<f32>,

    /// Morph targets for this mesh.
    pub blendshapes: Vec<Blendshape>,

    /// Draw-ready mesh buffer, assigned by the bake.
    pub graphics_mesh: Option<Arc<GraphicsMesh>>,
}

impl Mesh {
    /// Number of vertices in this mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Iterate over all triangle index triples across every part.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.parts
            .iter()
            .flat_map(|part| part.triangle_indices.chunks_exact(3))
            .map(|tri| [tri[0], tri[1], tri[2]])
    }
}

/// The top-level asset being baked.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Model {
    /// Where the model was loaded from.
    pub source_url: String,
    /// Ordered mesh list; mesh index is stable across a bake.
    pub meshes: Vec<Mesh>,
    /// Material table keyed by material id.
    pub materials: HashMap<String, Material>,
    /// Human-readable model name per mesh index, for diagnostics.
    pub mesh_names: HashMap<usize, String>,
}

impl Model {
    /// Name of the model a mesh belongs to, if known.
    pub fn model_name_of_mesh(&self, mesh_index: usize) -> Option<&str> {
        self.mesh_names.get(&mesh_index).map(String::as_str)
    }

    /// Whether any mesh carries blendshapes.
    pub fn has_blended_meshes(&self) -> bool {
        self.meshes.iter().any(|mesh| !mesh.blendshapes.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec3;

    fn two_part_mesh() -> Mesh {
        Mesh {
            parts: vec![
                MeshPart {
                    triangle_indices: vec![0, 1, 2],
                    material_id: "a".into(),
                },
                MeshPart {
                    triangle_indices: vec![2, 1, 3, 3, 1, 0],
                    material_id: "b".into(),
                },
            ],
            positions: vec![
                vec3(0.0, 0.0, 0.0),
                vec3(1.0, 0.0, 0.0),
                vec3(0.0, 1.0, 0.0),
                vec3(1.0, 1.0, 0.0),
            ],
            ..Mesh::default()
        }
    }

    #[test]
    fn test_triangles_spans_parts() {
        let mesh = two_part_mesh();
        let tris: Vec<_> = mesh.triangles().collect();
        assert_eq!(tris.len(), 3);
        assert_eq!(tris[0], [0, 1, 2]);
        assert_eq!(tris[2], [3, 1, 0]);
    }

    #[test]
    fn test_part_triangle_count_ignores_stragglers() {
        let part = MeshPart {
            triangle_indices: vec![0, 1, 2, 3, 4],
            material_id: String::new(),
        };
        assert_eq!(part.triangle_count(), 1);
    }

    #[test]
    fn test_model_name_lookup() {
        let mut model = Model::default();
        model.mesh_names.insert(1, "hat".into());
        assert_eq!(model.model_name_of_mesh(1), Some("hat"));
        assert_eq!(model.model_name_of_mesh(0), None);
    }

    #[test]
    fn test_has_blended_meshes() {
        let mut model = Model {
            meshes: vec![two_part_mesh()],
            ..Model::default()
        };
        assert!(!model.has_blended_meshes());
        model.meshes[0].blendshapes.push(Blendshape::default());
        assert!(model.has_blended_meshes());
    }
}
