//! Per-blendshape vertex normal computation.

use rayon::prelude::*;

use kiln_core::math::Vec3;
use kiln_core::model::{Blendshape, Mesh};

use crate::engine::{BakeContext, Job};
use crate::geometry;
use crate::types::{BlendshapesPerMesh, Meshes, NormalsPerBlendshapePerMesh};

/// Compute the deformed-surface normals of one blendshape, gathered at
/// the shape's sparse indices.
fn blendshape_normals(mesh: &Mesh, shape: &Blendshape) -> Vec<Vec3> {
    let deformed = geometry::apply_blendshape(&mesh.positions, shape);
    let full = geometry::calculate_normals(&deformed, mesh.triangles());
    shape
        .indices
        .iter()
        .map(|&index| full.get(index as usize).copied().unwrap_or_else(Vec3::zeros))
        .collect()
}

/// Computes vertex normals for every blendshape lacking them.
///
/// The shape's position deltas are applied to a copy of the base mesh,
/// normals are recomputed on the deformed surface, and the results are
/// gathered at the shape's indices. Authored blendshape normals pass
/// through untouched. Output is indexed `[mesh][blendshape]`.
#[derive(Default)]
pub struct CalculateBlendshapeNormals;

impl Job for CalculateBlendshapeNormals {
    type Input = (BlendshapesPerMesh, Meshes);
    type Output = NormalsPerBlendshapePerMesh;

    fn run(
        &mut self,
        _context: &mut BakeContext,
        input: &Self::Input,
        output: &mut NormalsPerBlendshapePerMesh,
    ) {
        let (blendshapes_per_mesh, meshes) = input;

        *output = blendshapes_per_mesh
            .par_iter()
            .zip(meshes.par_iter())
            .map(|(blendshapes, mesh)| {
                blendshapes
                    .iter()
                    .map(|shape| {
                        if !shape.normals.is_empty() {
                            shape.normals.clone()
                        } else {
                            blendshape_normals(mesh, shape)
                        }
                    })
                    .collect()
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::math::vec3;
    use kiln_core::model::MeshPart;

    // Flat XY quad with one shape lifting vertex 2 out of the plane.
    fn mesh_with_shape() -> Mesh {
        Mesh {
            parts: vec![MeshPart {
                triangle_indices: vec![0, 1, 2, 0, 2, 3],
                material_id: String::new(),
            }],
            positions: vec![
                vec3(0.0, 0.0, 0.0),
                vec3(1.0, 0.0, 0.0),
                vec3(1.0, 1.0, 0.0),
                vec3(0.0, 1.0, 0.0),
            ],
            blendshapes: vec![Blendshape {
                indices: vec![2],
                position_deltas: vec![vec3(0.0, 0.0, 0.5)],
                ..Blendshape::default()
            }],
            ..Mesh::default()
        }
    }

    #[test]
    fn test_computed_normals_track_deformed_surface() {
        let mesh = mesh_with_shape();
        let input = (vec![mesh.blendshapes.clone()], vec![mesh]);

        let mut output = NormalsPerBlendshapePerMesh::default();
        CalculateBlendshapeNormals.run(&mut BakeContext::new(), &input, &mut output);

        assert_eq!(output.len(), 1);
        assert_eq!(output[0].len(), 1);
        // One normal per sparse index.
        assert_eq!(output[0][0].len(), 1);
        let normal = output[0][0][0];
        assert!((normal.norm() - 1.0).abs() < 1e-4);
        // Lifting the corner tilts its normal away from pure +Z.
        assert!(normal.z < 1.0 - 1e-4);
        assert!(normal.z > 0.0);
    }

    #[test]
    fn test_authored_shape_normals_pass_through() {
        let mut mesh = mesh_with_shape();
        mesh.blendshapes[0].normals = vec![vec3(0.0, 1.0, 0.0)];
        let input = (vec![mesh.blendshapes.clone()], vec![mesh]);

        let mut output = NormalsPerBlendshapePerMesh::default();
        CalculateBlendshapeNormals.run(&mut BakeContext::new(), &input, &mut output);
        assert_eq!(output[0][0], vec![vec3(0.0, 1.0, 0.0)]);
    }

    #[test]
    fn test_meshes_without_shapes_get_empty_lists() {
        let input = (vec![Vec::new()], vec![Mesh::default()]);
        let mut output = NormalsPerBlendshapePerMesh::default();
        CalculateBlendshapeNormals.run(&mut BakeContext::new(), &input, &mut output);
        assert_eq!(output.len(), 1);
        assert!(output[0].is_empty());
    }
}
