//! Per-blendshape vertex tangent computation.

use rayon::prelude::*;

use kiln_core::math::Vec3;
use kiln_core::model::{Blendshape, Mesh};

use crate::engine::{BakeContext, Job};
use crate::geometry;
use crate::jobs::mesh_tangents::need_tangents;
use crate::types::{
    BlendshapesPerMesh, MaterialTable, Meshes, NormalsPerBlendshapePerMesh,
    TangentsPerBlendshapePerMesh,
};

/// Compute the deformed-surface tangents of one blendshape, gathered at
/// the shape's sparse indices.
fn blendshape_tangents(mesh: &Mesh, shape: &Blendshape) -> Vec<Vec3> {
    let deformed = geometry::apply_blendshape(&mesh.positions, shape);
    let normals = geometry::calculate_normals(&deformed, mesh.triangles());
    let full = geometry::calculate_tangents(&deformed, &mesh.tex_coords, &normals, mesh.triangles());
    shape
        .indices
        .iter()
        .map(|&index| full.get(index as usize).copied().unwrap_or_else(Vec3::zeros))
        .collect()
}

/// Computes vertex tangents for blendshapes whose mesh materials need a
/// tangent basis, with the same pass-through policy as the mesh job.
/// Output is indexed `[mesh][blendshape]`.
#[derive(Default)]
pub struct CalculateBlendshapeTangents;

impl Job for CalculateBlendshapeTangents {
    type Input = (
        NormalsPerBlendshapePerMesh,
        BlendshapesPerMesh,
        Meshes,
        MaterialTable,
    );
    type Output = TangentsPerBlendshapePerMesh;

    fn run(
        &mut self,
        _context: &mut BakeContext,
        input: &Self::Input,
        output: &mut TangentsPerBlendshapePerMesh,
    ) {
        let (normals_per_shape_per_mesh, blendshapes_per_mesh, meshes, materials) = input;

        *output = blendshapes_per_mesh
            .par_iter()
            .zip(meshes.par_iter())
            .enumerate()
            .map(|(mesh_index, (blendshapes, mesh))| {
                let has_uvs = mesh.tex_coords.len() == mesh.positions.len();
                let wanted = has_uvs && need_tangents(mesh, materials);
                blendshapes
                    .iter()
                    .enumerate()
                    .map(|(shape_index, shape)| {
                        if !shape.tangents.is_empty() {
                            return shape.tangents.clone();
                        }
                        let normals_known = normals_per_shape_per_mesh
                            .get(mesh_index)
                            .and_then(|per_shape| per_shape.get(shape_index))
                            .is_some_and(|normals| !normals.is_empty());
                        if !wanted || !normals_known {
                            return Vec::new();
                        }
                        blendshape_tangents(mesh, shape)
                    })
                    .collect()
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::math::{vec2, vec3};
    use kiln_core::model::{Material, MeshPart, Texture};

    fn quad_with_shape(material_id: &str) -> Mesh {
        Mesh {
            parts: vec![MeshPart {
                triangle_indices: vec![0, 1, 2, 0, 2, 3],
                material_id: material_id.into(),
            }],
            positions: vec![
                vec3(0.0, 0.0, 0.0),
                vec3(1.0, 0.0, 0.0),
                vec3(1.0, 1.0, 0.0),
                vec3(0.0, 1.0, 0.0),
            ],
            tex_coords: vec![
                vec2(0.0, 0.0),
                vec2(1.0, 0.0),
                vec2(1.0, 1.0),
                vec2(0.0, 1.0),
            ],
            blendshapes: vec![Blendshape {
                indices: vec![0, 2],
                position_deltas: vec![vec3(0.0, 0.0, 0.3), vec3(0.0, 0.0, -0.3)],
                ..Blendshape::default()
            }],
            ..Mesh::default()
        }
    }

    fn bumpy_materials() -> MaterialTable {
        let material = Material::new("bumpy").with_normal_texture(Texture {
            name: "n".into(),
            filename: "n.png".into(),
            tex_coord_set: 0,
        });
        MaterialTable::from([("bumpy".to_string(), material)])
    }

    fn run_job(mesh: Mesh, materials: MaterialTable) -> TangentsPerBlendshapePerMesh {
        let shape_count = mesh.blendshapes[0].indices.len();
        let normals = vec![vec![vec![vec3(0.0, 0.0, 1.0); shape_count]]];
        let input = (
            normals,
            vec![mesh.blendshapes.clone()],
            vec![mesh],
            materials,
        );
        let mut output = TangentsPerBlendshapePerMesh::default();
        CalculateBlendshapeTangents.run(&mut BakeContext::new(), &input, &mut output);
        output
    }

    #[test]
    fn test_tangents_computed_for_normal_mapped_mesh() {
        let output = run_job(quad_with_shape("bumpy"), bumpy_materials());
        assert_eq!(output.len(), 1);
        assert_eq!(output[0].len(), 1);
        assert_eq!(output[0][0].len(), 2);
        for tangent in &output[0][0] {
            assert!((tangent.norm() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_plain_material_skips_blendshape_tangents() {
        let materials = MaterialTable::from([("plain".to_string(), Material::new("plain"))]);
        let output = run_job(quad_with_shape("plain"), materials);
        assert!(output[0][0].is_empty());
    }

    #[test]
    fn test_authored_shape_tangents_pass_through() {
        let mut mesh = quad_with_shape("bumpy");
        mesh.blendshapes[0].tangents = vec![vec3(0.0, 1.0, 0.0), vec3(0.0, 1.0, 0.0)];
        let authored = mesh.blendshapes[0].tangents.clone();
        let output = run_job(mesh, bumpy_materials());
        assert_eq!(output[0][0], authored);
    }
}
