//! Per-mesh vertex tangent computation.

use rayon::prelude::*;

use kiln_core::model::Mesh;

use crate::engine::{BakeContext, Job};
use crate::geometry;
use crate::types::{MaterialTable, Meshes, NormalsPerMesh, TangentsPerMesh};

/// Whether any part of the mesh uses a material that needs a tangent
/// basis. Parts referencing unknown materials count as not needing one.
pub(crate) fn need_tangents(mesh: &Mesh, materials: &MaterialTable) -> bool {
    mesh.parts.iter().any(|part| {
        materials
            .get(&part.material_id)
            .is_some_and(|material| material.needs_tangent_space())
    })
}

/// Computes vertex tangents for meshes whose materials need them.
///
/// Authored tangents pass through untouched. Otherwise tangents are
/// computed only when the mesh has resolved normals, full texture
/// coordinates, and at least one normal-mapped material; all other
/// meshes get an empty list.
#[derive(Default)]
pub struct CalculateMeshTangents;

impl Job for CalculateMeshTangents {
    type Input = (NormalsPerMesh, Meshes, MaterialTable);
    type Output = TangentsPerMesh;

    fn run(
        &mut self,
        _context: &mut BakeContext,
        input: &Self::Input,
        output: &mut TangentsPerMesh,
    ) {
        let (normals_per_mesh, meshes, materials) = input;

        *output = meshes
            .par_iter()
            .enumerate()
            .map(|(index, mesh)| {
                if !mesh.tangents.is_empty() {
                    return mesh.tangents.clone();
                }
                let normals = &normals_per_mesh[index];
                let has_uvs = mesh.tex_coords.len() == mesh.positions.len();
                if normals.is_empty() || !has_uvs || !need_tangents(mesh, materials) {
                    return Vec::new();
                }
                geometry::calculate_tangents(
                    &mesh.positions,
                    &mesh.tex_coords,
                    normals,
                    mesh.triangles(),
                )
            })
            .collect();
    }
}
