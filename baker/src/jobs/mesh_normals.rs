//! Per-mesh vertex normal computation.

use rayon::prelude::*;

use crate::engine::{BakeContext, Job};
use crate::geometry;
use crate::types::{Meshes, NormalsPerMesh};

/// Computes vertex normals for every mesh that lacks them.
///
/// Authored normals pass through untouched; only meshes with an empty
/// normal list get the face-area-weighted computation. Meshes are
/// independent, so the fan-out runs on the rayon pool; the indexed
/// parallel map keeps output order identical to sequential execution.
#[derive(Default)]
pub struct CalculateMeshNormals;

impl Job for CalculateMeshNormals {
    type Input = Meshes;
    type Output = NormalsPerMesh;

    fn run(&mut self, _context: &mut BakeContext, input: &Meshes, output: &mut NormalsPerMesh) {
        *output = input
            .par_iter()
            .map(|mesh| {
                if !mesh.normals.is_empty() {
                    mesh.normals.clone()
                } else {
                    geometry::calculate_normals(&mesh.positions, mesh.triangles())
                }
            })
            .collect();
    }
}
