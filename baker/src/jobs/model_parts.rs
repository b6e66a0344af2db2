//! Fan-out of the input model into the parallel sequences the rest of
//! the graph consumes.

use kiln_core::model::Model;

use crate::engine::{BakeContext, Job};
use crate::types::{BlendshapesPerMesh, MaterialTable, MeshNamesByIndex, Meshes};

/// Splits a model into (meshes, source URL, mesh-name map,
/// blendshapes-per-mesh, material table). Pure projection.
#[derive(Default)]
pub struct ExtractModelParts;

impl Job for ExtractModelParts {
    type Input = Model;
    type Output = (
        Meshes,
        String,
        MeshNamesByIndex,
        BlendshapesPerMesh,
        MaterialTable,
    );

    fn run(&mut self, _context: &mut BakeContext, input: &Model, output: &mut Self::Output) {
        output.0 = input.meshes.clone();
        output.1 = input.source_url.clone();
        output.2 = input.mesh_names.clone();
        output.3 = input
            .meshes
            .iter()
            .map(|mesh| mesh.blendshapes.clone())
            .collect();
        output.4 = input.materials.clone();
    }
}
