//! Recombination of computed attributes into fresh meshes and a fresh
//! model. The input model is never mutated; every job here clones what
//! it keeps and replaces what was computed upstream.

use kiln_core::model::Model;

use crate::engine::{BakeContext, Job};
use crate::types::{
    BlendshapesPerMesh, GraphicsMeshes, Meshes, NormalsPerBlendshapePerMesh, NormalsPerMesh,
    TangentsPerBlendshapePerMesh, TangentsPerMesh,
};

/// Merges computed blendshape normals and tangents back into the
/// blendshape lists. Shapes whose mesh or index fell outside the
/// computed sequences keep their original attributes.
#[derive(Default)]
pub struct BuildBlendshapes;

impl Job for BuildBlendshapes {
    type Input = (
        BlendshapesPerMesh,
        NormalsPerBlendshapePerMesh,
        TangentsPerBlendshapePerMesh,
    );
    type Output = BlendshapesPerMesh;

    fn run(
        &mut self,
        _context: &mut BakeContext,
        input: &Self::Input,
        output: &mut BlendshapesPerMesh,
    ) {
        let (blendshapes_per_mesh, normals, tangents) = input;

        *output = blendshapes_per_mesh
            .iter()
            .enumerate()
            .map(|(mesh_index, blendshapes)| {
                blendshapes
                    .iter()
                    .enumerate()
                    .map(|(shape_index, shape)| {
                        let mut shape = shape.clone();
                        if let Some(resolved) = normals
                            .get(mesh_index)
                            .and_then(|per_shape| per_shape.get(shape_index))
                        {
                            if !resolved.is_empty() {
                                shape.normals = resolved.clone();
                            }
                        }
                        if let Some(resolved) = tangents
                            .get(mesh_index)
                            .and_then(|per_shape| per_shape.get(shape_index))
                        {
                            if !resolved.is_empty() {
                                shape.tangents = resolved.clone();
                            }
                        }
                        shape
                    })
                    .collect()
            })
            .collect();
    }
}

/// Merges resolved normals, tangents, rebuilt blendshapes, and the
/// draw-ready buffers back into fresh meshes.
#[derive(Default)]
pub struct BuildMeshes;

impl Job for BuildMeshes {
    type Input = (
        Meshes,
        GraphicsMeshes,
        NormalsPerMesh,
        TangentsPerMesh,
        BlendshapesPerMesh,
    );
    type Output = Meshes;

    fn run(&mut self, _context: &mut BakeContext, input: &Self::Input, output: &mut Meshes) {
        let (meshes, graphics_meshes, normals, tangents, blendshapes_per_mesh) = input;

        *output = meshes
            .iter()
            .enumerate()
            .map(|(index, mesh)| {
                let mut mesh = mesh.clone();
                if let Some(resolved) = normals.get(index) {
                    mesh.normals = resolved.clone();
                }
                if let Some(resolved) = tangents.get(index) {
                    mesh.tangents = resolved.clone();
                }
                if let Some(shapes) = blendshapes_per_mesh.get(index) {
                    mesh.blendshapes = shapes.clone();
                }
                mesh.graphics_mesh = graphics_meshes.get(index).cloned().flatten();
                mesh
            })
            .collect();
    }
}

/// Clones the source model and swaps in the baked mesh list. Materials,
/// names, and the source URL carry over untouched.
#[derive(Default)]
pub struct BuildModel;

impl Job for BuildModel {
    type Input = (Model, Meshes);
    type Output = Model;

    fn run(&mut self, _context: &mut BakeContext, input: &Self::Input, output: &mut Model) {
        let (source, meshes) = input;
        *output = source.clone();
        output.meshes = meshes.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use kiln_core::math::vec3;
    use kiln_core::mesh::{GraphicsMesh, VertexLayout};
    use kiln_core::model::{Blendshape, Mesh};

    #[test]
    fn test_blendshapes_gain_computed_attributes() {
        let shapes = vec![vec![Blendshape {
            indices: vec![0],
            position_deltas: vec![vec3(0.0, 0.0, 1.0)],
            ..Blendshape::default()
        }]];
        let normals = vec![vec![vec![vec3(0.0, 0.0, 1.0)]]];
        let tangents = vec![vec![Vec::new()]];

        let mut output = BlendshapesPerMesh::default();
        BuildBlendshapes.run(
            &mut BakeContext::new(),
            &(shapes, normals, tangents),
            &mut output,
        );

        let shape = &output[0][0];
        assert_eq!(shape.normals, vec![vec3(0.0, 0.0, 1.0)]);
        assert!(shape.tangents.is_empty());
        assert_eq!(shape.position_deltas.len(), 1);
    }

    #[test]
    fn test_meshes_gain_resolved_attributes() {
        let mesh = Mesh {
            positions: vec![vec3(0.0, 0.0, 0.0)],
            ..Mesh::default()
        };
        let graphics = Arc::new(GraphicsMesh::new(Arc::new(VertexLayout::new())));
        let input = (
            vec![mesh],
            vec![Some(Arc::clone(&graphics))],
            vec![vec![vec3(0.0, 1.0, 0.0)]],
            vec![Vec::new()],
            vec![Vec::new()],
        );

        let mut output = Meshes::default();
        BuildMeshes.run(&mut BakeContext::new(), &input, &mut output);

        assert_eq!(output[0].normals, vec![vec3(0.0, 1.0, 0.0)]);
        assert!(output[0].tangents.is_empty());
        assert!(output[0].graphics_mesh.is_some());
    }

    #[test]
    fn test_model_keeps_everything_but_meshes() {
        let source = Model {
            source_url: "file:///m.glb".into(),
            meshes: vec![Mesh::default()],
            ..Model::default()
        };
        let baked_mesh = Mesh {
            normals: vec![vec3(1.0, 0.0, 0.0)],
            ..Mesh::default()
        };

        let mut output = Model::default();
        BuildModel.run(
            &mut BakeContext::new(),
            &(source, vec![baked_mesh]),
            &mut output,
        );

        assert_eq!(output.source_url, "file:///m.glb");
        assert_eq!(output.meshes[0].normals, vec![vec3(1.0, 0.0, 0.0)]);
    }
}
