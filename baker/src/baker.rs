//! The bake graph and its public driver.

use kiln_core::model::Model;

use crate::engine::{Engine, Task, TaskGraph, Varying};
use crate::jobs::{
    BuildBlendshapes, BuildGraphicsMesh, BuildMeshes, BuildModel, CalculateBlendshapeNormals,
    CalculateBlendshapeTangents, CalculateMeshNormals, CalculateMeshTangents, ExtractModelParts,
};

/// The full model bake: extract parts, resolve normals and tangents for
/// meshes and blendshapes, build draw-ready buffers, recombine.
pub struct BakeGraph;

impl TaskGraph for BakeGraph {
    type Input = Model;
    type Output = Model;

    fn build(task: &mut Task, input: Varying<Model>) -> Varying<Model> {
        let parts = task.add_job::<ExtractModelParts>("ExtractModelParts", input.clone());
        let meshes = parts.map(|parts| parts.0.clone());
        let url = parts.map(|parts| parts.1.clone());
        let mesh_names = parts.map(|parts| parts.2.clone());
        let blendshapes = parts.map(|parts| parts.3.clone());
        let materials = parts.map(|parts| parts.4.clone());

        let normals = task.add_job::<CalculateMeshNormals>("CalculateMeshNormals", meshes.clone());
        let tangents = task.add_job::<CalculateMeshTangents>(
            "CalculateMeshTangents",
            (normals.clone(), meshes.clone(), materials.clone()),
        );
        let shape_normals = task.add_job::<CalculateBlendshapeNormals>(
            "CalculateBlendshapeNormals",
            (blendshapes.clone(), meshes.clone()),
        );
        let shape_tangents = task.add_job::<CalculateBlendshapeTangents>(
            "CalculateBlendshapeTangents",
            (
                shape_normals.clone(),
                blendshapes.clone(),
                meshes.clone(),
                materials,
            ),
        );
        let graphics_meshes = task.add_job::<BuildGraphicsMesh>(
            "BuildGraphicsMesh",
            (
                meshes.clone(),
                url,
                mesh_names,
                normals.clone(),
                tangents.clone(),
            ),
        );
        let baked_blendshapes = task.add_job::<BuildBlendshapes>(
            "BuildBlendshapes",
            (blendshapes, shape_normals, shape_tangents),
        );
        let baked_meshes = task.add_job::<BuildMeshes>(
            "BuildMeshes",
            (meshes, graphics_meshes, normals, tangents, baked_blendshapes),
        );
        task.add_job::<BuildModel>("BuildModel", (input, baked_meshes))
    }
}

/// Outcome of one bake: the baked model plus any errors jobs reported
/// along the way. Errors do not imply an empty model; meshes that baked
/// cleanly are present even when others failed.
#[derive(Debug)]
pub struct BakeResult {
    pub model: Model,
    pub errors: Vec<String>,
}

impl BakeResult {
    /// Whether any job reported an error during the bake.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// One-shot driver for [`BakeGraph`].
///
/// # Example
///
/// ```
/// use kiln_baker::Baker;
/// use kiln_core::model::Model;
///
/// let result = Baker::new(Model::default()).run();
/// assert!(!result.has_errors());
/// ```
pub struct Baker {
    engine: Engine<BakeGraph>,
}

impl Baker {
    /// Build the bake graph and feed it `model`.
    pub fn new(model: Model) -> Self {
        let mut engine = Engine::new("Bake");
        engine.feed_input(model);
        Self { engine }
    }

    /// Run the whole graph and collect the result. Consumes the baker;
    /// the single-assignment slots make a second run meaningless.
    pub fn run(mut self) -> BakeResult {
        self.engine.run();
        BakeResult {
            model: self.engine.output(),
            errors: self.engine.context().errors().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::math::vec3;
    use kiln_core::model::{Mesh, MeshPart};

    #[test]
    fn test_empty_model_bakes_cleanly() {
        let result = Baker::new(Model::default()).run();
        assert!(!result.has_errors());
        assert!(result.model.meshes.is_empty());
    }

    #[test]
    fn test_bare_triangle_gains_normals() {
        let model = Model {
            source_url: "file:///tri.glb".into(),
            meshes: vec![Mesh {
                parts: vec![MeshPart {
                    triangle_indices: vec![0, 1, 2],
                    material_id: String::new(),
                }],
                positions: vec![
                    vec3(0.0, 0.0, 0.0),
                    vec3(1.0, 0.0, 0.0),
                    vec3(0.0, 1.0, 0.0),
                ],
                ..Mesh::default()
            }],
            ..Model::default()
        };

        let result = Baker::new(model).run();
        assert!(!result.has_errors());
        let mesh = &result.model.meshes[0];
        assert_eq!(mesh.normals.len(), 3);
        assert!(mesh.tangents.is_empty());
        assert!(mesh.graphics_mesh.is_some());
    }
}
