//! Aliases for the sequence types flowing between bake jobs.
//!
//! All per-mesh sequences are indexed by mesh position in the model's
//! mesh list; `[mesh][blendshape]` sequences add the blendshape's
//! position within its mesh. Derived sequences always have exactly the
//! length of the sequence they were derived from.

use std::collections::HashMap;
use std::sync::Arc;

use kiln_core::math::Vec3;
use kiln_core::mesh::GraphicsMesh;
use kiln_core::model::{Blendshape, Material, Mesh};

/// Per-vertex normals of one mesh (or one blendshape).
pub type Normals = Vec<Vec3>;

/// Per-vertex tangents of one mesh (or one blendshape).
pub type Tangents = Vec<Vec3>;

/// Normals indexed `[mesh]`.
pub type NormalsPerMesh = Vec<Normals>;

/// Tangents indexed `[mesh]`.
pub type TangentsPerMesh = Vec<Tangents>;

/// Normals indexed `[mesh][blendshape]`.
pub type NormalsPerBlendshapePerMesh = Vec<Vec<Normals>>;

/// Tangents indexed `[mesh][blendshape]`.
pub type TangentsPerBlendshapePerMesh = Vec<Vec<Tangents>>;

/// Blendshape lists indexed `[mesh]`.
pub type BlendshapesPerMesh = Vec<Vec<Blendshape>>;

/// The model's mesh list as a standalone value.
pub type Meshes = Vec<Mesh>;

/// Draw-ready meshes indexed `[mesh]`; `None` marks a mesh the build
/// step had to skip.
pub type GraphicsMeshes = Vec<Option<Arc<GraphicsMesh>>>;

/// Material table keyed by material id.
pub type MaterialTable = HashMap<String, Material>;

/// Human-readable model name per mesh index.
pub type MeshNamesByIndex = HashMap<usize, String>;
