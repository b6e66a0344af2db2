//! Error types for glTF import.

/// Errors that can occur while importing a glTF file.
#[derive(Debug)]
pub enum GltfError {
    /// Failed to read or parse the glTF document.
    Import(gltf_dep::Error),
    /// A primitive is missing position data.
    MissingPositions {
        /// Mesh index in the glTF document.
        mesh: usize,
        /// Primitive index within the mesh.
        primitive: usize,
    },
    /// Unsupported primitive topology (only triangle lists are baked).
    UnsupportedTopology(String),
}

impl std::fmt::Display for GltfError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Import(e) => write!(f, "glTF import error: {e}"),
            Self::MissingPositions { mesh, primitive } => {
                write!(
                    f,
                    "mesh {mesh} primitive {primitive} has no POSITION attribute"
                )
            }
            Self::UnsupportedTopology(msg) => write!(f, "unsupported topology: {msg}"),
        }
    }
}

impl std::error::Error for GltfError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Import(e) => Some(e),
            _ => None,
        }
    }
}

impl From<gltf_dep::Error> for GltfError {
    fn from(e: gltf_dep::Error) -> Self {
        Self::Import(e)
    }
}
