//! CLI error type.

use std::fmt;

use kiln_core::gltf::GltfError;

/// Hard failures that abort a bake before it can produce output.
#[derive(Debug)]
pub enum CliError {
    /// Filesystem failure reading the input or writing the output.
    Io(std::io::Error),
    /// The input model could not be loaded.
    Gltf(GltfError),
    /// The baked model could not be encoded.
    Encode(ciborium::ser::Error<std::io::Error>),
    /// The input image could not be decoded or re-encoded.
    Image(image::ImageError),
    /// The input path has no usable file name.
    BadInputPath(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(error) => write!(f, "io error: {error}"),
            CliError::Gltf(error) => write!(f, "failed to load model: {error}"),
            CliError::Encode(error) => write!(f, "failed to encode baked model: {error}"),
            CliError::Image(error) => write!(f, "failed to process texture: {error}"),
            CliError::BadInputPath(path) => write!(f, "input path has no file name: {path}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(error) => Some(error),
            CliError::Gltf(error) => Some(error),
            CliError::Encode(error) => Some(error),
            CliError::Image(error) => Some(error),
            CliError::BadInputPath(_) => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<GltfError> for CliError {
    fn from(error: GltfError) -> Self {
        CliError::Gltf(error)
    }
}

impl From<ciborium::ser::Error<std::io::Error>> for CliError {
    fn from(error: ciborium::ser::Error<std::io::Error>) -> Self {
        CliError::Encode(error)
    }
}

impl From<image::ImageError> for CliError {
    fn from(error: image::ImageError) -> Self {
        CliError::Image(error)
    }
}
