//! Vertex layout description for baked meshes.
//!
//! The baker always emits one interleaved vertex buffer, so a layout is a
//! stride plus an ordered attribute list. Layouts are shared via `Arc`;
//! there are only a few combinations across the meshes of a model.

/// Semantic meaning of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VertexAttributeSemantic {
    /// Vertex position (float3).
    Position,
    /// Vertex normal (float3).
    Normal,
    /// Vertex tangent (float3).
    Tangent,
    /// Texture coordinates set 0 (float2).
    TexCoord0,
    /// Vertex color (float3).
    Color,
    /// Joint indices for skinning (uint16x4).
    Joints,
    /// Joint weights for skinning (float4).
    Weights,
}

/// Data format of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VertexAttributeFormat {
    /// Single 32-bit float.
    Float,
    /// Two 32-bit floats.
    Float2,
    /// Three 32-bit floats.
    Float3,
    /// Four 32-bit floats.
    Float4,
    /// Four 16-bit unsigned integers.
    Uint16x4,
}

impl VertexAttributeFormat {
    /// Size in bytes of this format.
    pub fn size(&self) -> usize {
        match self {
            Self::Float => 4,
            Self::Float2 => 8,
            Self::Float3 => 12,
            Self::Float4 => 16,
            Self::Uint16x4 => 8,
        }
    }
}

/// A single vertex attribute within the interleaved buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VertexAttribute {
    /// Semantic meaning of this attribute.
    pub semantic: VertexAttributeSemantic,
    /// Data format of this attribute.
    pub format: VertexAttributeFormat,
    /// Byte offset within the vertex stride.
    pub offset: u32,
}

/// Layout of one interleaved vertex buffer.
///
/// Attributes are appended with [`VertexLayout::with_attribute`], which
/// assigns each one the next free offset and grows the stride.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VertexLayout {
    /// Attribute list in buffer order.
    pub attributes: Vec<VertexAttribute>,
    /// Stride in bytes between consecutive vertices.
    pub stride: u32,
    /// Optional debug label.
    pub label: Option<String>,
}

impl VertexLayout {
    /// Create an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute at the current end of the stride.
    pub fn with_attribute(
        mut self,
        semantic: VertexAttributeSemantic,
        format: VertexAttributeFormat,
    ) -> Self {
        self.attributes.push(VertexAttribute {
            semantic,
            format,
            offset: self.stride,
        });
        self.stride += format.size() as u32;
        self
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Find an attribute by semantic.
    pub fn attribute(&self, semantic: VertexAttributeSemantic) -> Option<&VertexAttribute> {
        self.attributes.iter().find(|a| a.semantic == semantic)
    }

    /// Whether the layout carries the given semantic.
    pub fn has_attribute(&self, semantic: VertexAttributeSemantic) -> bool {
        self.attribute(semantic).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_and_stride_accumulate() {
        let layout = VertexLayout::new()
            .with_attribute(VertexAttributeSemantic::Position, VertexAttributeFormat::Float3)
            .with_attribute(VertexAttributeSemantic::Normal, VertexAttributeFormat::Float3)
            .with_attribute(VertexAttributeSemantic::TexCoord0, VertexAttributeFormat::Float2);

        assert_eq!(layout.stride, 32);
        assert_eq!(
            layout
                .attribute(VertexAttributeSemantic::Normal)
                .unwrap()
                .offset,
            12
        );
        assert_eq!(
            layout
                .attribute(VertexAttributeSemantic::TexCoord0)
                .unwrap()
                .offset,
            24
        );
    }

    #[test]
    fn test_missing_attribute() {
        let layout = VertexLayout::new()
            .with_attribute(VertexAttributeSemantic::Position, VertexAttributeFormat::Float3);
        assert!(!layout.has_attribute(VertexAttributeSemantic::Tangent));
    }

    #[test]
    fn test_format_sizes() {
        assert_eq!(VertexAttributeFormat::Float2.size(), 8);
        assert_eq!(VertexAttributeFormat::Float3.size(), 12);
        assert_eq!(VertexAttributeFormat::Uint16x4.size(), 8);
    }
}
