//! Draw-ready mesh buffers produced by the bake.
//!
//! [`GraphicsMesh`] is the renderer-facing output of the pipeline: one
//! interleaved vertex buffer described by a [`VertexLayout`] plus an index
//! buffer. It is GPU-agnostic; uploading is the consumer's business.

use std::sync::Arc;

use super::layout::VertexLayout;

/// Index format for indexed drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IndexFormat {
    /// 16-bit unsigned integers (max 65535 vertices).
    #[default]
    Uint16,
    /// 32-bit unsigned integers.
    Uint32,
}

impl IndexFormat {
    /// Size in bytes of each index.
    pub fn size(&self) -> usize {
        match self {
            Self::Uint16 => 2,
            Self::Uint32 => 4,
        }
    }

    /// Smallest format able to address the given vertex count.
    pub fn for_vertex_count(vertex_count: usize) -> Self {
        if vertex_count > u16::MAX as usize {
            Self::Uint32
        } else {
            Self::Uint16
        }
    }
}

/// A baked, draw-ready mesh.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphicsMesh {
    /// Layout of the interleaved vertex buffer (shared via Arc).
    pub layout: Arc<VertexLayout>,
    /// Raw interleaved vertex data.
    pub vertex_data: Vec<u8>,
    /// Number of vertices.
    pub vertex_count: u32,
    /// Raw index data.
    pub index_data: Vec<u8>,
    /// Index format.
    pub index_format: IndexFormat,
    /// Number of indices.
    pub index_count: u32,
    /// Optional debug label.
    pub label: Option<String>,
}

impl GraphicsMesh {
    /// Create an empty mesh with the given layout.
    pub fn new(layout: Arc<VertexLayout>) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    /// Set raw vertex data; vertex count is inferred from the stride.
    pub fn with_vertex_data(mut self, data: Vec<u8>) -> Self {
        let stride = self.layout.stride as usize;
        if stride > 0 {
            self.vertex_count = (data.len() / stride) as u32;
        }
        self.vertex_data = data;
        self
    }

    /// Set index data as u16 indices.
    pub fn with_indices_u16(mut self, indices: &[u16]) -> Self {
        self.index_data = bytemuck::cast_slice(indices).to_vec();
        self.index_format = IndexFormat::Uint16;
        self.index_count = indices.len() as u32;
        self
    }

    /// Set index data as u32 indices.
    pub fn with_indices_u32(mut self, indices: &[u32]) -> Self {
        self.index_data = bytemuck::cast_slice(indices).to_vec();
        self.index_format = IndexFormat::Uint32;
        self.index_count = indices.len() as u32;
        self
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Whether this mesh uses indexed drawing.
    pub fn is_indexed(&self) -> bool {
        !self.index_data.is_empty()
    }

    /// Size of the vertex buffer in bytes.
    pub fn vertex_buffer_size(&self) -> usize {
        self.vertex_data.len()
    }
}
