//! Building the draw-ready mesh buffer for each mesh.

use std::sync::Arc;

use kiln_core::math::{Vec2, Vec3};
use kiln_core::mesh::{
    GraphicsMesh, IndexFormat, VertexAttributeFormat, VertexAttributeSemantic, VertexLayout,
};
use kiln_core::model::Mesh;

use crate::engine::{BakeContext, Job};
use crate::types::{GraphicsMeshes, MeshNamesByIndex, Meshes, NormalsPerMesh, TangentsPerMesh};

fn write_vec3s(buffer: &mut [u8], stride: usize, offset: usize, values: &[Vec3]) {
    for (vertex, value) in values.iter().enumerate() {
        let start = vertex * stride + offset;
        let floats: [f32; 3] = [value.x, value.y, value.z];
        buffer[start..start + 12].copy_from_slice(bytemuck::cast_slice(&floats));
    }
}

fn write_vec2s(buffer: &mut [u8], stride: usize, offset: usize, values: &[Vec2]) {
    for (vertex, value) in values.iter().enumerate() {
        let start = vertex * stride + offset;
        let floats: [f32; 2] = [value.x, value.y];
        buffer[start..start + 8].copy_from_slice(bytemuck::cast_slice(&floats));
    }
}

/// Write one four-component element per vertex from a flat array.
fn write_quads<T: bytemuck::Pod>(buffer: &mut [u8], stride: usize, offset: usize, values: &[T]) {
    let element = std::mem::size_of::<T>() * 4;
    for (vertex, quad) in values.chunks_exact(4).enumerate() {
        let start = vertex * stride + offset;
        buffer[start..start + element].copy_from_slice(bytemuck::cast_slice(quad));
    }
}

/// Assemble one interleaved, indexed [`GraphicsMesh`] from a mesh and its
/// resolved normals/tangents.
fn build_mesh(mesh: &Mesh, normals: &[Vec3], tangents: &[Vec3], label: String) -> GraphicsMesh {
    let vertex_count = mesh.positions.len();
    let has_uvs = mesh.tex_coords.len() == vertex_count;
    let has_colors = mesh.colors.len() == vertex_count;
    let has_skinning =
        mesh.skin_indices.len() == vertex_count * 4 && mesh.skin_weights.len() == vertex_count * 4;

    let mut layout = VertexLayout::new().with_attribute(
        VertexAttributeSemantic::Position,
        VertexAttributeFormat::Float3,
    );
    if normals.len() == vertex_count {
        layout = layout.with_attribute(
            VertexAttributeSemantic::Normal,
            VertexAttributeFormat::Float3,
        );
    }
    if tangents.len() == vertex_count {
        layout = layout.with_attribute(
            VertexAttributeSemantic::Tangent,
            VertexAttributeFormat::Float3,
        );
    }
    if has_uvs {
        layout = layout.with_attribute(
            VertexAttributeSemantic::TexCoord0,
            VertexAttributeFormat::Float2,
        );
    }
    if has_colors {
        layout = layout.with_attribute(
            VertexAttributeSemantic::Color,
            VertexAttributeFormat::Float3,
        );
    }
    if has_skinning {
        layout = layout
            .with_attribute(
                VertexAttributeSemantic::Joints,
                VertexAttributeFormat::Uint16x4,
            )
            .with_attribute(
                VertexAttributeSemantic::Weights,
                VertexAttributeFormat::Float4,
            );
    }
    let layout = Arc::new(layout.with_label(label.clone()));

    let stride = layout.stride as usize;
    let mut buffer = vec![0u8; vertex_count * stride];
    for attribute in &layout.attributes {
        let offset = attribute.offset as usize;
        match attribute.semantic {
            VertexAttributeSemantic::Position => {
                write_vec3s(&mut buffer, stride, offset, &mesh.positions)
            }
            VertexAttributeSemantic::Normal => write_vec3s(&mut buffer, stride, offset, normals),
            VertexAttributeSemantic::Tangent => write_vec3s(&mut buffer, stride, offset, tangents),
            VertexAttributeSemantic::TexCoord0 => {
                write_vec2s(&mut buffer, stride, offset, &mesh.tex_coords)
            }
            VertexAttributeSemantic::Color => write_vec3s(&mut buffer, stride, offset, &mesh.colors),
            VertexAttributeSemantic::Joints => {
                write_quads(&mut buffer, stride, offset, &mesh.skin_indices)
            }
            VertexAttributeSemantic::Weights => {
                write_quads(&mut buffer, stride, offset, &mesh.skin_weights)
            }
        }
    }

    // Triangles referencing missing vertices are dropped, matching the
    // normal/tangent kernels.
    let indices: Vec<u32> = mesh
        .triangles()
        .filter(|tri| tri.iter().all(|&index| (index as usize) < vertex_count))
        .flatten()
        .collect();
    let graphics_mesh = GraphicsMesh::new(layout)
        .with_vertex_data(buffer)
        .with_label(label);
    match IndexFormat::for_vertex_count(vertex_count) {
        IndexFormat::Uint16 => {
            let narrow: Vec<u16> = indices.iter().map(|&i| i as u16).collect();
            graphics_mesh.with_indices_u16(&narrow)
        }
        IndexFormat::Uint32 => graphics_mesh.with_indices_u32(&indices),
    }
}

/// Converts each mesh's attribute arrays into an interleaved, indexed
/// draw-ready buffer.
///
/// Normals and tangents come from the computation jobs, so authored and
/// derived attributes are handled uniformly. A mesh without positions
/// yields `None` and an error report; the bake continues.
#[derive(Default)]
pub struct BuildGraphicsMesh;

impl Job for BuildGraphicsMesh {
    type Input = (
        Meshes,
        String,
        MeshNamesByIndex,
        NormalsPerMesh,
        TangentsPerMesh,
    );
    type Output = GraphicsMeshes;

    fn run(&mut self, context: &mut BakeContext, input: &Self::Input, output: &mut GraphicsMeshes) {
        let (meshes, url, mesh_names, normals_per_mesh, tangents_per_mesh) = input;

        output.reserve(meshes.len());
        for (index, mesh) in meshes.iter().enumerate() {
            let label = mesh_names
                .get(&index)
                .cloned()
                .unwrap_or_else(|| format!("mesh_{index}"));

            if mesh.positions.is_empty() {
                context.report_error(format!("mesh {index} ('{label}') of {url} has no vertices"));
                output.push(None);
                continue;
            }

            let baked = build_mesh(
                mesh,
                &normals_per_mesh[index],
                &tangents_per_mesh[index],
                label,
            );
            log::debug!(
                "built graphics mesh {index}: {} vertices, {} indices, stride {}",
                baked.vertex_count,
                baked.index_count,
                baked.layout.stride
            );
            output.push(Some(Arc::new(baked)));
        }
    }
}
