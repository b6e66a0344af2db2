//! Internal glTF loading logic.
//!
//! Translates a parsed glTF document into the [`Model`] representation the
//! baker consumes. One [`Mesh`] is produced per glTF primitive so that each
//! mesh carries a single homogeneous vertex stream; the primitive's material
//! becomes the mesh's only part.

use std::collections::HashMap;

use crate::math::{Vec2, Vec3};
use crate::model::{Blendshape, Material, Mesh, MeshPart, Model, Texture};

use super::error::GltfError;

/// Material table key for a glTF material: its name when present,
/// otherwise a stable synthetic id.
fn material_id(material: &gltf_dep::Material<'_>) -> String {
    match (material.name(), material.index()) {
        (Some(name), _) => name.to_string(),
        (None, Some(index)) => format!("material_{index}"),
        (None, None) => "default".to_string(),
    }
}

/// Resolve a glTF texture reference into our [`Texture`] record.
fn map_texture(texture: &gltf_dep::Texture<'_>, tex_coord_set: u32) -> Texture {
    let filename = match texture.source().source() {
        gltf_dep::image::Source::Uri { uri, .. } => uri.to_string(),
        gltf_dep::image::Source::View { .. } => String::new(),
    };
    Texture {
        name: texture.name().unwrap_or_default().to_string(),
        filename,
        tex_coord_set,
    }
}

/// Extract all materials into the model's material table.
fn load_materials(document: &gltf_dep::Document) -> HashMap<String, Material> {
    let mut materials = HashMap::new();

    for mat in document.materials() {
        let pbr = mat.pbr_metallic_roughness();
        let normal_texture = mat
            .normal_texture()
            .map(|t| map_texture(&t.texture(), t.tex_coord()));
        let entry = Material {
            name: mat.name().unwrap_or_default().to_string(),
            base_color: pbr.base_color_factor(),
            emissive: mat.emissive_factor(),
            metallic: pbr.metallic_factor(),
            roughness: pbr.roughness_factor(),
            opacity: pbr.base_color_factor()[3],
            use_normal_map: normal_texture.is_some(),
            normal_texture,
            base_color_texture: pbr
                .base_color_texture()
                .map(|t| map_texture(&t.texture(), t.tex_coord())),
            occlusion_texture: mat
                .occlusion_texture()
                .map(|t| map_texture(&t.texture(), t.tex_coord())),
        };
        materials.insert(material_id(&mat), entry);
    }

    materials
}

/// Import morph targets as sparse blendshapes.
///
/// glTF morph targets are dense (one delta per vertex); only vertices with a
/// nonzero position delta are kept. Morph normals and tangents are left for
/// the bake to compute on the deformed surface.
fn load_blendshapes<'a, 's, F>(
    reader: &gltf_dep::mesh::Reader<'a, 's, F>,
    vertex_count: usize,
) -> Vec<Blendshape>
where
    F: Clone + Fn(gltf_dep::Buffer<'a>) -> Option<&'s [u8]>,
{
    let mut blendshapes = Vec::new();

    for (positions, _normals, _tangents) in reader.read_morph_targets() {
        let mut shape = Blendshape::default();
        if let Some(position_deltas) = positions {
            for (index, delta) in position_deltas.enumerate().take(vertex_count) {
                if delta != [0.0, 0.0, 0.0] {
                    shape.indices.push(index as u32);
                    shape
                        .position_deltas
                        .push(Vec3::new(delta[0], delta[1], delta[2]));
                }
            }
        }
        blendshapes.push(shape);
    }

    if !blendshapes.is_empty() {
        log::debug!(
            "imported {} morph targets; normals/tangents will be computed by the bake",
            blendshapes.len()
        );
    }

    blendshapes
}

/// Build one [`Mesh`] from a glTF primitive.
fn load_primitive(
    mesh_index: usize,
    primitive_index: usize,
    primitive: &gltf_dep::Primitive<'_>,
    buffers: &[gltf_dep::buffer::Data],
) -> Result<Mesh, GltfError> {
    if primitive.mode() != gltf_dep::mesh::Mode::Triangles {
        return Err(GltfError::UnsupportedTopology(format!(
            "{:?}",
            primitive.mode()
        )));
    }

    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| &data.0[..]));

    let positions: Vec<Vec3> = reader
        .read_positions()
        .ok_or(GltfError::MissingPositions {
            mesh: mesh_index,
            primitive: primitive_index,
        })?
        .map(|p| Vec3::new(p[0], p[1], p[2]))
        .collect();

    let normals: Vec<Vec3> = reader
        .read_normals()
        .map(|iter| iter.map(|n| Vec3::new(n[0], n[1], n[2])).collect())
        .unwrap_or_default();

    // glTF tangents are float4 with handedness in w; the pipeline carries
    // the xyz direction only.
    let tangents: Vec<Vec3> = reader
        .read_tangents()
        .map(|iter| iter.map(|t| Vec3::new(t[0], t[1], t[2])).collect())
        .unwrap_or_default();

    let tex_coords: Vec<Vec2> = reader
        .read_tex_coords(0)
        .map(|iter| {
            iter.into_f32()
                .map(|uv| Vec2::new(uv[0], uv[1]))
                .collect()
        })
        .unwrap_or_default();

    let colors: Vec<Vec3> = reader
        .read_colors(0)
        .map(|iter| {
            iter.into_rgb_f32()
                .map(|c| Vec3::new(c[0], c[1], c[2]))
                .collect()
        })
        .unwrap_or_default();

    let skin_indices: Vec<u16> = reader
        .read_joints(0)
        .map(|iter| iter.into_u16().flatten().collect())
        .unwrap_or_default();

    let skin_weights: Vec<f32> = reader
        .read_weights(0)
        .map(|iter| iter.into_f32().flatten().collect())
        .unwrap_or_default();

    // Non-indexed primitives get a sequential index list so every mesh is
    // uniformly indexed downstream.
    let triangle_indices: Vec<u32> = reader
        .read_indices()
        .map(|indices| indices.into_u32().collect())
        .unwrap_or_else(|| (0..positions.len() as u32).collect());

    let blendshapes = load_blendshapes(&reader, positions.len());

    Ok(Mesh {
        parts: vec![MeshPart {
            triangle_indices,
            material_id: material_id(&primitive.material()),
        }],
        positions,
        normals,
        tangents,
        colors,
        tex_coords,
        skin_indices,
        skin_weights,
        blendshapes,
        graphics_mesh: None,
    })
}

/// Load a model from a glTF file on disk.
pub(crate) fn load_model_from_path(path: &std::path::Path) -> Result<Model, GltfError> {
    let (document, buffers, _images) = gltf_dep::import(path)?;

    let mut model = Model {
        source_url: path.display().to_string(),
        materials: load_materials(&document),
        ..Model::default()
    };

    for mesh in document.meshes() {
        for (primitive_index, primitive) in mesh.primitives().enumerate() {
            match load_primitive(mesh.index(), primitive_index, &primitive, &buffers) {
                Ok(loaded) => {
                    let flat_index = model.meshes.len();
                    if let Some(name) = mesh.name() {
                        model.mesh_names.insert(flat_index, name.to_string());
                    }
                    model.meshes.push(loaded);
                }
                Err(GltfError::UnsupportedTopology(mode)) => {
                    log::warn!(
                        "skipping mesh {} primitive {}: unsupported topology {}",
                        mesh.index(),
                        primitive_index,
                        mode
                    );
                }
                Err(other) => return Err(other),
            }
        }
    }

    log::info!(
        "loaded {} meshes, {} materials from {}",
        model.meshes.len(),
        model.materials.len(),
        model.source_url
    );

    Ok(model)
}
