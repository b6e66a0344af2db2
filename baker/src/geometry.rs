//! Vertex attribute computation shared by the geometry jobs.
//!
//! All functions tolerate malformed input locally: out-of-range indices
//! are skipped, zero-area triangles contribute nothing, and vertices left
//! without a usable accumulation get a zero (normals) or axis-fallback
//! (tangents) value instead of NaN.

use kiln_core::math::{normalize_or_zero, Vec2, Vec3};
use kiln_core::model::Blendshape;

/// Compute face-area-weighted vertex normals for an indexed triangle
/// surface.
///
/// The unnormalized cross product of each triangle's edges is accumulated
/// at its three corners, so larger faces weigh more, then each sum is
/// normalized. Output length always equals `positions.len()`.
pub fn calculate_normals(
    positions: &[Vec3],
    triangles: impl Iterator<Item = [u32; 3]>,
) -> Vec<Vec3> {
    let mut accumulated = vec![Vec3::zeros(); positions.len()];

    for [i0, i1, i2] in triangles {
        let (a, b, c) = (i0 as usize, i1 as usize, i2 as usize);
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let face = (positions[b] - positions[a]).cross(&(positions[c] - positions[a]));
        accumulated[a] += face;
        accumulated[b] += face;
        accumulated[c] += face;
    }

    accumulated.into_iter().map(normalize_or_zero).collect()
}

/// Compute per-vertex tangents from positions, texture coordinates, and
/// the already-resolved vertex normals.
///
/// Per-triangle tangents are derived from the texture-space edge deltas,
/// accumulated per vertex, then Gram-Schmidt orthonormalized against the
/// vertex normal. Callers must pass `tex_coords` and `normals` parallel
/// to `positions`. Output length always equals `positions.len()`.
pub fn calculate_tangents(
    positions: &[Vec3],
    tex_coords: &[Vec2],
    normals: &[Vec3],
    triangles: impl Iterator<Item = [u32; 3]>,
) -> Vec<Vec3> {
    debug_assert_eq!(positions.len(), tex_coords.len());
    debug_assert_eq!(positions.len(), normals.len());

    let mut accumulated = vec![Vec3::zeros(); positions.len()];

    for [i0, i1, i2] in triangles {
        let (a, b, c) = (i0 as usize, i1 as usize, i2 as usize);
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }

        let edge1 = positions[b] - positions[a];
        let edge2 = positions[c] - positions[a];
        let duv1 = tex_coords[b] - tex_coords[a];
        let duv2 = tex_coords[c] - tex_coords[a];

        // Degenerate UV mapping: the triangle spans no texture area.
        let det = duv1.x * duv2.y - duv2.x * duv1.y;
        if det.abs() <= f32::EPSILON {
            continue;
        }

        let tangent = (edge1 * duv2.y - edge2 * duv1.y) / det;
        accumulated[a] += tangent;
        accumulated[b] += tangent;
        accumulated[c] += tangent;
    }

    accumulated
        .into_iter()
        .zip(normals.iter())
        .map(|(tangent, normal)| orthonormal_tangent(tangent, *normal))
        .collect()
}

/// Gram-Schmidt the accumulated tangent against the vertex normal,
/// falling back to an arbitrary perpendicular axis when the accumulation
/// collapsed (no UV area, or tangent parallel to the normal).
fn orthonormal_tangent(tangent: Vec3, normal: Vec3) -> Vec3 {
    let projected = tangent - normal * normal.dot(&tangent);
    let result = normalize_or_zero(projected);
    if result != Vec3::zeros() {
        return result;
    }

    // Pick the world axis least aligned with the normal.
    let axis = if normal.x.abs() < 0.9 {
        Vec3::x()
    } else {
        Vec3::y()
    };
    normalize_or_zero(axis - normal * normal.dot(&axis))
}

/// Apply a blendshape's position deltas to a copy of the base positions.
///
/// Out-of-range indices are ignored.
pub fn apply_blendshape(positions: &[Vec3], shape: &Blendshape) -> Vec<Vec3> {
    let mut deformed = positions.to_vec();
    for (&index, delta) in shape.indices.iter().zip(shape.position_deltas.iter()) {
        if let Some(position) = deformed.get_mut(index as usize) {
            *position += *delta;
        }
    }
    deformed
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::math::{vec2, vec3};

    const TOLERANCE: f32 = 1e-4;

    fn xy_quad() -> (Vec<Vec3>, Vec<[u32; 3]>) {
        let positions = vec![
            vec3(0.0, 0.0, 0.0),
            vec3(1.0, 0.0, 0.0),
            vec3(1.0, 1.0, 0.0),
            vec3(0.0, 1.0, 0.0),
        ];
        let triangles = vec![[0, 1, 2], [0, 2, 3]];
        (positions, triangles)
    }

    #[test]
    fn test_flat_quad_normals_point_up_z() {
        let (positions, triangles) = xy_quad();
        let normals = calculate_normals(&positions, triangles.into_iter());
        assert_eq!(normals.len(), 4);
        for normal in normals {
            assert!((normal - vec3(0.0, 0.0, 1.0)).norm() < TOLERANCE);
        }
    }

    #[test]
    fn test_normals_are_unit_length() {
        let (positions, triangles) = xy_quad();
        for normal in calculate_normals(&positions, triangles.into_iter()) {
            assert!((normal.norm() - 1.0).abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_unreferenced_vertex_gets_zero_normal() {
        let mut positions = xy_quad().0;
        positions.push(vec3(5.0, 5.0, 5.0));
        let normals = calculate_normals(&positions, vec![[0, 1, 2]].into_iter());
        assert_eq!(normals.len(), 5);
        assert_eq!(normals[4], Vec3::zeros());
    }

    #[test]
    fn test_out_of_range_triangle_is_skipped() {
        let (positions, _) = xy_quad();
        let normals = calculate_normals(&positions, vec![[0, 1, 99]].into_iter());
        assert_eq!(normals.len(), 4);
        for normal in normals {
            assert_eq!(normal, Vec3::zeros());
        }
    }

    #[test]
    fn test_tangents_follow_u_direction() {
        let (positions, triangles) = xy_quad();
        // UVs aligned with XY: the tangent (du direction) is +X.
        let tex_coords = vec![
            vec2(0.0, 0.0),
            vec2(1.0, 0.0),
            vec2(1.0, 1.0),
            vec2(0.0, 1.0),
        ];
        let normals = vec![vec3(0.0, 0.0, 1.0); 4];
        let tangents =
            calculate_tangents(&positions, &tex_coords, &normals, triangles.into_iter());
        assert_eq!(tangents.len(), 4);
        for tangent in tangents {
            assert!((tangent - vec3(1.0, 0.0, 0.0)).norm() < TOLERANCE);
        }
    }

    #[test]
    fn test_tangents_are_perpendicular_to_normals() {
        let (positions, triangles) = xy_quad();
        let tex_coords = vec![
            vec2(0.0, 0.0),
            vec2(0.7, 0.1),
            vec2(0.9, 0.8),
            vec2(0.2, 0.6),
        ];
        let normals = calculate_normals(&positions, triangles.clone().into_iter());
        let tangents =
            calculate_tangents(&positions, &tex_coords, &normals, triangles.into_iter());
        for (tangent, normal) in tangents.iter().zip(normals.iter()) {
            assert!(tangent.dot(normal).abs() < TOLERANCE);
            assert!((tangent.norm() - 1.0).abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_degenerate_uvs_fall_back_to_axis() {
        let (positions, triangles) = xy_quad();
        let tex_coords = vec![vec2(0.5, 0.5); 4];
        let normals = vec![vec3(0.0, 0.0, 1.0); 4];
        let tangents =
            calculate_tangents(&positions, &tex_coords, &normals, triangles.into_iter());
        for tangent in tangents {
            assert!((tangent.norm() - 1.0).abs() < TOLERANCE);
            assert!(tangent.dot(&vec3(0.0, 0.0, 1.0)).abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_apply_blendshape_moves_only_indexed_vertices() {
        let (positions, _) = xy_quad();
        let shape = Blendshape {
            indices: vec![1, 3, 42],
            position_deltas: vec![
                vec3(0.0, 0.0, 1.0),
                vec3(0.0, 0.0, 2.0),
                vec3(9.0, 9.0, 9.0),
            ],
            ..Blendshape::default()
        };
        let deformed = apply_blendshape(&positions, &shape);
        assert_eq!(deformed.len(), 4);
        assert_eq!(deformed[0], positions[0]);
        assert_eq!(deformed[1], vec3(1.0, 0.0, 1.0));
        assert_eq!(deformed[3], vec3(0.0, 1.0, 2.0));
    }
}
