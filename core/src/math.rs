//! Math type aliases and helper functions.
//!
//! Geometry baking is always f32; the aliases keep nalgebra out of
//! signatures elsewhere in the workspace.

pub use nalgebra;

/// 2D vector (f32).
pub type Vec2 = nalgebra::Vector2<f32>;

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// 4D vector (f32).
pub type Vec4 = nalgebra::Vector4<f32>;

/// Create a [`Vec2`] from components.
pub fn vec2(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

/// Create a [`Vec3`] from components.
pub fn vec3(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(x, y, z)
}

/// Normalize a vector, falling back to zero for degenerate input.
///
/// Zero-area triangles and unreferenced vertices produce zero-length
/// accumulated normals; those must not become NaN in the output buffers.
pub fn normalize_or_zero(v: Vec3) -> Vec3 {
    let len = v.norm();
    if len > f32::EPSILON {
        v / len
    } else {
        Vec3::zeros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_or_zero_unit() {
        let v = normalize_or_zero(vec3(0.0, 3.0, 4.0));
        assert!((v.norm() - 1.0).abs() < 1e-6);
        assert!((v.y - 0.6).abs() < 1e-6);
        assert!((v.z - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_or_zero_degenerate() {
        assert_eq!(normalize_or_zero(Vec3::zeros()), Vec3::zeros());
    }
}
