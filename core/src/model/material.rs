//! Material definitions attached to mesh parts.
//!
//! Materials drive one baking decision: whether a mesh needs a tangent
//! basis. Everything else (colors, factors, texture references) is carried
//! through the bake untouched for the downstream renderer.

/// A texture reference within a material.
///
/// The baker never decodes the texture; it only records where it came
/// from so the consumer of a baked model can resolve it.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Texture {
    /// Texture name, if the source format provides one.
    pub name: String,
    /// Path or URL of the texture image.
    pub filename: String,
    /// Texture coordinate set index (0, 1, …).
    pub tex_coord_set: u32,
}

impl Texture {
    /// A texture with no name, file, or content counts as absent.
    pub fn is_null(&self) -> bool {
        self.name.is_empty() && self.filename.is_empty()
    }
}

/// A material referenced by mesh parts through its id.
///
/// Standard PBR metallic-roughness scalars plus the texture slots the
/// baking pipeline cares about.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Material {
    /// Material name (may differ from the id it is registered under).
    pub name: String,
    /// Base color factor `[r, g, b, a]`.
    pub base_color: [f32; 4],
    /// Emissive factor `[r, g, b]`.
    pub emissive: [f32; 3],
    /// Metallic factor (0.0–1.0).
    pub metallic: f32,
    /// Roughness factor (0.0–1.0).
    pub roughness: f32,
    /// Opacity (0.0–1.0).
    pub opacity: f32,
    /// Normal map texture, if any.
    pub normal_texture: Option<Texture>,
    /// Base color texture, if any.
    pub base_color_texture: Option<Texture>,
    /// Occlusion texture, if any.
    pub occlusion_texture: Option<Texture>,
    /// Set by loaders that know the material uses a normal map even when
    /// the texture reference itself could not be resolved.
    pub use_normal_map: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            base_color: [1.0, 1.0, 1.0, 1.0],
            emissive: [0.0, 0.0, 0.0],
            metallic: 0.0,
            roughness: 1.0,
            opacity: 1.0,
            normal_texture: None,
            base_color_texture: None,
            occlusion_texture: None,
            use_normal_map: false,
        }
    }
}

impl Material {
    /// Create a named material with default PBR factors.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Attach a normal map texture.
    pub fn with_normal_texture(mut self, texture: Texture) -> Self {
        self.normal_texture = Some(texture);
        self
    }

    /// Whether meshes using this material need a tangent basis.
    ///
    /// True when a normal map is present; tangent computation is skipped
    /// entirely for meshes whose materials all return false.
    pub fn needs_tangent_space(&self) -> bool {
        self.use_normal_map || self.normal_texture.as_ref().is_some_and(|t| !t.is_null())
    }
}
