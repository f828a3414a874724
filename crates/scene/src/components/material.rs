use foundation::color::{DEFAULT_GRAY, Rgb};

/// Physically based surface description for a solid.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    pub color: Rgb,
    pub roughness: f32,
    pub metalness: f32,
}

impl Material {
    /// Matte building surface.
    pub const fn standard(color: Rgb) -> Self {
        Self {
            color,
            roughness: 0.7,
            metalness: 0.1,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::standard(DEFAULT_GRAY)
    }
}
