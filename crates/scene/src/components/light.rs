use foundation::color::Rgb;
use foundation::math::Vec3;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Light {
    Ambient {
        color: Rgb,
        intensity: f32,
    },
    Hemisphere {
        sky: Rgb,
        ground: Rgb,
        intensity: f32,
        position: Vec3,
    },
    Directional {
        color: Rgb,
        intensity: f32,
        position: Vec3,
        target: Vec3,
        shadow: Option<ShadowSettings>,
    },
    Point {
        color: Rgb,
        intensity: f32,
        position: Vec3,
        range: f64,
        casts_shadow: bool,
    },
}

/// Orthographic shadow frustum for a directional light.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShadowSettings {
    pub map_size: u32,
    pub near: f64,
    pub far: f64,
    pub half_extent: f64,
    pub bias: f64,
}

impl Light {
    pub fn intensity(&self) -> f32 {
        match self {
            Light::Ambient { intensity, .. }
            | Light::Hemisphere { intensity, .. }
            | Light::Directional { intensity, .. }
            | Light::Point { intensity, .. } => *intensity,
        }
    }
}
