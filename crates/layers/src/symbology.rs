use foundation::color::{DEFAULT_GRAY, Rgb};
use scene::components::Material;
use tracing::warn;

/// Surface parameters applied to every building of a build.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BuildingStyle {
    pub fallback_color: Rgb,
    pub roughness: f32,
    pub metalness: f32,
}

impl BuildingStyle {
    pub const fn new(fallback_color: Rgb, roughness: f32, metalness: f32) -> Self {
        Self {
            fallback_color,
            roughness,
            metalness,
        }
    }

    /// Record color when present and parseable, otherwise the fallback.
    pub fn resolve(&self, color: Option<&str>) -> Material {
        let color = match color.map(Rgb::from_hex) {
            Some(Ok(c)) => c,
            Some(Err(err)) => {
                warn!("{err}; using {}", self.fallback_color);
                self.fallback_color
            }
            None => self.fallback_color,
        };
        Material {
            color,
            roughness: self.roughness,
            metalness: self.metalness,
        }
    }
}

impl Default for BuildingStyle {
    fn default() -> Self {
        let m = Material::standard(DEFAULT_GRAY);
        Self::new(m.color, m.roughness, m.metalness)
    }
}

#[cfg(test)]
mod tests {
    use super::BuildingStyle;
    use foundation::color::{DEFAULT_GRAY, Rgb};

    #[test]
    fn explicit_color_wins() {
        let m = BuildingStyle::default().resolve(Some("#ff0000"));
        assert_eq!(m.color, Rgb::new(255, 0, 0));
        assert_eq!(m.roughness, 0.7);
        assert_eq!(m.metalness, 0.1);
    }

    #[test]
    fn missing_or_bad_color_falls_back_to_gray() {
        let style = BuildingStyle::default();
        assert_eq!(style.resolve(None).color, DEFAULT_GRAY);
        assert_eq!(style.resolve(Some("not-a-color")).color, DEFAULT_GRAY);
    }

    #[test]
    fn custom_fallback_is_used() {
        let style = BuildingStyle::new(Rgb::new(1, 2, 3), 1.0, 0.0);
        assert_eq!(style.resolve(None).color, Rgb::new(1, 2, 3));
    }
}
