use foundation::color::Rgb;
use foundation::math::Vec3;

use crate::World;
use crate::components::{Light, ShadowSettings};

/// Outdoor rig: dim ambient fill, sky/earth hemisphere, a shadow-casting sun
/// and a warm local point light.
pub fn daylight_rig() -> Vec<Light> {
    vec![
        Light::Ambient {
            color: Rgb::new(0x40, 0x40, 0x40),
            intensity: 0.3,
        },
        Light::Hemisphere {
            sky: Rgb::new(0x87, 0xCE, 0xEB),
            ground: Rgb::new(0x8B, 0x45, 0x13),
            intensity: 0.4,
            position: Vec3::new(0.0, 100.0, 0.0),
        },
        Light::Directional {
            color: Rgb::new(0xFF, 0xFF, 0xFF),
            intensity: 0.8,
            position: Vec3::new(100.0, 200.0, 50.0),
            target: Vec3::ZERO,
            shadow: Some(ShadowSettings {
                map_size: 4096,
                near: 1.0,
                far: 1000.0,
                half_extent: 500.0,
                bias: -0.0001,
            }),
        },
        Light::Point {
            color: Rgb::new(0xFF, 0xFF, 0xAA),
            intensity: 0.5,
            position: Vec3::new(50.0, 30.0, 50.0),
            range: 100.0,
            casts_shadow: true,
        },
    ]
}

/// Replaces the world's lights with [`daylight_rig`]. Idempotent.
pub fn install_daylight_rig(world: &mut World) {
    world.set_lights(daylight_rig());
}
