use foundation::math::{Vec2, Vec3};

use crate::components::{ComponentBounds, Material, Transform};

/// Indexed triangle mesh in world space.
///
/// Faces are flat shaded: caps and each wall quad own their vertices, so
/// positions repeat across faces while the surface stays closed.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SolidMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl SolidMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                self.positions[tri[0] as usize],
                self.positions[tri[1] as usize],
                self.positions[tri[2] as usize],
            ]
        })
    }

    /// Divergence-theorem volume; positive when every face winds outward.
    pub fn signed_volume(&self) -> f64 {
        self.triangles()
            .map(|[a, b, c]| a.dot(b.cross(c)) / 6.0)
            .sum()
    }

    pub fn bounds(&self) -> Option<ComponentBounds> {
        ComponentBounds::from_points(&self.positions)
    }
}

/// One extruded building, ready to hand to a renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Solid {
    /// Footprint in the shape plane, closing point included.
    pub base_shape: Vec<Vec2>,
    pub extrude_depth: f64,
    /// Shape plane to world: extrusion along world up, base at elevation 0.
    pub transform: Transform,
    pub material: Material,
    pub mesh: SolidMesh,
}
