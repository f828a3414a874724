use earcutr::earcut;
use foundation::math::{Vec2, Vec3};
use scene::components::{SolidMesh, Transform};

use crate::error::GeometryError;
use crate::footprint::PlanarRing;

/// Shape plane to world: the shape is authored in X/Y with extrusion along +Z;
/// a quarter turn about X puts the extrusion on world +Y with the base at 0.
pub fn upright_transform() -> Transform {
    Transform::rotate_x(-std::f64::consts::FRAC_PI_2)
}

struct MeshWriter<'a> {
    mesh: SolidMesh,
    transform: &'a Transform,
}

impl MeshWriter<'_> {
    fn vertex(&mut self, p: Vec3, n: Vec3) -> u32 {
        let idx = self.mesh.positions.len() as u32;
        self.mesh.positions.push(self.transform.apply_point(p));
        self.mesh.normals.push(self.transform.apply_vector(n));
        idx
    }

    fn triangle(&mut self, a: u32, b: u32, c: u32) {
        self.mesh.indices.extend_from_slice(&[a, b, c]);
    }
}

/// Flat-capped prism over `ring`, `depth` tall, in world space under `transform`.
///
/// Faces wind counter-clockwise seen from outside regardless of the input
/// ring's winding.
pub fn extrude_ring(
    ring: &PlanarRing,
    depth: f64,
    transform: &Transform,
) -> Result<SolidMesh, GeometryError> {
    let verts = ring.ccw_vertices();
    let cap = triangulate_ccw(&verts)?;

    let mut w = MeshWriter {
        mesh: SolidMesh::default(),
        transform,
    };

    // Bottom cap faces -Z (down after reorientation), so its triangles flip.
    let down = Vec3::new(0.0, 0.0, -1.0);
    let base = w.mesh.positions.len() as u32;
    for v in &verts {
        w.vertex(Vec3::new(v.x, v.y, 0.0), down);
    }
    for [a, b, c] in &cap {
        w.triangle(base + a, base + c, base + b);
    }

    let up = Vec3::new(0.0, 0.0, 1.0);
    let base = w.mesh.positions.len() as u32;
    for v in &verts {
        w.vertex(Vec3::new(v.x, v.y, depth), up);
    }
    for [a, b, c] in &cap {
        w.triangle(base + a, base + b, base + c);
    }

    let n = verts.len();
    for i in 0..n {
        let a = verts[i];
        let b = verts[(i + 1) % n];
        let d = b - a;
        // Right of a counter-clockwise edge is outside.
        let normal = Vec3::new(d.y, -d.x, 0.0)
            .normalized()
            .ok_or_else(|| GeometryError::geometry("zero-length edge"))?;

        let a0 = w.vertex(Vec3::new(a.x, a.y, 0.0), normal);
        let b0 = w.vertex(Vec3::new(b.x, b.y, 0.0), normal);
        let b1 = w.vertex(Vec3::new(b.x, b.y, depth), normal);
        let a1 = w.vertex(Vec3::new(a.x, a.y, depth), normal);
        w.triangle(a0, b0, b1);
        w.triangle(a0, b1, a1);
    }

    Ok(w.mesh)
}

/// Ear-clips a counter-clockwise polygon; every returned triangle is
/// counter-clockwise.
fn triangulate_ccw(verts: &[Vec2]) -> Result<Vec<[u32; 3]>, GeometryError> {
    let coords: Vec<f64> = verts.iter().flat_map(|v| [v.x, v.y]).collect();
    let indices = earcut(&coords, &[], 2)
        .map_err(|e| GeometryError::geometry(format!("triangulation failed: {e:?}")))?;
    if indices.is_empty() {
        return Err(GeometryError::geometry("triangulation produced no triangles"));
    }

    let tris = indices
        .chunks_exact(3)
        .map(|t| {
            let (a, b, c) = (t[0], t[1], t[2]);
            if (verts[b] - verts[a]).cross(verts[c] - verts[a]) < 0.0 {
                [a as u32, c as u32, b as u32]
            } else {
                [a as u32, b as u32, c as u32]
            }
        })
        .collect();
    Ok(tris)
}
