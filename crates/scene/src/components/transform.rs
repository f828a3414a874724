use foundation::math::Vec3;

/// Position plus an Euler rotation (radians, applied Z, then Y, then X).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
        }
    }

    pub fn translate(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
        }
    }

    pub fn rotate_x(angle_rad: f64) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::new(angle_rad, 0.0, 0.0),
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Rotates a direction; translation is not applied.
    pub fn apply_vector(&self, v: Vec3) -> Vec3 {
        let (sz, cz) = sin_cos_snapped(self.rotation.z);
        let v = Vec3::new(v.x * cz - v.y * sz, v.x * sz + v.y * cz, v.z);
        let (sy, cy) = sin_cos_snapped(self.rotation.y);
        let v = Vec3::new(v.x * cy + v.z * sy, v.y, -v.x * sy + v.z * cy);
        let (sx, cx) = sin_cos_snapped(self.rotation.x);
        Vec3::new(v.x, v.y * cx - v.z * sx, v.y * sx + v.z * cx)
    }

    pub fn apply_point(&self, p: Vec3) -> Vec3 {
        self.apply_vector(p) + self.position
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// `sin_cos` with quarter turns snapped to exact 0/±1 so axis swaps stay exact.
fn sin_cos_snapped(angle: f64) -> (f64, f64) {
    let quarter = angle / std::f64::consts::FRAC_PI_2;
    let nearest = quarter.round();
    if (quarter - nearest).abs() < 1e-12 {
        return match (nearest as i64).rem_euclid(4) {
            0 => (0.0, 1.0),
            1 => (1.0, 0.0),
            2 => (0.0, -1.0),
            _ => (-1.0, 0.0),
        };
    }
    angle.sin_cos()
}
