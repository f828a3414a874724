/// Axis-aligned rectangle on the ground plane (scene X/Z).
///
/// Construction does not validate; consumers that need the `min <= max`
/// invariant check [`BoundsRegion::is_well_formed`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundsRegion {
    pub min_x: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_z: f64,
}

impl BoundsRegion {
    pub fn new(min_x: f64, min_z: f64, max_x: f64, max_z: f64) -> Self {
        Self {
            min_x,
            min_z,
            max_x,
            max_z,
        }
    }

    /// Finite coordinates with `min_x <= max_x` and `min_z <= max_z`.
    pub fn is_well_formed(&self) -> bool {
        let finite = self.min_x.is_finite()
            && self.min_z.is_finite()
            && self.max_x.is_finite()
            && self.max_z.is_finite();
        finite && self.min_x <= self.max_x && self.min_z <= self.max_z
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn depth(&self) -> f64 {
        self.max_z - self.min_z
    }

    /// Center on the ground plane as `(x, z)`.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_z + self.max_z) / 2.0,
        )
    }

    /// Larger of the two extents.
    pub fn span(&self) -> f64 {
        self.width().max(self.depth())
    }
}

#[cfg(test)]
mod tests {
    use super::BoundsRegion;

    #[test]
    fn symmetric_region_is_centered_on_origin() {
        let b = BoundsRegion::new(-100.0, -100.0, 100.0, 100.0);
        assert!(b.is_well_formed());
        assert_eq!(b.center(), (0.0, 0.0));
        assert_eq!(b.span(), 200.0);
    }

    #[test]
    fn span_uses_larger_extent() {
        let b = BoundsRegion::new(0.0, 0.0, 10.0, 40.0);
        assert_eq!(b.width(), 10.0);
        assert_eq!(b.depth(), 40.0);
        assert_eq!(b.span(), 40.0);
    }

    #[test]
    fn inverted_or_non_finite_regions_are_not_well_formed() {
        assert!(!BoundsRegion::new(10.0, 0.0, 0.0, 10.0).is_well_formed());
        assert!(!BoundsRegion::new(0.0, 10.0, 10.0, 0.0).is_well_formed());
        assert!(!BoundsRegion::new(f64::NAN, 0.0, 1.0, 1.0).is_well_formed());
        assert!(BoundsRegion::new(5.0, 5.0, 5.0, 5.0).is_well_formed());
    }
}
