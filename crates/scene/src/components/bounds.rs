use foundation::math::Vec3;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ComponentBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl ComponentBounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Tight box around `points`, `None` when empty.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Self::new(*first, *first);
        for p in rest {
            bounds.min = Vec3::new(
                bounds.min.x.min(p.x),
                bounds.min.y.min(p.y),
                bounds.min.z.min(p.z),
            );
            bounds.max = Vec3::new(
                bounds.max.x.max(p.x),
                bounds.max.y.max(p.y),
                bounds.max.z.max(p.z),
            );
        }
        Some(bounds)
    }

    pub fn union(self, other: Self) -> Self {
        Self::new(
            Vec3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            Vec3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        )
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

#[cfg(test)]
mod tests {
    use super::ComponentBounds;
    use foundation::math::Vec3;

    #[test]
    fn from_points_is_tight() {
        let b = ComponentBounds::from_points(&[
            Vec3::new(1.0, 0.0, -3.0),
            Vec3::new(-2.0, 5.0, 0.0),
            Vec3::new(0.0, 1.0, 4.0),
        ])
        .expect("non-empty");
        assert_eq!(b.min, Vec3::new(-2.0, 0.0, -3.0));
        assert_eq!(b.max, Vec3::new(1.0, 5.0, 4.0));
        assert!(ComponentBounds::from_points(&[]).is_none());
    }

    #[test]
    fn union_covers_both() {
        let a = ComponentBounds::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let b = ComponentBounds::new(Vec3::new(-1.0, 0.5, 0.0), Vec3::new(0.5, 2.0, 0.5));
        let u = a.union(b);
        assert!(u.contains(Vec3::new(-1.0, 2.0, 1.0)));
        assert!(!u.contains(Vec3::new(2.0, 0.0, 0.0)));
    }
}
