//! Camera placement from ground-plane bounds.
//!
//! [`frame`] is pure: it never touches a live camera. [`CameraRig`] is the
//! stateful holder a viewer applies frames to; it keeps its last good frame
//! when framing fails.

use foundation::bounds::BoundsRegion;
use foundation::math::Vec3;

/// Span substituted for a zero-extent region, in scene units. Matches the
/// orbit controller's minimum distance so the camera never collapses onto
/// its target.
pub const MIN_FRAMING_SPAN: f64 = 10.0;

/// Default distance-to-span ratio for a 75° perspective camera.
pub const DEFAULT_ELEVATION_FACTOR: f64 = 1.5;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraFrame {
    pub position: Vec3,
    pub look_at_target: Vec3,
}

impl CameraFrame {
    pub fn new(position: Vec3, look_at_target: Vec3) -> Self {
        Self {
            position,
            look_at_target,
        }
    }

    pub fn distance(&self) -> f64 {
        (self.position - self.look_at_target).length()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum FramingError {
    #[error("invalid bounds: {0:?}")]
    InvalidBounds(BoundsRegion),
    #[error("elevation factor must be positive and finite, got {0}")]
    InvalidElevationFactor(f64),
}

/// Places the camera diagonally above and outside `bounds`, looking at its
/// center on the ground plane.
///
/// The offset on each of x, y and z is `span * elevation_factor`, where
/// `span` is the larger horizontal extent (or [`MIN_FRAMING_SPAN`] when the
/// region is a single point).
pub fn frame(bounds: BoundsRegion, elevation_factor: f64) -> Result<CameraFrame, FramingError> {
    if !bounds.is_well_formed() {
        return Err(FramingError::InvalidBounds(bounds));
    }
    if !(elevation_factor.is_finite() && elevation_factor > 0.0) {
        return Err(FramingError::InvalidElevationFactor(elevation_factor));
    }

    let (cx, cz) = bounds.center();
    let center = Vec3::new(cx, 0.0, cz);

    let mut span = bounds.span();
    if !span.is_finite() {
        return Err(FramingError::InvalidBounds(bounds));
    }
    if span == 0.0 {
        span = MIN_FRAMING_SPAN;
    }
    let distance = span * elevation_factor;
    let position = Vec3::new(center.x + distance, distance, center.z + distance);
    if !(position.x.is_finite() && position.y.is_finite() && position.z.is_finite()) {
        return Err(FramingError::InvalidBounds(bounds));
    }

    Ok(CameraFrame {
        position,
        look_at_target: center,
    })
}

/// Perspective projection parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Perspective {
    pub fov_y_deg: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for Perspective {
    fn default() -> Self {
        Self {
            fov_y_deg: 75.0,
            near: 0.1,
            far: 10_000.0,
        }
    }
}

/// Orbit controller limits.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrbitLimits {
    pub min_distance: f64,
    pub max_distance: f64,
    /// Keeps the camera above the ground plane.
    pub max_polar_angle_rad: f64,
    pub damping_factor: f64,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self {
            min_distance: MIN_FRAMING_SPAN,
            max_distance: 2_000.0,
            max_polar_angle_rad: std::f64::consts::FRAC_PI_2,
            damping_factor: 0.1,
        }
    }
}

/// Current camera state for a viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    pub perspective: Perspective,
    pub limits: OrbitLimits,
    pub elevation_factor: f64,
    frame: CameraFrame,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            perspective: Perspective::default(),
            limits: OrbitLimits::default(),
            elevation_factor: DEFAULT_ELEVATION_FACTOR,
            frame: CameraFrame::new(Vec3::new(20.0, 15.0, 20.0), Vec3::ZERO),
        }
    }
}

impl CameraRig {
    pub fn new(elevation_factor: f64) -> Self {
        Self {
            elevation_factor,
            ..Self::default()
        }
    }

    /// Like [`CameraRig::new`], but rejects a factor [`frame`] would refuse.
    pub fn try_new(elevation_factor: f64) -> Result<Self, FramingError> {
        if !(elevation_factor.is_finite() && elevation_factor > 0.0) {
            return Err(FramingError::InvalidElevationFactor(elevation_factor));
        }
        Ok(Self::new(elevation_factor))
    }

    pub fn frame(&self) -> CameraFrame {
        self.frame
    }

    /// Frames `bounds` and stores the result. On error the previous frame is
    /// kept unchanged.
    pub fn apply_bounds(&mut self, bounds: BoundsRegion) -> Result<CameraFrame, FramingError> {
        let next = frame(bounds, self.elevation_factor)?;
        self.frame = next;
        Ok(next)
    }

    /// Vertical angle of the camera above the ground plane, in radians.
    pub fn elevation_angle_rad(&self) -> f64 {
        let d = self.frame.position - self.frame.look_at_target;
        let horizontal = (d.x * d.x + d.z * d.z).sqrt();
        d.y.atan2(horizontal)
    }
}

#[cfg(test)]
mod tests {
    use super::{CameraRig, FramingError, MIN_FRAMING_SPAN, frame};
    use foundation::bounds::BoundsRegion;
    use foundation::math::Vec3;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn frames_symmetric_region() {
        let bounds = BoundsRegion::new(-100.0, -100.0, 100.0, 100.0);
        let f = frame(bounds, 1.5).expect("frame");
        assert_eq!(f.look_at_target, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(f.position, Vec3::new(300.0, 300.0, 300.0));
    }

    #[test]
    fn offset_region_is_framed_around_its_center() {
        let bounds = BoundsRegion::new(10.0, 20.0, 30.0, 100.0);
        let f = frame(bounds, 2.0).expect("frame");
        // span = max(20, 80) = 80, distance = 160
        assert_eq!(f.look_at_target, Vec3::new(20.0, 0.0, 60.0));
        assert_eq!(f.position, Vec3::new(180.0, 160.0, 220.0));
    }

    #[test]
    fn point_region_uses_minimum_span() {
        let bounds = BoundsRegion::new(5.0, 5.0, 5.0, 5.0);
        let f = frame(bounds, 1.5).expect("frame");
        assert_eq!(f.look_at_target, Vec3::new(5.0, 0.0, 5.0));

        let offset = f.position - f.look_at_target;
        let floor = MIN_FRAMING_SPAN * 1.5;
        assert!(offset.x >= floor && offset.y >= floor && offset.z >= floor);
        assert!(f.distance() > 0.0);
    }

    #[test]
    fn inverted_region_is_rejected() {
        let bounds = BoundsRegion::new(10.0, 0.0, 0.0, 10.0);
        assert_eq!(frame(bounds, 1.5), Err(FramingError::InvalidBounds(bounds)));
    }

    #[test]
    fn overflowing_extent_is_rejected() {
        let bounds = BoundsRegion::new(-1e308, 0.0, 1e308, 1.0);
        assert_eq!(frame(bounds, 1.5), Err(FramingError::InvalidBounds(bounds)));
        // Finite span, but the camera offset overflows.
        let bounds = BoundsRegion::new(0.0, 0.0, 1.5e308, 1.0);
        assert_eq!(frame(bounds, 1.5), Err(FramingError::InvalidBounds(bounds)));
    }

    #[test]
    fn non_positive_elevation_factor_is_rejected() {
        let bounds = BoundsRegion::new(0.0, 0.0, 1.0, 1.0);
        assert!(matches!(
            frame(bounds, 0.0),
            Err(FramingError::InvalidElevationFactor(_))
        ));
        assert!(matches!(
            frame(bounds, f64::NAN),
            Err(FramingError::InvalidElevationFactor(_))
        ));
    }

    #[test]
    fn try_new_validates_elevation_factor() {
        assert!(CameraRig::try_new(1.5).is_ok());
        for bad in [0.0, -2.0, f64::INFINITY, f64::NAN] {
            assert!(matches!(
                CameraRig::try_new(bad),
                Err(FramingError::InvalidElevationFactor(_))
            ));
        }
    }

    #[test]
    fn rig_keeps_previous_frame_on_error() {
        let mut rig = CameraRig::default();
        let good = rig
            .apply_bounds(BoundsRegion::new(-100.0, -100.0, 100.0, 100.0))
            .expect("frame");
        let err = rig.apply_bounds(BoundsRegion::new(10.0, 0.0, 0.0, 10.0));
        assert!(err.is_err());
        assert_eq!(rig.frame(), good);
    }

    #[test]
    fn framed_camera_sits_about_35_degrees_above_ground() {
        let mut rig = CameraRig::default();
        rig.apply_bounds(BoundsRegion::new(0.0, 0.0, 50.0, 50.0))
            .expect("frame");
        // atan(1 / sqrt(2)) for an equal diagonal offset.
        assert_close(rig.elevation_angle_rad(), (1.0f64 / 2.0f64.sqrt()).atan(), 1e-12);
        assert!(rig.elevation_angle_rad() < rig.limits.max_polar_angle_rad);
    }
}
