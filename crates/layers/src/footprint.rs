use foundation::math::Vec2;

use crate::error::GeometryError;

/// Height used when a record carries none. Fixed so repeated builds agree.
pub const DEFAULT_BUILDING_HEIGHT: f64 = 30.0;

/// 3 distinct vertices plus the closing point.
pub const MIN_RING_POINTS: usize = 4;

// Relative to the squared ring extent.
const AREA_EPSILON: f64 = 1e-12;

/// One building to extrude.
#[derive(Debug, Clone, PartialEq)]
pub struct FootprintRecord {
    /// Closed ring in projected planar units (first point == last point).
    pub polygon_ring: Vec<Vec2>,
    pub height: Option<f64>,
    pub color: Option<String>,
}

impl FootprintRecord {
    pub fn new(polygon_ring: Vec<Vec2>, height: Option<f64>) -> Self {
        Self {
            polygon_ring,
            height,
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Explicit height if valid, [`DEFAULT_BUILDING_HEIGHT`] if absent.
    pub fn resolved_height(&self) -> Result<f64, GeometryError> {
        match self.height {
            None => Ok(DEFAULT_BUILDING_HEIGHT),
            Some(h) if h.is_finite() && h > 0.0 => Ok(h),
            Some(h) => Err(GeometryError::InvalidHeight { height: h }),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Winding {
    CounterClockwise,
    Clockwise,
}

/// A scaled footprint ring that is closed, simple and has non-zero area.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarRing {
    closed: Vec<Vec2>,
    signed_area: f64,
}

impl PlanarRing {
    /// Scales `ring` uniformly and validates it.
    pub fn from_scaled(ring: &[Vec2], scale: f64) -> Result<Self, GeometryError> {
        if ring.len() < MIN_RING_POINTS {
            return Err(GeometryError::geometry(format!(
                "ring needs at least {MIN_RING_POINTS} points, got {}",
                ring.len()
            )));
        }

        let closed: Vec<Vec2> = ring.iter().map(|p| p.scale(scale)).collect();
        if let Some(i) = closed.iter().position(|p| !p.is_finite()) {
            return Err(GeometryError::geometry(format!(
                "non-finite coordinate at index {i}"
            )));
        }
        if closed.first() != closed.last() {
            return Err(GeometryError::geometry("ring is not closed"));
        }

        let vertices = &closed[..closed.len() - 1];
        let distinct = distinct_count(vertices);
        if distinct < 3 {
            return Err(GeometryError::geometry(format!(
                "ring has {distinct} distinct vertices, needs 3"
            )));
        }

        let n = vertices.len();
        for i in 0..n {
            if vertices[i] == vertices[(i + 1) % n] {
                return Err(GeometryError::geometry(format!(
                    "duplicate consecutive point at index {}",
                    (i + 1) % n
                )));
            }
        }

        let signed_area = shoelace(vertices);
        let extent = max_extent(vertices);
        if signed_area.abs() <= AREA_EPSILON * extent * extent {
            return Err(GeometryError::geometry("ring has zero area"));
        }

        if self_intersects(vertices) {
            return Err(GeometryError::geometry("ring is self-intersecting"));
        }

        Ok(Self {
            closed,
            signed_area,
        })
    }

    /// Ring points in input order, closing point included.
    pub fn closed_points(&self) -> &[Vec2] {
        &self.closed
    }

    /// Distinct vertices in input order (closing point dropped).
    pub fn vertices(&self) -> &[Vec2] {
        &self.closed[..self.closed.len() - 1]
    }

    pub fn signed_area(&self) -> f64 {
        self.signed_area
    }

    pub fn area(&self) -> f64 {
        self.signed_area.abs()
    }

    pub fn winding(&self) -> Winding {
        if self.signed_area > 0.0 {
            Winding::CounterClockwise
        } else {
            Winding::Clockwise
        }
    }

    /// Vertices walked counter-clockwise, whatever the input winding.
    pub fn ccw_vertices(&self) -> Vec<Vec2> {
        let mut v = self.vertices().to_vec();
        if self.winding() == Winding::Clockwise {
            v.reverse();
        }
        v
    }
}

fn shoelace(vertices: &[Vec2]) -> f64 {
    let n = vertices.len();
    let twice: f64 = (0..n)
        .map(|i| vertices[i].cross(vertices[(i + 1) % n]))
        .sum();
    twice / 2.0
}

fn distinct_count(vertices: &[Vec2]) -> usize {
    let mut pts: Vec<(f64, f64)> = vertices.iter().map(|p| (p.x, p.y)).collect();
    pts.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
    pts.dedup();
    pts.len()
}

fn max_extent(vertices: &[Vec2]) -> f64 {
    let mut min = vertices[0];
    let mut max = vertices[0];
    for p in vertices {
        min = Vec2::new(min.x.min(p.x), min.y.min(p.y));
        max = Vec2::new(max.x.max(p.x), max.y.max(p.y));
    }
    (max.x - min.x).max(max.y - min.y)
}

fn orient(a: Vec2, b: Vec2, c: Vec2) -> f64 {
    (b - a).cross(c - a)
}

// `p` lies within the bounding box of segment `a`-`b` (collinearity checked by caller).
fn within(a: Vec2, b: Vec2, p: Vec2) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

fn segments_touch(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> bool {
    let d1 = orient(p3, p4, p1);
    let d2 = orient(p3, p4, p2);
    let d3 = orient(p1, p2, p3);
    let d4 = orient(p1, p2, p4);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && within(p3, p4, p1))
        || (d2 == 0.0 && within(p3, p4, p2))
        || (d3 == 0.0 && within(p1, p2, p3))
        || (d4 == 0.0 && within(p1, p2, p4))
}

/// Pairwise edge test. Footprints are small, so the quadratic scan is fine.
fn self_intersects(vertices: &[Vec2]) -> bool {
    let n = vertices.len();
    let edge = |i: usize| (vertices[i], vertices[(i + 1) % n]);

    for i in 0..n {
        let (a, b) = edge(i);

        // Adjacent edge folding back over this one.
        let c = vertices[(i + 2) % n];
        let (u, w) = (a - b, c - b);
        if u.cross(w) == 0.0 && (u.x * w.x + u.y * w.y) > 0.0 {
            return true;
        }

        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let (c, d) = edge(j);
            if segments_touch(a, b, c, d) {
                return true;
            }
        }
    }
    false
}
