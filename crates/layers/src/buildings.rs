//! Footprint extrusion: [`FootprintRecord`]s in, renderable [`Solid`]s out.
//!
//! A build is all-or-nothing only for the coordinate scale. Each record is
//! validated on its own; bad records are logged and reported in
//! [`BuildOutput::rejected`] while the rest of the batch still renders.

use scene::components::Solid;
use tracing::{debug, warn};

use crate::error::{BuildError, GeometryError};
use crate::extrude::{extrude_ring, upright_transform};
use crate::footprint::{FootprintRecord, PlanarRing};
use crate::symbology::BuildingStyle;

/// Planar data units to scene units.
pub const DEFAULT_COORDINATE_SCALE: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    /// Position of the record in the input batch.
    pub index: usize,
    pub error: GeometryError,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct BuildOutput {
    /// Surviving records, in input order.
    pub solids: Vec<Solid>,
    pub rejected: Vec<RejectedRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeometryBuilder {
    scale: f64,
    style: BuildingStyle,
}

impl GeometryBuilder {
    pub fn new(coordinate_scale: f64) -> Result<Self, BuildError> {
        if !(coordinate_scale.is_finite() && coordinate_scale > 0.0) {
            return Err(BuildError::InvalidScale(coordinate_scale));
        }
        Ok(Self {
            scale: coordinate_scale,
            style: BuildingStyle::default(),
        })
    }

    pub fn with_style(mut self, style: BuildingStyle) -> Self {
        self.style = style;
        self
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn build_one(&self, record: &FootprintRecord) -> Result<Solid, GeometryError> {
        let ring = PlanarRing::from_scaled(&record.polygon_ring, self.scale)?;
        let depth = record.resolved_height()?;
        let transform = upright_transform();
        let mesh = extrude_ring(&ring, depth, &transform)?;

        Ok(Solid {
            base_shape: ring.closed_points().to_vec(),
            extrude_depth: depth,
            transform,
            material: self.style.resolve(record.color.as_deref()),
            mesh,
        })
    }

    pub fn build(&self, records: &[FootprintRecord]) -> BuildOutput {
        let mut out = BuildOutput::default();
        for (index, record) in records.iter().enumerate() {
            match self.build_one(record) {
                Ok(solid) => out.solids.push(solid),
                Err(error) => {
                    warn!("skipping building {index}: {error}");
                    out.rejected.push(RejectedRecord { index, error });
                }
            }
        }
        debug!(
            "built {} solids ({} rejected) at scale {}",
            out.solids.len(),
            out.rejected.len(),
            self.scale
        );
        out
    }
}

/// One-shot [`GeometryBuilder::build`] with the default style.
pub fn build_solids(
    records: &[FootprintRecord],
    coordinate_scale: f64,
) -> Result<BuildOutput, BuildError> {
    Ok(GeometryBuilder::new(coordinate_scale)?.build(records))
}
