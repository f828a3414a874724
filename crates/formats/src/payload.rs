//! Visualization payload as served by the data provider.
//!
//! ```json
//! {
//!   "buildings": [{ "footprint": { "coordinates": [[[0,0],[10,0],[10,10],[0,10],[0,0]]] },
//!                   "height": 20, "color": "#888888" }],
//!   "terrain": { "heightmapUrl": "...", "textureConfig": { ... } },
//!   "vegetation": { "positions": [{ "x": 5, "z": 5 }] },
//!   "bounds": { "minX": -100, "minZ": -100, "maxX": 100, "maxZ": 100 }
//! }
//! ```

use foundation::bounds::BoundsRegion;
use foundation::math::Vec2;
use layers::footprint::FootprintRecord;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::ModelKind;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualizationData {
    #[serde(default)]
    pub buildings: Vec<BuildingFeature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terrain: Option<TerrainPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vegetation: Option<VegetationPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundsPayload>,
}

/// GeoJSON-Polygon-like building. Only the outer ring is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingFeature {
    pub footprint: PolygonGeometry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolygonGeometry {
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundsPayload {
    pub min_x: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_z: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerrainPayload {
    pub heightmap_url: String,
    pub texture_config: TextureConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextureConfig {
    pub diffuse: String,
    pub normal: String,
    pub elevation_scale: f64,
    pub repeat_x: u32,
    pub repeat_y: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VegetationPayload {
    pub positions: Vec<GroundPosition>,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundPosition {
    pub x: f64,
    pub z: f64,
}

/// Borrowed view of one layer of a payload, keyed by [`ModelKind`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayerData<'a> {
    Buildings(&'a [BuildingFeature]),
    Terrain(&'a TerrainPayload),
    Vegetation(&'a VegetationPayload),
}

impl LayerData<'_> {
    pub fn kind(&self) -> ModelKind {
        match self {
            LayerData::Buildings(_) => ModelKind::Buildings,
            LayerData::Terrain(_) => ModelKind::Terrain,
            LayerData::Vegetation(_) => ModelKind::Vegetation,
        }
    }
}

impl From<BoundsPayload> for BoundsRegion {
    fn from(b: BoundsPayload) -> Self {
        BoundsRegion::new(b.min_x, b.min_z, b.max_x, b.max_z)
    }
}

impl From<BoundsRegion> for BoundsPayload {
    fn from(b: BoundsRegion) -> Self {
        Self {
            min_x: b.min_x,
            min_z: b.min_z,
            max_x: b.max_x,
            max_z: b.max_z,
        }
    }
}

impl BuildingFeature {
    /// Outer ring as a footprint record. Holes are not supported and dropped.
    pub fn to_footprint_record(&self) -> FootprintRecord {
        let rings = &self.footprint.coordinates;
        if rings.len() > 1 {
            warn!("building has {} inner rings; holes are ignored", rings.len() - 1);
        }
        let ring = rings
            .first()
            .map(|r| r.iter().map(|[x, y]| Vec2::new(*x, *y)).collect())
            .unwrap_or_default();
        FootprintRecord {
            polygon_ring: ring,
            height: self.height,
            color: self.color.clone(),
        }
    }
}

impl VisualizationData {
    pub fn from_json_str(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }

    pub fn footprint_records(&self) -> Vec<FootprintRecord> {
        self.buildings
            .iter()
            .map(BuildingFeature::to_footprint_record)
            .collect()
    }

    pub fn bounds_region(&self) -> Option<BoundsRegion> {
        self.bounds.map(BoundsRegion::from)
    }

    /// The layer of the given kind, if the payload carries it.
    pub fn layer(&self, kind: ModelKind) -> Option<LayerData<'_>> {
        match kind {
            ModelKind::Buildings if !self.buildings.is_empty() => {
                Some(LayerData::Buildings(&self.buildings))
            }
            ModelKind::Buildings => None,
            ModelKind::Terrain => self.terrain.as_ref().map(LayerData::Terrain),
            ModelKind::Vegetation => self.vegetation.as_ref().map(LayerData::Vegetation),
        }
    }
}
