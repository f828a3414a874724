//! Data provider abstraction for visualization payloads.
//!
//! A `DataProvider` answers "what is within `radius` meters of this point"
//! with buildings, terrain, vegetation and scene bounds. The spatial database
//! backend is not implemented; [`StubDataProvider`] serves a fixed scene.

use std::future::Future;
use std::pin::Pin;

use formats::payload::{
    BoundsPayload, BuildingFeature, GroundPosition, PolygonGeometry, TerrainPayload,
    TextureConfig, VegetationPayload, VisualizationData,
};

use crate::geocode::Coordinates;

/// Error type for data provider operations.
#[derive(Debug)]
pub struct DataSourceError {
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl std::fmt::Display for DataSourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DataSourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as _)
    }
}

impl DataSourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }
}

/// Type alias for a boxed future that can be sent between threads.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Area of interest for a visualization request.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VisualizationQuery {
    pub center: Coordinates,
    pub radius_m: f64,
}

/// Implementations must be `Send + Sync` for use across async tasks.
pub trait DataProvider: Send + Sync {
    fn name(&self) -> &str;

    fn visualization_data(
        &self,
        query: VisualizationQuery,
    ) -> BoxFuture<'_, Result<VisualizationData, DataSourceError>>;
}

/// Fixed scene: one 10x10 building, placeholder terrain textures, two trees,
/// and ±100 bounds. Ignores the query.
#[derive(Debug, Clone, Default)]
pub struct StubDataProvider;

impl StubDataProvider {
    pub fn payload() -> VisualizationData {
        let square = vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]];
        VisualizationData {
            buildings: vec![BuildingFeature {
                footprint: PolygonGeometry {
                    coordinates: vec![square],
                },
                height: Some(20.0),
                color: Some("#888888".to_string()),
            }],
            terrain: Some(TerrainPayload {
                heightmap_url: "/placeholder/heightmap.png".to_string(),
                texture_config: TextureConfig {
                    diffuse: "/placeholder/terrain_diffuse.jpg".to_string(),
                    normal: "/placeholder/terrain_normal.jpg".to_string(),
                    elevation_scale: 50.0,
                    repeat_x: 10,
                    repeat_y: 10,
                },
            }),
            vegetation: Some(VegetationPayload {
                positions: vec![
                    GroundPosition { x: 5.0, z: 5.0 },
                    GroundPosition { x: -5.0, z: -5.0 },
                ],
            }),
            bounds: Some(BoundsPayload {
                min_x: -100.0,
                min_z: -100.0,
                max_x: 100.0,
                max_z: 100.0,
            }),
        }
    }
}

impl DataProvider for StubDataProvider {
    fn name(&self) -> &str {
        "stub"
    }

    fn visualization_data(
        &self,
        _query: VisualizationQuery,
    ) -> BoxFuture<'_, Result<VisualizationData, DataSourceError>> {
        Box::pin(async { Ok(Self::payload()) })
    }
}
