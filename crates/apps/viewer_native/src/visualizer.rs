//! Scene state driven by server payloads.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use formats::model::{ModelFormat, ModelKind};
use formats::payload::VisualizationData;
use layers::{BuildError, GeometryBuilder};
use scene::prefabs::install_daylight_rig;
use scene::{CameraFrame, CameraRig, FramingError, World};
use tracing::{info, warn};

use crate::api::{ApiClient, ClientError};

/// How long a notice stays up before it is considered expired.
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub raised_at: Instant,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            raised_at: Instant::now(),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) >= NOTICE_TTL
    }
}

/// Invalid viewer settings, caught before anything is fetched.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Scale(#[from] BuildError),
    #[error(transparent)]
    Camera(#[from] FramingError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderSummary {
    pub spawned: usize,
    pub rejected: usize,
    /// New camera frame, when the payload carried usable bounds.
    pub frame: Option<CameraFrame>,
}

#[derive(Debug)]
pub struct Visualizer {
    world: World,
    rig: CameraRig,
    builder: GeometryBuilder,
    current: Option<VisualizationData>,
    notice: Option<Notice>,
}

impl Visualizer {
    pub fn new(coordinate_scale: f64, elevation_factor: f64) -> Result<Self, SetupError> {
        let builder = GeometryBuilder::new(coordinate_scale)?;
        let rig = CameraRig::try_new(elevation_factor)?;
        let mut world = World::new();
        install_daylight_rig(&mut world);
        Ok(Self {
            world,
            rig,
            builder,
            current: None,
            notice: None,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn camera(&self) -> &CameraRig {
        &self.rig
    }

    pub fn current_data(&self) -> Option<&VisualizationData> {
        self.current.as_ref()
    }

    /// Current notice, dropping it first if it has expired.
    pub fn notice(&mut self, now: Instant) -> Option<&Notice> {
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
        }
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn raise(&mut self, message: impl Into<String>) {
        let notice = Notice::new(message);
        warn!("{}", notice.message);
        self.notice = Some(notice);
    }

    /// Replaces the scene with the payload's buildings and frames the camera
    /// on its bounds. Terrain and vegetation are kept for download only.
    pub fn render_payload(&mut self, data: VisualizationData) -> RenderSummary {
        let out = self.builder.build(&data.footprint_records());
        let spawned = out.solids.len();
        self.world.replace_solids(out.solids);

        let frame = match data.bounds_region() {
            Some(bounds) => match self.rig.apply_bounds(bounds) {
                Ok(frame) => Some(frame),
                Err(err) => {
                    self.raise(format!("Could not frame scene: {err}"));
                    None
                }
            },
            None => None,
        };

        info!("rendered {spawned} buildings ({} rejected)", out.rejected.len());
        self.current = Some(data);
        RenderSummary {
            spawned,
            rejected: out.rejected.len(),
            frame,
        }
    }

    /// Geocode, fetch, render. Failures raise a notice and leave the scene as is.
    pub async fn handle_address(
        &mut self,
        client: &ApiClient,
        address: &str,
        radius_m: Option<f64>,
    ) -> Result<RenderSummary, ClientError> {
        let result = async {
            let coords = client.process_address(address).await?;
            client.get_visualization_data(coords, radius_m).await
        }
        .await;
        match result {
            Ok(data) => Ok(self.render_payload(data)),
            Err(err) => {
                self.raise(format!("Error: {err}"));
                Err(err)
            }
        }
    }

    pub async fn download(
        &mut self,
        client: &ApiClient,
        kind: ModelKind,
        format: ModelFormat,
        out_dir: &Path,
    ) -> Result<PathBuf, ClientError> {
        if self.current.is_none() {
            self.raise(ClientError::NoData.to_string());
            return Err(ClientError::NoData);
        }
        match client.download_model(kind, format, out_dir).await {
            Ok(path) => Ok(path),
            Err(err) => {
                self.raise(format!("Download failed: {err}"));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::time::{Duration, Instant};

    use super::{NOTICE_TTL, Notice, SetupError, Visualizer};
    use crate::api::{ApiClient, ClientError};
    use foundation::math::Vec3;
    use formats::model::{ModelFormat, ModelKind};
    use formats::payload::{BoundsPayload, BuildingFeature, PolygonGeometry, VisualizationData};

    fn building(ring: &[[f64; 2]], height: f64) -> BuildingFeature {
        BuildingFeature {
            footprint: PolygonGeometry {
                coordinates: vec![ring.to_vec()],
            },
            height: Some(height),
            color: None,
        }
    }

    fn square_payload() -> VisualizationData {
        VisualizationData {
            buildings: vec![
                building(
                    &[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]],
                    20.0,
                ),
                building(&[[3.0, 3.0]; 4], 20.0),
            ],
            bounds: Some(BoundsPayload {
                min_x: -100.0,
                min_z: -100.0,
                max_x: 100.0,
                max_z: 100.0,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn renders_buildings_and_frames_camera() {
        let mut viz = Visualizer::new(10.0, 1.5).expect("scale");
        let summary = viz.render_payload(square_payload());

        assert_eq!(summary.spawned, 1);
        assert_eq!(summary.rejected, 1);
        let frame = summary.frame.expect("framed");
        assert_eq!(frame.position, Vec3::new(300.0, 300.0, 300.0));
        assert_eq!(frame.look_at_target, Vec3::ZERO);
        assert_eq!(viz.world().solid_count(), 1);
        assert_eq!(viz.world().lights().len(), 4);
        assert!(viz.current_data().is_some());
    }

    #[test]
    fn rerender_replaces_previous_scene() {
        let mut viz = Visualizer::new(10.0, 1.5).expect("scale");
        viz.render_payload(square_payload());
        let live = viz.world().resources().live_buffers();
        viz.render_payload(square_payload());
        assert_eq!(viz.world().solid_count(), 1);
        assert_eq!(viz.world().resources().live_buffers(), live);
    }

    #[test]
    fn bad_bounds_keep_previous_frame_and_raise_notice() {
        let mut viz = Visualizer::new(10.0, 1.5).expect("scale");
        let before = viz.camera().frame();
        let mut data = square_payload();
        data.bounds = Some(BoundsPayload {
            min_x: 10.0,
            min_z: 0.0,
            max_x: 0.0,
            max_z: 10.0,
        });
        let summary = viz.render_payload(data);
        assert_eq!(summary.frame, None);
        assert_eq!(viz.camera().frame(), before);
        assert!(viz.notice(Instant::now()).is_some());
        // Buildings still render.
        assert_eq!(viz.world().solid_count(), 1);
    }

    #[test]
    fn notices_expire_and_can_be_dismissed() {
        let notice = Notice::new("boom");
        assert!(!notice.is_expired(notice.raised_at));
        assert!(notice.is_expired(notice.raised_at + NOTICE_TTL + Duration::from_millis(1)));

        let mut viz = Visualizer::new(10.0, 1.5).expect("scale");
        let mut data = square_payload();
        data.bounds = Some(BoundsPayload {
            min_x: f64::NAN,
            min_z: 0.0,
            max_x: 1.0,
            max_z: 1.0,
        });
        viz.render_payload(data);
        assert!(viz.notice(Instant::now()).is_some());
        viz.dismiss_notice();
        assert!(viz.notice(Instant::now()).is_none());
    }

    #[tokio::test]
    async fn download_without_data_raises_notice() {
        let mut viz = Visualizer::new(10.0, 1.5).expect("scale");
        // Never contacted.
        let client = ApiClient::new("http://127.0.0.1:9");
        let err = viz
            .download(&client, ModelKind::Buildings, ModelFormat::Stl, Path::new("out"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::NoData));
        let notice = viz.notice(Instant::now()).expect("notice");
        assert_eq!(notice.message, "No data available for download");
    }

    #[test]
    fn invalid_settings_are_rejected_up_front() {
        assert!(matches!(Visualizer::new(0.0, 1.5), Err(SetupError::Scale(_))));
        assert!(matches!(Visualizer::new(10.0, 0.0), Err(SetupError::Camera(_))));
        assert!(matches!(
            Visualizer::new(10.0, f64::NAN),
            Err(SetupError::Camera(_))
        ));
    }
}
