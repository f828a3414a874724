mod api;
mod visualizer;

use std::path::PathBuf;

use clap::Parser;
use formats::model::parse_model_request;
use layers::DEFAULT_COORDINATE_SCALE;
use scene::DEFAULT_ELEVATION_FACTOR;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::api::ApiClient;
use crate::visualizer::Visualizer;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless 3D city viewer")]
struct Args {
    /// Visualization server base URL
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    server: String,

    /// Address to visualize
    #[arg(long, default_value = "San Diego")]
    address: String,

    /// Search radius in meters (server default when omitted)
    #[arg(long)]
    radius: Option<f64>,

    /// Planar data units to scene units
    #[arg(long, default_value_t = DEFAULT_COORDINATE_SCALE)]
    scale: f64,

    /// Camera offset multiplier used when framing
    #[arg(long, default_value_t = DEFAULT_ELEVATION_FACTOR)]
    elevation_factor: f64,

    /// Model type to download after rendering (buildings, terrain, vegetation)
    #[arg(long)]
    download: Option<String>,

    /// Download format (stl, obj, gltf)
    #[arg(long, requires = "download")]
    format: Option<String>,

    /// Output directory for downloads
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let client = ApiClient::new(args.server);
    let mut viz = Visualizer::new(args.scale, args.elevation_factor)?;

    let summary = viz
        .handle_address(&client, &args.address, args.radius)
        .await?;
    let frame = viz.camera().frame();
    info!(
        "{} buildings ({} rejected); camera at ({:.1}, {:.1}, {:.1}) \
         looking at ({:.1}, {:.1}, {:.1})",
        summary.spawned,
        summary.rejected,
        frame.position.x,
        frame.position.y,
        frame.position.z,
        frame.look_at_target.x,
        frame.look_at_target.y,
        frame.look_at_target.z,
    );
    if let Some(bounds) = viz.world().scene_bounds() {
        info!("scene bounds: {:?} .. {:?}", bounds.min, bounds.max);
    }

    if let Some(kind) = args.download.as_deref() {
        let (kind, format) = parse_model_request(kind, args.format.as_deref())?;
        match viz.download(&client, kind, format, &args.out).await {
            Ok(path) => info!("saved {}", path.display()),
            Err(err) => {
                error!("download failed: {err}");
                return Err(err.into());
            }
        }
    }
    Ok(())
}
